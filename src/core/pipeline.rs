use crate::core::geometry::Vertex;
use crate::core::math::transform::apply_perspective_division;
use nalgebra::Matrix4;

/// Vertex stage: object space -> clip space -> NDC.
///
/// Returns `None` when the clip-space W is zero and the vertex has no NDC
/// position. The color is carried through unchanged.
#[inline]
pub fn transform_vertex(vertex: &Vertex, mvp: &Matrix4<f64>) -> Option<Vertex> {
    let clip = mvp * vertex.position.to_homogeneous();
    apply_perspective_division(&clip).map(|ndc| vertex.with_position(ndc))
}

/// Runs the vertex stage over a whole vertex list.
///
/// The output has the same length and order as the input, so triangle
/// indices stay valid.
pub fn transform_vertices(vertices: &[Vertex], mvp: &Matrix4<f64>) -> Vec<Option<Vertex>> {
    vertices.iter().map(|v| transform_vertex(v, mvp)).collect()
}
