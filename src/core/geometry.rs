use nalgebra::{Point3, Vector4};

/// Represents a single vertex: a position and an RGBA color.
///
/// Each pipeline stage produces new vertices rather than mutating its input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Object space for scene data, NDC after the transform stage,
    /// raster coordinates inside the pixel buffer.
    pub position: Point3<f64>,
    /// RGBA, each channel nominally in [0, 1].
    pub color: Vector4<f64>,
}

impl Vertex {
    pub fn new(position: Point3<f64>, color: Vector4<f64>) -> Self {
        Self { position, color }
    }

    /// Returns a copy of this vertex moved to `position`, keeping the color.
    pub fn with_position(&self, position: Point3<f64>) -> Self {
        Self {
            position,
            color: self.color,
        }
    }
}
