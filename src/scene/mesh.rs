use crate::core::geometry::Vertex;
use crate::error::{RenderError, Result};
use nalgebra::{Point3, Vector4};

/// A collection of vertices and indices representing the scene geometry.
#[derive(Debug, Clone)]
pub struct Mesh {
    /// List of vertices.
    pub vertices: Vec<Vertex>,
    /// List of indices defining triangles (3 indices per triangle).
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Creates the two-triangle test scene: an upward and a downward triangle
    /// overlapping at the origin, each with one half-transparent corner.
    pub fn create_test_scene() -> Self {
        let red = Vector4::new(1.0, 0.0, 0.0, 1.0);
        let blue = Vector4::new(0.0, 0.0, 1.0, 1.0);

        let vertices = vec![
            Vertex::new(Point3::new(-0.5, -0.5, 0.0), red),
            Vertex::new(Point3::new(0.5, -0.5, 0.0), Vector4::new(0.0, 1.0, 0.0, 0.5)),
            Vertex::new(Point3::new(0.0, 0.5, 0.0), blue),
            Vertex::new(Point3::new(-0.5, 0.5, 0.0), red),
            Vertex::new(Point3::new(0.5, 0.5, 0.0), Vector4::new(0.0, 1.0, 0.0, 1.0)),
            Vertex::new(Point3::new(0.0, -0.5, 0.0), Vector4::new(0.0, 0.0, 1.0, 0.5)),
        ];

        let indices = vec![0, 1, 2, 3, 4, 5];

        Self::new(vertices, indices)
    }

    /// Number of complete triangles in the index list.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Checks that the indices group into triangles and stay in range.
    pub fn validate(&self) -> Result<()> {
        if self.indices.len() % 3 != 0 {
            return Err(RenderError::IndexCount {
                len: self.indices.len(),
            });
        }

        let vertex_count = self.vertices.len();
        for (i, &index) in self.indices.iter().enumerate() {
            if index as usize >= vertex_count {
                return Err(RenderError::InvalidIndex {
                    triangle: i / 3,
                    index,
                    vertex_count,
                });
            }
        }
        Ok(())
    }

    /// Index triples in draw order.
    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|c| [c[0] as usize, c[1] as usize, c[2] as usize])
    }
}
