use crate::core::framebuffer::FrameBuffer;
use crate::core::pipeline::transform_vertices;
use crate::core::rasterizer::Rasterizer;
use crate::error::Result;
use crate::scene::mesh::Mesh;
use log::{debug, warn};
use nalgebra::{Matrix4, Vector4};

/// Counters collected while drawing a mesh.
///
/// Every triangle lands in exactly one of the three triangle counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DrawStats {
    /// Wrote at least one pixel.
    pub triangles_drawn: usize,
    /// Valid, but no pixel sample fell inside (off-screen or between samples).
    pub triangles_empty: usize,
    /// Rejected: zero W, non-finite or degenerate screen coordinates.
    pub triangles_skipped: usize,
    pub pixels_written: usize,
}

/// The high-level renderer that orchestrates the pipeline stages.
pub struct Renderer {
    pub rasterizer: Rasterizer,
    pub framebuffer: FrameBuffer,
}

impl Renderer {
    /// Creates a renderer with a framebuffer cleared to opaque black.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            rasterizer: Rasterizer::new(),
            framebuffer: FrameBuffer::new(width, height),
        }
    }

    /// Clears the framebuffer.
    pub fn clear(&mut self, color: Vector4<f64>) {
        self.framebuffer.clear(color);
    }

    /// Draws a mesh with the given Model-View-Projection matrix.
    ///
    /// All vertices go through the vertex stage first, then triangles are
    /// rasterized strictly in index order so that later triangles blend over
    /// earlier ones. Triangles touching a vertex without an NDC position
    /// (zero W) are skipped.
    pub fn draw_mesh(&mut self, mesh: &Mesh, mvp: &Matrix4<f64>) -> Result<DrawStats> {
        mesh.validate()?;

        // 1. Vertex Processing
        let transformed = transform_vertices(&mesh.vertices, mvp);

        // 2. Primitive Assembly & Rasterization
        let mut stats = DrawStats::default();
        for (i, [i0, i1, i2]) in mesh.triangles().enumerate() {
            let (Some(v0), Some(v1), Some(v2)) = (transformed[i0], transformed[i1], transformed[i2])
            else {
                warn!("Skipping triangle {}: vertex has zero W after projection", i);
                stats.triangles_skipped += 1;
                continue;
            };

            match self
                .rasterizer
                .rasterize_triangle(&mut self.framebuffer, &[v0, v1, v2])
            {
                None => stats.triangles_skipped += 1,
                Some(0) => {
                    debug!("Triangle {} covers no pixel samples", i);
                    stats.triangles_empty += 1;
                }
                Some(written) => {
                    debug!("Triangle {} wrote {} pixels", i, written);
                    stats.triangles_drawn += 1;
                    stats.pixels_written += written;
                }
            }
        }

        Ok(stats)
    }
}
