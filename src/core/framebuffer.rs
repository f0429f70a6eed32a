use crate::core::color::background;
use crate::core::geometry::Vertex;
use nalgebra::{Point3, Vector4};

/// Represents a 2D buffer of resolved pixels.
///
/// Each entry is a [`Vertex`] holding the raster position of its last write and
/// the final RGBA color. Entries are stored row-major, top row first, at
/// `y * width + x`.
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    pixels: Vec<Vertex>,
}

impl FrameBuffer {
    /// Allocates a buffer filled with opaque black.
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_color(width, height, background())
    }

    /// Allocates a buffer with every pixel set to `color`.
    pub fn with_color(width: usize, height: usize, color: Vector4<f64>) -> Self {
        Self {
            width,
            height,
            pixels: vec![Vertex::new(Point3::origin(), color); width * height],
        }
    }

    /// Resets every pixel to `color`.
    pub fn clear(&mut self, color: Vector4<f64>) {
        self.pixels.fill(Vertex::new(Point3::origin(), color));
    }

    #[inline(always)]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Option<&Vertex> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(&self.pixels[self.index(x, y)])
    }

    pub fn get_color(&self, x: usize, y: usize) -> Option<Vector4<f64>> {
        self.get_pixel(x, y).map(|p| p.color)
    }

    /// Overwrites the pixel at (x, y). Out-of-bounds writes are ignored.
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Vector4<f64>) {
        if self.in_bounds(x, y) {
            let idx = self.index(x, y);
            self.pixels[idx] = Vertex::new(Point3::new(x as f64, y as f64, 0.0), color);
        }
    }

    /// All pixels in row-major order.
    pub fn pixels(&self) -> &[Vertex] {
        &self.pixels
    }

    /// Mutable rows `start_y..=end_y`, each `width` pixels long.
    /// Used by the rasterizer to hand disjoint rows to worker threads.
    pub fn rows_mut(&mut self, start_y: usize, end_y: usize) -> &mut [Vertex] {
        let start = start_y * self.width;
        let end = ((end_y + 1) * self.width).min(self.pixels.len());
        &mut self.pixels[start..end]
    }
}
