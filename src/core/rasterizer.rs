use crate::core::color::blend_over;
use crate::core::framebuffer::FrameBuffer;
use crate::core::geometry::Vertex;
use crate::core::math::interpolation::{
    cross2, interpolate_color, interpolation_weights, is_point_in_triangle,
};
use crate::core::math::transform::ndc_to_screen;
use log::warn;
use nalgebra::{Point2, Point3};
use rayon::prelude::*;

/// Triangles with a smaller screen-space twice-area produce no fragments.
const MIN_AREA: f64 = 1e-6;

/// The Rasterizer is responsible for drawing triangles onto the FrameBuffer.
pub struct Rasterizer {
    pub blend_enabled: bool,
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer {
    pub fn new() -> Self {
        Self {
            blend_enabled: true,
        }
    }

    pub fn set_blending(&mut self, enabled: bool) {
        self.blend_enabled = enabled;
    }

    /// Rasterize a single triangle whose vertices are already in NDC.
    ///
    /// Each pixel (x, y) is sampled at the integer point (x, y). Covered pixels
    /// receive the area-weighted vertex color, composited over the current
    /// buffer color when blending is enabled.
    ///
    /// Returns the number of pixels written, which is `Some(0)` when the
    /// triangle is valid but covers no sample (off-screen or thin slivers).
    /// Returns `None` when the triangle is rejected outright: non-finite or
    /// degenerate screen coordinates.
    pub fn rasterize_triangle(
        &self,
        framebuffer: &mut FrameBuffer,
        vertices: &[Vertex; 3],
    ) -> Option<usize> {
        let width = framebuffer.width;
        let height = framebuffer.height;
        if width == 0 || height == 0 {
            return Some(0);
        }

        // 1. Viewport Transform
        let screen_coords = vertices.map(|v| {
            ndc_to_screen(v.position.x, v.position.y, width as f64, height as f64)
        });
        if screen_coords
            .iter()
            .any(|p| !p.x.is_finite() || !p.y.is_finite())
        {
            warn!("Skipping triangle with non-finite screen coordinates");
            return None;
        }

        let [s0, s1, s2] = screen_coords;
        let area = cross2(s1 - s0, s2 - s0).abs();
        if area < MIN_AREA {
            warn!(
                "Skipping degenerate triangle ({:.3}, {:.3}) ({:.3}, {:.3}) ({:.3}, {:.3})",
                s0.x, s0.y, s1.x, s1.y, s2.x, s2.y
            );
            return None;
        }

        // 2. Compute Bounding Box
        let (min_x, min_y, max_x, max_y) = self.compute_bounding_box(&screen_coords);

        // Scissor Test
        if max_x < 0 || max_y < 0 || min_x >= width as i64 || min_y >= height as i64 {
            return Some(0);
        }

        let start_x = min_x.max(0) as usize;
        let end_x = max_x.min(width as i64 - 1) as usize;
        let start_y = min_y.max(0) as usize;
        let end_y = max_y.min(height as i64 - 1) as usize;

        let colors = vertices.map(|v| v.color);
        let blend = self.blend_enabled;

        // 3. Pixel Loop
        // Rows are disjoint, so they can be shaded in parallel; the caller
        // finishes this triangle before starting the next one.
        let written: usize = framebuffer
            .rows_mut(start_y, end_y)
            .par_chunks_mut(width)
            .enumerate()
            .map(|(row, pixels)| {
                let y = start_y + row;
                let mut written = 0;
                for x in start_x..=end_x {
                    let p = Point2::new(x as f64, y as f64);

                    if !is_point_in_triangle(p, s0, s1, s2) {
                        continue;
                    }
                    let Some(weights) = interpolation_weights(p, s0, s1, s2) else {
                        continue;
                    };

                    let src = interpolate_color(&colors, weights);
                    let pixel = &mut pixels[x];
                    let color = if blend {
                        blend_over(src, pixel.color)
                    } else {
                        src
                    };
                    *pixel = Vertex::new(Point3::new(x as f64, y as f64, 0.0), color);
                    written += 1;
                }
                written
            })
            .sum();
        Some(written)
    }

    fn compute_bounding_box(&self, points: &[Point2<f64>; 3]) -> (i64, i64, i64, i64) {
        let min_x = points[0].x.min(points[1].x).min(points[2].x).floor() as i64;
        let min_y = points[0].y.min(points[1].y).min(points[2].y).floor() as i64;
        let max_x = points[0].x.max(points[1].x).max(points[2].x).ceil() as i64;
        let max_y = points[0].y.max(points[1].y).max(points[2].y).ceil() as i64;
        (min_x, min_y, max_x, max_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::color::background;
    use nalgebra::Vector4;

    fn assert_color_near(actual: Option<Vector4<f64>>, expected: Vector4<f64>) {
        let actual = actual.expect("pixel in bounds");
        assert!(
            (actual - expected).norm() < 1e-12,
            "{:?} != {:?}",
            actual,
            expected
        );
    }

    fn ndc_vertex(x: f64, y: f64, color: Vector4<f64>) -> Vertex {
        Vertex::new(Point3::new(x, y, 0.0), color)
    }

    fn full_screen_triangle(color: Vector4<f64>) -> [Vertex; 3] {
        // Every raster sample lies strictly inside, clear of the excluded edge.
        [
            ndc_vertex(-3.0, -3.0, color),
            ndc_vertex(5.0, -3.0, color),
            ndc_vertex(-3.0, 5.0, color),
        ]
    }

    /// Scan of every pixel with no bounding box.
    fn brute_force(fb: &mut FrameBuffer, vertices: &[Vertex; 3], blend: bool) {
        let (w, h) = (fb.width as f64, fb.height as f64);
        let s = vertices.map(|v| ndc_to_screen(v.position.x, v.position.y, w, h));
        let colors = vertices.map(|v| v.color);
        for y in 0..fb.height {
            for x in 0..fb.width {
                let p = Point2::new(x as f64, y as f64);
                if is_point_in_triangle(p, s[0], s[1], s[2]) {
                    let weights = interpolation_weights(p, s[0], s[1], s[2]).unwrap();
                    let src = interpolate_color(&colors, weights);
                    let dst = fb.get_color(x, y).unwrap();
                    let color = if blend { blend_over(src, dst) } else { src };
                    fb.set_pixel(x, y, color);
                }
            }
        }
    }

    #[test]
    fn pixels_outside_the_triangle_keep_the_background() {
        let mut fb = FrameBuffer::new(20, 20);
        let red = Vector4::new(1.0, 0.0, 0.0, 1.0);
        let tri = [
            ndc_vertex(-0.5, -0.5, red),
            ndc_vertex(0.5, -0.5, red),
            ndc_vertex(0.0, 0.5, red),
        ];
        let written = Rasterizer::new().rasterize_triangle(&mut fb, &tri);
        assert!(written.is_some_and(|n| n > 0));
        assert_eq!(fb.get_color(0, 0), Some(background()));
        assert_eq!(fb.get_color(19, 19), Some(background()));
        assert_color_near(fb.get_color(10, 10), red);
    }

    #[test]
    fn opaque_blend_matches_overwrite() {
        let color = Vector4::new(0.3, 0.6, 0.9, 1.0);
        let mut blended = FrameBuffer::new(16, 12);
        let mut replaced = FrameBuffer::new(16, 12);

        let mut rasterizer = Rasterizer::new();
        rasterizer.rasterize_triangle(&mut blended, &full_screen_triangle(color));
        rasterizer.set_blending(false);
        rasterizer.rasterize_triangle(&mut replaced, &full_screen_triangle(color));

        for (a, b) in blended.pixels().iter().zip(replaced.pixels()) {
            assert!((a.color.xyz() - b.color.xyz()).norm() < 1e-12);
        }
    }

    #[test]
    fn half_alpha_blends_every_channel_with_background() {
        let mut fb = FrameBuffer::new(8, 8);
        let src = Vector4::new(0.0, 0.0, 1.0, 0.5);
        Rasterizer::new().rasterize_triangle(&mut fb, &full_screen_triangle(src));
        assert_color_near(fb.get_color(4, 4), Vector4::new(0.0, 0.0, 0.5, 0.75));
    }

    #[test]
    fn disabled_blending_overwrites_with_source() {
        let mut fb = FrameBuffer::new(8, 8);
        let src = Vector4::new(0.0, 0.0, 1.0, 0.5);
        let mut rasterizer = Rasterizer::new();
        rasterizer.set_blending(false);
        rasterizer.rasterize_triangle(&mut fb, &full_screen_triangle(src));
        assert_color_near(fb.get_color(4, 4), src);
    }

    #[test]
    fn later_triangles_composite_over_earlier_ones() {
        let mut fb = FrameBuffer::new(8, 8);
        let rasterizer = Rasterizer::new();
        rasterizer.rasterize_triangle(&mut fb, &full_screen_triangle(Vector4::new(1.0, 0.0, 0.0, 1.0)));
        rasterizer.rasterize_triangle(&mut fb, &full_screen_triangle(Vector4::new(0.0, 1.0, 0.0, 0.5)));
        assert_color_near(fb.get_color(3, 3), Vector4::new(0.5, 0.5, 0.0, 0.75));
    }

    #[test]
    fn bounding_box_scan_matches_full_raster_scan() {
        let tri = [
            ndc_vertex(-0.7, -0.4, Vector4::new(1.0, 0.0, 0.0, 1.0)),
            ndc_vertex(0.9, -0.8, Vector4::new(0.0, 1.0, 0.0, 0.5)),
            ndc_vertex(0.1, 0.95, Vector4::new(0.0, 0.0, 1.0, 0.8)),
        ];
        let mut fast = FrameBuffer::new(64, 48);
        let mut slow = FrameBuffer::new(64, 48);
        Rasterizer::new().rasterize_triangle(&mut fast, &tri);
        brute_force(&mut slow, &tri, true);
        for (a, b) in fast.pixels().iter().zip(slow.pixels()) {
            assert_eq!(a.color, b.color);
        }
    }

    #[test]
    fn degenerate_triangle_is_rejected() {
        let mut fb = FrameBuffer::new(10, 10);
        let white = Vector4::repeat(1.0);
        let tri = [
            ndc_vertex(-0.5, -0.5, white),
            ndc_vertex(0.0, 0.0, white),
            ndc_vertex(0.5, 0.5, white),
        ];
        assert_eq!(Rasterizer::new().rasterize_triangle(&mut fb, &tri), None);
        assert!(fb.pixels().iter().all(|p| p.color == background()));
    }

    #[test]
    fn non_finite_vertices_are_rejected() {
        let mut fb = FrameBuffer::new(10, 10);
        let white = Vector4::repeat(1.0);
        let tri = [
            ndc_vertex(f64::NAN, -0.5, white),
            ndc_vertex(0.5, -0.5, white),
            ndc_vertex(0.0, 0.5, white),
        ];
        assert_eq!(Rasterizer::new().rasterize_triangle(&mut fb, &tri), None);
    }

    #[test]
    fn off_screen_triangle_is_valid_but_empty() {
        let mut fb = FrameBuffer::new(10, 10);
        let white = Vector4::repeat(1.0);
        let tri = [
            ndc_vertex(2.0, 2.0, white),
            ndc_vertex(3.0, 2.0, white),
            ndc_vertex(2.5, 3.0, white),
        ];
        assert_eq!(Rasterizer::new().rasterize_triangle(&mut fb, &tri), Some(0));
    }

    #[test]
    fn sliver_between_samples_is_valid_but_empty() {
        let mut fb = FrameBuffer::new(10, 10);
        let white = Vector4::repeat(1.0);
        // Screen x spans [2.1, 2.9], so no integer sample column is covered.
        let tri = [
            ndc_vertex(-0.58, -0.5, white),
            ndc_vertex(-0.42, -0.5, white),
            ndc_vertex(-0.5, 0.5, white),
        ];
        assert_eq!(Rasterizer::new().rasterize_triangle(&mut fb, &tri), Some(0));
        assert!(fb.pixels().iter().all(|p| p.color == background()));
    }

    #[test]
    fn zero_sized_framebuffer_writes_nothing() {
        let mut fb = FrameBuffer::new(0, 0);
        let white = Vector4::repeat(1.0);
        assert_eq!(
            Rasterizer::new().rasterize_triangle(&mut fb, &full_screen_triangle(white)),
            Some(0)
        );
    }
}
