use nalgebra::Vector4;

/// Opaque black, the initial value of every pixel.
#[inline]
pub fn background() -> Vector4<f64> {
    Vector4::new(0.0, 0.0, 0.0, 1.0)
}

/// "Over" compositing using the source alpha as the blend factor.
///
/// All four channels are blended, so the destination alpha is attenuated too:
/// `src * src.a + dst * (1 - src.a)`.
#[inline]
pub fn blend_over(src: Vector4<f64>, dst: Vector4<f64>) -> Vector4<f64> {
    let alpha = src.w;
    src * alpha + dst * (1.0 - alpha)
}

/// Converts a [0, 1] channel to [0, 255] by truncation.
#[inline]
pub fn channel_to_byte(channel: f64) -> i32 {
    (channel * 255.0) as i32
}

/// Converts an RGBA color to truncated RGB bytes, discarding alpha.
/// Out-of-range values saturate at the `u8` bounds.
#[inline]
pub fn to_rgb8(color: Vector4<f64>) -> [u8; 3] {
    [
        channel_to_byte(color.x).clamp(0, 255) as u8,
        channel_to_byte(color.y).clamp(0, 255) as u8,
        channel_to_byte(color.z).clamp(0, 255) as u8,
    ]
}
