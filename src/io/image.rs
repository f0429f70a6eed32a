use crate::core::color::{channel_to_byte, to_rgb8};
use crate::core::framebuffer::FrameBuffer;
use crate::error::{RenderError, Result};
use image::ImageBuffer;
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes the framebuffer as a plain-text PPM (`P3`).
///
/// One pixel per line, row-major, top row first. Channels are scaled to
/// [0, 255] by truncation and alpha is dropped.
pub fn write_ppm<W: Write>(writer: &mut W, framebuffer: &FrameBuffer) -> std::io::Result<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", framebuffer.width, framebuffer.height)?;
    writeln!(writer, "255")?;

    for pixel in framebuffer.pixels() {
        let c = pixel.color;
        writeln!(
            writer,
            "{} {} {}",
            channel_to_byte(c.x),
            channel_to_byte(c.y),
            channel_to_byte(c.z)
        )?;
    }
    Ok(())
}

/// Saves the framebuffer to a PPM file.
pub fn save_ppm<P: AsRef<Path>>(path: P, framebuffer: &FrameBuffer) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_ppm(&mut writer, framebuffer)?;
    writer.flush()?;
    Ok(())
}

/// Saves the framebuffer to an 8-bit RGB PNG file.
pub fn save_png<P: AsRef<Path>>(path: P, framebuffer: &FrameBuffer) -> Result<()> {
    let mut img_buf = ImageBuffer::new(framebuffer.width as u32, framebuffer.height as u32);

    for (x, y, pixel) in img_buf.enumerate_pixels_mut() {
        if let Some(color) = framebuffer.get_color(x as usize, y as usize) {
            *pixel = image::Rgb(to_rgb8(color));
        }
    }

    img_buf.save(path.as_ref())?;
    Ok(())
}

/// Saves the framebuffer, picking the format from the file extension.
pub fn save_image<P: AsRef<Path>>(path: P, framebuffer: &FrameBuffer) -> Result<()> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("ppm") => save_ppm(path, framebuffer)?,
        Some("png") => save_png(path, framebuffer)?,
        _ => {
            return Err(RenderError::UnsupportedFormat {
                path: path.display().to_string(),
            });
        }
    }

    info!(
        "Wrote {}x{} image to '{}'",
        framebuffer.width,
        framebuffer.height,
        path.display()
    );
    Ok(())
}
