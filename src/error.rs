//! Error types for configuration, rendering and output.

use std::fmt;
use std::io;

/// Errors surfaced by the render pipeline.
///
/// Degenerate geometry is not an error: such triangles are skipped and logged
/// by the rasterizer. Everything here is either a configuration problem caught
/// before rendering starts, or an I/O failure while reading or writing files.
#[derive(Debug)]
pub enum RenderError {
    /// Reading the config or writing the image failed.
    Io(io::Error),
    /// The config file is not valid TOML for [`crate::io::config::Config`].
    ConfigParse(toml::de::Error),
    /// A triangle references a vertex that does not exist.
    InvalidIndex {
        triangle: usize,
        index: u32,
        vertex_count: usize,
    },
    /// The index list cannot be grouped into triangles.
    IndexCount { len: usize },
    /// Width or height is zero, or the pixel count overflows `usize`.
    InvalidDimensions { width: usize, height: usize },
    /// The camera cannot produce a finite view or projection matrix.
    InvalidCamera { reason: String },
    /// The output path has an extension no writer handles.
    UnsupportedFormat { path: String },
    /// PNG encoding failed.
    Image(image::ImageError),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Io(e) => write!(f, "I/O error: {}", e),
            RenderError::ConfigParse(e) => write!(f, "Failed to parse TOML: {}", e),
            RenderError::InvalidIndex {
                triangle,
                index,
                vertex_count,
            } => write!(
                f,
                "triangle {} references vertex {} but only {} vertices exist",
                triangle, index, vertex_count
            ),
            RenderError::IndexCount { len } => {
                write!(f, "index count {} is not a multiple of 3", len)
            }
            RenderError::InvalidDimensions { width, height } => {
                write!(f, "invalid raster size {}x{}", width, height)
            }
            RenderError::InvalidCamera { reason } => write!(f, "invalid camera: {}", reason),
            RenderError::UnsupportedFormat { path } => {
                write!(f, "unsupported output format for '{}' (use .ppm or .png)", path)
            }
            RenderError::Image(e) => write!(f, "image encoding error: {}", e),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Io(e) => Some(e),
            RenderError::ConfigParse(e) => Some(e),
            RenderError::Image(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for RenderError {
    fn from(e: io::Error) -> Self {
        RenderError::Io(e)
    }
}

impl From<toml::de::Error> for RenderError {
    fn from(e: toml::de::Error) -> Self {
        RenderError::ConfigParse(e)
    }
}

impl From<image::ImageError> for RenderError {
    fn from(e: image::ImageError) -> Self {
        RenderError::Image(e)
    }
}

pub type Result<T> = std::result::Result<T, RenderError>;
