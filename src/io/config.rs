use crate::core::geometry::Vertex;
use crate::error::{RenderError, Result};
use crate::scene::mesh::Mesh;
use nalgebra::{Point3, Vector3, Vector4};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Immutable render configuration, built once at startup.
///
/// Every field has a default, and the defaults reproduce the built-in
/// two-triangle scene, so an empty TOML file is a valid config.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub mesh: MeshConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default = "default_true")]
    pub blend_enabled: bool,
    #[serde(default = "default_background")]
    pub background: [f64; 4],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            output: default_output(),
            blend_enabled: true,
            background: default_background(),
        }
    }
}

fn default_width() -> usize {
    800
}
fn default_height() -> usize {
    600
}
fn default_output() -> String {
    "image.ppm".to_string()
}
fn default_true() -> bool {
    true
}
fn default_background() -> [f64; 4] {
    [0.0, 0.0, 0.0, 1.0]
}

#[derive(Debug, Clone, Deserialize)]
pub struct CameraConfig {
    #[serde(default = "default_camera_position")]
    pub position: [f64; 3],
    #[serde(default = "default_camera_front")]
    pub front: [f64; 3],
    #[serde(default = "default_camera_up")]
    pub up: [f64; 3],
    #[serde(default = "default_fov")]
    pub fov_degrees: f64,
    #[serde(default = "default_near")]
    pub near_plane: f64,
    #[serde(default = "default_far")]
    pub far_plane: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: default_camera_position(),
            front: default_camera_front(),
            up: default_camera_up(),
            fov_degrees: default_fov(),
            near_plane: default_near(),
            far_plane: default_far(),
        }
    }
}

/// Below this norm a direction (or the cross product of front and up) is
/// treated as zero.
const MIN_DIRECTION_NORM: f64 = 1e-12;

impl CameraConfig {
    /// Rejects cameras whose look-at basis or projection would be NaN or
    /// infinite: zero or non-finite directions, `up` parallel to `front`,
    /// a field of view outside (0, 180) degrees, or clip planes that do not
    /// satisfy `0 < near < far`.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| -> Result<()> { Err(RenderError::InvalidCamera { reason }) };

        if self.position.iter().any(|c| !c.is_finite()) {
            return invalid(format!("position {:?} is not finite", self.position));
        }
        let front = Vector3::from(self.front);
        let up = Vector3::from(self.up);
        for (name, dir) in [("front", &front), ("up", &up)] {
            if dir.iter().any(|c| !c.is_finite()) || dir.norm() < MIN_DIRECTION_NORM {
                return invalid(format!("{} {:?} is not a usable direction", name, dir.as_slice()));
            }
        }
        if front.normalize().cross(&up.normalize()).norm() < MIN_DIRECTION_NORM {
            return invalid(format!(
                "up {:?} is parallel to front {:?}",
                self.up, self.front
            ));
        }

        if !self.fov_degrees.is_finite() || self.fov_degrees <= 0.0 || self.fov_degrees >= 180.0 {
            return invalid(format!(
                "fov_degrees {} is outside (0, 180)",
                self.fov_degrees
            ));
        }
        if !self.near_plane.is_finite() || self.near_plane <= 0.0 {
            return invalid(format!("near_plane {} must be positive", self.near_plane));
        }
        if !self.far_plane.is_finite() || self.far_plane <= self.near_plane {
            return invalid(format!(
                "far_plane {} must be greater than near_plane {}",
                self.far_plane, self.near_plane
            ));
        }
        Ok(())
    }
}

fn default_camera_position() -> [f64; 3] {
    [0.0, 0.0, 3.0]
}
fn default_camera_front() -> [f64; 3] {
    [0.0, 0.0, -1.0]
}
fn default_camera_up() -> [f64; 3] {
    [0.0, 1.0, 0.0]
}
fn default_fov() -> f64 {
    45.0
}
fn default_near() -> f64 {
    0.1
}
fn default_far() -> f64 {
    1000.0
}

/// Model transform. Rotation is in degrees around X, Y, Z.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    #[serde(default)]
    pub position: [f64; 3],
    #[serde(default)]
    pub rotation: [f64; 3],
    #[serde(default = "default_scale")]
    pub scale: [f64; 3],
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            rotation: [0.0; 3],
            scale: default_scale(),
        }
    }
}

fn default_scale() -> [f64; 3] {
    [1.0, 1.0, 1.0]
}

#[derive(Debug, Clone, Deserialize)]
pub struct VertexConfig {
    pub position: [f64; 3],
    pub color: [f64; 4],
}

#[derive(Debug, Clone, Deserialize)]
pub struct MeshConfig {
    #[serde(default = "default_vertices")]
    pub vertices: Vec<VertexConfig>,
    #[serde(default = "default_indices")]
    pub indices: Vec<u32>,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            vertices: default_vertices(),
            indices: default_indices(),
        }
    }
}

fn default_vertices() -> Vec<VertexConfig> {
    Mesh::create_test_scene()
        .vertices
        .iter()
        .map(|v| VertexConfig {
            position: v.position.coords.into(),
            color: v.color.into(),
        })
        .collect()
}
fn default_indices() -> Vec<u32> {
    Mesh::create_test_scene().indices
}

impl MeshConfig {
    pub fn to_mesh(&self) -> Mesh {
        let vertices = self
            .vertices
            .iter()
            .map(|v| Vertex::new(Point3::from(v.position), Vector4::from(v.color)))
            .collect();
        Mesh::new(vertices, self.indices.clone())
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects configurations that cannot be rendered: an empty or
    /// unallocatable raster, a degenerate camera, or indices that do not
    /// form valid triangles.
    pub fn validate(&self) -> Result<()> {
        let (width, height) = (self.render.width, self.render.height);
        if width == 0 || height == 0 || width.checked_mul(height).is_none() {
            return Err(RenderError::InvalidDimensions { width, height });
        }
        self.camera.validate()?;
        self.mesh.to_mesh().validate()
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.render.width as f64 / self.render.height as f64
    }
}
