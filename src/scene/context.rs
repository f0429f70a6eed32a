use crate::scene::camera::Camera;
use crate::scene::mesh::Mesh;
use nalgebra::Matrix4;

/// Everything needed to render one frame.
pub struct SceneContext {
    pub mesh: Mesh,
    pub camera: Camera,
    pub model_matrix: Matrix4<f64>,
}

impl SceneContext {
    pub fn mvp(&self) -> Matrix4<f64> {
        self.camera.mvp(&self.model_matrix)
    }
}
