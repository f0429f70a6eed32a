use crate::core::math::transform::TransformFactory;
use crate::io::config::Config;
use crate::scene::camera::{Camera, degrees_to_radians};
use crate::scene::context::SceneContext;
use log::info;
use nalgebra::{Point3, Vector3};

/// Builds the camera described by the config.
pub fn build_camera_from_config(config: &Config) -> Camera {
    let cam = &config.camera;
    Camera::new_perspective(
        Point3::from(cam.position),
        Vector3::from(cam.front),
        Vector3::from(cam.up),
        degrees_to_radians(cam.fov_degrees),
        config.aspect_ratio(),
        cam.near_plane,
        cam.far_plane,
    )
}

/// Builds the mesh, camera and model matrix for a frame.
pub fn init_scene(config: &Config) -> SceneContext {
    let mesh = config.mesh.to_mesh();
    let camera = build_camera_from_config(config);
    let model_matrix = TransformFactory::model(
        &Vector3::from(config.model.position),
        &Vector3::from(config.model.rotation),
        &Vector3::from(config.model.scale),
    );

    info!(
        "Scene initialized with {} vertices, {} triangles.",
        mesh.vertices.len(),
        mesh.triangle_count()
    );

    SceneContext {
        mesh,
        camera,
        model_matrix,
    }
}
