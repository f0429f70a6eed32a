use crate::core::math::transform::TransformFactory;
use nalgebra::{Matrix4, Point3, Vector3};
use std::f64::consts::PI;

/// Converts degrees to radians as `deg * PI / 180`.
pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

/// Manages the View and Projection matrices of a perspective camera.
///
/// The camera looks from `position` along `front`.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3<f64>,
    pub front: Vector3<f64>,
    pub up: Vector3<f64>,
    pub fov_y_rad: f64,
    pub aspect_ratio: f64,
    pub near: f64,
    pub far: f64,

    // --- Cached Matrices ---
    view_matrix: Matrix4<f64>,
    projection_matrix: Matrix4<f64>,
}

impl Camera {
    pub fn new_perspective(
        position: Point3<f64>,
        front: Vector3<f64>,
        up: Vector3<f64>,
        fov_y_rad: f64,
        aspect_ratio: f64,
        near: f64,
        far: f64,
    ) -> Self {
        let mut cam = Self {
            position,
            front,
            up,
            fov_y_rad,
            aspect_ratio,
            near,
            far,
            view_matrix: Matrix4::identity(),
            projection_matrix: Matrix4::identity(),
        };
        cam.update_matrices();
        cam
    }

    /// Point the camera is looking at.
    pub fn target(&self) -> Point3<f64> {
        self.position + self.front
    }

    /// Recalculates View and Projection matrices based on current parameters.
    pub fn update_matrices(&mut self) {
        self.view_matrix = TransformFactory::view(&self.position, &self.target(), &self.up);
        self.projection_matrix =
            TransformFactory::perspective(self.aspect_ratio, self.fov_y_rad, self.near, self.far);
    }

    pub fn view_matrix(&self) -> Matrix4<f64> {
        self.view_matrix
    }

    pub fn projection_matrix(&self) -> Matrix4<f64> {
        self.projection_matrix
    }

    /// Model -> View -> Projection, composed once for the whole frame.
    pub fn mvp(&self, model: &Matrix4<f64>) -> Matrix4<f64> {
        self.projection_matrix() * self.view_matrix() * model
    }
}
