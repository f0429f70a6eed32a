use nalgebra::{Matrix4, Point2, Point3, Rotation3, Vector3, Vector4};

/// Below this magnitude a homogeneous W cannot be divided by.
const W_EPSILON: f64 = 1e-12;

//=================================
// Transform Matrix Factory
//=================================

/// Factory for the model, view and projection matrices.
/// View and projection are written out by hand to pin the coordinate system (Right-Handed).
/// All matrices act on column vectors, so a Model -> View -> Projection chain
/// composes as `projection * view * model`.
pub struct TransformFactory;

#[rustfmt::skip]
impl TransformFactory {
    /// Creates a Model matrix: scale, then rotate about X, Y, Z (degrees), then translate.
    pub fn model(position: &Vector3<f64>, rotation_deg: &Vector3<f64>, scale: &Vector3<f64>) -> Matrix4<f64> {
        let rotation = Rotation3::from_axis_angle(&Vector3::z_axis(), rotation_deg.z.to_radians())
            * Rotation3::from_axis_angle(&Vector3::y_axis(), rotation_deg.y.to_radians())
            * Rotation3::from_axis_angle(&Vector3::x_axis(), rotation_deg.x.to_radians());

        Matrix4::new_translation(position)
            * rotation.to_homogeneous()
            * Matrix4::new_nonuniform_scaling(scale)
    }

    /// Creates a View matrix (Look-At, Right-Handed).
    /// Transforms world space coordinates to camera/view space.
    pub fn view(eye: &Point3<f64>, target: &Point3<f64>, up: &Vector3<f64>) -> Matrix4<f64> {
        // In RHS, camera looks down -Z
        let z_axis = (eye - target).normalize();
        let x_axis = up.cross(&z_axis).normalize();
        let y_axis = z_axis.cross(&x_axis);

        // Rotation matrix from world to view
        let rotation = Matrix4::new(
            x_axis.x, x_axis.y, x_axis.z, 0.0,
            y_axis.x, y_axis.y, y_axis.z, 0.0,
            z_axis.x, z_axis.y, z_axis.z, 0.0,
            0.0,      0.0,      0.0,      1.0,
        );

        // Translation matrix to move camera to origin
        let translation = Matrix4::new_translation(&-eye.coords);

        rotation * translation
    }

    /// Creates a Perspective Projection matrix (Right-Handed).
    /// Maps X/Y of the view frustum to NDC [-1, 1] and view depth
    /// [-near, -far] to NDC Z [0, 1].
    pub fn perspective(aspect_ratio: f64, fov_y_rad: f64, near: f64, far: f64) -> Matrix4<f64> {
        let f = 1.0 / (fov_y_rad / 2.0).tan();
        let nf = 1.0 / (near - far);

        Matrix4::new(
            f / aspect_ratio, 0.0, 0.0,      0.0,
            0.0,              f,   0.0,      0.0,
            0.0,              0.0, far * nf, near * far * nf,
            0.0,              0.0, -1.0,     0.0,
        )
    }
}

//=================================
// Core Transformation Functions
//=================================

/// Performs perspective division: Clip Space -> NDC.
///
/// Returns `None` when W is zero, where the division is undefined.
#[inline]
pub fn apply_perspective_division(clip: &Vector4<f64>) -> Option<Point3<f64>> {
    let w = clip.w;
    if w.abs() > W_EPSILON {
        Some(Point3::new(clip.x / w, clip.y / w, clip.z / w))
    } else {
        None
    }
}

/// Converts NDC coordinates to Screen coordinates (Viewport Transform).
/// Note: Y-axis is flipped (NDC +Y is up, Screen +Y is down).
#[inline]
pub fn ndc_to_screen(ndc_x: f64, ndc_y: f64, width: f64, height: f64) -> Point2<f64> {
    Point2::new(
        (ndc_x + 1.0) * width / 2.0,
        height - (ndc_y + 1.0) * height / 2.0,
    )
}
