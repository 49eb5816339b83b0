//! Perspective camera with extrinsic and intrinsic parameters.

use glam::{Mat4, Vec3};

use crate::params::RenderConfig;

/// 3D camera: extrinsic pose (eye, look-at, up) plus intrinsic projection
/// (field of view, aspect, near/far planes).
///
/// View and projection matrices are derived fresh from these fields every
/// frame; nothing is cached.
#[derive(Debug, Clone)]
pub struct Camera {
    pub eye: Vec3,
    pub look_at: Vec3,
    pub up: Vec3,
    pub fov_y_rad: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    /// Camera for the demo scene, projection taken from the render config
    pub fn new(eye: Vec3, look_at: Vec3, up: Vec3, config: &RenderConfig) -> Self {
        Self {
            eye,
            look_at,
            up,
            fov_y_rad: config.fov_degrees.to_radians(),
            aspect: config.aspect_ratio(),
            near: config.near_plane_m,
            far: config.far_plane_m,
        }
    }

    /// View matrix: translates the eye to the origin and aligns the gaze
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.look_at, self.up)
    }

    /// Perspective projection matrix
    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_rad, self.aspect, self.near, self.far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_camera() -> Camera {
        Camera::new(
            Vec3::new(0.0, -1.0, 4.0),
            Vec3::new(0.0, -2.3, 0.0),
            Vec3::Y,
            &RenderConfig::default(),
        )
    }

    #[test]
    fn test_matrices_are_finite_and_nontrivial() {
        let camera = demo_camera();
        let view = camera.view();
        let proj = camera.projection();

        assert_ne!(view, Mat4::IDENTITY);
        assert_ne!(proj, Mat4::IDENTITY);
        for value in (proj * view).to_cols_array() {
            assert!(value.is_finite());
        }
    }

    #[test]
    fn test_view_moves_eye_to_origin() {
        let camera = demo_camera();
        let eye_in_view = camera.view() * camera.eye.extend(1.0);
        assert!(eye_in_view.truncate().length() < 1e-5);
    }

    #[test]
    fn test_look_at_lands_on_negative_z_axis() {
        let camera = demo_camera();
        let target_in_view = camera.view() * camera.look_at.extend(1.0);
        // The gaze direction is -Z in view space
        assert!(target_in_view.x.abs() < 1e-5);
        assert!(target_in_view.y.abs() < 1e-5);
        assert!(target_in_view.z < 0.0);
    }
}
