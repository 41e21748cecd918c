//! Perspective camera used by the target resolver.
//!
//! The camera never moves; only its orientation is eased toward the pointer.
//! Rays are built in view space from the inverse projection and rotated into
//! world space, which keeps precision with the very small near plane.

use crate::constants::{CAMERA_EYE, CAMERA_FOVY_DEGREES, CAMERA_ZFAR, CAMERA_ZNEAR};
use crate::geometry::Ray;
use glam::{Mat4, Quat, Vec2, Vec3, Vec4};

/// Right-handed perspective camera looking down its local -Z.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub orientation: Quat,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: CAMERA_EYE,
            orientation: Quat::IDENTITY,
            aspect: 1.0,
            fovy_radians: CAMERA_FOVY_DEGREES.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation, self.eye).inverse()
    }

    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::NEG_Z
    }

    /// World-space ray from the eye through a point in normalized device
    /// coordinates (`[-1, 1]` on both axes, y up).
    pub fn ray_through_ndc(&self, ndc: Vec2) -> Ray {
        let inv_proj = self.projection_matrix().inverse();
        let p = inv_proj * Vec4::new(ndc.x, ndc.y, 0.5, 1.0);
        let view_dir = (p.truncate() / p.w).try_normalize().unwrap_or(Vec3::NEG_Z);
        Ray {
            origin: self.eye,
            direction: (self.orientation * view_dir).normalize(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_ray_follows_camera_forward() {
        let mut cam = Camera::default();
        let ray = cam.ray_through_ndc(Vec2::ZERO);
        assert_eq!(ray.origin, CAMERA_EYE);
        assert!((ray.direction - Vec3::NEG_Z).length() < 1e-4);

        cam.orientation = Quat::from_rotation_y(0.3);
        let ray = cam.ray_through_ndc(Vec2::ZERO);
        assert!((ray.direction - cam.forward()).length() < 1e-4);
    }

    #[test]
    fn edge_ray_matches_field_of_view() {
        let cam = Camera {
            aspect: 2.0,
            ..Default::default()
        };
        let half = (cam.fovy_radians * 0.5).tan();
        let top = cam.ray_through_ndc(Vec2::new(0.0, 1.0)).direction;
        assert!((top.y / -top.z - half).abs() < 1e-3);
        let right = cam.ray_through_ndc(Vec2::new(1.0, 0.0)).direction;
        assert!((right.x / -right.z - half * 2.0).abs() < 1e-3);
    }
}
