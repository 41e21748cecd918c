//! Rays, the target slab face, facing bases and toroidal wrap.

use glam::{Mat3, Vec3};

const EPSILON: f32 = 1.0e-6;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length.
    pub direction: Vec3,
}

impl Ray {
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Axis-aligned, bounded plane facing +Z, hit from the front only.
///
/// This is the camera-facing side of a thin slab: a ray travelling toward -Z
/// that crosses `z = center.z` within `half_extent` of the centre on both X
/// and Y counts as a hit. Everything else (parallel, back-facing, out of
/// bounds, behind the origin) does not.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntersectionPlane {
    pub center: Vec3,
    pub half_extent: f32,
}

impl IntersectionPlane {
    pub fn intersect(&self, ray: &Ray) -> Option<Vec3> {
        // front faces only: the ray must head into the +Z-facing surface
        if ray.direction.z > -EPSILON {
            return None;
        }
        let t = (self.center.z - ray.origin.z) / ray.direction.z;
        if t < 0.0 {
            return None;
        }
        let hit = ray.at(t);
        let within = (hit.x - self.center.x).abs() <= self.half_extent
            && (hit.y - self.center.y).abs() <= self.half_extent;
        within.then_some(hit)
    }
}

/// Orthonormal frame whose first column points along `forward`.
///
/// Columns are `(forward, up, side)`. When `forward` is parallel to
/// `world_up` the side axis falls back to `fallback`. Returns `None` for a
/// zero or non-finite `forward`.
pub fn basis_from_forward(forward: Vec3, world_up: Vec3, fallback: Vec3) -> Option<Mat3> {
    let x_axis = forward.try_normalize()?;
    let side = x_axis.cross(world_up).try_normalize().unwrap_or(fallback);
    let y_axis = side.cross(x_axis).try_normalize()?;
    // re-derive so the frame stays orthonormal for any usable fallback
    let z_axis = x_axis.cross(y_axis);
    Some(Mat3::from_cols(x_axis, y_axis, z_axis))
}

/// Wrap `value` into `[-bound, bound)` with a true (Euclidean) modulo.
#[inline]
pub fn wrap_coordinate(value: f32, bound: f32) -> f32 {
    let span = 2.0 * bound;
    let shifted = (value + bound).rem_euclid(span);
    // rem_euclid can round up to `span` for tiny negative inputs
    let shifted = if shifted >= span { 0.0 } else { shifted };
    shifted - bound
}

#[inline]
pub fn wrap_position(p: Vec3, bound: f32) -> Vec3 {
    Vec3::new(
        wrap_coordinate(p.x, bound),
        wrap_coordinate(p.y, bound),
        wrap_coordinate(p.z, bound),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_orthonormal(m: Mat3) {
        for c in [m.x_axis, m.y_axis, m.z_axis] {
            assert!((c.length() - 1.0).abs() < 1e-5, "column not unit: {c:?}");
        }
        assert!(m.x_axis.dot(m.y_axis).abs() < 1e-5);
        assert!(m.x_axis.dot(m.z_axis).abs() < 1e-5);
        assert!(m.y_axis.dot(m.z_axis).abs() < 1e-5);
        assert!((m.determinant() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn basis_points_first_axis_along_forward() {
        let m = basis_from_forward(Vec3::new(1.0, 2.0, -3.0), Vec3::Y, Vec3::Z).unwrap();
        assert_orthonormal(m);
        assert!((m.x_axis - Vec3::new(1.0, 2.0, -3.0).normalize()).length() < 1e-5);
        assert!(m.y_axis.y > 0.0, "up axis should lean toward world up");
    }

    #[test]
    fn basis_falls_back_when_forward_is_vertical() {
        for forward in [Vec3::Y, Vec3::NEG_Y * 4.0] {
            let m = basis_from_forward(forward, Vec3::Y, Vec3::Z).unwrap();
            assert_orthonormal(m);
            assert_eq!(m.z_axis, Vec3::Z);
        }
    }

    #[test]
    fn basis_rejects_zero_forward() {
        assert!(basis_from_forward(Vec3::ZERO, Vec3::Y, Vec3::Z).is_none());
    }

    #[test]
    fn wrap_is_a_true_modulo() {
        assert_eq!(wrap_coordinate(22.0, 20.0), -18.0);
        assert_eq!(wrap_coordinate(-22.0, 20.0), 18.0);
        assert_eq!(wrap_coordinate(20.0, 20.0), -20.0);
        assert_eq!(wrap_coordinate(-20.0, 20.0), -20.0);
        assert_eq!(wrap_coordinate(5.5, 20.0), 5.5);
        let tiny = wrap_coordinate(-20.0 - 1e-9, 20.0);
        assert!((-20.0..20.0).contains(&tiny));
    }

    #[test]
    fn plane_hit_and_misses() {
        let plane = IntersectionPlane {
            center: Vec3::new(0.0, 0.0, -1.0),
            half_extent: 50.0,
        };
        let forward = Ray {
            origin: Vec3::new(0.0, 0.0, 5.0),
            direction: Vec3::NEG_Z,
        };
        assert_eq!(plane.intersect(&forward), Some(Vec3::new(0.0, 0.0, -1.0)));

        let away = Ray {
            direction: Vec3::Z,
            ..forward
        };
        assert_eq!(plane.intersect(&away), None);

        let parallel = Ray {
            direction: Vec3::X,
            ..forward
        };
        assert_eq!(plane.intersect(&parallel), None);

        let grazing = Ray {
            origin: Vec3::new(0.0, 0.0, 5.0),
            direction: Vec3::new(1.0, 0.0, -0.01).normalize(),
        };
        assert_eq!(plane.intersect(&grazing), None, "hit lies outside the extent");
    }
}
