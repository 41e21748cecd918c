//! Pointer-to-world target resolution.
//!
//! The resolver is the single writer of [`TargetState`]; fish only ever see
//! the copied snapshot returned by [`TargetResolver::state`].

use crate::camera::Camera;
use crate::config::{ConfigError, ResolverParams};
use crate::constants::{PLANE_DEPTH_SCALE, PLANE_EXTENT, PLANE_THICKNESS};
use crate::geometry::IntersectionPlane;
use glam::{Quat, Vec2, Vec3};

/// Read-only view of the resolver's output for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TargetState {
    pub target_point: Vec3,
    pub is_active: bool,
    /// Pointer in `[-1, 1]²`, origin at viewport centre, y up.
    pub pointer_ndc: Vec2,
}

impl Default for TargetState {
    fn default() -> Self {
        Self {
            target_point: Vec3::ZERO,
            is_active: true,
            pointer_ndc: Vec2::ZERO,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

pub struct TargetResolver {
    params: ResolverParams,
    camera: Camera,
    viewport: Viewport,
    plane: IntersectionPlane,
    state: TargetState,
    inactivity_ms: f32,
}

impl TargetResolver {
    pub fn new(params: ResolverParams, width: f32, height: f32) -> Result<Self, ConfigError> {
        params.validate()?;
        let mut resolver = Self {
            params,
            camera: Camera::default(),
            viewport: Viewport {
                width: 1.0,
                height: 1.0,
            },
            plane: IntersectionPlane {
                center: Vec3::new(0.0, 0.0, PLANE_THICKNESS * 0.5),
                half_extent: PLANE_EXTENT * 0.5,
            },
            state: TargetState::default(),
            inactivity_ms: 0.0,
        };
        resolver.on_resize(width, height);
        Ok(resolver)
    }

    pub fn state(&self) -> TargetState {
        self.state
    }

    pub fn params(&self) -> &ResolverParams {
        &self.params
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn plane(&self) -> &IntersectionPlane {
        &self.plane
    }

    pub fn inactivity_ms(&self) -> f32 {
        self.inactivity_ms
    }

    // ---------------- Event handlers ----------------

    pub fn on_pointer_move(&mut self, client_x: f32, client_y: f32) {
        let half_w = self.viewport.width * 0.5;
        let half_h = self.viewport.height * 0.5;
        let x = ((client_x - half_w) / half_w).clamp(-1.0, 1.0);
        let y = ((client_y - half_h) / half_h).clamp(-1.0, 1.0);
        self.state.pointer_ndc = Vec2::new(x, -y);
        self.inactivity_ms = 0.0;
        self.state.is_active = true;
    }

    pub fn on_pointer_enter(&mut self) {
        self.state.is_active = true;
    }

    pub fn on_pointer_leave(&mut self) {
        self.state.is_active = false;
    }

    pub fn on_resize(&mut self, width: f32, height: f32) {
        let usable = width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0;
        if !usable {
            log::debug!("[target] ignoring degenerate viewport {}x{}", width, height);
            return;
        }
        self.viewport = Viewport { width, height };
        self.camera.aspect = width / height;
    }

    // ---------------- Per-frame update ----------------

    pub fn tick(&mut self, delta_ms: f32) {
        self.inactivity_ms += delta_ms;
        if self.state.is_active && self.inactivity_ms > self.params.cool_down_ms {
            log::debug!(
                "[target] pointer idle for {:.0} ms, disengaging",
                self.inactivity_ms
            );
            self.state.is_active = false;
        }

        let look = self.look_rotation();
        self.camera.orientation = self
            .camera
            .orientation
            .slerp(look, self.params.speed)
            .normalize();

        let ndc = self.state.pointer_ndc;
        self.plane.center.z = plane_depth(ndc) + PLANE_THICKNESS * 0.5;

        let ray = self.camera.ray_through_ndc(ndc);
        if let Some(hit) = self.plane.intersect(&ray) {
            self.state.target_point = hit;
        }
    }

    /// Camera rotation the view eases toward: pitch with pointer y, yaw
    /// against pointer x.
    pub fn look_rotation(&self) -> Quat {
        let ndc = self.state.pointer_ndc;
        let max = self.params.max_rotation;
        Quat::from_rotation_x(ndc.y * max) * Quat::from_rotation_y(-ndc.x * max)
    }
}

/// Depth of the intersection plane: pushed away as the pointer nears a corner.
#[inline]
pub fn plane_depth(ndc: Vec2) -> f32 {
    -(ndc.x * ndc.y).abs() * PLANE_DEPTH_SCALE
}
