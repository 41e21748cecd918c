// Host-side tests for the pointer target resolver.

use shoal_core::glam::{Quat, Vec2, Vec3};
use shoal_core::*;

fn resolver() -> TargetResolver {
    TargetResolver::new(ResolverParams::default(), 1280.0, 720.0).expect("default params")
}

#[test]
fn inactivity_cooldown_disengages_and_pointer_move_re_arms() {
    let mut r = resolver();
    r.on_pointer_move(640.0, 360.0);

    r.tick(4000.0);
    assert!(r.state().is_active);
    r.tick(999.0);
    assert!(r.state().is_active, "4999 ms is still within the cool-down");
    r.tick(2.0);
    assert!(!r.state().is_active, "5001 ms exceeds the cool-down");

    r.tick(16.0);
    assert!(!r.state().is_active);

    r.on_pointer_move(700.0, 300.0);
    assert!(r.state().is_active);
    assert_eq!(r.inactivity_ms(), 0.0);
}

#[test]
fn enter_and_leave_override_activity_without_touching_the_timer() {
    let mut r = resolver();
    r.tick(1000.0);
    r.on_pointer_leave();
    assert!(!r.state().is_active);
    assert_eq!(r.inactivity_ms(), 1000.0);
    r.on_pointer_enter();
    assert!(r.state().is_active);
    assert_eq!(r.inactivity_ms(), 1000.0);

    // the timer still wins once the cool-down has run out
    r.tick(4500.0);
    assert!(!r.state().is_active);
}

#[test]
fn camera_eases_toward_the_pointer() {
    let mut r = resolver();
    r.on_pointer_move(1280.0, 360.0); // right edge, vertical centre
    let look = r.look_rotation();
    assert!(look.angle_between(Quat::IDENTITY) > 0.0);

    r.tick(16.0);
    let first = r.camera().orientation.angle_between(Quat::IDENTITY);
    let remaining = r.camera().orientation.angle_between(look);
    assert!(first > 0.0 && remaining > 0.0, "smoothed, not snapped");

    for _ in 0..500 {
        r.tick(16.0);
    }
    assert!(r.camera().orientation.angle_between(look) < 1e-2);
    assert!(r.camera().orientation.is_normalized());
    // pointer on the right turns the view to the right
    assert!(r.camera().forward().x > 0.0);
}

#[test]
fn target_tracks_pointer_on_the_adaptive_plane() {
    let mut r = resolver();
    r.on_pointer_move(1280.0 * 0.75, 720.0 * 0.25); // ndc (0.5, 0.5)
    assert_eq!(r.state().pointer_ndc, Vec2::new(0.5, 0.5));
    r.tick(16.0);

    let p = r.state().target_point;
    let expected_z = plane_depth(Vec2::new(0.5, 0.5)) + 0.5;
    assert!((p.z - expected_z).abs() < 1e-3, "hit on the slab face, got {p:?}");
    assert!(p.x > 0.0 && p.y > 0.0);
}

#[test]
fn missing_the_plane_holds_the_previous_target() {
    let mut r = resolver();
    r.on_pointer_move(900.0, 200.0);
    r.tick(16.0);
    let before = r.state().target_point;
    assert_ne!(before, Vec3::ZERO);

    // look away from the plane entirely
    r.camera_mut().orientation = Quat::from_rotation_y(std::f32::consts::PI);
    r.on_pointer_move(640.0, 360.0);
    r.tick(16.0);
    assert!(r.camera().forward().z > 0.0);
    assert_eq!(r.state().target_point, before);
}

#[test]
fn invalid_params_are_rejected_up_front() {
    let params = ResolverParams {
        speed: 2.0,
        ..Default::default()
    };
    let err = TargetResolver::new(params, 800.0, 600.0)
        .err()
        .expect("speed above 1 must fail");
    assert!(err.to_string().contains("speed"));
}
