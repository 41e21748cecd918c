//! Locomotion and orientation of a single fish.
//!
//! Each tick a fish advances its clips, picks a velocity from its current
//! regime, moves with toroidal wraparound, and eases its orientation toward
//! the direction of travel.

use crate::animation::{ActionId, AnimationClip, AnimationMixer, ClipAction, LoopMode};
use crate::clock::FrameTime;
use crate::config::{AgentTunables, ConfigError};
use crate::constants::*;
use crate::geometry::{basis_from_forward, wrap_position};
use crate::regime::{Observation, Regime, RegimeMachine, Transition};
use crate::target::TargetState;
use glam::{Quat, Vec3};
use rand::rngs::StdRng;
use rand::Rng;

/// The two clips every fish model ships with.
#[derive(Clone, Debug, PartialEq)]
pub struct FishAssets {
    /// One-shot accent replayed late in each idle swim cycle.
    pub burst: AnimationClip,
    /// Continuous swim played while following the target.
    pub swim_loop: AnimationClip,
}

pub struct Agent {
    tunables: AgentTunables,
    position: Vec3,
    orientation: Quat,
    velocity: Vec3,
    machine: RegimeMachine,
    mixer: AnimationMixer,
    burst: ActionId,
    swim_loop: ActionId,
    rng: StdRng,
}

impl Agent {
    pub fn new(
        assets: FishAssets,
        tunables: AgentTunables,
        position: Vec3,
        mut rng: StdRng,
    ) -> Result<Self, ConfigError> {
        tunables.validate()?;

        let mut mixer = AnimationMixer::new();

        let mut burst = ClipAction::new(assets.burst, LoopMode::Once);
        burst.clamp_when_finished = true;
        burst.set_duration(tunables.interval);
        burst.play();
        let burst = mixer.add(burst);

        let mut swim_loop = ClipAction::new(assets.swim_loop, LoopMode::Repeat);
        swim_loop.time_scale = LOOP_INITIAL_RATE_BASE + rng.gen::<f32>() * LOOP_INITIAL_RATE_SPAN;
        let swim_loop = mixer.add(swim_loop);

        Ok(Self {
            tunables,
            position: wrap_position(position, tunables.max_distance),
            orientation: Quat::IDENTITY,
            velocity: Vec3::ZERO,
            machine: RegimeMachine::default(),
            mixer,
            burst,
            swim_loop,
            rng,
        })
    }

    pub fn tunables(&self) -> &AgentTunables {
        &self.tunables
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn regime(&self) -> Regime {
        self.machine.regime()
    }

    pub fn is_following(&self) -> bool {
        self.machine.is_following()
    }

    pub fn burst_action(&self) -> &ClipAction {
        self.mixer.action(self.burst)
    }

    pub fn loop_action(&self) -> &ClipAction {
        self.mixer.action(self.swim_loop)
    }

    pub fn distance_to(&self, point: Vec3) -> f32 {
        self.position.distance(point)
    }

    /// Full per-frame update. Returns the regime change, if one happened.
    pub fn tick(&mut self, target: &TargetState, time: FrameTime) -> Option<Transition> {
        self.mixer.update(time.delta_ms);
        let transition = self.update_velocity(target, time.elapsed_ms);
        self.update_position(time.delta_ms);
        self.rotate();
        transition
    }

    pub fn update_velocity(&mut self, target: &TargetState, elapsed_ms: f64) -> Option<Transition> {
        let offset = target.target_point - self.position;
        let distance = offset.length();
        let transition = self.machine.observe(&Observation {
            target_active: target.is_active,
            distance,
            follow_distance: self.tunables.follow_distance,
        });

        match transition {
            Some(Transition::StartedFollowing) => {
                log::debug!("[fish] following target at distance {:.2}", distance);
                self.mixer.action_mut(self.swim_loop).play();
            }
            Some(Transition::StoppedFollowing) => {
                log::debug!("[fish] back to idle swim at distance {:.2}", distance);
                self.mixer.action_mut(self.swim_loop).stop();
            }
            None => {}
        }

        let AgentTunables {
            speed, interval, ..
        } = self.tunables;
        match self.machine.regime() {
            Regime::Idle => {
                let phase = swim_phase(elapsed_ms, interval);
                // idle cruise is level along world +X; rotate() brings the facing back round
                self.velocity = AGENT_FORWARD * idle_speed(phase, interval, speed);

                let burst = self.mixer.action_mut(self.burst);
                if burst.paused && phase > interval * BURST_RETRIGGER_PHASE {
                    burst.reset();
                    burst.play();
                }
            }
            Regime::Following => {
                let jitter: f32 = self.rng.gen();
                let offset_jitter: f32 = self.rng.gen();
                self.mixer.action_mut(self.swim_loop).time_scale =
                    loop_time_scale(speed, distance, jitter, offset_jitter);
                self.velocity = offset.normalize_or_zero() * follow_speed(speed, distance);
            }
        }
        transition
    }

    /// Integrate the current velocity and wrap into the world cube.
    pub fn update_position(&mut self, delta_ms: f32) {
        self.position = wrap_position(
            self.position + self.velocity * delta_ms,
            self.tunables.max_distance,
        );
    }

    /// Ease toward a frame that faces along the velocity. No-op when still.
    pub fn rotate(&mut self) {
        let Some(basis) = basis_from_forward(self.velocity, WORLD_UP, FALLBACK_SIDE) else {
            return;
        };
        let facing = Quat::from_mat3(&basis);
        self.orientation = self
            .orientation
            .slerp(facing, self.tunables.rotation_speed)
            .normalize();
    }
}

/// Position inside the current swim cycle, in `[0, interval)`.
#[inline]
pub fn swim_phase(elapsed_ms: f64, interval: f32) -> f32 {
    elapsed_ms.rem_euclid(interval as f64) as f32
}

/// Idle cruise speed: a burst at the start of each cycle easing down to a
/// small floor.
#[inline]
pub fn idle_speed(phase: f32, interval: f32, speed: f32) -> f32 {
    let ease = 1.0 - (phase / interval).max(0.0).sqrt();
    speed * IDLE_GAIN * ease * ease + IDLE_FLOOR
}

#[inline]
pub fn follow_speed(speed: f32, distance: f32) -> f32 {
    speed * distance.powf(FOLLOW_DISTANCE_EXPONENT) * FOLLOW_GAIN
}

/// Swim-loop playback rate while following; `jitter` and `offset_jitter` are
/// uniform draws in `[0, 1)`.
#[inline]
pub fn loop_time_scale(speed: f32, distance: f32, jitter: f32, offset_jitter: f32) -> f32 {
    speed
        * distance.powf(FOLLOW_DISTANCE_EXPONENT)
        * (LOOP_RATE_BASE + jitter * LOOP_RATE_JITTER)
        + LOOP_RATE_OFFSET
        + offset_jitter * LOOP_RATE_OFFSET_JITTER
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedStep;
    use rand::SeedableRng;

    fn assets() -> FishAssets {
        FishAssets {
            burst: AnimationClip::new("swim", 1.0),
            swim_loop: AnimationClip::new("swim_loop", 1.0),
        }
    }

    fn tunables() -> AgentTunables {
        AgentTunables {
            speed: 0.4,
            interval: 2000.0,
            follow_distance: 5.0,
            max_distance: 20.0,
            rotation_speed: 0.1,
        }
    }

    fn agent_at(position: Vec3) -> Agent {
        Agent::new(assets(), tunables(), position, StdRng::seed_from_u64(7)).unwrap()
    }

    #[test]
    fn wrap_crosses_the_positive_edge() {
        let mut a = agent_at(Vec3::new(19.0, 0.0, 0.0));
        a.velocity = Vec3::new(3.0, 0.0, 0.0);
        a.update_position(1.0);
        assert_eq!(a.position(), Vec3::new(-18.0, 0.0, 0.0));
    }

    #[test]
    fn wrap_crosses_the_negative_edge_on_every_axis() {
        let mut a = agent_at(Vec3::new(-19.5, -19.5, -19.5));
        a.velocity = Vec3::splat(-1.0);
        a.update_position(1.0);
        assert_eq!(a.position(), Vec3::splat(19.5));
    }

    #[test]
    fn construction_wraps_out_of_bounds_spawns() {
        let a = agent_at(Vec3::new(25.0, -45.0, 0.0));
        assert_eq!(a.position(), Vec3::new(-15.0, -5.0, 0.0));
    }

    #[test]
    fn zero_velocity_keeps_orientation() {
        let mut a = agent_at(Vec3::ZERO);
        a.orientation = Quat::from_rotation_z(0.4);
        a.velocity = Vec3::ZERO;
        a.rotate();
        assert_eq!(a.orientation(), Quat::from_rotation_z(0.4));
    }

    #[test]
    fn rotate_eases_instead_of_snapping() {
        let mut a = agent_at(Vec3::ZERO);
        a.velocity = Vec3::new(0.0, 0.0, -1.0);
        a.rotate();
        let facing = a.orientation() * AGENT_FORWARD;
        assert!(facing.dot(Vec3::NEG_Z) < 0.99, "one tick must not snap");
        for _ in 0..200 {
            a.rotate();
        }
        let facing = a.orientation() * AGENT_FORWARD;
        assert!(facing.dot(Vec3::NEG_Z) > 0.999);
        assert!(a.orientation().is_normalized());
    }

    #[test]
    fn idle_cruise_levels_out_after_a_vertical_chase() {
        let mut a = agent_at(Vec3::ZERO);
        let above = TargetState {
            target_point: Vec3::new(0.0, 4.0, 0.0),
            is_active: true,
            ..Default::default()
        };
        let mut clock = FixedStep::new(16.0);
        for _ in 0..60 {
            a.tick(&above, clock.advance());
        }
        assert!(a.is_following());
        assert!((a.orientation() * AGENT_FORWARD).y > 0.9, "chase pitched the fish up");

        let idle = TargetState {
            is_active: false,
            ..above
        };
        for _ in 0..2000 {
            a.tick(&idle, clock.advance());
            let v = a.velocity();
            assert!(v.x > 0.0);
            assert_eq!((v.y, v.z), (0.0, 0.0));
        }
        let facing = a.orientation() * AGENT_FORWARD;
        assert!(facing.dot(Vec3::X) > 0.999, "facing {facing:?}");
        assert!(a.orientation().is_normalized());
    }

    #[test]
    fn burst_replays_late_in_the_cycle_once_finished() {
        let mut a = agent_at(Vec3::ZERO);
        let idle = TargetState {
            is_active: false,
            ..Default::default()
        };
        // burst runs for exactly one interval, then clamps and pauses
        a.tick(&idle, FrameTime::new(2100.0, 2100.0));
        assert!(a.burst_action().paused);

        a.tick(&idle, FrameTime::new(2200.0, 100.0));
        assert!(a.burst_action().paused, "phase 200 is too early");

        a.tick(&idle, FrameTime::new(3700.0, 1500.0));
        assert!(!a.burst_action().paused, "phase 1700 > 0.8 * interval");
        assert_eq!(a.burst_action().time, 0.0);
    }

    #[test]
    fn follow_velocity_points_at_target_with_expected_magnitude() {
        let mut a = agent_at(Vec3::ZERO);
        let target = TargetState {
            target_point: Vec3::new(0.0, 3.0, 4.0),
            is_active: true,
            ..Default::default()
        };
        let t = a.update_velocity(&target, 0.0);
        assert_eq!(t, Some(Transition::StartedFollowing));
        let v = a.velocity();
        assert!((v.normalize() - Vec3::new(0.0, 0.6, 0.8)).length() < 1e-5);
        assert!((v.length() - 0.4 * 5.0_f32.powf(1.2) * 0.0005).abs() < 1e-7);
        assert!(a.loop_action().is_playing());
    }

    #[test]
    fn follow_at_the_target_itself_stands_still() {
        let mut a = agent_at(Vec3::new(1.0, 1.0, 1.0));
        let target = TargetState {
            target_point: Vec3::new(1.0, 1.0, 1.0),
            is_active: true,
            ..Default::default()
        };
        a.tick(&target, FrameTime::new(16.0, 16.0));
        assert!(a.is_following());
        assert_eq!(a.velocity(), Vec3::ZERO);
        assert!(a.orientation().is_normalized());
    }
}
