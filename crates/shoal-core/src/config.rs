//! Agent and resolver configuration.
//!
//! Agents take optional overrides; anything left unset is drawn from a
//! documented band once, at construction, from the supplied random source.
//! The resolved values are validated before an agent exists so nothing in the
//! per-tick path has to deal with bad numbers.

use crate::constants::*;
use rand::Rng;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f32 },
    #[error("{field} must be {expected}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f32,
        expected: &'static str,
    },
}

/// Per-agent tunables as supplied by the caller. `None` means "pick one".
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AgentOverrides {
    pub speed: Option<f32>,
    pub interval: Option<f32>,
    pub follow_distance: Option<f32>,
    pub max_distance: Option<f32>,
    pub rotation_speed: Option<f32>,
}

/// Resolved, validated per-agent tunables.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AgentTunables {
    pub speed: f32,
    /// Swim cycle length in milliseconds.
    pub interval: f32,
    pub follow_distance: f32,
    /// Half-width of the wrapping world cube.
    pub max_distance: f32,
    /// Slerp factor applied to the orientation each tick.
    pub rotation_speed: f32,
}

impl AgentTunables {
    /// Fill in missing tunables from `rng` and validate the result.
    ///
    /// One `f32` is drawn per missing field, in declaration order. The world
    /// bound has a fixed default and never consumes a draw.
    pub fn resolve<R: Rng + ?Sized>(
        overrides: &AgentOverrides,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        let speed = overrides
            .speed
            .unwrap_or_else(|| band(rng, SPEED_BASE, SPEED_SPAN));
        let interval = overrides
            .interval
            .unwrap_or_else(|| band(rng, INTERVAL_BASE_MS, INTERVAL_SPAN_MS));
        let follow_distance = overrides
            .follow_distance
            .unwrap_or_else(|| band(rng, FOLLOW_DISTANCE_BASE, FOLLOW_DISTANCE_SPAN));
        let max_distance = overrides.max_distance.unwrap_or(DEFAULT_MAX_DISTANCE);
        let rotation_speed = overrides
            .rotation_speed
            .unwrap_or_else(|| band(rng, ROTATION_SPEED_BASE, ROTATION_SPEED_SPAN));

        let tunables = Self {
            speed,
            interval,
            follow_distance,
            max_distance,
            rotation_speed,
        };
        tunables.validate()?;
        Ok(tunables)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        at_least("speed", self.speed, 0.0)?;
        positive("interval", self.interval)?;
        at_least("follow_distance", self.follow_distance, 0.0)?;
        positive("max_distance", self.max_distance)?;
        unit_interval("rotation_speed", self.rotation_speed)
    }
}

/// Camera smoothing and inactivity settings for the target resolver.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolverParams {
    /// Slerp factor toward the pointer-derived camera rotation, per tick.
    pub speed: f32,
    /// Largest camera rotation (radians) at the viewport edge.
    pub max_rotation: f32,
    /// Pointer inactivity (ms) after which following is disengaged.
    pub cool_down_ms: f32,
}

impl Default for ResolverParams {
    fn default() -> Self {
        Self {
            speed: CAMERA_BLEND,
            max_rotation: CAMERA_MAX_ROTATION,
            cool_down_ms: COOL_DOWN_MS,
        }
    }
}

impl ResolverParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        unit_interval("speed", self.speed)?;
        at_least("max_rotation", self.max_rotation, 0.0)?;
        positive("cool_down_ms", self.cool_down_ms)
    }
}

#[inline]
fn band<R: Rng + ?Sized>(rng: &mut R, base: f32, span: f32) -> f32 {
    base + rng.gen::<f32>() * span
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { field, value })
    }
}

fn at_least(field: &'static str, value: f32, min: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value >= min {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            expected: "non-negative",
        })
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            expected: "greater than zero",
        })
    }
}

fn unit_interval(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            expected: "within [0, 1]",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    #[test]
    fn zero_draws_resolve_to_band_floors() {
        let mut rng = StepRng::new(0, 0);
        let t = AgentTunables::resolve(&AgentOverrides::default(), &mut rng).unwrap();
        assert_eq!(t.speed, SPEED_BASE);
        assert_eq!(t.interval, INTERVAL_BASE_MS);
        assert_eq!(t.follow_distance, FOLLOW_DISTANCE_BASE);
        assert_eq!(t.max_distance, DEFAULT_MAX_DISTANCE);
        assert_eq!(t.rotation_speed, ROTATION_SPEED_BASE);
    }

    #[test]
    fn overrides_are_kept_verbatim() {
        let mut rng = StepRng::new(u64::MAX, 0);
        let overrides = AgentOverrides {
            speed: Some(0.3),
            interval: Some(1500.0),
            follow_distance: Some(4.0),
            max_distance: Some(12.0),
            rotation_speed: Some(0.5),
        };
        let t = AgentTunables::resolve(&overrides, &mut rng).unwrap();
        assert_eq!(t.speed, 0.3);
        assert_eq!(t.interval, 1500.0);
        assert_eq!(t.follow_distance, 4.0);
        assert_eq!(t.max_distance, 12.0);
        assert_eq!(t.rotation_speed, 0.5);
    }

    #[test]
    fn rejects_negative_world_bound() {
        let mut rng = StepRng::new(0, 0);
        let overrides = AgentOverrides {
            max_distance: Some(-5.0),
            ..Default::default()
        };
        let err = AgentTunables::resolve(&overrides, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::OutOfRange {
                field: "max_distance",
                ..
            }
        ));
        assert!(err.to_string().contains("max_distance"));
    }

    #[test]
    fn rejects_nan_and_out_of_range_rotation() {
        let mut rng = StepRng::new(0, 0);
        let nan = AgentOverrides {
            speed: Some(f32::NAN),
            ..Default::default()
        };
        assert!(matches!(
            AgentTunables::resolve(&nan, &mut rng),
            Err(ConfigError::NonFinite { field: "speed", .. })
        ));
        let spin = AgentOverrides {
            rotation_speed: Some(1.5),
            ..Default::default()
        };
        assert!(AgentTunables::resolve(&spin, &mut rng).is_err());
    }

    #[test]
    fn default_resolver_params_are_valid() {
        assert!(ResolverParams::default().validate().is_ok());
        let bad = ResolverParams {
            cool_down_ms: 0.0,
            ..Default::default()
        };
        assert!(bad.validate().is_err());
    }
}
