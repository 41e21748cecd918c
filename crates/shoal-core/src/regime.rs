//! Two-state behaviour switch for a fish, kept apart from the motion math so
//! the edge-triggered clip actions can be checked on their own.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Regime {
    #[default]
    Idle,
    Following,
}

/// Fired once when the regime changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    StartedFollowing,
    StoppedFollowing,
}

/// What the fish saw this tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Observation {
    pub target_active: bool,
    pub distance: f32,
    pub follow_distance: f32,
}

impl Observation {
    #[inline]
    pub fn wants_follow(&self) -> bool {
        self.target_active && self.distance <= self.follow_distance
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RegimeMachine {
    regime: Regime,
}

impl RegimeMachine {
    pub fn regime(&self) -> Regime {
        self.regime
    }

    pub fn is_following(&self) -> bool {
        self.regime == Regime::Following
    }

    /// Move to the regime implied by `obs`, reporting a transition only on
    /// the tick the regime actually changes.
    pub fn observe(&mut self, obs: &Observation) -> Option<Transition> {
        let next = if obs.wants_follow() {
            Regime::Following
        } else {
            Regime::Idle
        };
        if next == self.regime {
            return None;
        }
        self.regime = next;
        Some(match next {
            Regime::Following => Transition::StartedFollowing,
            Regime::Idle => Transition::StoppedFollowing,
        })
    }
}
