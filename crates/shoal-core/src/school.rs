//! The set of live fish and the queue new ones arrive through.
//!
//! Fish are created whenever their assets finish loading, which can be in the
//! middle of a frame. Creation goes through a [`Spawner`] that only touches a
//! shared queue, never the school itself; queued fish join at the start of the
//! next [`School::tick`].

use crate::agent::{Agent, FishAssets};
use crate::clock::FrameTime;
use crate::config::{AgentOverrides, AgentTunables, ConfigError};
use crate::constants::{SEED_MIX, SPAWN_Z_MIN_FRACTION, SPAWN_Z_SPAN_FRACTION};
use crate::instance::FishInstance;
use crate::regime::Transition;
use crate::target::TargetState;
use glam::Vec3;
use rand::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

/// Stable handle for a fish, in creation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AgentId(pub u32);

struct SpawnQueue {
    seed: u64,
    rng: StdRng,
    next_index: u32,
    pending: Vec<(AgentId, Agent)>,
}

/// Cloneable handle for adding fish from asset-load callbacks.
#[derive(Clone)]
pub struct Spawner {
    queue: Rc<RefCell<SpawnQueue>>,
}

impl Spawner {
    /// Queue a fish at `position` (wrapped into its world bounds).
    pub fn spawn(
        &self,
        assets: FishAssets,
        overrides: &AgentOverrides,
        position: Vec3,
    ) -> Result<AgentId, ConfigError> {
        self.enqueue(assets, overrides, |_, _| position)
    }

    /// Queue a fish at a random spot: x and y anywhere in the world, z biased
    /// toward the far side of the camera.
    pub fn spawn_scattered(
        &self,
        assets: FishAssets,
        overrides: &AgentOverrides,
    ) -> Result<AgentId, ConfigError> {
        self.enqueue(assets, overrides, |tunables, rng| {
            let m = tunables.max_distance;
            Vec3::new(
                rng.gen::<f32>() * 2.0 * m - m,
                rng.gen::<f32>() * 2.0 * m - m,
                rng.gen::<f32>() * SPAWN_Z_SPAN_FRACTION * m + SPAWN_Z_MIN_FRACTION * m,
            )
        })
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().pending.len()
    }

    fn enqueue(
        &self,
        assets: FishAssets,
        overrides: &AgentOverrides,
        place: impl FnOnce(&AgentTunables, &mut StdRng) -> Vec3,
    ) -> Result<AgentId, ConfigError> {
        let mut q = self.queue.borrow_mut();
        let tunables = AgentTunables::resolve(overrides, &mut q.rng)?;
        let position = place(&tunables, &mut q.rng);

        let index = q.next_index;
        // Derive per-fish RNGs from the base seed so streams stay independent
        let mix = q.seed ^ (index as u64).wrapping_mul(SEED_MIX);
        let agent = Agent::new(assets, tunables, position, StdRng::seed_from_u64(mix))?;

        let id = AgentId(index);
        q.next_index += 1;
        q.pending.push((id, agent));
        log::info!(
            "[school] queued fish {} speed={:.3} interval={:.0} follow={:.2}",
            index,
            tunables.speed,
            tunables.interval,
            tunables.follow_distance
        );
        Ok(id)
    }
}

/// Counts for one school tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SchoolReport {
    pub admitted: usize,
    pub started_following: usize,
    pub stopped_following: usize,
    pub following: usize,
}

pub struct School {
    agents: Vec<(AgentId, Agent)>,
    queue: Rc<RefCell<SpawnQueue>>,
}

impl School {
    pub fn new(seed: u64) -> Self {
        Self {
            agents: Vec::new(),
            queue: Rc::new(RefCell::new(SpawnQueue {
                seed,
                rng: StdRng::seed_from_u64(seed),
                next_index: 0,
                pending: Vec::new(),
            })),
        }
    }

    pub fn spawner(&self) -> Spawner {
        Spawner {
            queue: self.queue.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.agents
            .binary_search_by_key(&id, |(aid, _)| *aid)
            .ok()
            .map(|i| &self.agents[i].1)
    }

    pub fn agents(&self) -> impl Iterator<Item = (AgentId, &Agent)> {
        self.agents.iter().map(|(id, a)| (*id, a))
    }

    pub fn following_count(&self) -> usize {
        self.agents.iter().filter(|(_, a)| a.is_following()).count()
    }

    /// Move queued fish into the live set. Returns how many joined.
    pub fn admit_pending(&mut self) -> usize {
        let mut q = self.queue.borrow_mut();
        let admitted = q.pending.len();
        self.agents.append(&mut q.pending);
        admitted
    }

    pub fn tick(&mut self, target: &TargetState, time: FrameTime) -> SchoolReport {
        let mut report = SchoolReport {
            admitted: self.admit_pending(),
            ..Default::default()
        };
        for (_, agent) in &mut self.agents {
            match agent.tick(target, time) {
                Some(Transition::StartedFollowing) => report.started_following += 1,
                Some(Transition::StoppedFollowing) => report.stopped_following += 1,
                None => {}
            }
            if agent.is_following() {
                report.following += 1;
            }
        }
        report
    }

    /// Refill `out` with one instance per live fish, in id order.
    pub fn write_instances(&self, out: &mut Vec<FishInstance>) {
        out.clear();
        out.extend(self.agents.iter().map(|(_, a)| FishInstance::from(a)));
    }
}
