//! Per-fish record handed to the host renderer each frame.

use crate::agent::Agent;
use bytemuck::{Pod, Zeroable};

/// Flat, GPU/JS friendly view of one fish. `loop_time` is -1 while the swim
/// loop is stopped.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct FishInstance {
    pub position: [f32; 3],
    pub rotation: [f32; 4],
    pub burst_time: f32,
    pub loop_time: f32,
    pub following: f32,
}

impl FishInstance {
    pub const FLOATS: usize = std::mem::size_of::<FishInstance>() / std::mem::size_of::<f32>();
}

impl From<&Agent> for FishInstance {
    fn from(agent: &Agent) -> Self {
        let swim_loop = agent.loop_action();
        Self {
            position: agent.position().to_array(),
            rotation: agent.orientation().to_array(),
            burst_time: agent.burst_action().time,
            loop_time: if swim_loop.is_playing() {
                swim_loop.time
            } else {
                -1.0
            },
            following: if agent.is_following() { 1.0 } else { 0.0 },
        }
    }
}

/// View a packed instance slice as raw floats.
pub fn as_floats(instances: &[FishInstance]) -> &[f32] {
    bytemuck::cast_slice(instances)
}
