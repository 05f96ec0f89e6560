//! Reproducible randomness for next-hop choices.
//!
//! An agent's stream is a `SmallRng` seeded from the run seed and the agent
//! id, so rerunning a mission with the same seed replays the same flight.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::AgentId;

/// Odd multiplier (2⁶⁴ / φ) that scatters consecutive agent ids.
const AGENT_STRIDE: u64 = 0x9e37_79b9_7f4a_7c15;

pub struct AgentRng(SmallRng);

impl AgentRng {
    pub fn new(seed: u64, agent: AgentId) -> Self {
        let mixed = seed.wrapping_add(u64::from(agent.0).wrapping_mul(AGENT_STRIDE));
        AgentRng(SmallRng::seed_from_u64(mixed))
    }

    /// Uniform pick from `items`; `None` when empty.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        items.get(self.0.gen_range(0..items.len()))
    }
}
