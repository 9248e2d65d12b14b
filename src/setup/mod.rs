//! Model Setup
//!
//! Agent spawning at random initial positions.

use rand::rngs::SmallRng;
use rand::Rng;

use crate::components::agent::AgentRegistry;
use crate::components::grid::{CellPos, OccupancyGrid};
use crate::error::Result;
use crate::systems::scheduler::ActivationSchedule;

/// Create `count` agents, place each at a uniformly random cell, and
/// register it with the scheduler.
///
/// Draw order is part of the determinism contract: for each agent in id
/// order, one x draw then one y draw.
pub fn spawn_agents(
    grid: &mut OccupancyGrid,
    registry: &mut AgentRegistry,
    schedule: &mut ActivationSchedule,
    rng: &mut SmallRng,
    count: usize,
) -> Result<()> {
    for _ in 0..count {
        let id = registry.register();
        let pos = CellPos::new(
            rng.gen_range(0..grid.width()),
            rng.gen_range(0..grid.height()),
        );
        grid.place(id, pos)?;
        schedule.add(id);
    }
    Ok(())
}
