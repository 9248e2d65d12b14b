//! Agent Step Protocol
//!
//! One activation is move-then-give, in that order. Move draws a random
//! Moore neighbor and relocates through the grid; give, only attempted with
//! wealth in hand, draws a uniformly random occupant of the current cell
//! (self included) and proposes a one-unit transfer for the scheduler to
//! apply.

use rand::rngs::SmallRng;
use rand::Rng;

use crate::components::agent::{AgentRecord, Transfer};
use crate::components::grid::OccupancyGrid;

/// Capability shared by every agent kind the scheduler can activate.
///
/// A step mutates at most the agent's own cell membership (through the
/// grid) and returns the wealth transfer it wants applied, if any. Wealth
/// of other agents is never touched directly; the registry applies the
/// returned transfer after the step returns.
pub trait Steppable {
    fn step(&mut self, grid: &mut OccupancyGrid, rng: &mut SmallRng) -> Option<Transfer>;
}

impl Steppable for AgentRecord {
    fn step(&mut self, grid: &mut OccupancyGrid, rng: &mut SmallRng) -> Option<Transfer> {
        let here = grid
            .position_of(self.id)
            .expect("stepped agent missing from occupancy index");

        // Move: uniform draw over the wrapped Moore neighborhood. An empty
        // neighborhood (1x1 grid) means the agent stays put; that is the
        // defined fallback, not an error.
        let neighbors = grid.neighborhood(here, false);
        if !neighbors.is_empty() {
            let target = neighbors[rng.gen_range(0..neighbors.len())];
            grid.move_agent(self.id, target)
                .expect("occupancy index rejected a placed agent");
        }

        // Give: requires wealth and at least one other occupant. The draw
        // pool deliberately includes the agent itself; a self-draw is a
        // net-zero transfer and still consumes one RNG draw.
        if self.wealth == 0 {
            return None;
        }
        let pos = grid
            .position_of(self.id)
            .expect("stepped agent missing from occupancy index");
        let occupants = grid.contents_at(pos);
        if occupants.len() > 1 {
            let chosen = occupants[rng.gen_range(0..occupants.len())];
            return Some(Transfer {
                from: self.id,
                to: chosen,
            });
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::agent::AgentId;
    use crate::components::grid::CellPos;
    use rand::SeedableRng;

    #[test]
    fn test_lone_agent_never_proposes_transfer() {
        let mut grid = OccupancyGrid::new(5, 5);
        let mut record = AgentRecord::new(AgentId(0));
        grid.place(record.id, CellPos::new(2, 2)).unwrap();
        let mut rng = SmallRng::seed_from_u64(7);

        for _ in 0..50 {
            assert_eq!(record.step(&mut grid, &mut rng), None);
        }
        assert_eq!(record.wealth, 1);
    }

    #[test]
    fn test_step_moves_to_a_neighbor() {
        let mut grid = OccupancyGrid::new(5, 5);
        let mut record = AgentRecord::new(AgentId(0));
        grid.place(record.id, CellPos::new(2, 2)).unwrap();
        let mut rng = SmallRng::seed_from_u64(7);

        record.step(&mut grid, &mut rng);

        let pos = grid.position_of(record.id).unwrap();
        assert_ne!(pos, CellPos::new(2, 2));
        let dx = (pos.x as i64 - 2).abs();
        let dy = (pos.y as i64 - 2).abs();
        assert!(dx <= 1 && dy <= 1);
    }

    #[test]
    fn test_unit_grid_step_stays_in_place() {
        let mut grid = OccupancyGrid::new(1, 1);
        let mut record = AgentRecord::new(AgentId(0));
        grid.place(record.id, CellPos::new(0, 0)).unwrap();
        let mut rng = SmallRng::seed_from_u64(7);

        record.step(&mut grid, &mut rng);
        assert_eq!(grid.position_of(record.id), Some(CellPos::new(0, 0)));
    }

    #[test]
    fn test_cohabiting_agents_propose_transfer() {
        let mut grid = OccupancyGrid::new(1, 1);
        let mut record = AgentRecord::new(AgentId(0));
        grid.place(record.id, CellPos::new(0, 0)).unwrap();
        grid.place(AgentId(1), CellPos::new(0, 0)).unwrap();
        let mut rng = SmallRng::seed_from_u64(7);

        let transfer = record.step(&mut grid, &mut rng).unwrap();
        assert_eq!(transfer.from, AgentId(0));
        assert!(transfer.to == AgentId(0) || transfer.to == AgentId(1));
    }

    #[test]
    fn test_broke_agent_skips_give() {
        let mut grid = OccupancyGrid::new(1, 1);
        let mut record = AgentRecord::new(AgentId(0));
        record.wealth = 0;
        grid.place(record.id, CellPos::new(0, 0)).unwrap();
        grid.place(AgentId(1), CellPos::new(0, 0)).unwrap();
        let mut rng = SmallRng::seed_from_u64(7);

        assert_eq!(record.step(&mut grid, &mut rng), None);
    }
}
