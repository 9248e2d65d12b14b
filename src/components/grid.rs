//! Occupancy Grid
//!
//! Toroidal 2D lattice holding the authoritative agent-to-cell index.
//! Cells have no capacity limit; edges wrap in both dimensions. The grid
//! owns positions only, never wealth.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::components::agent::AgentId;
use crate::error::{Result, SimError};

/// A cell coordinate on the grid, `0 <= x < width`, `0 <= y < height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellPos {
    pub x: usize,
    pub y: usize,
}

impl CellPos {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for CellPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Moore neighborhood offsets in fixed scan order (row by row, center
/// skipped). The order is part of the determinism contract: a uniform index
/// draw over the returned cells must mean the same cell for the same seed.
const MOORE_OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Spatial index mapping cells to occupants and agents to cells.
///
/// Both directions are updated together; an agent appears in the cell list
/// at `p` exactly when the inverse index maps it to `p`.
#[derive(Resource, Debug, Clone)]
pub struct OccupancyGrid {
    width: usize,
    height: usize,
    /// Row-major cell contents, insertion order per cell.
    cells: Vec<Vec<AgentId>>,
    /// Inverse index: agent id -> current cell.
    index: HashMap<AgentId, CellPos>,
}

impl OccupancyGrid {
    /// Create an empty grid. Dimensions are validated by `SimConfig` before
    /// any grid is built.
    pub fn new(width: usize, height: usize) -> Self {
        debug_assert!(width >= 1 && height >= 1);
        Self {
            width,
            height,
            cells: vec![Vec::new(); width * height],
            index: HashMap::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn idx(&self, pos: CellPos) -> usize {
        debug_assert!(pos.x < self.width && pos.y < self.height);
        pos.y * self.width + pos.x
    }

    /// Wrap arbitrary signed coordinates onto the torus.
    #[inline]
    pub fn wrap(&self, x: i64, y: i64) -> CellPos {
        CellPos {
            x: x.rem_euclid(self.width as i64) as usize,
            y: y.rem_euclid(self.height as i64) as usize,
        }
    }

    /// Insert a never-placed agent at `pos`.
    pub fn place(&mut self, agent: AgentId, pos: CellPos) -> Result<()> {
        if let Some(&existing) = self.index.get(&agent) {
            return Err(SimError::DuplicatePlacement(agent, existing));
        }
        let idx = self.idx(pos);
        self.cells[idx].push(agent);
        self.index.insert(agent, pos);
        Ok(())
    }

    /// Relocate an already-placed agent to `to`. Moving an agent onto its
    /// current cell is a well-defined no-op.
    pub fn move_agent(&mut self, agent: AgentId, to: CellPos) -> Result<()> {
        let from = *self
            .index
            .get(&agent)
            .ok_or(SimError::UnknownAgent(agent))?;
        if from == to {
            return Ok(());
        }
        let from_idx = self.idx(from);
        let slot = self.cells[from_idx]
            .iter()
            .position(|&a| a == agent)
            .expect("occupancy index out of sync with cell contents");
        self.cells[from_idx].remove(slot);
        let to_idx = self.idx(to);
        self.cells[to_idx].push(agent);
        self.index.insert(agent, to);
        Ok(())
    }

    /// Current cell of an agent, if it has ever been placed.
    pub fn position_of(&self, agent: AgentId) -> Option<CellPos> {
        self.index.get(&agent).copied()
    }

    /// Occupants of a cell in insertion order. The order is stable for a
    /// given grid state but carries no semantic meaning.
    pub fn contents_at(&self, pos: CellPos) -> &[AgentId] {
        &self.cells[self.idx(pos)]
    }

    /// Moore neighborhood of `pos` with wraparound, deduplicated.
    ///
    /// On grids narrower than 3 in either dimension two offsets can wrap to
    /// the same cell; each distinct cell appears once. The center is
    /// excluded unless `include_center` is set, even when an offset wraps
    /// back onto it, so a 1x1 grid yields an empty neighborhood.
    pub fn neighborhood(&self, pos: CellPos, include_center: bool) -> Vec<CellPos> {
        let mut cells = Vec::with_capacity(9);
        if include_center {
            cells.push(pos);
        }
        for (dx, dy) in MOORE_OFFSETS {
            let cell = self.wrap(pos.x as i64 + dx, pos.y as i64 + dy);
            if !include_center && cell == pos {
                continue;
            }
            if !cells.contains(&cell) {
                cells.push(cell);
            }
        }
        cells
    }

    /// Occupant count per cell, row-major `[y][x]`, for external heatmap
    /// consumers.
    pub fn occupancy_counts(&self) -> Vec<Vec<usize>> {
        (0..self.height)
            .map(|y| {
                (0..self.width)
                    .map(|x| self.cells[y * self.width + x].len())
                    .collect()
            })
            .collect()
    }

    /// Number of agents currently placed.
    pub fn placed_count(&self) -> usize {
        self.index.len()
    }
}
