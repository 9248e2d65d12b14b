//! Event Log
//!
//! Per-tick record of applied moves and transfers, drained by the driver
//! for reporting. The engine never reads these back; they are a one-way
//! feed to external consumers.

use bevy_ecs::prelude::*;
use serde::Serialize;

use crate::components::agent::AgentId;
use crate::components::grid::CellPos;

/// One observable state change during a tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SimEvent {
    /// An agent relocated to a neighboring cell.
    Moved {
        tick: u64,
        agent: AgentId,
        from: CellPos,
        to: CellPos,
    },
    /// One unit of wealth changed hands (possibly from an agent to itself).
    Transferred {
        tick: u64,
        from: AgentId,
        to: AgentId,
    },
}

/// Resource accumulating events for the current tick.
#[derive(Resource, Debug, Default)]
pub struct TickEvents {
    events: Vec<SimEvent>,
}

impl TickEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: SimEvent) {
        self.events.push(event);
    }

    pub fn drain(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
