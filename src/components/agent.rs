//! Agent Records
//!
//! Identity and wealth for every agent, held in a registry resource. An
//! agent's position lives only in the occupancy grid; records never cache
//! it, so there is a single source of truth for where an agent stands.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::components::grid::CellPos;
use crate::error::{Result, SimError};

/// Unique, stable identifier for an agent. Ids are dense: the registry
/// assigns `0..agent_count` at model construction and never removes one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(pub u32);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "agent_{:04}", self.0)
    }
}

/// One agent: identity plus a non-negative wealth balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentRecord {
    pub id: AgentId,
    pub wealth: u64,
}

impl AgentRecord {
    /// Every agent starts with one unit of wealth.
    pub fn new(id: AgentId) -> Self {
        Self { id, wealth: 1 }
    }
}

/// A proposed one-unit wealth transfer, produced by an agent step and
/// applied by the registry. `from == to` is the preserved self-transfer
/// case: debit and credit land on the same record, net zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transfer {
    pub from: AgentId,
    pub to: AgentId,
}

/// Registry resource owning every agent record, indexed by dense id.
#[derive(Resource, Debug, Default, Clone)]
pub struct AgentRegistry {
    records: Vec<AgentRecord>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the next agent and return its id.
    pub fn register(&mut self) -> AgentId {
        let id = AgentId(self.records.len() as u32);
        self.records.push(AgentRecord::new(id));
        id
    }

    pub fn get(&self, id: AgentId) -> Option<&AgentRecord> {
        self.records.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut AgentRecord> {
        self.records.get_mut(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in id order.
    pub fn iter(&self) -> impl Iterator<Item = &AgentRecord> {
        self.records.iter()
    }

    /// Sum of all wealth. Invariant across ticks: every transfer debits and
    /// credits exactly one unit.
    pub fn total_wealth(&self) -> u64 {
        self.records.iter().map(|r| r.wealth).sum()
    }

    /// Apply a one-unit transfer, debit before credit. The caller only
    /// proposes a transfer when the payer holds wealth, so the debit cannot
    /// underflow.
    pub fn apply_transfer(&mut self, transfer: Transfer) -> Result<()> {
        if self.get(transfer.to).is_none() {
            return Err(SimError::UnknownAgent(transfer.to));
        }
        {
            let from = self
                .get_mut(transfer.from)
                .ok_or(SimError::UnknownAgent(transfer.from))?;
            debug_assert!(from.wealth > 0, "transfer proposed by a broke agent");
            from.wealth -= 1;
        }
        let to = self
            .get_mut(transfer.to)
            .expect("receiving record checked above");
        to.wealth += 1;
        Ok(())
    }
}

/// Read-only view of one agent for snapshots: plain values, no references
/// into live state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentState {
    pub id: AgentId,
    pub wealth: u64,
    pub pos: CellPos,
}
