//! Error Taxonomy
//!
//! Construction failures are recoverable by the caller; the remaining
//! variants signal a corrupted occupancy index and are raised loudly at the
//! offending call site rather than silently swallowed.

use thiserror::Error;

use crate::components::agent::AgentId;
use crate::components::grid::CellPos;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// Invalid construction parameters. The model is never created.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// An operation addressed an agent the grid has never placed.
    #[error("unknown agent {0}")]
    UnknownAgent(AgentId),

    /// `place` was called for an agent that is already on the grid.
    #[error("{0} is already placed at {1}")]
    DuplicatePlacement(AgentId, CellPos),
}

pub type Result<T> = std::result::Result<T, SimError>;
