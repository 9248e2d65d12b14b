//! Core Components
//!
//! Agent records and the spatial occupancy grid.

pub mod agent;
pub mod grid;

pub use agent::{AgentId, AgentRecord, AgentRegistry, AgentState, Transfer};
pub use grid::{CellPos, OccupancyGrid};
