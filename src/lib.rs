//! Spatial Wealth-Exchange Simulation Engine
//!
//! A bounded toroidal grid on which agents are activated once per tick, in
//! a randomized order, to move to a neighboring cell and hand one unit of
//! wealth to a co-located peer. All randomness flows through one seeded
//! RNG, so a run is fully determined by its construction parameters.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;

pub mod components;
pub mod config;
pub mod error;
pub mod events;
pub mod model;
pub mod output;
pub mod setup;
pub mod systems;

pub use components::agent::{AgentId, AgentRecord, AgentRegistry, AgentState, Transfer};
pub use components::grid::{CellPos, OccupancyGrid};
pub use config::SimConfig;
pub use error::{Result, SimError};
pub use events::{SimEvent, TickEvents};
pub use model::{Model, TickState};
pub use systems::{step_agents, ActivationSchedule, Steppable};

/// Seeded random number generator resource
#[derive(Resource)]
pub struct SimRng(pub SmallRng);
