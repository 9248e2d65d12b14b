//! Simulation Systems
//!
//! Per-tick activation scheduling and the agent step protocol.

pub mod scheduler;
pub mod step;

pub use scheduler::{step_agents, ActivationSchedule};
pub use step::Steppable;
