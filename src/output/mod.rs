//! Output
//!
//! Snapshot serialization and wealth statistics for external reporting.
//! Pure consumers of the model's read API; the engine never reads these
//! back.

pub mod snapshot;
pub mod stats;

pub use snapshot::{capture, write_snapshot_to_dir, SimulationSnapshot};
pub use stats::WealthStats;
