//! Snapshot Serialization
//!
//! JSON snapshots of the full simulation state for downstream
//! visualization (wealth histograms, occupancy heatmaps).

use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::components::agent::AgentState;
use crate::model::Model;

/// Serializable view of a model at one tick.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationSnapshot {
    pub tick: u64,
    pub seed: u64,
    pub total_wealth: u64,
    pub agents: Vec<AgentState>,
    /// Occupant count per cell, row-major `[y][x]`.
    pub occupancy: Vec<Vec<usize>>,
}

/// Capture the current state of a model.
pub fn capture(model: &Model) -> SimulationSnapshot {
    SimulationSnapshot {
        tick: model.current_tick(),
        seed: model.seed(),
        total_wealth: model.total_wealth(),
        agents: model.snapshot(),
        occupancy: model.occupancy_counts(),
    }
}

/// Write a snapshot as pretty JSON under `dir`, named by tick.
pub fn write_snapshot_to_dir(snapshot: &SimulationSnapshot, dir: &Path) -> io::Result<PathBuf> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(snapshot)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    let path = dir.join(format!("snapshot_tick_{:06}.json", snapshot.tick));
    fs::write(&path, json)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;

    #[test]
    fn test_capture_reflects_model() {
        let model = Model::new(SimConfig::new(10, 4, 4, Some(42))).unwrap();
        let snapshot = capture(&model);

        assert_eq!(snapshot.tick, 0);
        assert_eq!(snapshot.seed, 42);
        assert_eq!(snapshot.total_wealth, 10);
        assert_eq!(snapshot.agents.len(), 10);
        assert_eq!(snapshot.occupancy.len(), 4);
        assert_eq!(snapshot.occupancy[0].len(), 4);
    }

    #[test]
    fn test_snapshot_serializes() {
        let model = Model::new(SimConfig::new(2, 3, 3, Some(1))).unwrap();
        let json = serde_json::to_string(&capture(&model)).unwrap();
        assert!(json.contains("\"tick\":0"));
        assert!(json.contains("\"agents\""));
    }
}
