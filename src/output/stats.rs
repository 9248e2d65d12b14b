//! Wealth Statistics
//!
//! Summary measures over a snapshot: range, mean, a wealth histogram, and
//! the Gini coefficient of the distribution.

use serde::Serialize;

use crate::components::agent::AgentState;

/// Distribution summary for the driver's final report.
#[derive(Debug, Clone, Serialize)]
pub struct WealthStats {
    pub agents: usize,
    pub total: u64,
    pub min: u64,
    pub max: u64,
    pub mean: f64,
    /// Count of agents per wealth level, indexed by wealth `0..=max`.
    pub histogram: Vec<usize>,
    /// Gini coefficient in `[0, 1]`; 0 for a perfectly equal distribution.
    pub gini: f64,
}

impl WealthStats {
    pub fn from_snapshot(agents: &[AgentState]) -> Self {
        let wealths: Vec<u64> = agents.iter().map(|a| a.wealth).collect();
        let total: u64 = wealths.iter().sum();
        let min = wealths.iter().copied().min().unwrap_or(0);
        let max = wealths.iter().copied().max().unwrap_or(0);
        let mean = if wealths.is_empty() {
            0.0
        } else {
            total as f64 / wealths.len() as f64
        };

        let mut histogram = vec![0usize; max as usize + 1];
        for &w in &wealths {
            histogram[w as usize] += 1;
        }

        Self {
            agents: wealths.len(),
            total,
            min,
            max,
            mean,
            histogram,
            gini: gini(&wealths),
        }
    }
}

/// Gini coefficient: mean absolute difference over twice the mean. Zero for
/// empty or zero-wealth populations.
fn gini(wealths: &[u64]) -> f64 {
    let n = wealths.len();
    let total: u64 = wealths.iter().sum();
    if n == 0 || total == 0 {
        return 0.0;
    }
    let mut abs_diff_sum = 0u64;
    for (i, &a) in wealths.iter().enumerate() {
        for &b in &wealths[i + 1..] {
            abs_diff_sum += a.abs_diff(b);
        }
    }
    // Pairs above counted once; the standard formula wants both orderings.
    (2 * abs_diff_sum) as f64 / (2.0 * n as f64 * total as f64)
}
