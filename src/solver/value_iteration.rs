//! Value iteration over the deterministic grid MDP.
//!
//! Each sweep applies the Bellman optimality operator to every admissible
//! state:
//!
//! ```text
//! Q(s, a) = step [+ target if s' is the target] + γ · V(s')   valid move to s'
//!         = wall                                + γ · V(s)    bump, agent stays
//! V(s)    = max_a Q(s, a)
//! ```
//!
//! Target and forbidden cells are pinned to zero. Sweeps are synchronous: a
//! sweep reads only the previous table.

use tracing::debug;

use super::table::ValueTable;
use crate::grid::{Action, Grid, Position};
use crate::reward::RewardConfig;

/// Default sweep cap.
pub const DEFAULT_MAX_ITERATIONS: usize = 200;

/// Default convergence threshold on the per-sweep maximum change.
pub const DEFAULT_TOLERANCE: f64 = 1e-3;

/// Outcome of a solve.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveReport {
    /// Number of sweeps performed.
    pub iterations: usize,
    /// Whether the last sweep changed no value by more than the tolerance.
    pub converged: bool,
    /// Largest per-state change in the last sweep.
    pub max_delta: f64,
}

/// Value-iteration solver parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValueIteration {
    /// Hard cap on the number of sweeps.
    pub max_iterations: usize,
    /// Stop once a sweep changes no value by more than this.
    pub tolerance: f64,
}

impl ValueIteration {
    pub fn new(max_iterations: usize, tolerance: f64) -> Self {
        Self {
            max_iterations,
            tolerance,
        }
    }

    /// Computes the optimal state-value table for `grid` under `rewards`.
    ///
    /// Starts from an all-zero table and never fails: when the sweep cap is
    /// hit first, the last table is returned with `converged == false`.
    pub fn solve(&self, grid: &Grid, rewards: &RewardConfig) -> (ValueTable, SolveReport) {
        let mut values = ValueTable::zeros(grid.size());
        let mut report = SolveReport {
            iterations: 0,
            converged: false,
            max_delta: f64::INFINITY,
        };

        while report.iterations < self.max_iterations {
            let next = sweep(grid, rewards, &values);
            report.max_delta = next.max_abs_diff(&values);
            report.iterations += 1;
            values = next;
            if report.max_delta <= self.tolerance {
                report.converged = true;
                break;
            }
        }

        debug!(
            iterations = report.iterations,
            converged = report.converged,
            max_delta = report.max_delta,
            "value iteration finished"
        );
        (values, report)
    }
}

impl Default for ValueIteration {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

/// Applies one synchronous Bellman sweep to `values`.
pub fn sweep(grid: &Grid, rewards: &RewardConfig, values: &ValueTable) -> ValueTable {
    let mut next = ValueTable::zeros(grid.size());
    for pos in grid.positions() {
        if grid.cell_at(pos).is_terminal() {
            continue;
        }
        let best = Action::ALL
            .iter()
            .map(|a| lookahead(grid, rewards, values, pos, *a))
            .fold(f64::NEG_INFINITY, f64::max);
        next.set(pos, best);
    }
    next
}

/// One-step lookahead value of taking `action` from `pos`.
pub fn lookahead(
    grid: &Grid,
    rewards: &RewardConfig,
    values: &ValueTable,
    pos: Position,
    action: Action,
) -> f64 {
    match grid.destination(pos, action) {
        Some(next) => rewards.move_reward(grid.is_target(next)) + rewards.gamma * values.get(next),
        None => rewards.wall + rewards.gamma * values.get(pos),
    }
}

/// Index-ordered argmax over action values.
///
/// Earlier actions win ties. Returns `None` when no value exceeds `-∞`.
pub(crate) fn argmax_action(q: [f64; 4]) -> Option<Action> {
    let mut best = f64::NEG_INFINITY;
    let mut best_action = None;
    for (action, value) in Action::ALL.into_iter().zip(q) {
        if value > best {
            best = value;
            best_action = Some(action);
        }
    }
    best_action
}
