//! Closed set of action-selection strategies.

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use super::{greedy, optimal, random};
use crate::error::ConfigError;
use crate::grid::{Action, Grid, Position};
use crate::reward::RewardConfig;
use crate::solver::ValueTable;

/// Read-only inputs to a policy decision.
#[derive(Debug, Clone, Copy)]
pub struct PolicyContext<'a> {
    pub grid: &'a Grid,
    pub values: &'a ValueTable,
    pub rewards: &'a RewardConfig,
    /// Current agent position.
    pub position: Position,
}

/// The policy driving the agent.
///
/// Every variant is a pure function of the [`PolicyContext`] plus, for
/// [`PolicyKind::Random`] and the fallbacks, the supplied RNG.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PolicyKind {
    /// Uniform over the four actions.
    Random,
    /// Valid move closest to the target.
    Greedy,
    /// Argmax of the one-step lookahead over the value table.
    #[default]
    Optimal,
}

impl PolicyKind {
    /// All variants, in display order.
    pub const ALL: [PolicyKind; 3] = [PolicyKind::Random, PolicyKind::Greedy, PolicyKind::Optimal];

    /// Selects the next action.
    pub fn select_action<R: Rng + ?Sized>(&self, ctx: &PolicyContext<'_>, rng: &mut R) -> Action {
        match self {
            PolicyKind::Random => random::select(rng),
            PolicyKind::Greedy => greedy::select(ctx, rng),
            PolicyKind::Optimal => optimal::select(ctx, rng),
        }
    }

    /// Returns a human-readable name for this policy.
    pub fn name(&self) -> &'static str {
        match self {
            PolicyKind::Random => "random",
            PolicyKind::Greedy => "greedy",
            PolicyKind::Optimal => "optimal",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PolicyKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PolicyKind::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownPolicy(s.to_string()))
    }
}
