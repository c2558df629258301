//! Run state, transition events, and read-only snapshots.

use std::fmt;

use crate::grid::{Action, Grid, Position};
use crate::policy::PolicyKind;
use crate::reward::RewardConfig;
use crate::solver::{SolveReport, ValueTable};
use crate::Id;

/// Lifecycle of the live loop.
///
/// `Idle → Running ⇄ Paused → Idle`. Reaching the target moves a running
/// simulation straight back to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunState {
    #[default]
    Idle,
    Running,
    Paused,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Idle => write!(f, "idle"),
            RunState::Running => write!(f, "running"),
            RunState::Paused => write!(f, "paused"),
        }
    }
}

/// What a single transition did, for transient display feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    Moved,
    Bumped,
    ReachedTarget,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Moved => write!(f, "moved"),
            Outcome::Bumped => write!(f, "bumped"),
            Outcome::ReachedTarget => write!(f, "reached-target"),
        }
    }
}

/// Result of a single simulation step.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transition {
    /// Action taken, or `None` when the episode ended with the agent
    /// already standing on the target.
    pub action: Option<Action>,
    pub from: Position,
    pub to: Position,
    pub outcome: Outcome,
    /// Reward earned by this transition.
    pub reward: f64,
    /// Step counter after the transition.
    pub step: u32,
}

/// Owned, read-only view of a simulation for the display layer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    pub id: Id,
    pub grid: Grid,
    pub agent: Option<Position>,
    pub start: Option<Position>,
    pub target: Option<Position>,
    pub values: ValueTable,
    pub solve: SolveReport,
    pub rewards: RewardConfig,
    pub policy: PolicyKind,
    pub steps: u32,
    pub cumulative_reward: f64,
    pub run_state: RunState,
    pub episode_done: bool,
    pub last_transition: Option<Transition>,
}
