use thiserror::Error;

use crate::reward::RewardKind;

/// Errors raised while building or reconfiguring a grid world.
///
/// Runtime commands on a [`Simulation`](crate::simulation::Simulation) never
/// fail; these errors only surface from constructors and from the two reward
/// mutators, which leave the current configuration untouched on rejection.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Grid size must be at least 1")]
    ZeroGridSize,

    #[error("Discount factor must lie in [0, 1), got {0}")]
    DiscountOutOfRange(f64),

    #[error("Reward for {kind} must be finite, got {value}")]
    NonFiniteReward { kind: RewardKind, value: f64 },

    #[error("Tick interval must be a positive, finite duration")]
    ZeroTickInterval,

    #[error("Start position ({row}, {col}) lies outside a {size}x{size} grid")]
    StartOutOfBounds { row: usize, col: usize, size: usize },

    #[error("Target position ({row}, {col}) lies outside a {size}x{size} grid")]
    TargetOutOfBounds { row: usize, col: usize, size: usize },

    #[error("Start and target cannot share position ({row}, {col})")]
    StartOnTarget { row: usize, col: usize },

    #[error("Solver tolerance must be positive and finite, got {0}")]
    InvalidTolerance(f64),

    #[error("Unknown policy {0:?}; expected random, greedy or optimal")]
    UnknownPolicy(String),
}

/// Errors raised while parsing an ASCII grid layout.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseGridError {
    #[error("Grid layout is empty")]
    Empty,

    #[error("Row {row} has {len} cells, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("Unknown cell character {ch:?} at ({row}, {col})")]
    UnknownCell { row: usize, col: usize, ch: char },
}
