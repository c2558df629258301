//! Reward model for grid transitions.
//!
//! Every transition earns exactly one of three scalar rewards, plus the
//! target bonus when it enters the target cell:
//!
//! | transition                 | reward            |
//! |----------------------------|-------------------|
//! | ordinary move              | `step`            |
//! | move into the target       | `step + target`   |
//! | bump (forbidden/off-grid)  | `wall`            |

use std::fmt;

use crate::error::ConfigError;

/// Selects one of the scalar rewards in a [`RewardConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RewardKind {
    Step,
    Wall,
    Target,
}

impl fmt::Display for RewardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RewardKind::Step => write!(f, "step"),
            RewardKind::Wall => write!(f, "wall"),
            RewardKind::Target => write!(f, "target"),
        }
    }
}

/// Per-transition rewards and the discount factor γ.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RewardConfig {
    /// Reward of an ordinary transition (usually a cost).
    pub step: f64,
    /// Reward of a bump into a forbidden cell or the grid boundary.
    pub wall: f64,
    /// Bonus added on entering the target.
    pub target: f64,
    /// Discount factor, in `[0, 1)`.
    pub gamma: f64,
}

impl RewardConfig {
    /// Creates a validated reward configuration.
    pub fn new(step: f64, wall: f64, target: f64, gamma: f64) -> Result<Self, ConfigError> {
        let config = Self {
            step,
            wall,
            target,
            gamma,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks that every reward is finite and that `0 <= gamma < 1`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for kind in [RewardKind::Step, RewardKind::Wall, RewardKind::Target] {
            let value = self.get(kind);
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteReward { kind, value });
            }
        }
        if !(0.0..1.0).contains(&self.gamma) {
            return Err(ConfigError::DiscountOutOfRange(self.gamma));
        }
        Ok(())
    }

    /// Returns the reward of the given kind.
    pub fn get(&self, kind: RewardKind) -> f64 {
        match kind {
            RewardKind::Step => self.step,
            RewardKind::Wall => self.wall,
            RewardKind::Target => self.target,
        }
    }

    /// Replaces one reward, rejecting non-finite values.
    pub fn set(&mut self, kind: RewardKind, value: f64) -> Result<(), ConfigError> {
        if !value.is_finite() {
            return Err(ConfigError::NonFiniteReward { kind, value });
        }
        match kind {
            RewardKind::Step => self.step = value,
            RewardKind::Wall => self.wall = value,
            RewardKind::Target => self.target = value,
        }
        Ok(())
    }

    /// Replaces the discount factor, rejecting values outside `[0, 1)`.
    pub fn set_gamma(&mut self, gamma: f64) -> Result<(), ConfigError> {
        if !(0.0..1.0).contains(&gamma) {
            return Err(ConfigError::DiscountOutOfRange(gamma));
        }
        self.gamma = gamma;
        Ok(())
    }

    /// Immediate reward of a successful move, including the target bonus.
    pub fn move_reward(&self, enters_target: bool) -> f64 {
        if enters_target {
            self.step + self.target
        } else {
            self.step
        }
    }
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            step: -1.0,
            wall: -5.0,
            target: 10.0,
            gamma: 0.9,
        }
    }
}
