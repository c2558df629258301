//! Configuration for a grid-world simulation.

use qtty::{Quantity, Second};

use super::ticker::check_interval;
use crate::error::ConfigError;
use crate::grid::Position;
use crate::policy::PolicyKind;
use crate::reward::RewardConfig;
use crate::solver::ValueIteration;
use crate::units::{convert, SameDim};

/// Default tick period of the live loop, in seconds.
pub const DEFAULT_TICK_SECONDS: f64 = 0.3;

/// Configuration of one simulation instance.
///
/// Controls grid geometry, the reward model, solver limits, the live-loop
/// clock, and the policy's entropy source.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationConfig {
    // --- Grid geometry ---
    /// Side length N of the square grid.
    pub size: usize,
    /// Initial start cell.
    pub start: Position,
    /// Initial target cell.
    pub target: Position,

    // --- Rewards and solver ---
    pub rewards: RewardConfig,
    pub solver: ValueIteration,

    // --- Live loop ---
    /// Period between automatic steps while running.
    pub tick_interval: Quantity<Second>,
    /// Policy active when the simulation is created.
    pub policy: PolicyKind,
    /// Seed for the policy RNG; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl SimulationConfig {
    /// Sets the tick interval from any time unit.
    pub fn with_tick_interval<U>(mut self, interval: Quantity<U>) -> Self
    where
        U: SameDim<Second>,
    {
        self.tick_interval = convert::<U, Second>(interval);
        self
    }

    /// Checks every field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_geometry()?;
        self.validate_dynamics()
    }

    /// Checks grid size and role positions.
    pub fn validate_geometry(&self) -> Result<(), ConfigError> {
        let size = self.size;
        if size == 0 {
            return Err(ConfigError::ZeroGridSize);
        }
        if self.start.row >= size || self.start.col >= size {
            return Err(ConfigError::StartOutOfBounds {
                row: self.start.row,
                col: self.start.col,
                size,
            });
        }
        if self.target.row >= size || self.target.col >= size {
            return Err(ConfigError::TargetOutOfBounds {
                row: self.target.row,
                col: self.target.col,
                size,
            });
        }
        if self.start == self.target {
            return Err(ConfigError::StartOnTarget {
                row: self.start.row,
                col: self.start.col,
            });
        }
        Ok(())
    }

    /// Checks rewards, solver limits, and the tick interval.
    pub fn validate_dynamics(&self) -> Result<(), ConfigError> {
        self.rewards.validate()?;
        let tol = self.solver.tolerance;
        if !(tol.is_finite() && tol > 0.0) {
            return Err(ConfigError::InvalidTolerance(tol));
        }
        check_interval(self.tick_interval)
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            size: 5,
            start: Position::new(0, 0),
            target: Position::new(4, 4),
            rewards: RewardConfig::default(),
            solver: ValueIteration::default(),
            tick_interval: Quantity::new(DEFAULT_TICK_SECONDS),
            policy: PolicyKind::default(),
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qtty::Minute;

    #[test]
    fn default_config_is_valid() {
        let cfg = SimulationConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.size, 5);
        assert_eq!(cfg.target, Position::new(4, 4));
        assert_eq!(cfg.solver.max_iterations, 200);
    }

    #[test]
    fn tick_interval_from_minutes() {
        let cfg = SimulationConfig::default().with_tick_interval(Quantity::<Minute>::new(0.01));
        assert!((cfg.tick_interval.value() - 0.6).abs() < 1e-12);
    }

    #[test]
    fn rejects_bad_geometry() {
        let cfg = SimulationConfig {
            size: 0,
            ..SimulationConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroGridSize));

        let cfg = SimulationConfig {
            size: 3,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::TargetOutOfBounds { row: 4, col: 4, size: 3 })
        ));

        let cfg = SimulationConfig {
            target: Position::new(0, 0),
            ..SimulationConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::StartOnTarget { .. })
        ));
    }

    #[test]
    fn rejects_bad_dynamics() {
        let mut cfg = SimulationConfig::default();
        cfg.rewards.gamma = 1.0;
        assert_eq!(cfg.validate(), Err(ConfigError::DiscountOutOfRange(1.0)));

        let mut cfg = SimulationConfig::default();
        cfg.solver.tolerance = 0.0;
        assert_eq!(cfg.validate(), Err(ConfigError::InvalidTolerance(0.0)));

        let cfg = SimulationConfig {
            tick_interval: Quantity::new(0.0),
            ..SimulationConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroTickInterval));
    }
}
