//! gridmdp - finite MDP grid-world engine
//!
//! An editable N×N grid world backed by a value-iteration solver and driven
//! by a cooperative simulation loop that executes one of three policies
//! (random, greedy, optimal).
//!
//! # Example
//!
//! ```
//! use gridmdp::{Outcome, PolicyKind, Simulation, SimulationConfig};
//!
//! let mut sim = Simulation::new(SimulationConfig {
//!     policy: PolicyKind::Optimal,
//!     seed: Some(1),
//!     ..SimulationConfig::default()
//! })
//! .unwrap();
//!
//! let mut last = None;
//! while let Some(t) = sim.step() {
//!     last = Some(t.outcome);
//! }
//! assert_eq!(last, Some(Outcome::ReachedTarget));
//! assert_eq!(sim.steps(), 8);
//! ```

pub mod error;
pub mod grid;
pub mod policy;
pub mod reward;
pub mod simulation;
pub mod solver;
pub mod units;

pub use error::{ConfigError, ParseGridError};
pub use grid::{Action, CellType, Grid, Position};
pub use policy::{PolicyContext, PolicyKind};
pub use reward::{RewardConfig, RewardKind};
pub use simulation::{
    EvaluationMetrics, Outcome, RunState, Simulation, SimulationConfig, Snapshot, Transition,
};
pub use solver::{SolveReport, ValueIteration, ValueTable};

/// Identifier type used to tag simulation instances.
pub type Id = String;

/// Generates a new unique identifier (UUID v4).
pub fn generate_id() -> Id {
    uuid::Uuid::new_v4().to_string()
}
