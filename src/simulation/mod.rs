//! Simulation loop: agent state, episode accounting, and the live-loop clock.

mod config;
mod engine;
mod metrics;
mod state;
mod ticker;


pub use config::{SimulationConfig, DEFAULT_TICK_SECONDS};
pub use engine::Simulation;
pub use metrics::EvaluationMetrics;
pub use state::{Outcome, RunState, Snapshot, Transition};
pub use ticker::{Ticker, MAX_BACKLOG_TICKS};
