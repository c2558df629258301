//! Value-iteration solver for the grid MDP.

mod table;
mod value_iteration;

pub use table::ValueTable;
pub use value_iteration::{
    lookahead, sweep, SolveReport, ValueIteration, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE,
};

pub(crate) use value_iteration::argmax_action;
