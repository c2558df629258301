//! Grid model: cell geometry, cell classification, and the move validity rule.

mod layout;
mod model;
mod types;

pub use model::Grid;
pub use types::{Action, CellType, Position};
