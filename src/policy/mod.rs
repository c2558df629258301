//! Action-selection policies.
//!
//! The set of policies is closed: [`PolicyKind`] is an enum with one handler
//! module per variant.

mod greedy;
mod kind;
mod optimal;
mod random;

pub use kind::{PolicyContext, PolicyKind};
