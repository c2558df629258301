//! Uniform random action selection.

use rand::Rng;

use crate::grid::Action;

/// Picks one of the four actions uniformly, ignoring grid validity.
///
/// May pick a move that bumps. Also serves as the fallback of the other
/// policies when they have nothing to choose from.
pub fn select<R: Rng + ?Sized>(rng: &mut R) -> Action {
    Action::ALL[rng.gen_range(0..Action::ALL.len())]
}
