//! Greedy distance-to-target policy.
//!
//! Considers only moves that are currently valid and picks the one whose
//! destination is closest to the target in Manhattan distance. Ties go to the
//! earliest action in [`Action::ALL`]. Falls back to a random action when the
//! agent is walled in or no target is marked.

use rand::Rng;

use super::kind::PolicyContext;
use super::random;
use crate::grid::Action;

pub fn select<R: Rng + ?Sized>(ctx: &PolicyContext<'_>, rng: &mut R) -> Action {
    let Some(target) = ctx.grid.target() else {
        return random::select(rng);
    };

    let mut best: Option<(Action, usize)> = None;
    for action in Action::ALL {
        let Some(next) = ctx.grid.destination(ctx.position, action) else {
            continue;
        };
        let dist = next.manhattan(&target);
        match best {
            Some((_, d)) if dist >= d => {}
            _ => best = Some((action, dist)),
        }
    }

    match best {
        Some((action, _)) => action,
        None => random::select(rng),
    }
}
