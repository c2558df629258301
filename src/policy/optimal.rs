//! Optimal policy: greedy with respect to the current value table.
//!
//! Scores each action with the solver's one-step lookahead and takes the
//! maximum, so the agent follows the policy implied by the latest solve.

use rand::Rng;

use super::kind::PolicyContext;
use super::random;
use crate::grid::Action;
use crate::solver::argmax_action;

pub fn select<R: Rng + ?Sized>(ctx: &PolicyContext<'_>, rng: &mut R) -> Action {
    let q = ctx.values.q_values(ctx.grid, ctx.rewards, ctx.position);
    argmax_action(q).unwrap_or_else(|| random::select(rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Grid, Position};
    use crate::reward::RewardConfig;
    use crate::solver::{ValueIteration, ValueTable};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn solved(grid: &Grid, rewards: &RewardConfig) -> ValueTable {
        ValueIteration::default().solve(grid, rewards).0
    }

    #[test]
    fn symmetric_tie_goes_right() {
        let grid = Grid::with_roles(5, Position::new(0, 0), Position::new(4, 4)).unwrap();
        let rewards = RewardConfig::default();
        let values = solved(&grid, &rewards);
        assert_eq!(
            values.get(Position::new(0, 1)),
            values.get(Position::new(1, 0))
        );
        let ctx = PolicyContext {
            grid: &grid,
            values: &values,
            rewards: &rewards,
            position: Position::new(0, 0),
        };
        assert_eq!(select(&ctx, &mut StdRng::seed_from_u64(0)), Action::Right);
    }

    #[test]
    fn picks_higher_valued_neighbour() {
        let mut grid = Grid::with_roles(5, Position::new(0, 0), Position::new(4, 4)).unwrap();
        // Blocking (0,1) makes Right a bump; Down must win.
        grid.mark_forbidden(0, 1);
        let rewards = RewardConfig::default();
        let values = solved(&grid, &rewards);
        let ctx = PolicyContext {
            grid: &grid,
            values: &values,
            rewards: &rewards,
            position: Position::new(0, 0),
        };
        assert_eq!(select(&ctx, &mut StdRng::seed_from_u64(0)), Action::Down);
    }

    #[test]
    fn steps_into_target_when_adjacent() {
        let grid = Grid::with_roles(5, Position::new(0, 0), Position::new(4, 4)).unwrap();
        let rewards = RewardConfig::default();
        let values = solved(&grid, &rewards);
        let ctx = PolicyContext {
            grid: &grid,
            values: &values,
            rewards: &rewards,
            position: Position::new(3, 4),
        };
        assert_eq!(select(&ctx, &mut StdRng::seed_from_u64(0)), Action::Down);
    }

    #[test]
    fn follows_greedy_action_table() {
        let grid: Grid = "
            S....
            .##..
            ...#.
            .#...
            ...#T
        "
        .parse()
        .unwrap();
        let rewards = RewardConfig::default();
        let values = solved(&grid, &rewards);
        let table = values.greedy_actions(&grid, &rewards);
        let mut rng = StdRng::seed_from_u64(0);
        for (pos, expected) in grid.positions().zip(table) {
            let Some(expected) = expected else { continue };
            let ctx = PolicyContext {
                grid: &grid,
                values: &values,
                rewards: &rewards,
                position: pos,
            };
            assert_eq!(select(&ctx, &mut rng), expected);
        }
    }

    #[test]
    fn non_finite_values_fall_back_to_random() {
        let grid = Grid::new(3).unwrap();
        let rewards = RewardConfig {
            step: f64::NEG_INFINITY,
            wall: f64::NEG_INFINITY,
            ..RewardConfig::default()
        };
        let values = ValueTable::zeros(3);
        let ctx = PolicyContext {
            grid: &grid,
            values: &values,
            rewards: &rewards,
            position: Position::new(1, 1),
        };
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen = [false; 4];
        for _ in 0..200 {
            seen[select(&ctx, &mut rng).index()] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
