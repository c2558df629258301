//! State-value table over the grid.

use std::fmt;

use super::value_iteration::{argmax_action, lookahead};
use crate::grid::{Action, Grid, Position};
use crate::reward::RewardConfig;

/// One state value per grid cell, stored row-major.
///
/// Produced by [`ValueIteration::solve`](super::ValueIteration::solve) and
/// read-only everywhere else. Target and forbidden cells hold `0.0`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValueTable {
    size: usize,
    values: Vec<f64>,
}

impl ValueTable {
    /// All-zero table for a `size`×`size` grid.
    pub fn zeros(size: usize) -> Self {
        Self {
            size,
            values: vec![0.0; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Value at `pos`, or `0.0` when out of bounds.
    pub fn get(&self, pos: Position) -> f64 {
        if pos.row < self.size && pos.col < self.size {
            self.values[pos.row * self.size + pos.col]
        } else {
            0.0
        }
    }

    pub(crate) fn set(&mut self, pos: Position, value: f64) {
        self.values[pos.row * self.size + pos.col] = value;
    }

    /// Row-major slice of all values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Largest absolute per-cell difference to another table of the same size.
    pub fn max_abs_diff(&self, other: &ValueTable) -> f64 {
        self.values
            .iter()
            .zip(&other.values)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max)
    }

    /// Largest value over non-terminal cells, with its position.
    pub fn argmax(&self, grid: &Grid) -> Option<(Position, f64)> {
        grid.positions()
            .filter(|p| !grid.cell_at(*p).is_terminal())
            .map(|p| (p, self.get(p)))
            .fold(None, |best, (p, v)| match best {
                Some((_, bv)) if bv >= v => best,
                _ => Some((p, v)),
            })
    }

    /// One-step lookahead values of all four actions from `pos`, in tie-break order.
    pub fn q_values(&self, grid: &Grid, rewards: &RewardConfig, pos: Position) -> [f64; 4] {
        Action::ALL.map(|a| lookahead(grid, rewards, self, pos, a))
    }

    /// Best action from `pos` under this table, or `None` on terminal cells.
    ///
    /// Ties go to the earliest action in [`Action::ALL`].
    pub fn best_action(&self, grid: &Grid, rewards: &RewardConfig, pos: Position) -> Option<Action> {
        if !grid.contains(pos) || grid.cell_at(pos).is_terminal() {
            return None;
        }
        argmax_action(self.q_values(grid, rewards, pos))
    }

    /// Greedy policy table: the best action for every cell, row-major.
    pub fn greedy_actions(&self, grid: &Grid, rewards: &RewardConfig) -> Vec<Option<Action>> {
        grid.positions()
            .map(|p| self.best_action(grid, rewards, p))
            .collect()
    }
}

impl fmt::Display for ValueTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.values.chunks(self.size.max(1)) {
            let cells: Vec<String> = row.iter().map(|v| format!("{:>7.2}", v)).collect();
            writeln!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeros_has_expected_shape() {
        let t = ValueTable::zeros(3);
        assert_eq!(t.size(), 3);
        assert_eq!(t.values().len(), 9);
        assert!(t.values().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn get_out_of_bounds_is_zero() {
        let mut t = ValueTable::zeros(2);
        t.set(Position::new(1, 1), 4.0);
        assert_eq!(t.get(Position::new(1, 1)), 4.0);
        assert_eq!(t.get(Position::new(2, 0)), 0.0);
    }

    #[test]
    fn max_abs_diff() {
        let a = ValueTable::zeros(2);
        let mut b = ValueTable::zeros(2);
        b.set(Position::new(0, 1), -3.0);
        b.set(Position::new(1, 0), 1.0);
        assert_eq!(a.max_abs_diff(&b), 3.0);
    }

    #[test]
    fn best_action_prefers_right_on_tie() {
        let grid = Grid::new(3).unwrap();
        let table = ValueTable::zeros(3);
        let rewards = RewardConfig::default();
        // All moves from the centre are valid and score equally.
        assert_eq!(
            table.best_action(&grid, &rewards, Position::new(1, 1)),
            Some(Action::Right)
        );
    }

    #[test]
    fn best_action_none_on_terminal() {
        let grid: Grid = "S.\n.T".parse().unwrap();
        let table = ValueTable::zeros(2);
        let rewards = RewardConfig::default();
        assert_eq!(table.best_action(&grid, &rewards, Position::new(1, 1)), None);
    }
}
