//! Square grid of classified cells with a single start and a single target.

use super::types::{Action, CellType, Position};
use crate::error::ConfigError;

/// An N×N grid world.
///
/// Holds at most one [`CellType::Start`] and at most one [`CellType::Target`]
/// cell. Edits that assign either role clear the previous holder first, so the
/// invariant holds after every call to [`Grid::set_cell_type`].
///
/// # Examples
///
/// ```
/// use gridmdp::grid::{CellType, Grid, Position};
///
/// let mut grid = Grid::new(5).unwrap();
/// grid.set_cell_type(0, 0, CellType::Start);
/// grid.set_cell_type(4, 4, CellType::Target);
/// grid.set_cell_type(2, 2, CellType::Forbidden);
///
/// assert!(grid.is_valid_move(2, 1));
/// assert!(!grid.is_valid_move(2, 2));
/// assert!(!grid.is_valid_move(-1, 0));
/// assert_eq!(grid.target(), Some(Position::new(4, 4)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    size: usize,
    cells: Vec<CellType>,
    start: Option<Position>,
    target: Option<Position>,
}

impl Grid {
    /// Creates an all-empty `size`×`size` grid with no start and no target.
    pub fn new(size: usize) -> Result<Self, ConfigError> {
        if size == 0 {
            return Err(ConfigError::ZeroGridSize);
        }
        Ok(Self {
            size,
            cells: vec![CellType::Empty; size * size],
            start: None,
            target: None,
        })
    }

    /// Creates a grid with the given start and target cells marked.
    pub fn with_roles(size: usize, start: Position, target: Position) -> Result<Self, ConfigError> {
        let mut grid = Self::new(size)?;
        if !grid.contains(start) {
            return Err(ConfigError::StartOutOfBounds {
                row: start.row,
                col: start.col,
                size,
            });
        }
        if !grid.contains(target) {
            return Err(ConfigError::TargetOutOfBounds {
                row: target.row,
                col: target.col,
                size,
            });
        }
        if start == target {
            return Err(ConfigError::StartOnTarget {
                row: start.row,
                col: start.col,
            });
        }
        grid.set_cell_type(start.row, start.col, CellType::Start);
        grid.set_cell_type(target.row, target.col, CellType::Target);
        Ok(grid)
    }

    /// Side length N.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the start cell, if one is marked.
    pub fn start(&self) -> Option<Position> {
        self.start
    }

    /// Returns the target cell, if one is marked.
    pub fn target(&self) -> Option<Position> {
        self.target
    }

    /// Returns true if `pos` lies inside the grid.
    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    /// Row-major index of `pos`. Callers must check bounds first.
    pub(crate) fn index(&self, pos: Position) -> usize {
        pos.row * self.size + pos.col
    }

    /// Returns the classification of a cell, or `None` when out of bounds.
    pub fn cell(&self, row: usize, col: usize) -> Option<CellType> {
        let pos = Position::new(row, col);
        self.contains(pos).then(|| self.cells[self.index(pos)])
    }

    /// Returns the classification at `pos`, treating out-of-bounds as forbidden.
    pub fn cell_at(&self, pos: Position) -> CellType {
        self.cell(pos.row, pos.col).unwrap_or(CellType::Forbidden)
    }

    /// Row-major view of all cells.
    pub fn cells(&self) -> &[CellType] {
        &self.cells
    }

    /// Iterates over every position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.size).flat_map(move |row| (0..self.size).map(move |col| Position::new(row, col)))
    }

    /// Returns true iff `(row, col)` lies within `[0, N)²` and is not forbidden.
    pub fn is_valid_move(&self, row: i64, col: i64) -> bool {
        let n = self.size as i64;
        if row < 0 || col < 0 || row >= n || col >= n {
            return false;
        }
        self.cells[row as usize * self.size + col as usize] != CellType::Forbidden
    }

    /// Returns the cell reached by taking `action` from `from`, or `None` on a bump.
    pub fn destination(&self, from: Position, action: Action) -> Option<Position> {
        let (row, col) = from.offset(action);
        self.is_valid_move(row, col)
            .then(|| Position::new(row as usize, col as usize))
    }

    /// Returns true if `pos` is the target cell.
    pub fn is_target(&self, pos: Position) -> bool {
        self.target == Some(pos)
    }

    /// Number of forbidden cells.
    pub fn forbidden_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| **c == CellType::Forbidden)
            .count()
    }

    /// Reclassifies a cell.
    ///
    /// Marking a cell as start or target clears any prior holder of that role.
    /// Overwriting the current start or target with another type clears that
    /// role. Out-of-range coordinates are ignored.
    ///
    /// Returns true if the grid changed.
    pub fn set_cell_type(&mut self, row: usize, col: usize, cell_type: CellType) -> bool {
        let pos = Position::new(row, col);
        if !self.contains(pos) {
            return false;
        }
        let idx = self.index(pos);
        if self.cells[idx] == cell_type {
            return false;
        }

        match self.cells[idx] {
            CellType::Start => self.start = None,
            CellType::Target => self.target = None,
            _ => {}
        }

        match cell_type {
            CellType::Start => {
                if let Some(prev) = self.start.replace(pos) {
                    let prev_idx = self.index(prev);
                    self.cells[prev_idx] = CellType::Empty;
                }
            }
            CellType::Target => {
                if let Some(prev) = self.target.replace(pos) {
                    let prev_idx = self.index(prev);
                    self.cells[prev_idx] = CellType::Empty;
                }
            }
            CellType::Empty | CellType::Forbidden => {}
        }

        self.cells[idx] = cell_type;
        true
    }

    pub fn mark_start(&mut self, row: usize, col: usize) -> bool {
        self.set_cell_type(row, col, CellType::Start)
    }

    pub fn mark_target(&mut self, row: usize, col: usize) -> bool {
        self.set_cell_type(row, col, CellType::Target)
    }

    pub fn mark_forbidden(&mut self, row: usize, col: usize) -> bool {
        self.set_cell_type(row, col, CellType::Forbidden)
    }

    pub fn mark_empty(&mut self, row: usize, col: usize) -> bool {
        self.set_cell_type(row, col, CellType::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(grid: &Grid, ty: CellType) -> usize {
        grid.cells().iter().filter(|c| **c == ty).count()
    }

    #[test]
    fn zero_size_rejected() {
        assert_eq!(Grid::new(0), Err(ConfigError::ZeroGridSize));
    }

    #[test]
    fn with_roles_marks_cells() {
        let grid = Grid::with_roles(5, Position::new(0, 0), Position::new(4, 4)).unwrap();
        assert_eq!(grid.cell(0, 0), Some(CellType::Start));
        assert_eq!(grid.cell(4, 4), Some(CellType::Target));
        assert_eq!(grid.start(), Some(Position::new(0, 0)));
        assert_eq!(grid.target(), Some(Position::new(4, 4)));
    }

    #[test]
    fn with_roles_rejects_bad_positions() {
        assert!(matches!(
            Grid::with_roles(3, Position::new(3, 0), Position::new(2, 2)),
            Err(ConfigError::StartOutOfBounds { .. })
        ));
        assert!(matches!(
            Grid::with_roles(3, Position::new(0, 0), Position::new(0, 7)),
            Err(ConfigError::TargetOutOfBounds { .. })
        ));
        assert!(matches!(
            Grid::with_roles(3, Position::new(1, 1), Position::new(1, 1)),
            Err(ConfigError::StartOnTarget { .. })
        ));
    }

    #[test]
    fn new_target_clears_previous_target() {
        let mut grid = Grid::new(5).unwrap();
        assert!(grid.mark_target(4, 4));
        assert!(grid.mark_target(1, 3));
        assert_eq!(count(&grid, CellType::Target), 1);
        assert_eq!(grid.cell(4, 4), Some(CellType::Empty));
        assert_eq!(grid.target(), Some(Position::new(1, 3)));
    }

    #[test]
    fn new_start_clears_previous_start() {
        let mut grid = Grid::new(5).unwrap();
        grid.mark_start(0, 0);
        grid.mark_start(2, 3);
        assert_eq!(count(&grid, CellType::Start), 1);
        assert_eq!(grid.start(), Some(Position::new(2, 3)));
    }

    #[test]
    fn overwriting_role_holder_clears_role() {
        let mut grid = Grid::with_roles(5, Position::new(0, 0), Position::new(4, 4)).unwrap();
        grid.mark_forbidden(4, 4);
        assert_eq!(grid.target(), None);
        grid.mark_target(0, 0);
        assert_eq!(grid.start(), None);
        assert_eq!(grid.target(), Some(Position::new(0, 0)));
        assert_eq!(count(&grid, CellType::Start), 0);
    }

    #[test]
    fn out_of_range_edit_is_ignored() {
        let mut grid = Grid::new(3).unwrap();
        let before = grid.clone();
        assert!(!grid.set_cell_type(3, 0, CellType::Forbidden));
        assert!(!grid.set_cell_type(0, 99, CellType::Target));
        assert_eq!(grid, before);
    }

    #[test]
    fn unchanged_edit_reports_false() {
        let mut grid = Grid::new(3).unwrap();
        assert!(!grid.mark_empty(1, 1));
        assert!(grid.mark_forbidden(1, 1));
        assert!(!grid.mark_forbidden(1, 1));
    }

    #[test]
    fn valid_move_bounds_and_forbidden() {
        let mut grid = Grid::new(3).unwrap();
        grid.mark_forbidden(1, 1);
        assert!(grid.is_valid_move(0, 0));
        assert!(grid.is_valid_move(2, 2));
        assert!(!grid.is_valid_move(1, 1));
        assert!(!grid.is_valid_move(-1, 0));
        assert!(!grid.is_valid_move(0, -1));
        assert!(!grid.is_valid_move(3, 0));
        assert!(!grid.is_valid_move(0, 3));
    }

    #[test]
    fn destination_bumps() {
        let mut grid = Grid::new(3).unwrap();
        grid.mark_forbidden(0, 1);
        let origin = Position::new(0, 0);
        assert_eq!(grid.destination(origin, Action::Up), None);
        assert_eq!(grid.destination(origin, Action::Left), None);
        assert_eq!(grid.destination(origin, Action::Right), None);
        assert_eq!(grid.destination(origin, Action::Down), Some(Position::new(1, 0)));
    }

    #[test]
    fn cell_at_out_of_bounds_is_forbidden() {
        let grid = Grid::new(2).unwrap();
        assert_eq!(grid.cell_at(Position::new(5, 5)), CellType::Forbidden);
        assert_eq!(grid.cell(5, 5), None);
    }

    #[test]
    fn positions_are_row_major() {
        let grid = Grid::new(2).unwrap();
        let all: Vec<_> = grid.positions().collect();
        assert_eq!(
            all,
            vec![
                Position::new(0, 0),
                Position::new(0, 1),
                Position::new(1, 0),
                Position::new(1, 1)
            ]
        );
    }

    #[test]
    fn forbidden_cells_are_not_exclusive() {
        let mut grid = Grid::new(4).unwrap();
        grid.mark_forbidden(0, 1);
        grid.mark_forbidden(1, 1);
        grid.mark_forbidden(2, 1);
        assert_eq!(grid.forbidden_count(), 3);
    }
}
