//! Core types for the grid world.
//!
//! Defines cell classifications, cell coordinates, and the four movement
//! actions shared by the solver, the policies, and the simulation loop.

use std::fmt;

/// Classification of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellType {
    #[default]
    Empty,
    /// Cannot be entered; attempting to do so is a bump.
    Forbidden,
    Target,
    Start,
}

impl CellType {
    /// ASCII symbol used by the layout parser and the `Display` rendering.
    pub fn symbol(&self) -> char {
        match self {
            CellType::Empty => '.',
            CellType::Forbidden => '#',
            CellType::Target => 'T',
            CellType::Start => 'S',
        }
    }

    /// Inverse of [`CellType::symbol`].
    pub fn from_symbol(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(CellType::Empty),
            '#' => Some(CellType::Forbidden),
            'T' => Some(CellType::Target),
            'S' => Some(CellType::Start),
            _ => None,
        }
    }

    /// Returns true for cells whose state value is pinned to zero.
    pub fn is_terminal(&self) -> bool {
        matches!(self, CellType::Target | CellType::Forbidden)
    }
}

impl fmt::Display for CellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellType::Empty => write!(f, "empty"),
            CellType::Forbidden => write!(f, "forbidden"),
            CellType::Target => write!(f, "target"),
            CellType::Start => write!(f, "start"),
        }
    }
}

/// A `(row, col)` cell coordinate. Row 0 is the top row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    /// Creates a new position.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Manhattan distance to another position.
    pub fn manhattan(&self, other: &Position) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Returns the coordinate reached by applying `action`, without bounds checks.
    ///
    /// Coordinates are signed so that moves off the top or left edge remain
    /// representable for [`Grid::is_valid_move`](super::Grid::is_valid_move).
    pub fn offset(&self, action: Action) -> (i64, i64) {
        let (dr, dc) = action.delta();
        (self.row as i64 + dr, self.col as i64 + dc)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

/// One of the four grid moves.
///
/// The declaration order is the tie-break order used everywhere a policy or
/// the solver chooses among equally good actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    Right,
    Left,
    Down,
    Up,
}

impl Action {
    /// All actions in tie-break order.
    pub const ALL: [Action; 4] = [Action::Right, Action::Left, Action::Down, Action::Up];

    /// Returns the `(Δrow, Δcol)` displacement of this action.
    pub fn delta(&self) -> (i64, i64) {
        match self {
            Action::Right => (0, 1),
            Action::Left => (0, -1),
            Action::Down => (1, 0),
            Action::Up => (-1, 0),
        }
    }

    /// Returns the index of this action in [`Action::ALL`].
    pub fn index(&self) -> usize {
        match self {
            Action::Right => 0,
            Action::Left => 1,
            Action::Down => 2,
            Action::Up => 3,
        }
    }

    /// Arrow glyph used when rendering a policy table.
    pub fn arrow(&self) -> char {
        match self {
            Action::Right => '→',
            Action::Left => '←',
            Action::Down => '↓',
            Action::Up => '↑',
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Right => write!(f, "right"),
            Action::Left => write!(f, "left"),
            Action::Down => write!(f, "down"),
            Action::Up => write!(f, "up"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_round_trip() {
        for ty in [
            CellType::Empty,
            CellType::Forbidden,
            CellType::Target,
            CellType::Start,
        ] {
            assert_eq!(CellType::from_symbol(ty.symbol()), Some(ty));
        }
        assert_eq!(CellType::from_symbol('x'), None);
    }

    #[test]
    fn terminal_cells() {
        assert!(CellType::Target.is_terminal());
        assert!(CellType::Forbidden.is_terminal());
        assert!(!CellType::Start.is_terminal());
        assert!(!CellType::Empty.is_terminal());
    }

    #[test]
    fn manhattan_distance() {
        let a = Position::new(0, 0);
        let b = Position::new(3, 4);
        assert_eq!(a.manhattan(&b), 7);
        assert_eq!(b.manhattan(&a), 7);
    }

    #[test]
    fn offset_can_leave_grid() {
        let p = Position::new(0, 0);
        assert_eq!(p.offset(Action::Up), (-1, 0));
        assert_eq!(p.offset(Action::Left), (0, -1));
        assert_eq!(p.offset(Action::Down), (1, 0));
        assert_eq!(p.offset(Action::Right), (0, 1));
    }

    #[test]
    fn tie_break_order_is_stable() {
        assert_eq!(
            Action::ALL,
            [Action::Right, Action::Left, Action::Down, Action::Up]
        );
        for (i, a) in Action::ALL.iter().enumerate() {
            assert_eq!(a.index(), i);
        }
    }
}
