//! ASCII layout parsing and rendering.
//!
//! One row per line, one character per cell:
//!
//! ```text
//! S....
//! .....
//! ..#..
//! .....
//! ....T
//! ```
//!
//! Blank lines and surrounding whitespace are ignored. When a layout marks
//! several start or target cells, the last one read wins.

use std::fmt;
use std::str::FromStr;

use super::model::Grid;
use super::types::CellType;
use crate::error::ParseGridError;

impl FromStr for Grid {
    type Err = ParseGridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if rows.is_empty() {
            return Err(ParseGridError::Empty);
        }

        let size = rows.len();
        let mut grid = Grid::new(size).map_err(|_| ParseGridError::Empty)?;

        for (row, line) in rows.iter().enumerate() {
            let len = line.chars().count();
            if len != size {
                return Err(ParseGridError::NotSquare {
                    row,
                    len,
                    expected: size,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let cell = CellType::from_symbol(ch)
                    .ok_or(ParseGridError::UnknownCell { row, col, ch })?;
                grid.set_cell_type(row, col, cell);
            }
        }

        Ok(grid)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells().chunks(self.size()) {
            let line: String = row.iter().map(CellType::symbol).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Position;

    const LAYOUT: &str = "
        S....
        .....
        ..#..
        .....
        ....T
    ";

    #[test]
    fn parses_roles_and_walls() {
        let grid: Grid = LAYOUT.parse().unwrap();
        assert_eq!(grid.size(), 5);
        assert_eq!(grid.start(), Some(Position::new(0, 0)));
        assert_eq!(grid.target(), Some(Position::new(4, 4)));
        assert_eq!(grid.cell(2, 2), Some(CellType::Forbidden));
        assert_eq!(grid.forbidden_count(), 1);
    }

    #[test]
    fn display_matches_layout() {
        let grid: Grid = LAYOUT.parse().unwrap();
        assert_eq!(grid.to_string(), "S....\n.....\n..#..\n.....\n....T\n");
    }

    #[test]
    fn last_target_wins() {
        let grid: Grid = "T.\n.T".parse().unwrap();
        assert_eq!(grid.target(), Some(Position::new(1, 1)));
        assert_eq!(grid.cell(0, 0), Some(CellType::Empty));
    }

    #[test]
    fn rejects_empty_layout() {
        assert_eq!("  \n \n".parse::<Grid>(), Err(ParseGridError::Empty));
    }

    #[test]
    fn rejects_ragged_rows() {
        assert_eq!(
            "...\n..\n...".parse::<Grid>(),
            Err(ParseGridError::NotSquare {
                row: 1,
                len: 2,
                expected: 3
            })
        );
    }

    #[test]
    fn rejects_unknown_symbol() {
        assert_eq!(
            "..\n.x".parse::<Grid>(),
            Err(ParseGridError::UnknownCell {
                row: 1,
                col: 1,
                ch: 'x'
            })
        );
    }
}
