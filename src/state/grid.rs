//! Board storage.
//!
//! A square, row-major array of [`Cell`]s with bounds-checked accessors.
//! The grid is a pure container: it knows nothing about adjacency, matches
//! or scoring.

use std::fmt;

use super::token::{Cell, Position, TokenType};

/// Default board edge length.
pub const DEFAULT_GRID_SIZE: usize = 6;

/// Grid errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Coordinate outside `[0, size)` on either axis
    OutOfBounds { row: usize, col: usize, size: usize },

    /// Rows handed to a constructor do not describe a non-empty square board
    NotSquare { rows: usize, cols: usize },

    /// Fixture text contained a character that names no candy
    UnknownSymbol { symbol: char },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { row, col, size } => {
                write!(f, "Position ({}, {}) is outside the {}x{} grid", row, col, size, size)
            }
            Self::NotSquare { rows, cols } => {
                write!(f, "Grid must be square and non-empty, got {} rows of {} cells", rows, cols)
            }
            Self::UnknownSymbol { symbol } => write!(f, "Unknown candy symbol '{}'", symbol),
        }
    }
}

impl std::error::Error for GridError {}

/// Square game grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid with every cell empty. Only generation code sees this
    /// state; it is filled before being handed out.
    pub(crate) fn empty(size: usize) -> Self {
        Self {
            size,
            cells: vec![Cell::Empty; size * size],
        }
    }

    /// Build a grid from explicit rows of tokens.
    pub fn from_rows<R: AsRef<[TokenType]>>(rows: &[R]) -> Result<Self, GridError> {
        let size = rows.len();
        let mut grid = Self::empty(size);

        for (row, tokens) in rows.iter().enumerate() {
            let tokens = tokens.as_ref();
            if tokens.len() != size {
                return Err(GridError::NotSquare {
                    rows: size,
                    cols: tokens.len(),
                });
            }
            for (col, token) in tokens.iter().enumerate() {
                grid.put(row, col, Cell::Candy(*token));
            }
        }

        if size == 0 {
            return Err(GridError::NotSquare { rows: 0, cols: 0 });
        }

        Ok(grid)
    }

    /// Parse rows of candy symbols (`"RRGBYP"`), see [`TokenType::symbol`].
    pub fn parse(rows: &[&str]) -> Result<Self, GridError> {
        let rows = rows
            .iter()
            .map(|line| {
                line.chars()
                    .filter(|c| !c.is_whitespace())
                    .map(|c| TokenType::from_symbol(c).ok_or(GridError::UnknownSymbol { symbol: c }))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_rows(&rows)
    }

    /// Edge length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Check a position against the grid extent.
    pub fn contains(&self, pos: Position) -> bool {
        pos.is_within(self.size)
    }

    /// Get cell at position.
    pub fn get(&self, pos: Position) -> Result<Cell, GridError> {
        let idx = self.index(pos)?;
        Ok(self.cells[idx])
    }

    /// Get the token at position (`None` if the cell is empty).
    pub fn token(&self, pos: Position) -> Result<Option<TokenType>, GridError> {
        self.get(pos).map(|cell| cell.token())
    }

    /// Overwrite a cell.
    pub fn set(&mut self, pos: Position, cell: impl Into<Cell>) -> Result<(), GridError> {
        let idx = self.index(pos)?;
        self.cells[idx] = cell.into();
        Ok(())
    }

    /// Exchange the contents of two cells. Adjacency is not checked here.
    pub fn swap(&mut self, a: Position, b: Position) -> Result<(), GridError> {
        let ia = self.index(a)?;
        let ib = self.index(b)?;
        self.cells.swap(ia, ib);
        Ok(())
    }

    /// True iff no cell is empty.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }

    /// Every position, row-major.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let size = self.size;
        (0..size).flat_map(move |row| (0..size).map(move |col| Position::new(row, col)))
    }

    /// Cells of one row.
    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        if row < self.size {
            Some(&self.cells[row * self.size..(row + 1) * self.size])
        } else {
            None
        }
    }

    /// Unchecked read for internal scans. Callers iterate `0..size`.
    pub(crate) fn at(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.size + col]
    }

    /// Unchecked write for internal scans.
    pub(crate) fn put(&mut self, row: usize, col: usize, cell: Cell) {
        self.cells[row * self.size + col] = cell;
    }

    fn index(&self, pos: Position) -> Result<usize, GridError> {
        if self.contains(pos) {
            Ok(pos.row * self.size + pos.col)
        } else {
            Err(GridError::OutOfBounds {
                row: pos.row,
                col: pos.col,
                size: self.size,
            })
        }
    }

    /// Convert grid to JSON (rows of token names, `null` for empty cells).
    pub fn to_json(&self) -> serde_json::Value {
        let rows: Vec<serde_json::Value> = self
            .cells
            .chunks(self.size.max(1))
            .map(|row| {
                let cells: Vec<serde_json::Value> = row
                    .iter()
                    .map(|c| match c.token() {
                        Some(token) => serde_json::json!(token.as_str()),
                        None => serde_json::Value::Null,
                    })
                    .collect();
                serde_json::Value::Array(cells)
            })
            .collect();
        serde_json::Value::Array(rows)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.size.max(1)) {
            for cell in row {
                write!(f, "{}", cell)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use crate::state::token::TokenType::*;

    fn make_grid() -> Grid {
        Grid::parse(&["RRGBYP", "GBRYPO", "BYPOGR", "YPOGRB", "POGRBY", "OGRBYP"]).unwrap()
    }

    #[test]
    fn test_get_and_token() {
        let grid = make_grid();
        assert_eq!(grid.size(), 6);
        assert_eq!(grid.get(Position::new(0, 2)).unwrap(), Cell::Candy(Green));
        assert_eq!(grid.token(Position::new(5, 0)).unwrap(), Some(Orange));
    }

    #[test]
    fn test_out_of_bounds() {
        let mut grid = make_grid();
        let err = grid.get(Position::new(6, 0)).unwrap_err();
        assert_eq!(err, GridError::OutOfBounds { row: 6, col: 0, size: 6 });
        assert!(grid.set(Position::new(0, 6), Red).is_err());
        assert!(grid.swap(Position::new(0, 0), Position::new(9, 9)).is_err());
        // Failed swap leaves the board untouched
        assert_eq!(grid, make_grid());
    }

    #[test]
    fn test_set_and_is_full() {
        let mut grid = make_grid();
        assert!(grid.is_full());
        grid.set(Position::new(3, 3), Cell::Empty).unwrap();
        assert!(!grid.is_full());
        grid.set(Position::new(3, 3), Blue).unwrap();
        assert!(grid.is_full());
        assert_eq!(grid.token(Position::new(3, 3)).unwrap(), Some(Blue));
    }

    #[test]
    fn test_swap_ignores_adjacency() {
        let mut grid = make_grid();
        grid.swap(Position::new(0, 0), Position::new(5, 5)).unwrap();
        assert_eq!(grid.token(Position::new(0, 0)).unwrap(), Some(Purple));
        assert_eq!(grid.token(Position::new(5, 5)).unwrap(), Some(Red));
    }

    #[test]
    fn test_from_rows_rejects_ragged_input() {
        let err = Grid::from_rows(&[vec![Red, Blue], vec![Red]]).unwrap_err();
        assert_eq!(err, GridError::NotSquare { rows: 2, cols: 1 });

        let empty: [Vec<TokenType>; 0] = [];
        assert!(Grid::from_rows(&empty).is_err());
        assert_eq!(
            Grid::parse(&["RX", "RR"]).unwrap_err(),
            GridError::UnknownSymbol { symbol: 'X' }
        );
    }

    #[test]
    fn test_display_and_json() {
        let mut grid = Grid::parse(&["RGB", "YPO", "BBR"]).unwrap();
        grid.set(Position::new(1, 1), Cell::Empty).unwrap();
        assert_eq!(grid.to_string(), "RGB\nY.O\nBBR\n");

        let json = grid.to_json();
        assert_eq!(json[0][0], serde_json::json!("red"));
        assert_eq!(json[1][1], serde_json::Value::Null);
        assert_eq!(grid.row(2).unwrap()[2], Cell::Candy(Red));
        assert!(grid.row(3).is_none());
    }
}
