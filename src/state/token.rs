//! Token, cell and position value types.
//!
//! Everything on the board is a plain `Copy` value: a cell either holds one
//! of the six candy kinds or is empty while a cascade is in flight.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Candy kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Blue,
    Green,
    Orange,
    Purple,
    Yellow,
    Red,
}

impl TokenType {
    /// Every kind, in declaration order.
    pub const ALL: [TokenType; 6] = [
        Self::Blue,
        Self::Green,
        Self::Orange,
        Self::Purple,
        Self::Yellow,
        Self::Red,
    ];

    /// Stable name the host can map to an asset.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Orange => "orange",
            Self::Purple => "purple",
            Self::Yellow => "yellow",
            Self::Red => "red",
        }
    }

    /// Single-letter symbol used by `Display` impls and board fixtures.
    pub fn symbol(&self) -> char {
        match self {
            Self::Blue => 'B',
            Self::Green => 'G',
            Self::Orange => 'O',
            Self::Purple => 'P',
            Self::Yellow => 'Y',
            Self::Red => 'R',
        }
    }

    /// Parse a symbol produced by [`TokenType::symbol`] (case insensitive).
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol.to_ascii_uppercase() {
            'B' => Some(Self::Blue),
            'G' => Some(Self::Green),
            'O' => Some(Self::Orange),
            'P' => Some(Self::Purple),
            'Y' => Some(Self::Yellow),
            'R' => Some(Self::Red),
            _ => None,
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contents of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Vacated by a removal, waiting for gravity and refill
    #[default]
    Empty,

    /// Occupied by a candy
    Candy(TokenType),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Token held by this cell, if any.
    pub fn token(&self) -> Option<TokenType> {
        match self {
            Self::Candy(token) => Some(*token),
            Self::Empty => None,
        }
    }
}

impl From<TokenType> for Cell {
    fn from(token: TokenType) -> Self {
        Self::Candy(token)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "."),
            Self::Candy(token) => write!(f, "{}", token.symbol()),
        }
    }
}

/// Grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Check if position lies inside an `size x size` grid.
    pub fn is_within(&self, size: usize) -> bool {
        self.row < size && self.col < size
    }

    /// Check if two positions share an edge (no diagonals, not the same cell).
    pub fn is_adjacent_to(&self, other: &Position) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({"row": self.row, "col": self.col})
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
