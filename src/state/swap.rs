//! Swap legality.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::grid::{Grid, GridError};
use super::token::Position;

/// A proposed exchange of two cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapRequest {
    pub from: Position,
    pub to: Position,
}

impl SwapRequest {
    pub fn new(from: impl Into<Position>, to: impl Into<Position>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Why an in-bounds swap was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidSwap {
    SameCell,
    NotAdjacent,
}

impl InvalidSwap {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SameCell => "same_cell",
            Self::NotAdjacent => "not_adjacent",
        }
    }
}

impl fmt::Display for InvalidSwap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SameCell => write!(f, "Cannot swap a cell with itself"),
            Self::NotAdjacent => write!(f, "Cells must share an edge to be swapped"),
        }
    }
}

impl std::error::Error for InvalidSwap {}

/// Classify a swap without touching the grid.
///
/// Out-of-bounds coordinates are a contract violation and come back as
/// `Err`; the inner result carries the ordinary refusals.
pub fn check_swap(grid: &Grid, request: SwapRequest) -> Result<Result<(), InvalidSwap>, GridError> {
    // Bounds first so a bad coordinate is never reported as a mere refusal
    grid.get(request.from)?;
    grid.get(request.to)?;

    if request.from == request.to {
        return Ok(Err(InvalidSwap::SameCell));
    }
    if !request.from.is_adjacent_to(&request.to) {
        return Ok(Err(InvalidSwap::NotAdjacent));
    }
    Ok(Ok(()))
}

/// True iff the two cells are distinct, in bounds and share an edge.
pub fn is_legal_swap(grid: &Grid, a: Position, b: Position) -> bool {
    matches!(check_swap(grid, SwapRequest::new(a, b)), Ok(Ok(())))
}
