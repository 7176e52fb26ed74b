//! Match detection.
//!
//! Matches are found with an independent run scan per axis: every row left
//! to right, then every column top to bottom. A maximal run of three or more
//! equal, non-empty tokens contributes all of its cells. Crossing runs (L and
//! T shapes) simply merge in the resulting [`MatchSet`].

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::grid::Grid;
use super::token::{Cell, Position, TokenType};

/// Shortest run that counts as a match.
pub const MIN_RUN_LENGTH: usize = 3;

/// Scan direction of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// A maximal straight run of at least [`MIN_RUN_LENGTH`] equal tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    pub axis: Axis,
    pub token: TokenType,
    /// First cell (leftmost or topmost)
    pub start: Position,
    pub len: usize,
}

impl Run {
    /// Cells covered by this run, in scan order.
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.len).map(move |i| match self.axis {
            Axis::Horizontal => Position::new(self.start.row, self.start.col + i),
            Axis::Vertical => Position::new(self.start.row + i, self.start.col),
        })
    }
}

/// Cells removed together in one detection pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchSet {
    cells: BTreeSet<Position>,
}

impl MatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.cells.contains(&pos)
    }

    /// Positions in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells.iter().copied()
    }

    fn extend_run(&mut self, run: &Run) {
        self.cells.extend(run.cells());
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Array(self.iter().map(|p| p.to_json()).collect())
    }
}

impl FromIterator<Position> for MatchSet {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

/// Find every matching run on the board, rows first, then columns.
pub fn find_runs(grid: &Grid) -> Vec<Run> {
    let size = grid.size();
    let mut runs = Vec::new();

    for row in 0..size {
        scan_line(size, |i| grid.at(row, i), |i| Position::new(row, i), Axis::Horizontal, &mut runs);
    }
    for col in 0..size {
        scan_line(size, |i| grid.at(i, col), |i| Position::new(i, col), Axis::Vertical, &mut runs);
    }

    runs
}

/// Union of all matching runs on the board.
pub fn find_matches(grid: &Grid) -> MatchSet {
    let mut set = MatchSet::new();
    for run in find_runs(grid) {
        set.extend_run(&run);
    }
    set
}

/// Check whether the board has any match at all.
pub fn has_matches(grid: &Grid) -> bool {
    !find_runs(grid).is_empty()
}

fn scan_line(
    len: usize,
    cell: impl Fn(usize) -> Cell,
    pos: impl Fn(usize) -> Position,
    axis: Axis,
    out: &mut Vec<Run>,
) {
    let mut start = 0;
    for i in 1..=len {
        if i < len && cell(i) == cell(start) {
            continue;
        }
        // Run [start, i) just ended
        if let Cell::Candy(token) = cell(start) {
            let run_len = i - start;
            if run_len >= MIN_RUN_LENGTH {
                out.push(Run {
                    axis,
                    token,
                    start: pos(start),
                    len: run_len,
                });
            }
        }
        start = i;
    }
}
