//! Swap resolution and cascades.
//!
//! ```text
//!   swap ──▶ detect ──▶ empty? ──yes──▶ swap back, matched = false
//!                         │
//!                         no
//!                         ▼
//!        ┌──▶ remove ──▶ gravity ──▶ refill ──▶ detect ──┐
//!        │                                              │
//!        └──────────────── non-empty ◀──────────────────┘
//! ```
//!
//! The loop has no iteration cap. Each pass removes at least three tokens and
//! the replacements come from the caller's source, so it ends as soon as the
//! source stops reproducing matches.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::grid::{Grid, GridError};
use super::matcher::{find_matches, MatchSet};
use super::source::TokenSource;
use super::swap::{check_swap, InvalidSwap, SwapRequest};
use super::token::{Cell, Position};

/// One remove/drop/refill pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeStep {
    /// Cells cleared in this pass
    pub removed: MatchSet,
    /// Points awarded (one per cleared cell)
    pub points: u32,
}

/// Outcome of a swap attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionReport {
    /// Whether the swap produced at least one match and was kept
    pub matched: bool,

    /// Cascade passes in order; empty unless `matched`
    pub steps: Vec<CascadeStep>,

    /// Sum of `points` over all steps
    pub score_delta: u32,

    /// Set when the swap was refused before touching the grid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection: Option<InvalidSwap>,
}

impl ResolutionReport {
    /// Report for a swap refused by the validator.
    pub fn rejected(reason: InvalidSwap) -> Self {
        Self {
            rejection: Some(reason),
            ..Self::default()
        }
    }

    /// Number of cascade passes (1 for a plain match, more for chains).
    pub fn cascade_depth(&self) -> usize {
        self.steps.len()
    }

    /// Total number of cells cleared.
    pub fn cleared(&self) -> usize {
        self.steps.iter().map(|s| s.removed.len()).sum()
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "matched": self.matched,
            "score_delta": self.score_delta,
            "rejection": self.rejection.map(|r| r.as_str()),
            "steps": self
                .steps
                .iter()
                .map(|s| serde_json::json!({
                    "removed": s.removed.to_json(),
                    "points": s.points
                }))
                .collect::<Vec<_>>()
        })
    }
}

/// Apply a swap and run every resulting cascade to completion.
///
/// Out-of-bounds coordinates fail before any mutation. Refused and
/// non-matching swaps leave the grid exactly as it was.
pub fn resolve<S: TokenSource + ?Sized>(
    grid: &mut Grid,
    source: &mut S,
    request: SwapRequest,
) -> Result<ResolutionReport, GridError> {
    if let Err(reason) = check_swap(grid, request)? {
        debug!(from = %request.from, to = %request.to, %reason, "swap refused");
        return Ok(ResolutionReport::rejected(reason));
    }

    grid.swap(request.from, request.to)?;

    let mut matches = find_matches(grid);
    if matches.is_empty() {
        grid.swap(request.from, request.to)?;
        debug!(from = %request.from, to = %request.to, "swap produced no match, reverted");
        return Ok(ResolutionReport::default());
    }

    let mut report = ResolutionReport {
        matched: true,
        ..ResolutionReport::default()
    };

    while !matches.is_empty() {
        let points = clear(grid, &matches);
        apply_gravity(grid);
        refill(grid, source);

        trace!(step = report.steps.len(), points, "cascade step");
        report.score_delta += points;
        report.steps.push(CascadeStep {
            removed: matches,
            points,
        });

        matches = find_matches(grid);
    }

    debug!(
        from = %request.from,
        to = %request.to,
        steps = report.steps.len(),
        score_delta = report.score_delta,
        "swap resolved"
    );
    Ok(report)
}

/// Mark every matched cell empty, returning the points earned.
fn clear(grid: &mut Grid, matches: &MatchSet) -> u32 {
    for Position { row, col } in matches.iter() {
        grid.put(row, col, Cell::Empty);
    }
    matches.len() as u32
}

/// Compact each column downward, keeping the relative order of tokens.
/// Vacated slots end up at the top.
pub(crate) fn apply_gravity(grid: &mut Grid) {
    let size = grid.size();
    for col in 0..size {
        let mut write = size;
        for read in (0..size).rev() {
            let cell = grid.at(read, col);
            if cell.is_empty() {
                continue;
            }
            write -= 1;
            if write != read {
                grid.put(write, col, cell);
                grid.put(read, col, Cell::Empty);
            }
        }
    }
}

/// Populate every empty cell from `source`, row-major.
pub(crate) fn refill<S: TokenSource + ?Sized>(grid: &mut Grid, source: &mut S) {
    let size = grid.size();
    for row in 0..size {
        for col in 0..size {
            if grid.at(row, col).is_empty() {
                grid.put(row, col, Cell::Candy(source.next_token()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::source::SequenceTokenSource;
    use crate::state::token::TokenType::{self, *};
    use pretty_assertions::assert_eq;

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    fn tokens(grid: &Grid, row: usize) -> Vec<TokenType> {
        grid.row(row).unwrap().iter().filter_map(|c| c.token()).collect()
    }

    #[test]
    fn test_gravity_preserves_order() {
        let mut grid = Grid::parse(&["RGB", "YPO", "BGR"]).unwrap();
        grid.set(pos(1, 0), Cell::Empty).unwrap();
        grid.set(pos(2, 0), Cell::Empty).unwrap();
        grid.set(pos(1, 2), Cell::Empty).unwrap();

        apply_gravity(&mut grid);

        assert_eq!(grid.to_string(), ".G.\n.PB\nRGR\n");
    }

    #[test]
    fn test_refill_only_touches_empty_cells() {
        let mut grid = Grid::parse(&["RGB", "YPO", "BGR"]).unwrap();
        grid.set(pos(0, 0), Cell::Empty).unwrap();
        grid.set(pos(0, 2), Cell::Empty).unwrap();
        let mut source = SequenceTokenSource::new([Purple, Orange]);

        refill(&mut grid, &mut source);

        assert_eq!(grid.to_string(), "PGO\nYPO\nBGR\n");
        assert_eq!(source.drawn(), 2);
    }

    #[test]
    fn test_three_reds_in_top_row() {
        // Row 0: R R G B Y P, (1, 2) = R. Swapping (0,2) and (1,2) lines up three reds.
        let mut grid = Grid::parse(&[
            "RRGBYP",
            "GBRYPO",
            "BYPOGR",
            "YPOGRB",
            "POGRBY",
            "OGRBYP",
        ])
        .unwrap();
        let mut source = SequenceTokenSource::new([Yellow, Purple, Orange]);

        let report = resolve(&mut grid, &mut source, SwapRequest::new((0, 2), (1, 2))).unwrap();

        assert!(report.matched);
        assert_eq!(report.rejection, None);
        assert_eq!(
            report.steps[0].removed.iter().collect::<Vec<_>>(),
            vec![pos(0, 0), pos(0, 1), pos(0, 2)]
        );
        assert_eq!(report.steps[0].points, 3);
        assert_eq!(report.steps.len(), 1);
        assert_eq!(report.score_delta, 3);

        // Row 0 refilled from the source, rows below untouched
        assert_eq!(tokens(&grid, 0), vec![Yellow, Purple, Orange, Blue, Yellow, Purple]);
        assert_eq!(tokens(&grid, 1), vec![Green, Blue, Green, Yellow, Purple, Orange]);
        assert!(grid.is_full());
        assert!(find_matches(&grid).is_empty());
    }

    #[test]
    fn test_tokens_above_a_cleared_row_fall() {
        let mut grid = Grid::parse(&["RBYO", "YOBR", "GRPB", "PPOY"]).unwrap();
        let mut source = SequenceTokenSource::new([Purple, Green, Blue]);

        // (2,2)=P drops into row 3: P P P Y
        let report = resolve(&mut grid, &mut source, SwapRequest::new((2, 2), (3, 2))).unwrap();

        assert!(report.matched);
        assert_eq!(report.steps.len(), 1);
        assert_eq!(
            report.steps[0].removed.iter().collect::<Vec<_>>(),
            vec![pos(3, 0), pos(3, 1), pos(3, 2)]
        );
        assert_eq!(grid.to_string(), "PGBO\nRBYR\nYOBB\nGROY\n");
    }

    #[test]
    fn test_l_shape_scores_once() {
        let mut grid = Grid::parse(&["RGBY", "RBYG", "BRRO", "RYGB"]).unwrap();
        let mut source = SequenceTokenSource::new([Orange, Purple, Green, Yellow, Purple]);

        let report = resolve(&mut grid, &mut source, SwapRequest::new((2, 0), (3, 0))).unwrap();

        assert_eq!(report.steps.len(), 1);
        assert_eq!(
            report.steps[0].removed.iter().collect::<Vec<_>>(),
            vec![pos(0, 0), pos(1, 0), pos(2, 0), pos(2, 1), pos(2, 2)]
        );
        assert_eq!(report.score_delta, 5);
        assert_eq!(grid.to_string(), "OPGY\nYGBG\nPBYO\nBYGB\n");
    }

    #[test]
    fn test_no_match_swap_is_reverted() {
        let mut grid = Grid::parse(&["RGBY", "GBRY", "BRGO", "RGBO"]).unwrap();
        let before = grid.clone();
        let mut source = SequenceTokenSource::new([Red]);

        let report = resolve(&mut grid, &mut source, SwapRequest::new((0, 0), (0, 1))).unwrap();

        assert_eq!(report, ResolutionReport::default());
        assert_eq!(grid, before);
        assert_eq!(source.drawn(), 0);
    }

    #[test]
    fn test_illegal_swap_is_rejected_without_mutation() {
        let mut grid = Grid::parse(&["RGBY", "GBRY", "BRGO", "RGBO"]).unwrap();
        let before = grid.clone();
        let mut source = SequenceTokenSource::new([Red]);

        let diagonal = resolve(&mut grid, &mut source, SwapRequest::new((0, 0), (1, 1))).unwrap();
        assert!(!diagonal.matched);
        assert_eq!(diagonal.rejection, Some(InvalidSwap::NotAdjacent));

        let same = resolve(&mut grid, &mut source, SwapRequest::new((2, 2), (2, 2))).unwrap();
        assert_eq!(same.rejection, Some(InvalidSwap::SameCell));

        let err = resolve(&mut grid, &mut source, SwapRequest::new((3, 3), (4, 3))).unwrap_err();
        assert_eq!(err, GridError::OutOfBounds { row: 4, col: 3, size: 4 });

        assert_eq!(grid, before);
    }

    #[test]
    fn test_chain_reaction_records_every_step() {
        let mut grid = Grid::parse(&["RBYO", "YOBR", "GRPB", "PPOY"]).unwrap();
        // Refill G G G lines up a second match in row 0
        let mut source = SequenceTokenSource::new([Green, Green, Green, Blue, Orange, Purple]);

        let report = resolve(&mut grid, &mut source, SwapRequest::new((3, 2), (2, 2))).unwrap();

        assert!(report.matched);
        assert_eq!(report.steps.len(), 2);
        assert_eq!(report.steps[0].points, 3);
        assert_eq!(
            report.steps[1].removed.iter().collect::<Vec<_>>(),
            vec![pos(0, 0), pos(0, 1), pos(0, 2)]
        );
        assert_eq!(report.score_delta, 6);
        assert_eq!(report.cleared(), 6);
        assert_eq!(grid.to_string(), "BOPO\nRBYR\nYOBB\nGROY\n");
        assert!(find_matches(&grid).is_empty());
    }

    #[test]
    fn test_report_json() {
        let report = ResolutionReport::rejected(InvalidSwap::NotAdjacent);
        let json = report.to_json();
        assert_eq!(json["matched"], serde_json::json!(false));
        assert_eq!(json["rejection"], serde_json::json!("not_adjacent"));
        assert_eq!(json["steps"], serde_json::json!([]));
        assert_eq!(report.cascade_depth(), 0);
        assert_eq!(report.cleared(), 0);
    }
}
