//! Match-free board generation.
//!
//! Cells are stamped row-major. A draw that would complete a run of
//! [`MIN_RUN_LENGTH`] with the two cells to its left or the two cells above
//! is re-drawn; after `max_draw_attempts` rejected draws the first kind that
//! completes nothing is used instead, so a stuck source cannot hang
//! generation.

use tracing::{debug, trace};

use super::cascade::ResolutionReport;
use super::grid::Grid;
use super::matcher::MIN_RUN_LENGTH;
use super::source::TokenSource;
use super::token::{Cell, TokenType};

/// Draws tried per cell before falling back to a deterministic pick.
pub const DEFAULT_MAX_DRAW_ATTEMPTS: usize = 32;

/// Create a fully populated `size x size` grid with no matches.
pub fn create_grid<S: TokenSource + ?Sized>(size: usize, source: &mut S) -> Grid {
    let mut grid = Grid::empty(size);
    stamp(&mut grid, source, DEFAULT_MAX_DRAW_ATTEMPTS);
    grid
}

/// Re-stamp every cell of `grid` with fresh tokens, keeping it match-free.
///
/// Returns an empty report: resets never score.
pub fn reset_grid<S: TokenSource + ?Sized>(grid: &mut Grid, source: &mut S) -> ResolutionReport {
    stamp(grid, source, DEFAULT_MAX_DRAW_ATTEMPTS);
    ResolutionReport::default()
}

/// Fill every cell of `grid`, overwriting existing contents.
pub fn stamp<S: TokenSource + ?Sized>(grid: &mut Grid, source: &mut S, max_draw_attempts: usize) {
    let size = grid.size();
    let mut rerolls = 0usize;
    let mut fallbacks = 0usize;

    for row in 0..size {
        for col in 0..size {
            let mut token = source.next_token();
            let mut attempts = 1;
            while completes_run(grid, row, col, token) {
                if attempts >= max_draw_attempts {
                    token = TokenType::ALL
                        .into_iter()
                        .find(|t| !completes_run(grid, row, col, *t))
                        .unwrap_or(token);
                    fallbacks += 1;
                    break;
                }
                token = source.next_token();
                attempts += 1;
                rerolls += 1;
            }
            grid.put(row, col, Cell::Candy(token));
        }
    }

    if fallbacks > 0 {
        debug!(size, rerolls, fallbacks, "token source kept repeating, used fallback kinds");
    } else {
        trace!(size, rerolls, "stamped match-free grid");
    }
}

/// Would placing `token` at `(row, col)` finish a run with the already
/// stamped cells to the left or above?
fn completes_run(grid: &Grid, row: usize, col: usize, token: TokenType) -> bool {
    let wanted = Cell::Candy(token);
    let back = MIN_RUN_LENGTH - 1;

    let left = col >= back && (1..=back).all(|d| grid.at(row, col - d) == wanted);
    let up = row >= back && (1..=back).all(|d| grid.at(row - d, col) == wanted);
    left || up
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::matcher::find_matches;
    use crate::state::source::{RandomTokenSource, SequenceTokenSource};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_create_grid_is_full_and_stable() {
        for seed in 0..50 {
            let mut source = RandomTokenSource::seeded(seed);
            let grid = create_grid(6, &mut source);
            assert_eq!(grid.size(), 6);
            assert!(grid.is_full());
            assert!(find_matches(&grid).is_empty(), "seed {}:\n{}", seed, grid);
        }
    }

    #[test]
    fn test_constant_source_still_terminates() {
        let mut source = SequenceTokenSource::new([TokenType::Red]);
        let grid = create_grid(6, &mut source);
        assert!(grid.is_full());
        assert!(find_matches(&grid).is_empty(), "\n{}", grid);
    }

    #[test]
    fn test_reroll_consumes_extra_draws() {
        // Third draw would finish R R R, so it is drawn again
        let mut source = SequenceTokenSource::new([
            TokenType::Red,
            TokenType::Red,
            TokenType::Red,
            TokenType::Blue,
        ]);
        let mut grid = Grid::empty(3);
        stamp(&mut grid, &mut source, DEFAULT_MAX_DRAW_ATTEMPTS);
        assert_eq!(grid.row(0).unwrap(), &[
            Cell::Candy(TokenType::Red),
            Cell::Candy(TokenType::Red),
            Cell::Candy(TokenType::Blue),
        ]);
    }

    #[test]
    fn test_reset_keeps_size_and_reports_nothing() {
        let mut source = RandomTokenSource::seeded(9);
        let mut grid = create_grid(5, &mut source);
        let before = grid.clone();
        let report = reset_grid(&mut grid, &mut source);

        assert!(!report.matched);
        assert_eq!(report.score_delta, 0);
        assert!(report.steps.is_empty());
        assert_eq!(grid.size(), 5);
        assert!(grid.is_full());
        assert!(find_matches(&grid).is_empty());
        assert_ne!(grid, before);
    }
}
