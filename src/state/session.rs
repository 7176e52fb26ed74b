//! Game session.
//!
//! Owns one board, the token source that refills it, and the running score.
//! Also tracks the two-click selection a host forwards from its input layer:
//!
//! ```text
//! ┌──────────┐  select(a)   ┌──────────────┐  select(b), adjacent   ┌──────────┐
//! │ Nothing  │─────────────▶│ Selected(a)  │───────────────────────▶│ Resolved │
//! │ selected │◀─────────────│              │                        └────┬─────┘
//! └──────────┘  select(b),  └──────────────┘                             │
//!      ▲        not adjacent                                              │
//!      └──────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use tracing::debug;

use super::cascade::{resolve, ResolutionReport};
use super::config::{ConfigError, EngineConfig};
use super::generate::stamp;
use super::grid::{Grid, GridError};
use super::source::{RandomTokenSource, TokenSource};
use super::swap::SwapRequest;
use super::token::Position;

/// Result of a cell click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// First click; waiting for the second cell
    Selected(Position),

    /// Second click on a non-adjacent (or the same) cell; nothing swapped
    Deselected,

    /// Second click on a neighbor; the swap was attempted
    Resolved(ResolutionReport),
}

/// A single player's board and score.
#[derive(Debug, Clone)]
pub struct GameSession<S: TokenSource = RandomTokenSource> {
    config: EngineConfig,
    grid: Grid,
    source: S,

    /// Sum of all score deltas since creation (resets keep it)
    score: u64,

    /// Swaps that produced a match
    moves: u32,

    /// Cell picked by the first click, if any
    selected: Option<Position>,

    /// When the session was created
    pub created_at: DateTime<Utc>,

    /// When the last matching swap resolved
    pub last_move_at: Option<DateTime<Utc>>,

    /// When the board was last reset
    pub last_reset_at: Option<DateTime<Utc>>,
}

impl GameSession<RandomTokenSource> {
    /// Create a session with a random source, seeded from the config if set.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        let source = match config.seed {
            Some(seed) => RandomTokenSource::seeded(seed),
            None => RandomTokenSource::from_entropy(),
        };
        Self::with_source(config, source)
    }
}

impl<S: TokenSource> GameSession<S> {
    /// Create a session drawing tokens from `source`.
    pub fn with_source(config: EngineConfig, mut source: S) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut grid = Grid::empty(config.grid_size);
        stamp(&mut grid, &mut source, config.max_draw_attempts);
        debug!(size = config.grid_size, seed = ?config.seed, "session created");

        Ok(Self {
            config,
            grid,
            source,
            score: 0,
            moves: 0,
            selected: None,
            created_at: Utc::now(),
            last_move_at: None,
            last_reset_at: None,
        })
    }

    /// Swap two cells and resolve every cascade, adding the delta to the score.
    pub fn attempt_swap(
        &mut self,
        a: Position,
        b: Position,
    ) -> Result<ResolutionReport, GridError> {
        let report = resolve(&mut self.grid, &mut self.source, SwapRequest::new(a, b))?;

        if report.matched {
            self.score += u64::from(report.score_delta);
            self.moves += 1;
            self.last_move_at = Some(Utc::now());
        }

        Ok(report)
    }

    /// Handle a click on `pos`.
    ///
    /// The first click selects; the second either swaps with an adjacent
    /// cell or drops the selection. Either way the selection is cleared
    /// after a second click.
    pub fn select(&mut self, pos: Position) -> Result<Selection, GridError> {
        self.grid.get(pos)?;

        let Some(first) = self.selected.take() else {
            self.selected = Some(pos);
            return Ok(Selection::Selected(pos));
        };

        if !first.is_adjacent_to(&pos) {
            return Ok(Selection::Deselected);
        }

        self.attempt_swap(first, pos).map(Selection::Resolved)
    }

    /// Drop any pending selection.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Re-stamp the whole board. The score is kept.
    pub fn reset(&mut self) -> ResolutionReport {
        stamp(&mut self.grid, &mut self.source, self.config.max_draw_attempts);
        self.selected = None;
        self.last_reset_at = Some(Utc::now());
        debug!(score = self.score, "board reset");
        ResolutionReport::default()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn selected(&self) -> Option<Position> {
        self.selected
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Convert session state to a JSON snapshot for the renderer.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "grid": self.grid.to_json(),
            "size": self.grid.size(),
            "score": self.score,
            "moves": self.moves,
            "selected": self.selected.map(|p| p.to_json()),
            "created_at": self.created_at,
            "last_move_at": self.last_move_at
        })
    }
}
