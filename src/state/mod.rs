//! Board state and rules for Sweet Saga Quest.
//!
//! This module provides the core types and operations:
//!
//! - `token` - Candy kinds, cells and positions
//! - `grid` - Bounds-checked board storage
//! - `matcher` - Axis-wise run scan producing match sets
//! - `swap` - Swap legality (edge-adjacent, in bounds, distinct)
//! - `cascade` - Swap resolution: remove, drop, refill, repeat
//! - `source` - Token sources for refills (random or scripted)
//! - `generate` - Match-free board creation and reset
//! - `session` - Per-player board, score and click selection
//! - `config` - Session settings
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────────┐
//! │                          GameSession                              │
//! │                                                                   │
//! │   select / attempt_swap            reset                          │
//! │          │                           │                            │
//! │          ▼                           ▼                            │
//! │   ┌─────────────┐             ┌─────────────┐                     │
//! │   │   cascade   │             │  generate   │                     │
//! │   │   resolve   │             │   stamp     │                     │
//! │   └──┬───┬───┬──┘             └──────┬──────┘                     │
//! │      │   │   │                       │                            │
//! │      ▼   │   ▼                       ▼                            │
//! │  ┌──────┐│ ┌─────────┐        ┌─────────────┐                     │
//! │  │ swap ││ │ matcher │        │ TokenSource │◀── refill ──┐       │
//! │  └──────┘│ └─────────┘        └─────────────┘             │       │
//! │          ▼                                                │       │
//! │     ┌─────────┐                                           │       │
//! │     │  Grid   │───────────────────────────────────────────┘       │
//! │     └─────────┘                                                   │
//! └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use sweetsaga_state::state::{attempt_swap, create_grid, Position, RandomTokenSource};
//!
//! let mut source = RandomTokenSource::seeded(7);
//! let mut grid = create_grid(6, &mut source);
//! let report = attempt_swap(&mut grid, &mut source, Position::new(2, 2), Position::new(2, 3))?;
//! ```

pub mod cascade;
pub mod config;
pub mod generate;
pub mod grid;
pub mod matcher;
pub mod session;
pub mod source;
pub mod swap;
pub mod token;

// Re-export commonly used types
pub use cascade::{resolve, CascadeStep, ResolutionReport};
pub use config::{ConfigError, EngineConfig};
pub use generate::{create_grid, reset_grid, DEFAULT_MAX_DRAW_ATTEMPTS};
pub use grid::{Grid, GridError, DEFAULT_GRID_SIZE};
pub use matcher::{find_matches, find_runs, has_matches, Axis, MatchSet, Run, MIN_RUN_LENGTH};
pub use session::{GameSession, Selection};
pub use source::{RandomTokenSource, SequenceTokenSource, TokenSource};
pub use swap::{check_swap, is_legal_swap, InvalidSwap, SwapRequest};
pub use token::{Cell, Position, TokenType};

/// Swap two cells on `grid` and resolve every cascade.
///
/// Shorthand for [`resolve`] with a [`SwapRequest`] built from `a` and `b`.
pub fn attempt_swap<S: TokenSource + ?Sized>(
    grid: &mut Grid,
    source: &mut S,
    a: Position,
    b: Position,
) -> Result<ResolutionReport, GridError> {
    resolve(grid, source, SwapRequest::new(a, b))
}
