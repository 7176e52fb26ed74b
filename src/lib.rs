//! Sweet Saga State Library
//!
//! This crate provides the rule engine for the Sweet Saga Quest
//! tile-matching game.
//!
//! # Overview
//!
//! The state module provides:
//!
//! - **Grid** - A square board of candies with bounds-checked access.
//!
//! - **Match Detection** - Straight runs of three or more equal candies,
//!   scanned row by row and column by column.
//!
//! - **Swap Resolution** - Validated swaps that either match and cascade
//!   (remove, drop, refill, repeat) or are reverted.
//!
//! - **Sessions** - A board, its token source, the running score and the
//!   player's click selection.
//!
//! # Design Principles
//!
//! 1. **Stable between calls** - The board is always full and match-free
//!    when control returns to the caller.
//!
//! 2. **Injected randomness** - Every refill comes from a caller-owned
//!    token source, so cascades replay exactly under a fixed seed.
//!
//! 3. **No rendering** - This crate is pure state, no UI or input handling.
//!
//! 4. **Serialization-ready** - Boards, reports and sessions convert to JSON
//!    for the renderer.
//!
//! # Example
//!
//! ```rust
//! use sweetsaga_state::{find_matches, EngineConfig, GameSession, Position, Selection};
//!
//! let mut session = GameSession::new(EngineConfig::seeded(42)).unwrap();
//! assert!(find_matches(session.grid()).is_empty());
//!
//! // Two clicks on neighboring cells attempt a swap
//! session.select(Position::new(2, 2)).unwrap();
//! match session.select(Position::new(2, 3)).unwrap() {
//!     Selection::Resolved(report) => {
//!         assert_eq!(session.score(), u64::from(report.score_delta));
//!     }
//!     other => panic!("unexpected {:?}", other),
//! }
//! assert!(session.grid().is_full());
//! ```

pub mod state;

// Re-export everything from state module at crate root
pub use state::*;
