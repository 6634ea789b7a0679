//! Core engine module - pure, deterministic, and testable
//!
//! This crate contains the whole collapse-game rule set. It has **zero
//! dependencies** on UI, networking, or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical boards and rounds
//! - **Testable**: Every rule is exercised by unit and integration tests
//! - **Portable**: Can run headless in any environment
//!
//! # Module Structure
//!
//! - [`board`]: the grid - connectivity, removal, gravity, column compaction,
//!   terminal detection
//! - [`round`]: single-round session tying board, score, and phase together
//! - [`rng`]: seeded uniform token generation
//! - [`scoring`]: the `n * (n - 1)` collapse rule and the leftover bonus
//!   policy
//! - [`snapshot`]: serializable observer views
//!
//! # Game Rules
//!
//! - A move removes a maximal 4-connected group of at least two same-kind
//!   tokens and scores `n * (n - 1)`.
//! - After removal, tokens drop to the lowest free rows of their columns,
//!   then fully-empty columns are packed toward column 0.
//! - A round ends when no removable group remains; a leftover bonus is
//!   applied by a pluggable policy.
//!
//! # Example
//!
//! ```
//! use crumble_core::Round;
//! use crumble_types::BoardConfig;
//!
//! let mut round = Round::new(&BoardConfig::new(6, 6).with_seed(42));
//!
//! // Drive the round: preview, collapse, settle, check
//! if let Some(group) = round.select(0, 0) {
//!     if group.removable() {
//!         let _falls = round.collapse(&group).unwrap();
//!         let _shifts = round.compact();
//!         round.finish_settling();
//!     }
//! }
//! ```

pub mod board;
pub mod rng;
pub mod round;
pub mod scoring;
pub mod snapshot;

pub use crumble_types as types;

// Re-export commonly used types for convenience
pub use board::{
    Board, ColumnFall, ColumnShift, FallenToken, Group, LayoutError, ShiftedToken, Token,
};
pub use rng::SpawnRng;
pub use round::Round;
pub use scoring::{group_score, LeftoverBonus};
pub use snapshot::{BoardSnapshot, RoundSnapshot};
