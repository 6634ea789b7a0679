//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are pure data structures with no external dependencies, making
//! them usable in any context (core logic, observers, headless tools).
//!
//! # Board Dimensions
//!
//! Boards are sized at construction time and fixed for their lifetime.
//! The defaults match the original game's portrait layout:
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 12 rows (indexed 0-11, bottom to top)
//!
//! Zero width or height is legal and yields a board with no cells.
//!
//! # Coordinates
//!
//! `(x, y)` where `x` is the column and `y` is the row, with row 0 at the
//! bottom. Gravity pulls tokens toward row 0; column compaction pushes
//! surviving columns toward column 0.
//!
//! # Example
//!
//! ```
//! use crumble_types::{BoardConfig, SpawnPolicy, TokenKind};
//!
//! // Kind conversions are total over the fixed set
//! let kind = TokenKind::from_char('m').unwrap();
//! assert_eq!(kind, TokenKind::Macaroon);
//! assert_eq!(kind.as_str(), "macaroon");
//!
//! // Board configuration with defaults
//! let config = BoardConfig::default();
//! assert_eq!(config.width, 10);
//! assert_eq!(config.spawn, SpawnPolicy::Unfiltered);
//! ```

/// Default board width in columns
pub const DEFAULT_BOARD_WIDTH: usize = 10;

/// Default board height in rows
pub const DEFAULT_BOARD_HEIGHT: usize = 12;

/// Number of distinct token kinds
pub const TOKEN_KIND_COUNT: usize = 6;

/// Maximum re-rolls when a spawn policy rejects a generated board
pub const SPAWN_RETRY_LIMIT: u32 = 32;

/// Score value; signed because the unclamped leftover-bonus variant can
/// evaluate negative.
pub type Score = i64;

/// The six token kinds
///
/// Kinds are purely cosmetic labels to the engine; only equality between
/// kinds matters for connectivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Croissant,
    Cupcake,
    Danish,
    Donut,
    Macaroon,
    SugarCookie,
}

/// All kinds in index order
pub const ALL_KINDS: [TokenKind; TOKEN_KIND_COUNT] = [
    TokenKind::Croissant,
    TokenKind::Cupcake,
    TokenKind::Danish,
    TokenKind::Donut,
    TokenKind::Macaroon,
    TokenKind::SugarCookie,
];

impl TokenKind {
    /// Index of this kind in [`ALL_KINDS`]
    pub fn index(&self) -> usize {
        match self {
            TokenKind::Croissant => 0,
            TokenKind::Cupcake => 1,
            TokenKind::Danish => 2,
            TokenKind::Donut => 3,
            TokenKind::Macaroon => 4,
            TokenKind::SugarCookie => 5,
        }
    }

    /// Kind at the given index, `None` past the end of [`ALL_KINDS`]
    pub fn from_index(index: usize) -> Option<Self> {
        ALL_KINDS.get(index).copied()
    }

    /// Parse kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use crumble_types::TokenKind;
    ///
    /// assert_eq!(TokenKind::from_str("donut"), Some(TokenKind::Donut));
    /// assert_eq!(TokenKind::from_str("Croissant"), Some(TokenKind::Croissant));
    /// assert_eq!(TokenKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "croissant" => Some(TokenKind::Croissant),
            "cupcake" => Some(TokenKind::Cupcake),
            "danish" => Some(TokenKind::Danish),
            "donut" => Some(TokenKind::Donut),
            "macaroon" => Some(TokenKind::Macaroon),
            "sugarcookie" | "sugar-cookie" => Some(TokenKind::SugarCookie),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Croissant => "croissant",
            TokenKind::Cupcake => "cupcake",
            TokenKind::Danish => "danish",
            TokenKind::Donut => "donut",
            TokenKind::Macaroon => "macaroon",
            TokenKind::SugarCookie => "sugarcookie",
        }
    }

    /// Single-character glyph used by layout strings
    pub fn as_char(&self) -> char {
        match self {
            TokenKind::Croissant => 'c',
            TokenKind::Cupcake => 'u',
            TokenKind::Danish => 'd',
            TokenKind::Donut => 'o',
            TokenKind::Macaroon => 'm',
            TokenKind::SugarCookie => 's',
        }
    }

    /// Parse a layout glyph
    pub fn from_char(glyph: char) -> Option<Self> {
        match glyph {
            'c' => Some(TokenKind::Croissant),
            'u' => Some(TokenKind::Cupcake),
            'd' => Some(TokenKind::Danish),
            'o' => Some(TokenKind::Donut),
            'm' => Some(TokenKind::Macaroon),
            's' => Some(TokenKind::SugarCookie),
            _ => None,
        }
    }
}

/// Stable token identity
///
/// Ids are arena indices assigned at board construction and never reused
/// within a board. Equality and hashing go through the id alone; a token's
/// position is mutable state and is never part of its identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenId(u32);

impl TokenId {
    pub fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Initial board population policy
///
/// The original game spawns an unfiltered uniform fill, which can produce a
/// board that is already terminal. `RequireMove` re-rolls such boards
/// (bounded by [`SPAWN_RETRY_LIMIT`]) so a fresh round always has at least
/// one removable group when one is constructible at the configured size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpawnPolicy {
    #[default]
    Unfiltered,
    RequireMove,
}

impl SpawnPolicy {
    /// Parse policy from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "unfiltered" => Some(SpawnPolicy::Unfiltered),
            "require-move" | "requiremove" => Some(SpawnPolicy::RequireMove),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SpawnPolicy::Unfiltered => "unfiltered",
            SpawnPolicy::RequireMove => "require-move",
        }
    }
}

/// Round lifecycle phase
///
/// A round walks `Fresh → (Selecting ⇄ Settling)* → Terminal`. Selection
/// accumulation across taps is a presentation concern; the engine only
/// tracks which side of the loop the round is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundPhase {
    Fresh,
    Selecting,
    Settling,
    Terminal,
}

impl RoundPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundPhase::Fresh => "fresh",
            RoundPhase::Selecting => "selecting",
            RoundPhase::Settling => "settling",
            RoundPhase::Terminal => "terminal",
        }
    }
}

/// Board construction parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardConfig {
    pub width: usize,
    pub height: usize,
    /// Seed for the spawn RNG; equal seeds produce equal boards.
    pub seed: u32,
    pub spawn: SpawnPolicy,
}

impl BoardConfig {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_spawn(mut self, spawn: SpawnPolicy) -> Self {
        self.spawn = spawn;
        self
    }

    /// Total cell count
    pub fn cells(&self) -> usize {
        self.width * self.height
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOARD_WIDTH,
            height: DEFAULT_BOARD_HEIGHT,
            seed: 1,
            spawn: SpawnPolicy::Unfiltered,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_index_roundtrip() {
        for (i, kind) in ALL_KINDS.iter().enumerate() {
            assert_eq!(kind.index(), i);
            assert_eq!(TokenKind::from_index(i), Some(*kind));
        }
        assert_eq!(TokenKind::from_index(TOKEN_KIND_COUNT), None);
    }

    #[test]
    fn test_kind_char_roundtrip() {
        for kind in ALL_KINDS {
            assert_eq!(TokenKind::from_char(kind.as_char()), Some(kind));
        }
        assert_eq!(TokenKind::from_char('.'), None);
        assert_eq!(TokenKind::from_char('x'), None);
    }

    #[test]
    fn test_kind_str_roundtrip() {
        for kind in ALL_KINDS {
            assert_eq!(TokenKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(TokenKind::from_str("SUGARCOOKIE"), Some(TokenKind::SugarCookie));
        assert_eq!(TokenKind::from_str(""), None);
    }

    #[test]
    fn test_token_id_is_stable_identity() {
        let a = TokenId::from_index(7);
        let b = TokenId::from_index(7);
        let c = TokenId::from_index(8);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.index(), 7);
    }

    #[test]
    fn test_spawn_policy_parse() {
        assert_eq!(SpawnPolicy::from_str("unfiltered"), Some(SpawnPolicy::Unfiltered));
        assert_eq!(SpawnPolicy::from_str("require-move"), Some(SpawnPolicy::RequireMove));
        assert_eq!(SpawnPolicy::from_str("RequireMove"), Some(SpawnPolicy::RequireMove));
        assert_eq!(SpawnPolicy::from_str("never"), None);
    }

    #[test]
    fn test_board_config_defaults() {
        let config = BoardConfig::default();
        assert_eq!(config.width, DEFAULT_BOARD_WIDTH);
        assert_eq!(config.height, DEFAULT_BOARD_HEIGHT);
        assert_eq!(config.seed, 1);
        assert_eq!(config.spawn, SpawnPolicy::Unfiltered);
        assert_eq!(config.cells(), 120);
    }

    #[test]
    fn test_board_config_builders() {
        let config = BoardConfig::new(4, 3).with_seed(99).with_spawn(SpawnPolicy::RequireMove);
        assert_eq!(config.width, 4);
        assert_eq!(config.height, 3);
        assert_eq!(config.seed, 99);
        assert_eq!(config.spawn, SpawnPolicy::RequireMove);
        assert_eq!(config.cells(), 12);
    }
}
