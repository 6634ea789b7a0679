//! Board module - manages the collapse-game grid
//!
//! The board is a width x height grid where each cell is empty or holds a
//! token. Storage is a flat column-major slot array (x * height + y) holding
//! token ids, backed by a token arena that owns kind and position state.
//! Coordinates: (x, y) with x ranging left to right and y ranging bottom to
//! top; gravity pulls toward row 0 and compaction packs toward column 0.
//!
//! Identity is the arena id, never the position: a token keeps its id across
//! falls and shifts, and ids are not reused within a board. The slot array
//! exists only for spatial lookup.

use arrayvec::ArrayVec;
use thiserror::Error;

use crumble_types::{BoardConfig, Score, SpawnPolicy, TokenId, TokenKind, SPAWN_RETRY_LIMIT};

use crate::rng::SpawnRng;
use crate::scoring::group_score;

/// A token as seen by callers: stable id, kind, and current position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token {
    pub id: TokenId,
    pub kind: TokenKind,
    pub column: usize,
    pub row: usize,
}

/// Arena record for one token; position mutates as the board settles
#[derive(Debug, Clone, Copy)]
struct TokenRecord {
    kind: TokenKind,
    column: usize,
    row: usize,
    alive: bool,
}

/// A maximal 4-connected same-kind region
///
/// Membership is set-like: every id appears exactly once and order carries
/// no meaning. Groups snapshot token positions at computation time, so a
/// group is only valid against the board state it was computed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    kind: TokenKind,
    tokens: Vec<Token>,
}

impl Group {
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Whether removing this group is a meaningful move (size >= 2)
    pub fn removable(&self) -> bool {
        self.tokens.len() >= 2
    }

    pub fn contains(&self, id: TokenId) -> bool {
        self.tokens.iter().any(|t| t.id == id)
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Score this group would yield on removal
    pub fn score(&self) -> Score {
        group_score(self.tokens.len())
    }
}

/// A token that dropped during gravity settling
///
/// `token` carries the post-fall position; `from_row` is where it started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallenToken {
    pub token: Token,
    pub from_row: usize,
}

impl FallenToken {
    /// Rows fallen
    pub fn distance(&self) -> usize {
        self.from_row - self.token.row
    }
}

/// All falls within one column, ordered by ascending destination row
///
/// Ascending destination row is also ascending distance fallen, which is the
/// ordering presentation layers use to stagger fall animations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnFall {
    pub column: usize,
    pub tokens: Vec<FallenToken>,
}

/// A token that migrated during column compaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftedToken {
    pub token: Token,
    pub from_column: usize,
}

/// One compacted column: every token that moved into `column`, bottom to top
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnShift {
    pub column: usize,
    pub tokens: Vec<ShiftedToken>,
}

/// Layout parsing failure for [`Board::from_rows`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("row {row} has width {found}, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unrecognized cell glyph {glyph:?} at ({x}, {y})")]
    UnknownGlyph { glyph: char, x: usize, y: usize },
}

/// The game board
#[derive(Debug, Clone)]
pub struct Board {
    width: usize,
    height: usize,
    /// Column-major slots: index = x * height + y
    slots: Vec<Option<TokenId>>,
    arena: Vec<TokenRecord>,
}

impl Board {
    /// Create a board populated per the config's spawn policy
    ///
    /// Every cell receives a uniformly random kind. With
    /// [`SpawnPolicy::RequireMove`] the fill is re-rolled (bounded by
    /// [`SPAWN_RETRY_LIMIT`]) while the result has no removable group; the
    /// last attempt is kept if the limit is reached.
    pub fn new(config: &BoardConfig) -> Self {
        let mut rng = SpawnRng::new(config.seed);
        let mut board = Self::fill_random(config.width, config.height, &mut rng);

        if config.spawn == SpawnPolicy::RequireMove && config.cells() >= 2 {
            let mut attempts = 0;
            while board.is_over() && attempts < SPAWN_RETRY_LIMIT {
                board = Self::fill_random(config.width, config.height, &mut rng);
                attempts += 1;
            }
        }

        board
    }

    fn fill_random(width: usize, height: usize, rng: &mut SpawnRng) -> Self {
        let cells = width * height;
        let mut slots = Vec::with_capacity(cells);
        let mut arena = Vec::with_capacity(cells);

        for x in 0..width {
            for y in 0..height {
                let id = TokenId::from_index(arena.len());
                arena.push(TokenRecord {
                    kind: rng.next_kind(),
                    column: x,
                    row: y,
                    alive: true,
                });
                slots.push(Some(id));
            }
        }

        Self {
            width,
            height,
            slots,
            arena,
        }
    }

    /// Build a board from a visual layout, one string per row, top row first
    ///
    /// `'.'` marks an empty cell; any other glyph must parse via
    /// [`TokenKind::from_char`]. An empty slice yields a zero-area board.
    pub fn from_rows(rows: &[&str]) -> Result<Self, LayoutError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.chars().count());

        let mut board = Self {
            width,
            height,
            slots: vec![None; width * height],
            arena: Vec::new(),
        };

        for (i, row) in rows.iter().enumerate() {
            let y = height - 1 - i;
            let found = row.chars().count();
            if found != width {
                return Err(LayoutError::RaggedRow {
                    row: i,
                    expected: width,
                    found,
                });
            }

            for (x, glyph) in row.chars().enumerate() {
                if glyph == '.' {
                    continue;
                }
                let kind = TokenKind::from_char(glyph).ok_or(LayoutError::UnknownGlyph {
                    glyph,
                    x,
                    y,
                })?;
                let id = TokenId::from_index(board.arena.len());
                board.arena.push(TokenRecord {
                    kind,
                    column: x,
                    row: y,
                    alive: true,
                });
                board.slots[x * height + y] = Some(id);
            }
        }

        Ok(board)
    }

    /// Render the board back into layout rows, top row first
    pub fn to_rows(&self) -> Vec<String> {
        (0..self.height)
            .rev()
            .map(|y| {
                (0..self.width)
                    .map(|x| self.kind_at(x, y).map_or('.', |k| k.as_char()))
                    .collect()
            })
            .collect()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Calculate flat slot index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(x * self.height + y)
    }

    /// Flat index for coordinates already known to be in bounds
    #[inline(always)]
    fn slot_index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height);
        x * self.height + y
    }

    fn view(&self, id: TokenId) -> Token {
        let record = &self.arena[id.index()];
        Token {
            id,
            kind: record.kind,
            column: record.column,
            row: record.row,
        }
    }

    /// Token occupying (x, y), `None` for an empty cell or out-of-range read
    ///
    /// Callers are expected to stay within bounds; the bounds check here is
    /// what keeps a stray coordinate from reaching past the slot storage.
    pub fn token_at(&self, x: usize, y: usize) -> Option<Token> {
        let idx = self.index(x, y)?;
        self.slots[idx].map(|id| self.view(id))
    }

    /// Kind occupying (x, y)
    pub fn kind_at(&self, x: usize, y: usize) -> Option<TokenKind> {
        self.token_at(x, y).map(|t| t.kind)
    }

    /// Arena lookup by id; `None` once the token has been removed
    pub fn token(&self, id: TokenId) -> Option<Token> {
        let record = self.arena.get(id.index())?;
        record.alive.then(|| self.view(id))
    }

    /// Number of occupied cells
    pub fn count_tokens(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Whether no cell holds a token
    pub fn is_empty(&self) -> bool {
        self.count_tokens() == 0
    }

    /// Iterate over all live tokens in column-major order
    pub fn tokens(&self) -> impl Iterator<Item = Token> + '_ {
        self.slots
            .iter()
            .filter_map(move |slot| slot.map(|id| self.view(id)))
    }

    /// In-bounds 4-neighbors of (x, y)
    fn neighbors(&self, x: usize, y: usize) -> ArrayVec<(usize, usize), 4> {
        let mut out = ArrayVec::new();
        if x > 0 {
            out.push((x - 1, y));
        }
        if x + 1 < self.width {
            out.push((x + 1, y));
        }
        if y > 0 {
            out.push((x, y - 1));
        }
        if y + 1 < self.height {
            out.push((x, y + 1));
        }
        out
    }

    /// Worklist flood fill from `origin`, marking members in `visited`
    ///
    /// Only matching cells are marked, so a shared `visited` across floods
    /// partitions the occupied cells into maximal groups without rescans.
    fn flood(&self, origin: Token, visited: &mut [bool]) -> Group {
        let kind = origin.kind;
        let mut tokens = Vec::new();
        let mut stack = vec![origin];
        visited[self.slot_index(origin.column, origin.row)] = true;

        while let Some(token) = stack.pop() {
            tokens.push(token);
            for (nx, ny) in self.neighbors(token.column, token.row) {
                let idx = self.slot_index(nx, ny);
                if visited[idx] {
                    continue;
                }
                if let Some(neighbor) = self.slots[idx].map(|id| self.view(id)) {
                    if neighbor.kind == kind {
                        visited[idx] = true;
                        stack.push(neighbor);
                    }
                }
            }
        }

        Group { kind, tokens }
    }

    /// Maximal 4-connected same-kind group through (x, y)
    ///
    /// Starting from any member of a region yields the identical set.
    /// `None` for an empty cell or out-of-range coordinates.
    pub fn connected_group(&self, x: usize, y: usize) -> Option<Group> {
        let origin = self.token_at(x, y)?;
        let mut visited = vec![false; self.slots.len()];
        Some(self.flood(origin, &mut visited))
    }

    /// All maximal groups on the board, singletons included
    ///
    /// One labeling pass: each occupied cell is absorbed into exactly one
    /// group.
    pub fn groups(&self) -> Vec<Group> {
        let mut visited = vec![false; self.slots.len()];
        let mut out = Vec::new();

        for x in 0..self.width {
            for y in 0..self.height {
                let idx = self.slot_index(x, y);
                if visited[idx] {
                    continue;
                }
                if let Some(origin) = self.slots[idx].map(|id| self.view(id)) {
                    out.push(self.flood(origin, &mut visited));
                }
            }
        }

        out
    }

    /// Terminal check: true iff no removable group exists anywhere
    ///
    /// Shares one visited set across floods so every cell is expanded at
    /// most once, and short-circuits on the first group of size >= 2.
    pub fn is_over(&self) -> bool {
        let mut visited = vec![false; self.slots.len()];

        for x in 0..self.width {
            for y in 0..self.height {
                let idx = self.slot_index(x, y);
                if visited[idx] {
                    continue;
                }
                if let Some(origin) = self.slots[idx].map(|id| self.view(id)) {
                    if self.flood(origin, &mut visited).removable() {
                        return false;
                    }
                }
            }
        }

        true
    }

    /// Remove every token in `group` and settle columns downward
    ///
    /// Precondition: each member is live at its recorded cell on this board
    /// (a group computed from the current state). Passing a stale group is a
    /// caller bug, not a recoverable condition.
    ///
    /// Returns the tokens that fell, partitioned by column; columns without
    /// movement are omitted entirely.
    pub fn remove_group(&mut self, group: &Group) -> Vec<ColumnFall> {
        for token in group.tokens() {
            let idx = self.slot_index(token.column, token.row);
            debug_assert_eq!(
                self.slots[idx],
                Some(token.id),
                "group member must be live at its recorded cell"
            );
            self.slots[idx] = None;
            self.arena[token.id.index()].alive = false;
        }

        self.fill_holes()
    }

    /// Gravity settling: drop each column's tokens to the lowest free rows
    ///
    /// Two-pointer compaction per column preserves relative order. Fall
    /// entries are recorded in ascending destination row, which is also
    /// ascending distance fallen.
    fn fill_holes(&mut self) -> Vec<ColumnFall> {
        let mut falls = Vec::new();

        for x in 0..self.width {
            let mut column = Vec::new();
            let mut write = 0usize;

            for read in 0..self.height {
                let Some(id) = self.slots[self.slot_index(x, read)] else {
                    continue;
                };
                if read != write {
                    let read_idx = self.slot_index(x, read);
                    let write_idx = self.slot_index(x, write);
                    self.slots[read_idx] = None;
                    self.slots[write_idx] = Some(id);
                    self.arena[id.index()].row = write;
                    column.push(FallenToken {
                        token: self.view(id),
                        from_row: read,
                    });
                }
                write += 1;
            }

            if !column.is_empty() {
                falls.push(ColumnFall { column: x, tokens: column });
            }
        }

        falls
    }

    fn is_column_empty(&self, x: usize) -> bool {
        (0..self.height).all(|y| self.slots[self.slot_index(x, y)].is_none())
    }

    /// Pack surviving columns toward column 0
    ///
    /// Must run after gravity settling: the scan keys on fully-empty columns,
    /// not per-cell holes. Each empty column takes the nearest non-empty
    /// column to its right; rows and relative column order are preserved.
    ///
    /// Returns one entry per migrated column (bottom-to-top token order),
    /// carrying the source column for animation; untouched columns are
    /// omitted.
    pub fn compact_columns(&mut self) -> Vec<ColumnShift> {
        let mut shifts = Vec::new();

        for x in 0..self.width {
            if !self.is_column_empty(x) {
                continue;
            }
            // Everything to the right of a donor-less empty column is empty too
            let Some(donor) = ((x + 1)..self.width).find(|&c| !self.is_column_empty(c)) else {
                break;
            };

            let mut tokens = Vec::new();
            for y in 0..self.height {
                let from_idx = self.slot_index(donor, y);
                if let Some(id) = self.slots[from_idx].take() {
                    let to_idx = self.slot_index(x, y);
                    self.slots[to_idx] = Some(id);
                    self.arena[id.index()].column = x;
                    tokens.push(ShiftedToken {
                        token: self.view(id),
                        from_column: donor,
                    });
                }
            }

            shifts.push(ColumnShift { column: x, tokens });
        }

        shifts
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(&BoardConfig::default())
    }
}
