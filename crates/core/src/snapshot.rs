use serde::{Deserialize, Serialize};

use crumble_types::Score;

use crate::board::Board;
use crate::round::Round;

/// Kind code for an empty cell; occupied cells carry kind index + 1.
pub const EMPTY_CELL: u8 = 0;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub width: usize,
    pub height: usize,
    /// Column-major kind codes, `width * height` entries
    pub cells: Vec<u8>,
    pub remaining: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub board: BoardSnapshot,
    pub score: Score,
    pub phase: String,
    pub over: bool,
}

impl Board {
    /// Write an observer view into a reusable snapshot buffer
    pub fn snapshot_into(&self, out: &mut BoardSnapshot) {
        out.width = self.width();
        out.height = self.height();
        out.cells.clear();
        out.cells.reserve(self.width() * self.height());
        out.remaining = 0;

        for x in 0..self.width() {
            for y in 0..self.height() {
                match self.kind_at(x, y) {
                    Some(kind) => {
                        out.cells.push(kind.index() as u8 + 1);
                        out.remaining += 1;
                    }
                    None => out.cells.push(EMPTY_CELL),
                }
            }
        }
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        let mut out = BoardSnapshot::default();
        self.snapshot_into(&mut out);
        out
    }
}

impl Round {
    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            board: self.board().snapshot(),
            score: self.score(),
            phase: self.phase().as_str().to_string(),
            over: self.is_over(),
        }
    }
}
