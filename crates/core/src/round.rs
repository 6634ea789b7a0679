//! Round module - single-round session over one board
//!
//! Ties the board, the accumulated score, the lifecycle phase, and the
//! terminal bonus policy together. The flow mirrors how a presentation layer
//! drives the engine: preview a selection, collapse it, animate the falls,
//! compact the columns, then ask whether the round is over.
//!
//! Selection accumulation across repeated taps stays with the caller; the
//! round only distinguishes which side of the Selecting/Settling loop it is
//! on and whether it has reached Terminal.

use crumble_types::{BoardConfig, RoundPhase, Score};

use crate::board::{Board, ColumnFall, ColumnShift, Group};
use crate::scoring::LeftoverBonus;

/// One round of play: a board plus score, phase, and bonus policy
#[derive(Debug, Clone)]
pub struct Round {
    board: Board,
    score: Score,
    phase: RoundPhase,
    bonus: LeftoverBonus,
}

impl Round {
    /// Start a fresh round with the default bonus policy
    pub fn new(config: &BoardConfig) -> Self {
        Self::with_bonus(config, LeftoverBonus::default())
    }

    /// Start a fresh round with an explicit bonus policy
    pub fn with_bonus(config: &BoardConfig, bonus: LeftoverBonus) -> Self {
        Self {
            board: Board::new(config),
            score: 0,
            phase: RoundPhase::Fresh,
            bonus,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase == RoundPhase::Terminal
    }

    /// Preview the group under a tap
    ///
    /// Enters `Selecting` when the group is removable; a tap on an empty
    /// cell, out of range, or on a singleton changes nothing.
    pub fn select(&mut self, x: usize, y: usize) -> Option<Group> {
        if self.is_over() {
            return None;
        }
        let group = self.board.connected_group(x, y)?;
        if group.removable() {
            self.phase = RoundPhase::Selecting;
        }
        Some(group)
    }

    /// Collapse a previously previewed group
    ///
    /// Refuses non-removable groups (they score zero and are not moves).
    /// Scores the group, removes it, applies gravity, and enters `Settling`.
    pub fn collapse(&mut self, group: &Group) -> Option<Vec<ColumnFall>> {
        if self.is_over() || !group.removable() {
            return None;
        }
        self.score += group.score();
        let falls = self.board.remove_group(group);
        self.phase = RoundPhase::Settling;
        Some(falls)
    }

    /// Second settling step: pack surviving columns leftward
    pub fn compact(&mut self) -> Vec<ColumnShift> {
        self.board.compact_columns()
    }

    /// Terminal check once settling has completed
    ///
    /// On the first terminal detection, awards the leftover bonus exactly
    /// once and enters `Terminal`; otherwise the round returns to
    /// `Selecting`. Also valid on a fresh board, which the unfiltered spawn
    /// policy can deal out already-terminal.
    pub fn finish_settling(&mut self) -> bool {
        if self.is_over() {
            return true;
        }
        if self.board.is_over() {
            self.score += self.bonus.evaluate(self.board.count_tokens());
            self.phase = RoundPhase::Terminal;
            true
        } else {
            self.phase = RoundPhase::Selecting;
            false
        }
    }
}

impl Default for Round {
    fn default() -> Self {
        Self::new(&BoardConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crumble_types::SpawnPolicy;

    fn round_from_rows(rows: &[&str]) -> Round {
        let mut round = Round::default();
        round.board = Board::from_rows(rows).unwrap();
        round
    }

    #[test]
    fn test_new_round_is_fresh() {
        let round = Round::new(&BoardConfig::new(4, 4).with_seed(3));
        assert_eq!(round.phase(), RoundPhase::Fresh);
        assert_eq!(round.score(), 0);
        assert!(!round.is_over());
    }

    #[test]
    fn test_select_singleton_does_not_enter_selecting() {
        let mut round = round_from_rows(&["cu", "uc"]);
        let group = round.select(0, 0).unwrap();
        assert_eq!(group.len(), 1);
        assert_eq!(round.phase(), RoundPhase::Fresh);
    }

    #[test]
    fn test_collapse_refuses_singletons() {
        let mut round = round_from_rows(&["cu", "uc"]);
        let group = round.select(0, 0).unwrap();
        assert!(round.collapse(&group).is_none());
        assert_eq!(round.score(), 0);
        assert_eq!(round.board().count_tokens(), 4);
    }

    #[test]
    fn test_collapse_scores_and_settles() {
        let mut round = round_from_rows(&["cc", "uu"]);
        let group = round.select(0, 1).unwrap();
        assert_eq!(round.phase(), RoundPhase::Selecting);

        let falls = round.collapse(&group).unwrap();
        assert_eq!(round.phase(), RoundPhase::Settling);
        assert_eq!(round.score(), 2);
        // The c pair sat on top; nothing fell into its place
        assert!(falls.is_empty());

        round.compact();
        // The u pair is still on the board, so the round continues
        assert!(!round.finish_settling());
        assert_eq!(round.phase(), RoundPhase::Selecting);
    }

    #[test]
    fn test_full_round_to_terminal() {
        let mut round = round_from_rows(&["cc", "uu"]);

        let top = round.select(0, 1).unwrap();
        round.collapse(&top).unwrap();
        round.compact();
        assert!(!round.finish_settling());
        assert_eq!(round.phase(), RoundPhase::Selecting);

        let bottom = round.select(0, 0).unwrap();
        round.collapse(&bottom).unwrap();
        round.compact();
        assert!(round.finish_settling());
        assert!(round.is_over());

        // Two pair collapses plus the cleared-board bonus
        assert_eq!(round.score(), 2 + 2 + 100);
    }

    #[test]
    fn test_terminal_round_ignores_further_input() {
        let mut round = round_from_rows(&["cc"]);
        let group = round.select(0, 0).unwrap();
        round.collapse(&group).unwrap();
        round.compact();
        assert!(round.finish_settling());

        let score = round.score();
        assert!(round.select(0, 0).is_none());
        assert!(round.finish_settling());
        assert_eq!(round.score(), score, "bonus must be awarded exactly once");
    }

    #[test]
    fn test_finish_settling_on_fresh_terminal_board() {
        let mut round = round_from_rows(&["cu", "uc"]);
        assert!(round.finish_settling());
        assert!(round.is_over());
        // Four leftovers under par of five
        assert_eq!(round.score(), 20);
    }

    #[test]
    fn test_unclamped_bonus_policy_applies() {
        let config = BoardConfig::new(0, 0);
        let mut round = Round::with_bonus(&config, LeftoverBonus::new(20, 5, false));
        round.board = Board::from_rows(&["cucucu", "ucucuc"]).unwrap();
        assert!(round.finish_settling());
        // Twelve leftovers, seven past par
        assert_eq!(round.score(), -140);
    }

    #[test]
    fn test_require_move_round_has_an_opening() {
        let config = BoardConfig::new(6, 6)
            .with_seed(5)
            .with_spawn(SpawnPolicy::RequireMove);
        let round = Round::new(&config);
        assert!(!round.board().is_over());
    }
}
