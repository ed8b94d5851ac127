//! Per-turn tactical summary, restricted to the legal-move set

use std::collections::BTreeSet;

use serde::Serialize;

use crate::board::{Board, Pos, Stone};
use crate::rules::{creates_opponent_win, find_immediate_wins};

use super::patterns::ThreatLevel;
use super::threats::find_threats;

/// Everything the analyzer knows about the position, intersected with the
/// host's legal moves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TacticalReport {
    /// Side to move
    pub me: Stone,
    /// Moves that complete five for `me`
    pub winning_moves: BTreeSet<Pos>,
    /// Squares where the opponent completes five next turn
    pub must_block: BTreeSet<Pos>,
    /// Opponent three-threat squares
    pub opponent_threes: BTreeSet<Pos>,
    /// Own three-threat squares
    pub own_threes: BTreeSet<Pos>,
    /// Legal moves that hand the opponent an immediate five
    pub blunders: BTreeSet<Pos>,
    /// Number of legal moves analysed
    pub legal_count: usize,
}

impl TacticalReport {
    pub fn analyze(board: &Board, me: Stone, legal: &[Pos]) -> Self {
        let opp = me.opponent();
        let legal_set: BTreeSet<Pos> = legal.iter().copied().collect();
        let restrict = |set: BTreeSet<Pos>| -> BTreeSet<Pos> {
            set.intersection(&legal_set).copied().collect()
        };

        Self {
            me,
            winning_moves: restrict(find_immediate_wins(board, me)),
            must_block: restrict(find_threats(board, opp, ThreatLevel::Four)),
            opponent_threes: restrict(find_threats(board, opp, ThreatLevel::Three)),
            own_threes: restrict(find_threats(board, me, ThreatLevel::Three)),
            blunders: legal_set
                .iter()
                .copied()
                .filter(|&pos| creates_opponent_win(board, pos, me, opp))
                .collect(),
            legal_count: legal_set.len(),
        }
    }

    /// True if at least one legal move does not hand over a five
    pub fn has_safe_move(&self) -> bool {
        self.blunders.len() < self.legal_count
    }

    pub fn is_blunder(&self, pos: Pos) -> bool {
        self.blunders.contains(&pos)
    }

    /// Nothing tactical on the board
    pub fn is_quiet(&self) -> bool {
        self.winning_moves.is_empty()
            && self.must_block.is_empty()
            && self.opponent_threes.is_empty()
            && self.own_threes.is_empty()
    }
}
