//! Deterministic move selector
//!
//! The selector runs a fixed list of candidate-producing stages and takes the
//! first one that yields anything:
//!
//! 1. **Win now**: complete five (no safety filter; the game ends)
//! 2. **Block four**: take the square where the opponent would complete five
//! 3. **Block three**: occupy an opponent three-threat square
//! 4. **Build three**: extend own threes
//! 5. **Opening**: while the board is sparse, stay near the center
//! 6. **Fallback**: any legal move, blunder-free if possible
//!
//! Stages 2-5 only offer moves that don't hand the opponent a five. If every
//! candidate of a stage blunders, the stage yields nothing and the next one
//! runs. Within a stage, moves are ranked by
//! [`score_move`](crate::eval::score_move), then by distance
//! to the center.
//!
//! # Example
//!
//! ```
//! use gomoku::{Board, MoveSelector, Pos, Stage, Stone};
//!
//! let mut board = Board::new();
//! for c in 1..5 {
//!     board.place_stone(Pos::new(3, c), Stone::X);
//! }
//! let legal: Vec<Pos> = board.empty_cells().collect();
//!
//! let selection = MoveSelector::new().select(&board, Stone::X, &legal);
//! assert_eq!(selection.stage, Stage::WinNow);
//! assert!(selection.pos == Pos::new(3, 0) || selection.pos == Pos::new(3, 5));
//! ```

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::debug;

use crate::board::{Board, Pos, Stone, FALLBACK_POS};
use crate::eval::{center_distance_x2, find_threats, most_central, pick_best, ThreatLevel};
use crate::rules::{find_immediate_wins, is_safe};

/// Stage of the selection chain that produced a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Stage {
    /// Completes five
    WinNow,
    /// Blocks an opponent five
    BlockFour,
    /// Occupies an opponent three-threat square
    BlockThree,
    /// Extends an own three
    BuildThree,
    /// Central move on a sparse board
    Opening,
    /// Best remaining legal move
    Fallback,
    /// No legal moves: the fixed fallback coordinate
    NoLegalMoves,
}

impl Stage {
    /// Candidate stages in priority order
    pub const CHAIN: [Stage; 6] = [
        Stage::WinNow,
        Stage::BlockFour,
        Stage::BlockThree,
        Stage::BuildThree,
        Stage::Opening,
        Stage::Fallback,
    ];

    /// Stages whose move should be played without further deliberation
    #[inline]
    pub fn is_forced(self) -> bool {
        matches!(self, Stage::WinNow | Stage::BlockFour)
    }
}

/// A chosen move and where it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub pos: Pos,
    pub stage: Stage,
    /// Line score of the move for the side to play (0 when nothing was scored)
    pub score: i32,
}

impl Selection {
    #[inline]
    fn new(pos: Pos, stage: Stage, score: i32) -> Self {
        Self { pos, stage, score }
    }
}

/// Inputs shared by every stage of one selection
struct Turn<'a> {
    board: &'a Board,
    me: Stone,
    legal: &'a [Pos],
    legal_set: BTreeSet<Pos>,
}

impl Turn<'_> {
    fn legal_only(&self, set: BTreeSet<Pos>) -> Vec<Pos> {
        set.intersection(&self.legal_set).copied().collect()
    }

    fn safe_only(&self, moves: impl IntoIterator<Item = Pos>) -> Vec<Pos> {
        moves
            .into_iter()
            .filter(|&pos| is_safe(self.board, pos, self.me))
            .collect()
    }

    fn best(&self, moves: Vec<Pos>, stage: Stage) -> Option<Selection> {
        pick_best(self.board, self.me, moves).map(|(pos, score)| Selection::new(pos, stage, score))
    }
}

/// Priority-chain move selector.
///
/// Stateless apart from its thresholds: every call rebuilds its view of the
/// position from the arguments.
#[derive(Debug, Clone)]
pub struct MoveSelector {
    /// The opening stage applies while fewer stones than this are on the board
    opening_stone_limit: u32,
    /// Opening moves lie within this taxicab distance of the center (half-cell units)
    opening_radius_x2: u8,
}

impl MoveSelector {
    /// Selector with the default thresholds: opening until 10 stones,
    /// within distance 3 of the center.
    #[must_use]
    pub fn new() -> Self {
        Self {
            opening_stone_limit: 10,
            opening_radius_x2: 6,
        }
    }

    /// Selector with custom opening thresholds.
    ///
    /// `opening_radius` is a taxicab distance in cells from (3.5, 3.5).
    /// Negative radii are treated as zero.
    #[must_use]
    pub fn with_config(opening_stone_limit: u32, opening_radius: f32) -> Self {
        Self {
            opening_stone_limit,
            opening_radius_x2: (opening_radius.max(0.0) * 2.0).floor().min(u8::MAX as f32) as u8,
        }
    }

    #[must_use]
    pub fn opening_stone_limit(&self) -> u32 {
        self.opening_stone_limit
    }

    /// Opening radius in cells
    #[must_use]
    pub fn opening_radius(&self) -> f32 {
        self.opening_radius_x2 as f32 / 2.0
    }

    /// Pick a move for `me` among `legal`.
    ///
    /// Always returns a member of `legal`, or [`FALLBACK_POS`] when `legal` is empty.
    #[must_use]
    pub fn select(&self, board: &Board, me: Stone, legal: &[Pos]) -> Selection {
        if legal.is_empty() {
            debug!("no legal moves, using fallback coordinate");
            return Selection::new(FALLBACK_POS, Stage::NoLegalMoves, 0);
        }

        let turn = Turn {
            board,
            me,
            legal,
            legal_set: legal.iter().copied().collect(),
        };

        for stage in Stage::CHAIN {
            if let Some(selection) = self.run_stage(stage, &turn) {
                debug!(
                    stage = ?selection.stage,
                    row = selection.pos.row,
                    col = selection.pos.col,
                    score = selection.score,
                    "selected move"
                );
                return selection;
            }
        }

        // Unreachable while Fallback ranks every legal move, kept for totality
        let pos = most_central(legal.iter().copied()).unwrap_or(FALLBACK_POS);
        Selection::new(pos, Stage::Fallback, 0)
    }

    /// Candidates of a single stage, or `None` if the stage is empty
    fn run_stage(&self, stage: Stage, turn: &Turn<'_>) -> Option<Selection> {
        let opp = turn.me.opponent();
        match stage {
            Stage::WinNow => {
                let wins = turn.legal_only(find_immediate_wins(turn.board, turn.me));
                turn.best(wins, stage)
            }
            Stage::BlockFour => {
                let blocks = turn.legal_only(find_threats(turn.board, opp, ThreatLevel::Four));
                turn.best(turn.safe_only(blocks), stage)
            }
            Stage::BlockThree => {
                let blocks = turn.legal_only(find_threats(turn.board, opp, ThreatLevel::Three));
                turn.best(turn.safe_only(blocks), stage)
            }
            Stage::BuildThree => {
                let builds = turn.legal_only(find_threats(turn.board, turn.me, ThreatLevel::Three));
                turn.best(turn.safe_only(builds), stage)
            }
            Stage::Opening => {
                if turn.board.stone_count() >= self.opening_stone_limit {
                    return None;
                }
                let central = turn
                    .legal
                    .iter()
                    .copied()
                    .filter(|&pos| center_distance_x2(pos) <= self.opening_radius_x2);
                turn.best(turn.safe_only(central), stage)
            }
            Stage::Fallback => {
                let safe = turn.safe_only(turn.legal.iter().copied());
                if safe.is_empty() {
                    turn.best(turn.legal.to_vec(), stage)
                } else {
                    turn.best(safe, stage)
                }
            }
            Stage::NoLegalMoves => None,
        }
    }
}

impl Default for MoveSelector {
    fn default() -> Self {
        Self::new()
    }
}
