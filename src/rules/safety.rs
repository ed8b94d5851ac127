//! One-ply blunder detection
//!
//! A move is a blunder when, after it is played, the opponent can complete
//! five on their very next move.

use crate::board::{Board, Pos, Stone};

use super::win::has_immediate_win;

/// Does playing `my_stone` at `pos` leave `opp_stone` an immediate five?
///
/// Occupied cells are reported as unsafe so they are never offered.
/// Works on a scratch copy; `board` is unchanged.
pub fn creates_opponent_win(board: &Board, pos: Pos, my_stone: Stone, opp_stone: Stone) -> bool {
    if !board.is_empty(pos) {
        return true;
    }
    let after = board.with_stone(pos, my_stone);
    has_immediate_win(&after, opp_stone)
}

/// Inverse of [`creates_opponent_win`] for the side `me`
#[inline]
pub fn is_safe(board: &Board, pos: Pos, me: Stone) -> bool {
    !creates_opponent_win(board, pos, me, me.opponent())
}

/// Keep only the moves that don't hand the opponent a five
pub fn safe_moves(board: &Board, me: Stone, moves: impl IntoIterator<Item = Pos>) -> Vec<Pos> {
    moves
        .into_iter()
        .filter(|&pos| is_safe(board, pos, me))
        .collect()
}
