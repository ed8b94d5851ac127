//! Move scoring and ranking
//!
//! A candidate is scored by the lines it forms:
//! `score = longest_run * 10 + forks`, where `forks` counts the directions
//! whose run through the move is at least 3. Ties go to the move closest to
//! the center, then to the lowest (row, col).

use std::cmp::Reverse;

use crate::board::{Board, Direction, Pos, Stone, BOARD_SIZE};
use crate::rules::line_length;

/// Weight of the longest run
const RUN_WEIGHT: i32 = 10;

/// Minimum run length that counts toward `forks`
const FORK_RUN: u32 = 3;

/// Line score of playing `stone` at `pos`.
///
/// The candidate cell is counted as `stone`; `board` is only read.
#[must_use]
pub fn score_move(board: &Board, pos: Pos, stone: Stone) -> i32 {
    let mut best = 0;
    let mut forks = 0;
    for dir in Direction::ALL {
        let run = line_length(board, pos, dir, stone);
        best = best.max(run);
        if run >= FORK_RUN {
            forks += 1;
        }
    }
    best as i32 * RUN_WEIGHT + forks
}

/// Taxicab distance from the board center (3.5, 3.5), in half-cell units.
///
/// Doubling keeps the value integral: the four center cells are at 2,
/// the corners at 14.
#[inline]
pub fn center_distance_x2(pos: Pos) -> u8 {
    let edge = BOARD_SIZE as i32 - 1;
    let dr = (2 * pos.row as i32 - edge).unsigned_abs();
    let dc = (2 * pos.col as i32 - edge).unsigned_abs();
    (dr + dc) as u8
}

/// Best candidate by `(max score, min center distance, min pos)`, with its score
pub fn pick_best(
    board: &Board,
    stone: Stone,
    candidates: impl IntoIterator<Item = Pos>,
) -> Option<(Pos, i32)> {
    candidates
        .into_iter()
        .map(|pos| (pos, score_move(board, pos, stone)))
        .min_by_key(|&(pos, score)| (Reverse(score), center_distance_x2(pos), pos))
}

/// Legal move closest to the center, ignoring line scores
pub fn most_central(moves: impl IntoIterator<Item = Pos>) -> Option<Pos> {
    moves
        .into_iter()
        .min_by_key(|&pos| (center_distance_x2(pos), pos))
}
