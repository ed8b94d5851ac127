//! Win condition checking: five or more stones in a row (overlines count)

use std::collections::BTreeSet;

use crate::board::{Board, Direction, Pos, Stone};

/// Length of the run of `color` through `pos` along `dir`, counting `pos`
/// itself once as if it held `color`. Counting stops at the board edge.
#[inline]
pub fn line_length(board: &Board, pos: Pos, dir: Direction, color: Stone) -> u32 {
    let delta = dir.delta();
    let mut count = 1;
    for sign in [1, -1] {
        let step = (delta.0 * sign, delta.1 * sign);
        let mut cur = pos.offset(step, 1);
        while let Some(p) = cur {
            if board.get(p) != color {
                break;
            }
            count += 1;
            cur = p.offset(step, 1);
        }
    }
    count
}

/// Would placing `color` at `pos` complete five-in-a-row?
///
/// Occupied cells never win. The board is only read: the candidate cell is
/// counted as `color` without being written.
#[inline]
pub fn would_win(board: &Board, pos: Pos, color: Stone) -> bool {
    if color == Stone::Empty || !board.is_empty(pos) {
        return false;
    }
    Direction::ALL
        .iter()
        .any(|&dir| line_length(board, pos, dir, color) >= 5)
}

/// All empty cells where `color` completes five
pub fn find_immediate_wins(board: &Board, color: Stone) -> BTreeSet<Pos> {
    board
        .empty_cells()
        .filter(|&pos| would_win(board, pos, color))
        .collect()
}

/// True if `color` can complete five anywhere on its next move
pub fn has_immediate_win(board: &Board, color: Stone) -> bool {
    board.empty_cells().any(|pos| would_win(board, pos, color))
}

/// Check if there's 5+ in a row for the given color
pub fn has_five_in_row(board: &Board, stone: Stone) -> bool {
    find_five_positions(board, stone).is_some()
}

/// Find the positions of a 5-in-a-row if exists
///
/// Returns Some(Vec<Pos>) with at least 5 positions if a winning line exists,
/// None otherwise.
pub fn find_five_positions(board: &Board, stone: Stone) -> Option<Vec<Pos>> {
    let stones = board.stones(stone)?;

    for pos in stones.iter_ones() {
        for dir in Direction::ALL {
            let delta = dir.delta();
            // Only start from the first stone of a run
            if matches!(pos.offset(delta, -1), Some(prev) if board.get(prev) == stone) {
                continue;
            }
            let mut line = vec![pos];
            let mut cur = pos.offset(delta, 1);
            while let Some(next) = cur {
                if board.get(next) != stone {
                    break;
                }
                line.push(next);
                cur = next.offset(delta, 1);
            }
            if line.len() >= 5 {
                return Some(line);
            }
        }
    }
    None
}

/// Check for a winner
///
/// Returns `Some(Stone)` if either side owns a five, `None` otherwise.
pub fn check_winner(board: &Board) -> Option<Stone> {
    [Stone::X, Stone::O]
        .into_iter()
        .find(|&stone| has_five_in_row(board, stone))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    fn random_board(rng: &mut SmallRng) -> Board {
        let mut board = Board::new();
        for pos in Pos::all() {
            match rng.gen_range(0..10) {
                0..=2 => board.place_stone(pos, Stone::X),
                3..=5 => board.place_stone(pos, Stone::O),
                _ => {}
            }
        }
        board
    }

    #[test]
    fn test_empty_board_single_stone_never_wins() {
        let board = Board::new();
        assert!(!would_win(&board, Pos::new(3, 3), Stone::X));
        assert!(find_immediate_wins(&board, Stone::X).is_empty());
    }

    #[test]
    fn test_completes_horizontal_five() {
        let mut board = Board::new();
        for c in 1..5 {
            board.place_stone(Pos::new(3, c), Stone::X);
        }
        assert!(would_win(&board, Pos::new(3, 5), Stone::X));
        assert!(would_win(&board, Pos::new(3, 0), Stone::X));
        assert!(!would_win(&board, Pos::new(3, 5), Stone::O));
        assert!(!would_win(&board, Pos::new(3, 6), Stone::X));
    }

    #[test]
    fn test_gap_fill_wins() {
        let mut board = Board::new();
        for r in [0, 1, 3, 4] {
            board.place_stone(Pos::new(r, 6), Stone::O);
        }
        assert!(would_win(&board, Pos::new(2, 6), Stone::O));
        assert_eq!(
            find_immediate_wins(&board, Stone::O),
            BTreeSet::from([Pos::new(2, 6)])
        );
    }

    #[test]
    fn test_occupied_cell_is_never_a_win() {
        let mut board = Board::new();
        for c in 0..4 {
            board.place_stone(Pos::new(0, c), Stone::X);
        }
        board.place_stone(Pos::new(0, 4), Stone::O);
        assert!(!would_win(&board, Pos::new(0, 4), Stone::X));
        assert!(!would_win(&board, Pos::new(0, 0), Stone::X));
    }

    #[test]
    fn test_diagonal_up_and_down() {
        let mut board = Board::new();
        // Anti-diagonal from (7,0) towards (3,4)
        for i in 0..4u8 {
            board.place_stone(Pos::new(7 - i, i), Stone::X);
        }
        assert!(would_win(&board, Pos::new(3, 4), Stone::X));

        let mut board = Board::new();
        for i in 1..5u8 {
            board.place_stone(Pos::new(i, i), Stone::O);
        }
        assert!(would_win(&board, Pos::new(0, 0), Stone::O));
        assert!(would_win(&board, Pos::new(5, 5), Stone::O));
    }

    #[test]
    fn test_no_wraparound_across_rows() {
        let mut board = Board::new();
        // (0,5) (0,6) (0,7) then (1,0): contiguous in index order only
        for c in 5..8 {
            board.place_stone(Pos::new(0, c), Stone::X);
        }
        board.place_stone(Pos::new(1, 0), Stone::X);
        assert!(!would_win(&board, Pos::new(0, 4), Stone::X));
        assert!(!would_win(&board, Pos::new(1, 1), Stone::X));
    }

    #[test]
    fn test_short_diagonal_cannot_win() {
        let mut board = Board::new();
        // Diagonal (0,3)-(3,0) only has 4 cells
        for i in 0..3u8 {
            board.place_stone(Pos::new(i, 3 - i), Stone::X);
        }
        assert!(!would_win(&board, Pos::new(3, 0), Stone::X));
    }

    #[test]
    fn test_overline_counts_as_win() {
        let mut board = Board::new();
        for c in [0, 1, 2, 4, 5] {
            board.place_stone(Pos::new(6, c), Stone::X);
        }
        assert!(would_win(&board, Pos::new(6, 3), Stone::X));
    }

    #[test]
    fn test_line_length_counts_candidate_once() {
        let mut board = Board::new();
        board.place_stone(Pos::new(4, 3), Stone::X);
        board.place_stone(Pos::new(4, 5), Stone::X);
        board.place_stone(Pos::new(5, 4), Stone::O);
        let pos = Pos::new(4, 4);
        assert_eq!(line_length(&board, pos, Direction::Horizontal, Stone::X), 3);
        assert_eq!(line_length(&board, pos, Direction::Vertical, Stone::X), 1);
        assert_eq!(line_length(&board, pos, Direction::Vertical, Stone::O), 2);
    }

    #[test]
    fn test_has_immediate_win_matches_set() {
        let mut board = Board::new();
        for c in 0..4 {
            board.place_stone(Pos::new(7, c), Stone::O);
        }
        assert!(has_immediate_win(&board, Stone::O));
        assert!(!has_immediate_win(&board, Stone::X));
    }

    #[test]
    fn test_check_winner() {
        let mut board = Board::new();
        assert_eq!(check_winner(&board), None);
        for r in 2..7 {
            board.place_stone(Pos::new(r, 1), Stone::O);
        }
        assert_eq!(check_winner(&board), Some(Stone::O));
        assert_eq!(find_five_positions(&board, Stone::O).map(|l| l.len()), Some(5));
        assert!(find_five_positions(&board, Stone::Empty).is_none());
    }

    #[test]
    fn test_four_in_row_not_win() {
        let mut board = Board::new();
        for i in 0..4 {
            board.place_stone(Pos::new(2, i), Stone::X);
        }
        assert!(!has_five_in_row(&board, Stone::X));
    }

    #[test]
    fn test_would_win_agrees_with_win_set_on_random_boards() {
        let mut rng = SmallRng::seed_from_u64(2024);
        for _ in 0..300 {
            let board = random_board(&mut rng);
            for stone in [Stone::X, Stone::O] {
                let wins = find_immediate_wins(&board, stone);
                for pos in board.empty_cells() {
                    assert_eq!(would_win(&board, pos, stone), wins.contains(&pos));
                }
                assert_eq!(has_immediate_win(&board, stone), !wins.is_empty());
            }
        }
    }

    #[test]
    fn test_would_win_is_rotation_symmetric() {
        let mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..300 {
            let board = random_board(&mut rng);
            let rotated = board.rotate_180();
            let before = board;
            for pos in Pos::all() {
                let mirrored = Pos::new(7 - pos.row, 7 - pos.col);
                for stone in [Stone::X, Stone::O] {
                    assert_eq!(
                        would_win(&board, pos, stone),
                        would_win(&rotated, mirrored, stone)
                    );
                }
            }
            assert_eq!(board, before);
        }
    }

    #[test]
    fn test_line_length_is_direction_independent() {
        // Scanning (1,1) from one end equals scanning (-1,-1) from the other
        let mut board = Board::new();
        for i in 1..4u8 {
            board.place_stone(Pos::new(i, i), Stone::X);
        }
        assert_eq!(line_length(&board, Pos::new(0, 0), Direction::DiagonalDown, Stone::X), 4);
        assert_eq!(line_length(&board, Pos::new(4, 4), Direction::DiagonalDown, Stone::X), 4);
    }
}
