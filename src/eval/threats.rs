//! Sliding-window threat scan
//!
//! Every line on the board is cut into 5-windows (plus, for threes, the
//! 4-windows anchored at either end of the line). Each qualifying window
//! marks its empty cells. Nothing is cached: each call reads the board it
//! is given.

use std::collections::BTreeSet;

use crate::board::{Board, Direction, Pos, Stone};

use super::patterns::{classify_window, read_window, ThreatKind, ThreatLevel, LINES};

/// An empty cell that completes a dangerous pattern for some stone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Threat {
    pub pos: Pos,
    pub kind: ThreatKind,
    pub direction: Direction,
}

/// Every (cell, pattern, direction) hit for `stone` at `level`.
/// The same cell may appear several times, once per window that flags it.
pub fn scan_threats(board: &Board, stone: Stone, level: ThreatLevel) -> Vec<Threat> {
    let mut found = Vec::new();
    if stone == Stone::Empty {
        return found;
    }

    for line in LINES.iter() {
        let mut mark = |cells: &[Pos]| {
            let window = read_window(board, cells);
            if let Some(kind) = classify_window(&window, stone, level) {
                for (&pos, &cell) in cells.iter().zip(&window) {
                    if cell == Stone::Empty {
                        found.push(Threat {
                            pos,
                            kind,
                            direction: line.direction,
                        });
                    }
                }
            }
        };

        line.windows().for_each(&mut mark);
        if level == ThreatLevel::Three {
            line.edge_windows().for_each(&mut mark);
        }
    }
    found
}

/// Empty cells that complete a `level` pattern for `stone`.
///
/// With `ThreatLevel::Four` this is exactly the set of immediate wins.
pub fn find_threats(board: &Board, stone: Stone, level: ThreatLevel) -> BTreeSet<Pos> {
    scan_threats(board, stone, level)
        .into_iter()
        .map(|t| t.pos)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::find_immediate_wins;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    fn board_from(stones: &[(u8, u8, Stone)]) -> Board {
        let mut board = Board::new();
        for &(r, c, s) in stones {
            board.place_stone(Pos::new(r, c), s);
        }
        board
    }

    fn random_board(rng: &mut SmallRng, fill: f64) -> Board {
        let mut board = Board::new();
        for pos in Pos::all() {
            if rng.gen_bool(fill) {
                let stone = if rng.gen_bool(0.5) { Stone::X } else { Stone::O };
                board.place_stone(pos, stone);
            }
        }
        board
    }

    #[test]
    fn test_open_three_flags_both_ends() {
        let board = board_from(&[(2, 2, Stone::O), (2, 3, Stone::O), (2, 4, Stone::O)]);
        let threats = find_threats(&board, Stone::O, ThreatLevel::Three);
        assert!(threats.contains(&Pos::new(2, 1)));
        assert!(threats.contains(&Pos::new(2, 5)));
        let kinds: Vec<ThreatKind> = scan_threats(&board, Stone::O, ThreatLevel::Three)
            .into_iter()
            .filter(|t| t.pos == Pos::new(2, 1))
            .map(|t| t.kind)
            .collect();
        assert!(kinds.contains(&ThreatKind::OpenThree));
    }

    #[test]
    fn test_broken_three_flags_the_gap() {
        let board = board_from(&[(5, 1, Stone::X), (5, 3, Stone::X), (5, 4, Stone::X)]);
        let threats = find_threats(&board, Stone::X, ThreatLevel::Three);
        assert!(threats.contains(&Pos::new(5, 2)));
        assert!(threats.iter().all(|&p| board.is_empty(p)));
    }

    #[test]
    fn test_closed_three_flags_single_gap() {
        // O X X X _ on row 0 from col 0: only the 5-window [0..5) is closed
        let board = board_from(&[
            (0, 0, Stone::O),
            (0, 1, Stone::X),
            (0, 2, Stone::X),
            (0, 3, Stone::X),
        ]);
        let hits: Vec<Threat> = scan_threats(&board, Stone::X, ThreatLevel::Three)
            .into_iter()
            .filter(|t| t.kind == ThreatKind::ClosedThree)
            .collect();
        assert!(!hits.is_empty());
        assert!(hits.iter().all(|t| t.pos == Pos::new(0, 4)));
    }

    #[test]
    fn test_edge_three_on_short_diagonal() {
        // Diagonal (0,3)..(3,0) has only 4 cells: only the edge window sees it
        let board = board_from(&[(0, 3, Stone::X), (1, 2, Stone::X), (2, 1, Stone::X)]);
        let hits: Vec<Threat> = scan_threats(&board, Stone::X, ThreatLevel::Three)
            .into_iter()
            .filter(|t| t.direction == Direction::DiagonalUp)
            .collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].pos, Pos::new(3, 0));
        assert_eq!(hits[0].kind, ThreatKind::EdgeThree);
    }

    #[test]
    fn test_smothered_three_is_no_threat() {
        // O X X X O O: every window holding the three also holds two O's
        let board = board_from(&[
            (4, 0, Stone::O),
            (4, 1, Stone::X),
            (4, 2, Stone::X),
            (4, 3, Stone::X),
            (4, 4, Stone::O),
            (4, 5, Stone::O),
        ]);
        let threats = find_threats(&board, Stone::X, ThreatLevel::Three);
        assert!(threats.iter().all(|p| p.row != 4));
    }

    #[test]
    fn test_four_threats_match_immediate_wins_on_fixed_boards() {
        let board = board_from(&[
            (1, 1, Stone::X),
            (1, 2, Stone::X),
            (1, 4, Stone::X),
            (1, 5, Stone::X),
            (3, 7, Stone::O),
            (4, 6, Stone::O),
            (5, 5, Stone::O),
            (6, 4, Stone::O),
        ]);
        assert_eq!(
            find_threats(&board, Stone::X, ThreatLevel::Four),
            BTreeSet::from([Pos::new(1, 3)])
        );
        assert_eq!(
            find_threats(&board, Stone::O, ThreatLevel::Four),
            find_immediate_wins(&board, Stone::O)
        );
    }

    #[test]
    fn test_four_threats_match_immediate_wins_on_random_boards() {
        let mut rng = SmallRng::seed_from_u64(0x60_6d_6f_6b);
        for i in 0..400 {
            let board = random_board(&mut rng, 0.2 + (i % 5) as f64 * 0.1);
            for stone in [Stone::X, Stone::O] {
                assert_eq!(
                    find_threats(&board, stone, ThreatLevel::Four),
                    find_immediate_wins(&board, stone),
                    "mismatch for {:?} on\n{}",
                    stone,
                    board
                );
            }
        }
    }

    #[test]
    fn test_threats_are_always_empty_cells() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..200 {
            let board = random_board(&mut rng, 0.4);
            for level in [ThreatLevel::Three, ThreatLevel::Four] {
                assert!(find_threats(&board, Stone::X, level)
                    .iter()
                    .all(|&p| board.is_empty(p)));
            }
        }
    }

    #[test]
    fn test_threats_rotate_with_board() {
        let mut rng = SmallRng::seed_from_u64(99);
        for _ in 0..200 {
            let board = random_board(&mut rng, 0.35);
            let rotated = board.rotate_180();
            for level in [ThreatLevel::Three, ThreatLevel::Four] {
                let mapped: BTreeSet<Pos> = find_threats(&board, Stone::O, level)
                    .into_iter()
                    .map(|p| Pos::new(7 - p.row, 7 - p.col))
                    .collect();
                assert_eq!(mapped, find_threats(&rotated, Stone::O, level));
            }
        }
    }

    #[test]
    fn test_empty_stone_has_no_threats() {
        let board = Board::new();
        assert!(find_threats(&board, Stone::Empty, ThreatLevel::Three).is_empty());
    }
}
