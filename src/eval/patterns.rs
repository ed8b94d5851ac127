//! Line geometry and window patterns for threat detection
//!
//! A board line is a maximal run of cells along one direction. Windows are
//! contiguous slices of a line, read from the board at query time.

use once_cell::sync::Lazy;

use crate::board::{Board, Direction, Pos, Stone};

/// Width of a winning window
pub const WINDOW: usize = 5;
/// Width of the edge-anchored three window
pub const EDGE_WINDOW: usize = 4;

/// Which threat family to scan for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThreatLevel {
    /// Three stones that can grow into a four
    Three,
    /// Four stones, one move from five
    Four,
}

/// Shape of a window that qualified as a threat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ThreatKind {
    /// `XXXX_` in any order: the gap completes five
    Four,
    /// `_XXX_`: both ends are flagged.
    ///
    /// Strict Gomoku would also demand the cells beyond each end be open;
    /// this check does not, so it flags more squares than the textbook rule.
    OpenThree,
    /// Three stones and two gaps in any other order, e.g. `X_XX_`
    BrokenThree,
    /// Three stones, one gap, one opponent stone
    ClosedThree,
    /// Three stones and one gap in a 4-window at the end of a line
    EdgeThree,
}

/// Stone counts inside a window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowCounts {
    pub own: u8,
    pub empty: u8,
    pub opponent: u8,
}

impl WindowCounts {
    pub fn of(cells: &[Stone], stone: Stone) -> Self {
        let mut counts = WindowCounts::default();
        for &cell in cells {
            if cell == Stone::Empty {
                counts.empty += 1;
            } else if cell == stone {
                counts.own += 1;
            } else {
                counts.opponent += 1;
            }
        }
        counts
    }
}

/// Classify one window for `stone` at `level`.
///
/// `cells` is either a full 5-window or an edge-anchored 4-window.
/// Every qualifying pattern marks all the empty cells of its window.
pub fn classify_window(cells: &[Stone], stone: Stone, level: ThreatLevel) -> Option<ThreatKind> {
    if stone == Stone::Empty {
        return None;
    }
    let n = WindowCounts::of(cells, stone);

    match (level, cells.len()) {
        (ThreatLevel::Four, WINDOW) if n.own == 4 && n.empty == 1 && n.opponent == 0 => {
            Some(ThreatKind::Four)
        }
        (ThreatLevel::Three, WINDOW) if n.own == 3 && n.empty == 2 && n.opponent == 0 => {
            let open = cells[0] == Stone::Empty
                && cells[WINDOW - 1] == Stone::Empty
                && cells[1..WINDOW - 1].iter().all(|&c| c == stone);
            if open {
                Some(ThreatKind::OpenThree)
            } else {
                Some(ThreatKind::BrokenThree)
            }
        }
        (ThreatLevel::Three, WINDOW) if n.own == 3 && n.empty == 1 && n.opponent == 1 => {
            Some(ThreatKind::ClosedThree)
        }
        (ThreatLevel::Three, EDGE_WINDOW) if n.own == 3 && n.empty == 1 && n.opponent == 0 => {
            Some(ThreatKind::EdgeThree)
        }
        _ => None,
    }
}

/// A maximal board line along one direction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub direction: Direction,
    pub cells: Vec<Pos>,
}

impl Line {
    /// Every 5-window on this line
    pub fn windows(&self) -> impl Iterator<Item = &[Pos]> {
        self.cells.windows(WINDOW)
    }

    /// The 4-windows touching either end of the line (one if the line is 4 long)
    pub fn edge_windows(&self) -> impl Iterator<Item = &[Pos]> {
        let len = self.cells.len();
        let (head, tail) = if len >= EDGE_WINDOW {
            (
                Some(&self.cells[..EDGE_WINDOW]),
                (len > EDGE_WINDOW).then(|| &self.cells[len - EDGE_WINDOW..]),
            )
        } else {
            (None, None)
        };
        head.into_iter().chain(tail)
    }
}

/// Every line of length >= 4 on the board, once per direction.
/// Geometry only: contents are always read from the board being queried.
pub static LINES: Lazy<Vec<Line>> = Lazy::new(generate_lines);

fn generate_lines() -> Vec<Line> {
    let mut lines = Vec::new();
    for direction in Direction::ALL {
        let delta = direction.delta();
        for start in Pos::all() {
            // A line starts where stepping backwards leaves the board
            if start.offset(delta, -1).is_some() {
                continue;
            }
            let mut cells = vec![start];
            let mut cur = start.offset(delta, 1);
            while let Some(p) = cur {
                cells.push(p);
                cur = p.offset(delta, 1);
            }
            if cells.len() >= EDGE_WINDOW {
                lines.push(Line { direction, cells });
            }
        }
    }
    lines
}

/// Read the stones of a window from `board`
#[inline]
pub fn read_window(board: &Board, cells: &[Pos]) -> Vec<Stone> {
    cells.iter().map(|&p| board.get(p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const E: Stone = Stone::Empty;
    const X: Stone = Stone::X;
    const O: Stone = Stone::O;

    #[test]
    fn test_four_window() {
        assert_eq!(
            classify_window(&[X, X, E, X, X], X, ThreatLevel::Four),
            Some(ThreatKind::Four)
        );
        assert_eq!(classify_window(&[X, X, E, X, O], X, ThreatLevel::Four), None);
        assert_eq!(classify_window(&[X, X, E, X, X], X, ThreatLevel::Three), None);
    }

    #[test]
    fn test_open_versus_broken_three() {
        assert_eq!(
            classify_window(&[E, O, O, O, E], O, ThreatLevel::Three),
            Some(ThreatKind::OpenThree)
        );
        assert_eq!(
            classify_window(&[O, E, O, O, E], O, ThreatLevel::Three),
            Some(ThreatKind::BrokenThree)
        );
        assert_eq!(
            classify_window(&[O, O, O, E, E], O, ThreatLevel::Three),
            Some(ThreatKind::BrokenThree)
        );
    }

    #[test]
    fn test_closed_three() {
        assert_eq!(
            classify_window(&[X, O, O, O, E], O, ThreatLevel::Three),
            Some(ThreatKind::ClosedThree)
        );
        assert_eq!(classify_window(&[X, O, O, X, E], O, ThreatLevel::Three), None);
    }

    #[test]
    fn test_edge_three_only_in_four_window() {
        assert_eq!(
            classify_window(&[X, X, X, E], X, ThreatLevel::Three),
            Some(ThreatKind::EdgeThree)
        );
        assert_eq!(classify_window(&[X, X, X, O], X, ThreatLevel::Three), None);
        assert_eq!(classify_window(&[X, X, X, E], X, ThreatLevel::Four), None);
    }

    #[test]
    fn test_empty_stone_never_classifies() {
        assert_eq!(classify_window(&[E, E, E, E, E], E, ThreatLevel::Three), None);
    }

    #[test]
    fn test_line_geometry() {
        // 8 rows + 8 cols + 2*(diagonals of length >= 4: 9 each)
        let count = |d: Direction| LINES.iter().filter(|l| l.direction == d).count();
        assert_eq!(count(Direction::Horizontal), 8);
        assert_eq!(count(Direction::Vertical), 8);
        assert_eq!(count(Direction::DiagonalDown), 9);
        assert_eq!(count(Direction::DiagonalUp), 9);
        assert!(LINES.iter().all(|l| l.cells.len() >= EDGE_WINDOW));
    }

    #[test]
    fn test_each_cell_on_one_line_per_direction() {
        for pos in [Pos::new(0, 0), Pos::new(3, 4), Pos::new(7, 2)] {
            for dir in Direction::ALL {
                let hits = LINES
                    .iter()
                    .filter(|l| l.direction == dir && l.cells.contains(&pos))
                    .count();
                // Corner cells sit on length-1 diagonals, which are not kept
                assert!(hits <= 1);
            }
        }
    }

    #[test]
    fn test_edge_windows() {
        let row = LINES
            .iter()
            .find(|l| l.direction == Direction::Horizontal)
            .unwrap();
        let edges: Vec<&[Pos]> = row.edge_windows().collect();
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0][0].col, 0);
        assert_eq!(edges[1][3].col, 7);
        assert_eq!(row.windows().count(), 4);

        let short = LINES.iter().find(|l| l.cells.len() == 4).unwrap();
        assert_eq!(short.edge_windows().count(), 1);
        assert_eq!(short.windows().count(), 0);
    }
}
