//! Board representation for 8x8 Gomoku

pub mod bitboard;
pub mod board;


use serde::{Deserialize, Serialize};
use std::fmt;

// Re-exports
pub use bitboard::Bitboard;
pub use board::{Board, BoardError, BoardStyle};

/// Board size (8x8)
pub const BOARD_SIZE: usize = 8;
pub const TOTAL_CELLS: usize = BOARD_SIZE * BOARD_SIZE; // 64

/// Coordinate returned when there is nothing legal to play
pub const FALLBACK_POS: Pos = Pos { row: 4, col: 4 };

/// Stone colors. X moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stone {
    Empty,
    X,
    O,
}

impl Stone {
    /// Get opponent color
    #[inline]
    pub fn opponent(self) -> Stone {
        match self {
            Stone::X => Stone::O,
            Stone::O => Stone::X,
            Stone::Empty => Stone::Empty,
        }
    }

    /// Symbol used by the host's text boards
    #[inline]
    pub fn symbol(self) -> char {
        match self {
            Stone::X => 'X',
            Stone::O => 'O',
            Stone::Empty => '.',
        }
    }

    /// Parse a cell symbol. Accepts either case for stones and `.` or `_` for empty.
    pub fn from_symbol(ch: char) -> Option<Stone> {
        match ch {
            'X' | 'x' => Some(Stone::X),
            'O' | 'o' => Some(Stone::O),
            '.' | '_' => Some(Stone::Empty),
            _ => None,
        }
    }
}

impl fmt::Display for Stone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// One of the four undirected line directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Horizontal,
    Vertical,
    DiagonalDown,
    DiagonalUp,
}

impl Direction {
    /// Each undirected line appears once; (-1,-1) is the same line as (1,1).
    pub const ALL: [Direction; 4] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::DiagonalDown,
        Direction::DiagonalUp,
    ];

    /// (row, col) step
    #[inline]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
            Direction::DiagonalDown => (1, 1),
            Direction::DiagonalUp => (1, -1),
        }
    }
}

/// Position on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    #[inline]
    pub fn new(row: u8, col: u8) -> Self {
        debug_assert!(row < BOARD_SIZE as u8 && col < BOARD_SIZE as u8);
        Self { row, col }
    }

    /// Checked constructor for coordinates coming from outside the crate
    pub fn try_new(row: i64, col: i64) -> Option<Self> {
        let size = BOARD_SIZE as i64;
        if (0..size).contains(&row) && (0..size).contains(&col) {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    #[inline]
    pub fn to_index(self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    #[inline]
    pub fn from_index(idx: usize) -> Self {
        Self {
            row: (idx / BOARD_SIZE) as u8,
            col: (idx % BOARD_SIZE) as u8,
        }
    }

    #[inline]
    pub fn is_valid(row: i32, col: i32) -> bool {
        row >= 0 && row < BOARD_SIZE as i32 && col >= 0 && col < BOARD_SIZE as i32
    }

    /// Step `steps` cells along `(dr, dc)`, or `None` past the edge (no wraparound)
    #[inline]
    pub fn offset(self, (dr, dc): (i32, i32), steps: i32) -> Option<Pos> {
        let r = self.row as i32 + dr * steps;
        let c = self.col as i32 + dc * steps;
        if Self::is_valid(r, c) {
            Some(Pos::new(r as u8, c as u8))
        } else {
            None
        }
    }

    /// Iterate all 64 cells in row-major order
    pub fn all() -> impl Iterator<Item = Pos> {
        (0..TOTAL_CELLS).map(Pos::from_index)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pos {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.to_index().cmp(&other.to_index())
    }
}
