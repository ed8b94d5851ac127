//! Board structure and the host text codec

use std::fmt::{self, Write as _};

use thiserror::Error;

use super::bitboard::Bitboard;
use super::{Pos, Stone, BOARD_SIZE};

/// Game board. `Copy`, so hypothetical placements work on a scratch copy
/// and never touch the caller's board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    /// X stones bitboard
    pub x: Bitboard,
    /// O stones bitboard
    pub o: Bitboard,
}

/// Layout used when rendering a board as text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoardStyle {
    /// Column header and row labels
    #[default]
    Standard,
    /// Bare 8x8 grid of symbols
    Plain,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("expected {expected} board rows, found {found}")]
    RowCount { expected: usize, found: usize },
    #[error("row {row} has {found} cells, expected {expected}")]
    RowWidth {
        row: usize,
        found: usize,
        expected: usize,
    },
}

impl Board {
    pub fn new() -> Self {
        Self {
            x: Bitboard::new(),
            o: Bitboard::new(),
        }
    }

    /// Parse the host's serialized grid.
    ///
    /// A line is a board row when, after an optional numeric row label, every
    /// non-blank character other than `|` is a cell symbol and there are exactly
    /// `BOARD_SIZE` of them. Other lines (column headers, `____` rules, captions)
    /// are skipped, as is anything after the first `BOARD_SIZE` rows.
    ///
    /// Fewer than `BOARD_SIZE` rows is an error: `RowWidth` if some symbol line
    /// had the wrong width, `RowCount` otherwise.
    pub fn parse(text: &str) -> Result<Self, BoardError> {
        let mut board = Board::new();
        let mut rows = 0usize;
        let mut misfit: Option<BoardError> = None;

        for line in text.lines() {
            if rows == BOARD_SIZE {
                break;
            }
            let body = line.trim_start().trim_start_matches(|c: char| c.is_ascii_digit());
            let tokens: Vec<char> = body
                .chars()
                .filter(|c| !c.is_whitespace() && *c != '|')
                .collect();
            if tokens.is_empty() {
                continue;
            }
            let Some(cells) = tokens
                .into_iter()
                .map(Stone::from_symbol)
                .collect::<Option<Vec<Stone>>>()
            else {
                continue;
            };
            if cells.len() != BOARD_SIZE {
                misfit.get_or_insert(BoardError::RowWidth {
                    row: rows,
                    found: cells.len(),
                    expected: BOARD_SIZE,
                });
                continue;
            }
            for (col, stone) in cells.into_iter().enumerate() {
                board.place_stone(Pos::new(rows as u8, col as u8), stone);
            }
            rows += 1;
        }

        if rows < BOARD_SIZE {
            return Err(misfit.unwrap_or(BoardError::RowCount {
                expected: BOARD_SIZE,
                found: rows,
            }));
        }
        Ok(board)
    }

    /// Render the board as text. `Board::parse` reads both styles back.
    pub fn render(&self, style: BoardStyle) -> String {
        let mut out = String::with_capacity(BOARD_SIZE * (BOARD_SIZE * 2 + 4) + 24);
        if style == BoardStyle::Standard {
            out.push_str("  ");
            for c in 0..BOARD_SIZE {
                let _ = write!(out, " {}", c);
            }
            out.push('\n');
        }
        for r in 0..BOARD_SIZE {
            if style == BoardStyle::Standard {
                let _ = write!(out, "{} ", r);
            }
            for c in 0..BOARD_SIZE {
                if style == BoardStyle::Standard || c > 0 {
                    out.push(' ');
                }
                out.push(self.get(Pos::new(r as u8, c as u8)).symbol());
            }
            out.push('\n');
        }
        out
    }

    /// Get stone at position
    #[inline]
    pub fn get(&self, pos: Pos) -> Stone {
        if self.x.get(pos) {
            Stone::X
        } else if self.o.get(pos) {
            Stone::O
        } else {
            Stone::Empty
        }
    }

    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        !self.x.get(pos) && !self.o.get(pos)
    }

    /// Place a stone. Placing `Stone::Empty` clears the cell.
    #[inline]
    pub fn place_stone(&mut self, pos: Pos, stone: Stone) {
        self.remove_stone(pos);
        match stone {
            Stone::X => self.x.set(pos),
            Stone::O => self.o.set(pos),
            Stone::Empty => {}
        }
    }

    #[inline]
    pub fn remove_stone(&mut self, pos: Pos) {
        self.x.clear(pos);
        self.o.clear(pos);
    }

    /// Scratch copy with `stone` placed at `pos`
    #[inline]
    #[must_use]
    pub fn with_stone(&self, pos: Pos, stone: Stone) -> Board {
        let mut scratch = *self;
        scratch.place_stone(pos, stone);
        scratch
    }

    /// Get bitboard for a color (returns None for Empty)
    #[inline]
    pub fn stones(&self, stone: Stone) -> Option<&Bitboard> {
        match stone {
            Stone::X => Some(&self.x),
            Stone::O => Some(&self.o),
            Stone::Empty => None,
        }
    }

    /// Total stones on board
    #[inline]
    pub fn stone_count(&self) -> u32 {
        self.x.count() + self.o.count()
    }

    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.x.is_empty() && self.o.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.stone_count() as usize == BOARD_SIZE * BOARD_SIZE
    }

    /// Empty cells in row-major order
    pub fn empty_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        Pos::all().filter(move |&pos| self.is_empty(pos))
    }

    /// Side to move, assuming X opened and turns alternated
    pub fn side_to_move(&self) -> Stone {
        if self.x.count() > self.o.count() {
            Stone::O
        } else {
            Stone::X
        }
    }

    /// The same position rotated by 180°
    #[must_use]
    pub fn rotate_180(&self) -> Board {
        Board {
            x: self.x.rotate_180(),
            o: self.o.rotate_180(),
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(BoardStyle::Standard))
    }
}
