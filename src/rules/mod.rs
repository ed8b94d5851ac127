//! Game rules for 8x8 Gomoku
//!
//! - Win conditions (5-in-a-row, overlines allowed)
//! - One-ply safety (does a move hand the opponent a five)

pub mod safety;
pub mod win;

// Re-exports for convenient access
pub use safety::{creates_opponent_win, is_safe, safe_moves};
pub use win::{
    check_winner, find_five_positions, find_immediate_wins, has_five_in_row, has_immediate_win,
    line_length, would_win,
};
