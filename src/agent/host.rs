//! Host boundary: the game framework the agent plays inside
//!
//! The host owns the game. The agent only reads three things from it each
//! turn, and any of those reads may fail without failing the turn.

use thiserror::Error;
use tracing::warn;

use crate::board::{Board, BoardStyle, Pos, Stone};
use crate::rules::{check_winner, find_five_positions};

/// A host query that could not be answered
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("host could not provide {what}: {reason}")]
pub struct HostError {
    pub what: &'static str,
    pub reason: String,
}

impl HostError {
    pub fn new(what: &'static str, reason: impl Into<String>) -> Self {
        Self {
            what,
            reason: reason.into(),
        }
    }
}

/// Read access to the game the agent is playing
pub trait GameHost {
    /// Side to move
    fn current_player(&self) -> Result<Stone, HostError>;

    /// The authoritative set of playable coordinates
    fn legal_moves(&self) -> Result<Vec<Pos>, HostError>;

    /// Serialized grid, readable by [`Board::parse`]
    fn format_board(&self, style: BoardStyle) -> Result<String, HostError>;
}

/// Everything the agent knows about the current turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnSnapshot {
    pub board: Board,
    /// Board text as shown to the model
    pub board_text: String,
    pub me: Stone,
    pub legal: Vec<Pos>,
}

impl TurnSnapshot {
    /// Query the host once for each input.
    ///
    /// Failures degrade instead of propagating: an unreadable board becomes
    /// empty, unreadable moves become an empty list, and an unknown player is
    /// inferred from stone counts.
    pub fn capture<H: GameHost + ?Sized>(host: &H) -> Self {
        let board = match host.format_board(BoardStyle::Standard) {
            Ok(text) => match Board::parse(&text) {
                Ok(board) => Some((board, text)),
                Err(err) => {
                    warn!(%err, "unreadable board text, assuming empty board");
                    None
                }
            },
            Err(err) => {
                warn!(%err, "assuming empty board");
                None
            }
        };
        let (board, board_text) = board.unwrap_or_else(|| {
            let empty = Board::new();
            (empty, empty.render(BoardStyle::Standard))
        });

        let legal = host.legal_moves().unwrap_or_else(|err| {
            warn!(%err, "assuming no legal moves");
            Vec::new()
        });

        let me = match host.current_player() {
            Ok(stone) if stone != Stone::Empty => stone,
            Ok(_) => board.side_to_move(),
            Err(err) => {
                warn!(%err, "inferring current player from stone counts");
                board.side_to_move()
            }
        };

        Self {
            board,
            board_text,
            me,
            legal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("game is over")]
    GameOver,
    #[error("cell {0} is occupied")]
    Occupied(Pos),
}

/// How a finished game ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Win { winner: Stone, line: Vec<Pos> },
    Draw,
}

/// In-memory game host: every empty cell is legal, X moves first
#[derive(Debug, Clone, Default)]
pub struct LocalGame {
    board: Board,
    current_turn: Option<Stone>,
    outcome: Option<Outcome>,
    move_history: Vec<(Pos, Stone)>,
}

impl LocalGame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue from an existing position. The side to move is inferred from
    /// stone counts.
    pub fn from_board(board: Board) -> Self {
        let mut game = Self {
            board,
            ..Self::default()
        };
        game.outcome = game.evaluate();
        game
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_turn(&self) -> Stone {
        self.current_turn.unwrap_or_else(|| self.board.side_to_move())
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn last_move(&self) -> Option<Pos> {
        self.move_history.last().map(|&(pos, _)| pos)
    }

    pub fn move_history(&self) -> &[(Pos, Stone)] {
        &self.move_history
    }

    /// Place the side to move's stone at `pos`, then hand the turn over
    pub fn play(&mut self, pos: Pos) -> Result<Option<&Outcome>, GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        if !self.board.is_empty(pos) {
            return Err(GameError::Occupied(pos));
        }

        let color = self.current_turn();
        self.board.place_stone(pos, color);
        self.move_history.push((pos, color));
        self.current_turn = Some(color.opponent());
        self.outcome = self.evaluate();
        Ok(self.outcome.as_ref())
    }

    /// Take back the last move
    pub fn undo(&mut self) -> Option<Pos> {
        let (pos, color) = self.move_history.pop()?;
        self.board.remove_stone(pos);
        self.current_turn = Some(color);
        self.outcome = self.evaluate();
        Some(pos)
    }

    fn evaluate(&self) -> Option<Outcome> {
        if let Some(winner) = check_winner(&self.board) {
            let line = find_five_positions(&self.board, winner).unwrap_or_default();
            return Some(Outcome::Win { winner, line });
        }
        self.board.is_full().then_some(Outcome::Draw)
    }
}

impl GameHost for LocalGame {
    fn current_player(&self) -> Result<Stone, HostError> {
        Ok(self.current_turn())
    }

    fn legal_moves(&self) -> Result<Vec<Pos>, HostError> {
        if self.is_over() {
            return Ok(Vec::new());
        }
        Ok(self.board.empty_cells().collect())
    }

    fn format_board(&self, style: BoardStyle) -> Result<String, HostError> {
        Ok(self.board.render(style))
    }
}
