//! 8x8 Gomoku turn agent
//!
//! An agent for five-in-a-row on a fixed 8x8 board that plugs into an
//! external game host:
//! - Board: two `u64` bitboards, copied for every hypothetical placement
//! - Five-in-a-row: exactly five or more in a line wins
//! - Threats: sliding 5-windows (plus edge-anchored 4-windows) along all four directions
//! - Safety: one-ply blunder detection
//!
//! # Architecture
//!
//! - [`board`]: Board representation and the host's text format
//! - [`rules`]: Win checking and move safety
//! - [`eval`]: Threat scanning, move scoring, and the tactical report
//! - [`engine`]: Deterministic priority-chain move selector
//! - [`agent`]: Host and model boundaries, prompts, and the turn agent
//! - [`config`]: Agent settings
//!
//! # Quick Start
//!
//! ```
//! use gomoku::{Agent, LocalGame, OfflineModel, Pos};
//!
//! # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
//! let mut game = LocalGame::new();
//! game.play(Pos::new(3, 3)).unwrap();
//!
//! // Offline: the agent plays from its own move chain
//! let agent = Agent::new(OfflineModel);
//! let pos = agent.get_move(&game).await;
//! assert!(game.board().is_empty(pos));
//! # });
//! ```
//!
//! # Move Priority
//!
//! When the model is unavailable or its answer can't be used:
//! 1. Complete five
//! 2. Block the opponent's five
//! 3. Block an opponent three
//! 4. Extend an own three
//! 5. Central opening move
//! 6. Any move that doesn't hand over a five

pub mod agent;
pub mod board;
pub mod config;
pub mod engine;
pub mod eval;
pub mod rules;

// Re-export commonly used types for convenience
pub use agent::{
    Agent, Decision, DecisionSource, GameHost, LocalGame, ModelClient, OfflineModel, ScriptedModel,
};
pub use board::{Board, BoardStyle, Pos, Stone, BOARD_SIZE, FALLBACK_POS};
pub use config::AgentConfig;
pub use engine::{MoveSelector, Selection, Stage};
pub use eval::TacticalReport;
