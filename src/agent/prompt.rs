//! Prompt text for the model
//!
//! The wording is free to change; the reply format line is not, since
//! [`decode_move`](super::reply::decode_move) depends on it.

use std::fmt::Write as _;

use crate::board::Pos;
use crate::config::AgentConfig;
use crate::eval::TacticalReport;

use super::host::TurnSnapshot;
use super::model::{ChatMessage, ModelRequest};

const REPLY_FORMAT: &str = "Output format (STRICT): JSON only, nothing else: {\"row\": <int>, \"col\": <int>}";

pub const SYSTEM_PROMPT: &str = "You play Gomoku on an 8x8 board: five stones in a row \
(horizontal, vertical or diagonal) wins.\n\
Read the whole board, including both diagonal directions.\n\
Priorities: (1) complete five now, (2) block the opponent's five, (3) build open fours \
and double threats, (4) never leave the opponent a five on the next move, \
(5) prefer central moves that extend your lines.\n\
Pick exactly one coordinate from legal_moves. Rows and columns count from 0.\n";

/// `(r, c), (r, c), ...` in the given order
pub fn format_moves<'a>(moves: impl IntoIterator<Item = &'a Pos>) -> String {
    let mut out = String::new();
    for (i, pos) in moves.into_iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{}", pos);
    }
    out
}

fn tactical_summary(report: &TacticalReport) -> String {
    let show_blunders = !report.blunders.is_empty() && report.has_safe_move();
    if report.is_quiet() && !show_blunders {
        return "- No immediate tactics on the board.".to_string();
    }

    let mut lines = Vec::new();
    if !report.winning_moves.is_empty() {
        lines.push(format!("- You win immediately at: {}", format_moves(&report.winning_moves)));
    }
    if !report.must_block.is_empty() {
        lines.push(format!(
            "- Opponent wins next move at: {} (block it)",
            format_moves(&report.must_block)
        ));
    }
    if !report.opponent_threes.is_empty() {
        lines.push(format!(
            "- Opponent three-in-a-row threats at: {}",
            format_moves(&report.opponent_threes)
        ));
    }
    if !report.own_threes.is_empty() {
        lines.push(format!(
            "- Squares extending your threes: {}",
            format_moves(&report.own_threes)
        ));
    }
    if show_blunders {
        lines.push(format!(
            "- These moves let the opponent win at once, avoid them: {}",
            format_moves(&report.blunders)
        ));
    }
    lines.join("\n")
}

/// Per-turn prompt: position, legal moves and the tactical report
pub fn user_prompt(snapshot: &TurnSnapshot, report: &TacticalReport) -> String {
    let me = snapshot.me;
    format!(
        "Player: {me} (opponent: {opp})\n\
         Board:\n{board}\n\
         legal_moves (choose exactly one of these): [{moves}]\n\n\
         Analysis:\n{summary}\n\n\
         Instructions:\n\
         - If you can make five now, play it.\n\
         - Otherwise, if the opponent can make five next move, block that square.\n\
         - Prefer moves that create open fours or two threats at once.\n\
         - Never play a move that lets the opponent make five next.\n\
         {format}",
        opp = me.opponent(),
        board = snapshot.board_text.trim_end(),
        moves = format_moves(&snapshot.legal),
        summary = tactical_summary(report),
        format = REPLY_FORMAT,
    )
}

/// Follow-up prompt after an unusable reply
pub fn repair_prompt(legal: &[Pos], reason: &str) -> String {
    format!(
        "Your previous answer could not be used ({reason}).\n\
         Choose ONE coordinate from legal_moves only: [{moves}].\n\
         {format}",
        moves = format_moves(legal),
        format = REPLY_FORMAT,
    )
}

/// Wrap a user prompt with the system prompt and sampling settings
pub fn build_request(config: &AgentConfig, user: String) -> ModelRequest {
    ModelRequest {
        model: config.model.clone(),
        messages: vec![
            ChatMessage::system(format!("{}\n{}\n", SYSTEM_PROMPT, REPLY_FORMAT)),
            ChatMessage::user(user),
        ],
        temperature: config.temperature,
        max_tokens: config.max_tokens,
    }
}
