//! Evaluation module for 8x8 Gomoku positions
//!
//! - Window patterns and line geometry
//! - Threat scanning (fours, open/broken/closed/edge threes)
//! - Move scoring and center-distance ranking
//! - The per-turn tactical report

pub mod heuristic;
pub mod patterns;
pub mod report;
pub mod threats;

pub use heuristic::{center_distance_x2, most_central, pick_best, score_move};
pub use patterns::{classify_window, ThreatKind, ThreatLevel};
pub use report::TacticalReport;
pub use threats::{find_threats, scan_threats, Threat};
