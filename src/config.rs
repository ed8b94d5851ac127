//! Agent configuration
//!
//! Every field has a default, so a config file only needs the keys it changes:
//!
//! ```json
//! { "model": "my-model", "model_timeout_ms": 5000, "play_forced_moves": false }
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::MoveSelector;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Model name passed through to the client
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Upper bound on a single model call
    pub model_timeout_ms: u64,
    /// Play win-now and block-four moves without asking the model
    pub play_forced_moves: bool,
    /// Opening stage applies below this many stones
    pub opening_stone_limit: u32,
    /// Opening candidates lie within this taxicab distance of the center
    pub opening_radius: f32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: "google/gemma-2-9b-it".to_string(),
            temperature: 0.1,
            max_tokens: 120,
            model_timeout_ms: 10_000,
            play_forced_moves: true,
            opening_stone_limit: 10,
            opening_radius: 3.0,
        }
    }
}

impl AgentConfig {
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn model_timeout(&self) -> Duration {
        Duration::from_millis(self.model_timeout_ms)
    }

    /// Selector built from the opening thresholds
    pub fn selector(&self) -> MoveSelector {
        MoveSelector::with_config(self.opening_stone_limit, self.opening_radius)
    }
}
