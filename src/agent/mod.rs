//! Turn agent
//!
//! One call per turn. The agent reads the host, analyses the position,
//! asks the model (at most twice) and always comes back with a legal
//! coordinate:
//!
//! 1. No legal moves: [`FALLBACK_POS`]
//! 2. Win-now or block-four available (and forced moves enabled): play it
//! 3. Model reply, if it decodes to a legal move that doesn't blunder
//! 4. One repair request restating the legal moves
//! 5. The deterministic [`MoveSelector`] choice
//!
//! A model move that hands the opponent a five is vetoed whenever some legal
//! move does not.

pub mod host;
pub mod model;
pub mod prompt;
pub mod reply;

pub use host::{GameError, GameHost, HostError, LocalGame, Outcome, TurnSnapshot};
pub use model::{ChatMessage, ModelClient, ModelError, ModelRequest, OfflineModel, Role, ScriptedModel};
pub use reply::{decode_move, extract_json_object, ReplyError};

use thiserror::Error;
use tokio::time::timeout;
use tracing::{info, instrument, warn};

use crate::board::{Pos, FALLBACK_POS};
use crate::config::AgentConfig;
use crate::engine::{MoveSelector, Stage};
use crate::eval::TacticalReport;

/// Why a model answer was not played
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error(transparent)]
    Reply(#[from] ReplyError),
    #[error("{0} lets the opponent complete five")]
    Blunder(Pos),
}

/// Where a decision came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionSource {
    /// Selector stage played without asking the model
    Forced(Stage),
    /// First model reply
    Model,
    /// Reply to the repair request
    Repair,
    /// Selector choice after both model attempts failed
    Fallback(Stage),
    /// Nothing was legal
    NoLegalMoves,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub pos: Pos,
    pub source: DecisionSource,
    /// Model answers turned down on the way, in order
    pub rejections: Vec<Rejection>,
}

impl Decision {
    fn new(pos: Pos, source: DecisionSource) -> Self {
        Self {
            pos,
            source,
            rejections: Vec::new(),
        }
    }
}

pub struct Agent<M> {
    model: M,
    config: AgentConfig,
    selector: MoveSelector,
}

impl<M: ModelClient> Agent<M> {
    pub fn new(model: M) -> Self {
        Self::with_config(model, AgentConfig::default())
    }

    pub fn with_config(model: M, config: AgentConfig) -> Self {
        let selector = config.selector();
        Self {
            model,
            config,
            selector,
        }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// The move for this turn
    pub async fn get_move<H: GameHost + ?Sized>(&self, host: &H) -> Pos {
        self.decide(host).await.pos
    }

    /// The move for this turn, with its provenance
    #[instrument(skip_all)]
    pub async fn decide<H: GameHost + ?Sized>(&self, host: &H) -> Decision {
        let snapshot = TurnSnapshot::capture(host);
        self.decide_snapshot(&snapshot).await
    }

    pub async fn decide_snapshot(&self, snapshot: &TurnSnapshot) -> Decision {
        let decision = self.choose(snapshot).await;
        info!(
            source = ?decision.source,
            row = decision.pos.row,
            col = decision.pos.col,
            rejected = decision.rejections.len(),
            "decided move"
        );
        decision
    }

    async fn choose(&self, snapshot: &TurnSnapshot) -> Decision {
        if snapshot.legal.is_empty() {
            return Decision::new(FALLBACK_POS, DecisionSource::NoLegalMoves);
        }

        let report = TacticalReport::analyze(&snapshot.board, snapshot.me, &snapshot.legal);
        let selection = self.selector.select(&snapshot.board, snapshot.me, &snapshot.legal);
        if self.config.play_forced_moves && selection.stage.is_forced() {
            return Decision::new(selection.pos, DecisionSource::Forced(selection.stage));
        }

        let mut rejections = Vec::new();

        let first = prompt::build_request(&self.config, prompt::user_prompt(snapshot, &report));
        match self.ask(&first, snapshot, &report).await {
            Ok(pos) => {
                return Decision {
                    pos,
                    source: DecisionSource::Model,
                    rejections,
                }
            }
            Err(rejection) => {
                warn!(%rejection, "model move rejected, sending repair request");
                rejections.push(rejection);
            }
        }

        let reason = rejections.last().map(ToString::to_string).unwrap_or_default();
        let repair = prompt::build_request(&self.config, prompt::repair_prompt(&snapshot.legal, &reason));
        match self.ask(&repair, snapshot, &report).await {
            Ok(pos) => Decision {
                pos,
                source: DecisionSource::Repair,
                rejections,
            },
            Err(rejection) => {
                warn!(%rejection, stage = ?selection.stage, "repair failed, using fallback move");
                rejections.push(rejection);
                Decision {
                    pos: selection.pos,
                    source: DecisionSource::Fallback(selection.stage),
                    rejections,
                }
            }
        }
    }

    /// One bounded model call, decoded and checked for blunders
    async fn ask(
        &self,
        request: &ModelRequest,
        snapshot: &TurnSnapshot,
        report: &TacticalReport,
    ) -> Result<Pos, Rejection> {
        let limit = self.config.model_timeout();
        let reply = timeout(limit, self.model.complete(request))
            .await
            .map_err(|_| ModelError::Timeout(limit))??;

        let pos = decode_move(&reply, &snapshot.legal)?;
        if report.is_blunder(pos) && report.has_safe_move() {
            return Err(Rejection::Blunder(pos));
        }
        Ok(pos)
    }
}
