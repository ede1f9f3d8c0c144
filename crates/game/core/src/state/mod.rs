//! Authoritative scoresheet state.
//!
//! This module owns the player roster, the write-once score rows, and the
//! delta type used to observe transitions between snapshots. Callers query
//! this state freely but mutate it exclusively through the engine.
pub mod category;
pub mod common;
pub mod delta;
pub mod ledger;
pub mod score;

pub use category::{CategoryRule, CategorySet, ScoreCategory, Section};
pub use common::{Player, PlayerId};
pub use delta::{PlayerChanges, ScoreDelta};
pub use ledger::{LedgerError, ScoreLedger};
pub use score::{PlayerScore, ScoreTotals, get_totals, upper_bonus_for};

use crate::config::ScoreConfig;
use crate::milestone::MilestoneDetector;
use crate::ranking::RankingEngine;

/// Canonical snapshot of a game in progress.
///
/// Besides the ledger, the state carries the memories that make ranking
/// trends and milestone dedup work across updates.
#[derive(Clone, Debug)]
pub struct ScoreState {
    /// Seating order. Ties in turn and ranking resolve by this order.
    pub players: Vec<Player>,
    pub ledger: ScoreLedger,
    pub ranking: RankingEngine,
    pub detector: MilestoneDetector,
    pub config: ScoreConfig,
}

impl ScoreState {
    /// Starts a fresh game for the given players.
    ///
    /// An initial ranking is recorded so that the first update already has a
    /// previous snapshot to compare against.
    pub fn new(players: Vec<Player>, config: ScoreConfig) -> Self {
        let ledger = ScoreLedger::for_players(&players);
        let mut ranking = RankingEngine::new(config.close_game_margin);
        ranking.rank(ledger.scores(), &players);
        let mut detector = MilestoneDetector::new();
        detector.seed_positions(ranking.latest());

        Self {
            players,
            ledger,
            ranking,
            detector,
            config,
        }
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|player| player.id == id)
    }

    /// Discards every entry and all ranking/milestone memory.
    pub fn reset(&mut self) {
        *self = Self::new(std::mem::take(&mut self.players), self.config.clone());
    }
}

impl Default for ScoreState {
    fn default() -> Self {
        Self::new(Vec::new(), ScoreConfig::default())
    }
}
