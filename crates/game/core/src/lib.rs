//! Deterministic scoring rules for a 13-round dice game.
//!
//! `scorepad-core` defines the scoresheet (categories, write-once ledger,
//! derived totals), turn resolution, ranking, and milestone detection, and
//! exposes them as pure, synchronous APIs. All state mutation flows through
//! [`engine::ScoreEngine`], and the runtime crate depends on the types
//! re-exported here.
pub mod config;
pub mod engine;
pub mod milestone;
pub mod ranking;
pub mod state;

pub use config::ScoreConfig;
pub use engine::{ExecuteError, ScoreEngine, ScoreMutation, TurnStatus, UpdateOutcome, resolve_turn};
pub use milestone::{
    CelebrationLevel, DisplayConfig, HapticKind, Milestone, MilestoneDetector, MilestoneId,
    MilestoneKind, MilestoneRule, Presentation, ToastPayload,
};
pub use ranking::{Leaderboard, LeaderboardEntry, RankingEngine, Trend, rank_players};
pub use state::{
    CategoryRule, CategorySet, LedgerError, Player, PlayerId, PlayerScore, ScoreCategory,
    ScoreDelta, ScoreLedger, ScoreState, ScoreTotals, Section, get_totals,
};
