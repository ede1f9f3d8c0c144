//! Score update pipeline.
//!
//! The [`ScoreEngine`] is the authoritative reducer for [`ScoreState`]. One
//! call to [`ScoreEngine::execute`] records an entry, re-ranks the table and
//! runs milestone detection against the snapshot captured right before the
//! write. Nothing re-runs implicitly; callers drive every step.

mod errors;
mod turns;

pub use errors::ExecuteError;
pub use turns::{TurnStatus, resolve_turn};

use crate::milestone::{CelebrationLevel, DetectionInput, Milestone};
use crate::ranking::Leaderboard;
use crate::state::{PlayerId, PlayerScore, ScoreCategory, ScoreState, ScoreTotals};

/// A single score entry requested by a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreMutation {
    pub player: PlayerId,
    pub category: ScoreCategory,
    pub value: u32,
}

impl ScoreMutation {
    pub const fn new(player: PlayerId, category: ScoreCategory, value: u32) -> Self {
        Self {
            player,
            category,
            value,
        }
    }
}

/// Complete outcome of one accepted mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// Updated row of the player who scored.
    pub score: PlayerScore,
    /// Totals of that row, freshly derived.
    pub totals: ScoreTotals,
    pub leaderboard: Leaderboard,
    pub turn: TurnStatus,
    /// Milestones that survived dedup and the celebration-level filter.
    pub milestones: Vec<Milestone>,
}

/// Game engine that applies score entries and derives everything downstream.
///
/// All mutations flow through `execute()`:
/// snapshot → ledger write → rank → detect
pub struct ScoreEngine<'a> {
    state: &'a mut ScoreState,
}

impl<'a> ScoreEngine<'a> {
    /// Creates a new engine over the given state.
    pub fn new(state: &'a mut ScoreState) -> Self {
        Self { state }
    }

    /// Records a score entry and reports what it triggered.
    ///
    /// A rejected entry leaves the state untouched: no ranking is recorded and
    /// the detector does not run.
    pub fn execute(
        &mut self,
        mutation: &ScoreMutation,
        level: CelebrationLevel,
    ) -> Result<UpdateOutcome, ExecuteError> {
        let state = &mut *self.state;

        let before = state.ledger.scores().to_vec();
        let previous_ranking = state.ranking.latest().cloned();

        let score = state
            .ledger
            .set_category_score(mutation.player, mutation.category, mutation.value)?
            .clone();

        let leaderboard = state.ranking.rank(state.ledger.scores(), &state.players);

        let milestones = state.detector.detect(&DetectionInput {
            players: &state.players,
            before: &before,
            after: state.ledger.scores(),
            previous_ranking: previous_ranking.as_ref(),
            ranking: &leaderboard,
            level,
        });

        let turn = resolve_turn(state.ledger.scores(), &state.players);

        Ok(UpdateOutcome {
            totals: score.totals(),
            score,
            leaderboard,
            turn,
            milestones,
        })
    }

    /// Current leaderboard. Does not move the trend baseline.
    pub fn leaderboard(&self) -> Leaderboard {
        self.state.ranking.latest().cloned().unwrap_or_default()
    }

    pub fn state(&self) -> &ScoreState {
        &*self.state
    }
}
