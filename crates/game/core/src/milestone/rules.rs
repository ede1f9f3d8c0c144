//! Detection rules evaluated on every update.
//!
//! Each rule inspects the same [`DetectionContext`] and reports raw
//! `(player, kind)` findings. Dedup, level filtering and decoration happen
//! afterwards in the detector, so rules stay free of bookkeeping.

use std::collections::HashMap;
use std::sync::Arc;

use crate::engine::resolve_turn;
use crate::state::{PlayerId, ScoreDelta};

use super::{DetectionInput, MilestoneKind};

/// Raw finding reported by a rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Detected {
    pub player: PlayerId,
    pub kind: MilestoneKind,
}

impl Detected {
    pub const fn new(player: PlayerId, kind: MilestoneKind) -> Self {
        Self { player, kind }
    }
}

/// Everything a rule may look at for one update.
pub struct DetectionContext<'a> {
    pub input: &'a DetectionInput<'a>,
    pub delta: &'a ScoreDelta,
    /// Positions carried forward from the previous detection pass.
    pub recorded_positions: &'a HashMap<PlayerId, usize>,
}

impl DetectionContext<'_> {
    /// Position a player held before this update.
    ///
    /// Prefers the carried-forward record and falls back to the previous
    /// ranking snapshot for players the detector has not seen yet.
    pub fn previous_position(&self, player: PlayerId) -> Option<usize> {
        self.recorded_positions.get(&player).copied().or_else(|| {
            self.input
                .previous_ranking
                .and_then(|board| board.position_of(player))
        })
    }
}

/// A milestone detection rule.
pub trait MilestoneRule: Send + Sync {
    /// Stable identifier used in diagnostics.
    fn name(&self) -> &'static str;

    /// Appends findings for this update to `found`.
    fn detect(&self, ctx: &DetectionContext<'_>, found: &mut Vec<Detected>);
}

/// Fires when a category is newly set to its celebrated maximum
/// (five of a kind, large straight, full house).
#[derive(Debug)]
pub struct CategoryMaxRule;

impl MilestoneRule for CategoryMaxRule {
    fn name(&self) -> &'static str {
        "category_max"
    }

    fn detect(&self, ctx: &DetectionContext<'_>, found: &mut Vec<Detected>) {
        for changes in &ctx.delta.players {
            let Some(row) = ctx
                .input
                .after
                .iter()
                .find(|row| row.player_id() == changes.player)
            else {
                continue;
            };

            for category in changes.filled.categories() {
                let Some(kind) = MilestoneKind::for_category(category) else {
                    continue;
                };
                if row.get(category) == Some(category.rule().max()) {
                    found.push(Detected::new(changes.player, kind));
                }
            }
        }
    }
}

/// Fires when the upper bonus goes from 0 to awarded.
#[derive(Debug)]
pub struct BonusUnlockedRule;

impl MilestoneRule for BonusUnlockedRule {
    fn name(&self) -> &'static str {
        "bonus_unlocked"
    }

    fn detect(&self, ctx: &DetectionContext<'_>, found: &mut Vec<Detected>) {
        found.extend(
            ctx.delta
                .players
                .iter()
                .filter(|changes| changes.bonus_unlocked)
                .map(|changes| Detected::new(changes.player, MilestoneKind::BonusUnlocked)),
        );
    }
}

/// Fires when the new leader held the last recorded position before this
/// update.
///
/// Needs at least two players. Last place is positional: on equal totals the
/// later seat ranks lower, so a tied last-placed player taking the lead still
/// counts.
#[derive(Debug)]
pub struct ComebackRule;

impl MilestoneRule for ComebackRule {
    fn name(&self) -> &'static str {
        "comeback"
    }

    fn detect(&self, ctx: &DetectionContext<'_>, found: &mut Vec<Detected>) {
        let ranking = ctx.input.ranking;
        let player_count = ranking.len();
        if player_count < 2 {
            return;
        }

        let Some(leader) = ranking.leader() else {
            return;
        };
        if ctx.previous_position(leader.player) != Some(player_count) {
            return;
        }

        found.push(Detected::new(leader.player, MilestoneKind::Comeback));
    }
}

/// Fires for the leader when the game transitions to finished.
#[derive(Debug)]
pub struct GameWonRule;

impl MilestoneRule for GameWonRule {
    fn name(&self) -> &'static str {
        "game_won"
    }

    fn detect(&self, ctx: &DetectionContext<'_>, found: &mut Vec<Detected>) {
        let input = ctx.input;
        if input.players.is_empty() {
            return;
        }

        let was_finished = resolve_turn(input.before, input.players).is_finished;
        let is_finished = resolve_turn(input.after, input.players).is_finished;

        if !was_finished
            && is_finished
            && let Some(leader) = input.ranking.leader()
        {
            found.push(Detected::new(leader.player, MilestoneKind::GameWon));
        }
    }
}

/// Returns the default rules in evaluation order.
pub fn default_rules() -> Arc<[Arc<dyn MilestoneRule>]> {
    let rules: Vec<Arc<dyn MilestoneRule>> = vec![
        Arc::new(CategoryMaxRule),
        Arc::new(BonusUnlockedRule),
        Arc::new(ComebackRule),
        Arc::new(GameWonRule),
    ];
    rules.into()
}
