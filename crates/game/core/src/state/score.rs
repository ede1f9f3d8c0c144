use crate::config::ScoreConfig;

use super::{CategorySet, PlayerId, ScoreCategory};

/// One player's row on the scoresheet.
///
/// Entries are write-once: the only mutation path is
/// [`ScoreLedger::set_category_score`](super::ScoreLedger::set_category_score),
/// which rejects re-setting a filled category. Totals are never stored; every
/// read goes through [`ScoreTotals::compute`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerScore {
    player: PlayerId,
    entries: [Option<u32>; ScoreConfig::CATEGORY_COUNT],
}

impl PlayerScore {
    /// Creates an empty row for `player`.
    pub fn new(player: PlayerId) -> Self {
        Self {
            player,
            entries: [None; ScoreConfig::CATEGORY_COUNT],
        }
    }

    #[inline]
    pub fn player_id(&self) -> PlayerId {
        self.player
    }

    /// Recorded value for `category`, or `None` if it has not been played.
    #[inline]
    pub fn get(&self, category: ScoreCategory) -> Option<u32> {
        self.entries[category.index()]
    }

    #[inline]
    pub fn is_set(&self, category: ScoreCategory) -> bool {
        self.get(category).is_some()
    }

    /// Iterates `(category, value)` over filled categories in sheet order.
    pub fn entries(&self) -> impl Iterator<Item = (ScoreCategory, u32)> + '_ {
        ScoreCategory::ALL
            .into_iter()
            .filter_map(|category| self.get(category).map(|value| (category, value)))
    }

    pub fn filled(&self) -> CategorySet {
        self.entries()
            .fold(CategorySet::empty(), |set, (category, _)| {
                set | CategorySet::of(category)
            })
    }

    pub fn filled_count(&self) -> u32 {
        self.filled().len()
    }

    /// Categories still open, in sheet order.
    pub fn remaining_categories(&self) -> impl Iterator<Item = ScoreCategory> + '_ {
        ScoreCategory::ALL
            .into_iter()
            .filter(|category| !self.is_set(*category))
    }

    pub fn is_complete(&self) -> bool {
        self.entries.iter().all(Option::is_some)
    }

    /// Derived totals, recomputed from the entries on every call.
    pub fn totals(&self) -> ScoreTotals {
        ScoreTotals::compute(self)
    }

    #[inline]
    pub fn grand_total(&self) -> u32 {
        self.totals().grand_total
    }

    /// Writes an entry. Callers must have validated the write.
    pub(super) fn record(&mut self, category: ScoreCategory, value: u32) {
        debug_assert!(
            self.entries[category.index()].is_none(),
            "score entries are write-once"
        );
        self.entries[category.index()] = Some(value);
    }
}

/// Totals derived from a [`PlayerScore`].
///
/// `grand_total == upper_total + upper_bonus + lower_total` holds by
/// construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreTotals {
    pub upper_total: u32,
    pub upper_bonus: u32,
    pub lower_total: u32,
    pub grand_total: u32,
}

impl ScoreTotals {
    pub fn compute(score: &PlayerScore) -> Self {
        let (upper_total, lower_total) =
            score
                .entries()
                .fold((0, 0), |(upper, lower), (category, value)| {
                    if category.is_upper() {
                        (upper + value, lower)
                    } else {
                        (upper, lower + value)
                    }
                });

        let upper_bonus = upper_bonus_for(upper_total);

        Self {
            upper_total,
            upper_bonus,
            lower_total,
            grand_total: upper_total + upper_bonus + lower_total,
        }
    }

    #[inline]
    pub fn has_upper_bonus(&self) -> bool {
        self.upper_bonus > 0
    }
}

/// Bonus awarded for a given upper-section total.
#[inline]
pub const fn upper_bonus_for(upper_total: u32) -> u32 {
    if upper_total >= ScoreConfig::UPPER_BONUS_THRESHOLD {
        ScoreConfig::UPPER_BONUS
    } else {
        0
    }
}

/// Computes the totals for a score row.
pub fn get_totals(score: &PlayerScore) -> ScoreTotals {
    ScoreTotals::compute(score)
}
