use crate::state::{CategorySet, PlayerId, PlayerScore};

/// What changed on one player's row between two snapshots.
///
/// Only transitions are recorded. Values are read back from the after
/// snapshot when needed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerChanges {
    pub player: PlayerId,
    /// Categories that went from absent to present.
    pub filled: CategorySet,
    /// True when the upper bonus went from 0 to awarded.
    pub bonus_unlocked: bool,
}

impl PlayerChanges {
    /// Compares two rows of the same player.
    ///
    /// Returns `None` if nothing changed.
    pub(super) fn from_rows(before: &PlayerScore, after: &PlayerScore) -> Option<Self> {
        debug_assert_eq!(
            before.player_id(),
            after.player_id(),
            "Cannot compare rows of different players"
        );

        let filled = after.filled().difference(before.filled());
        let bonus_unlocked =
            !before.totals().has_upper_bonus() && after.totals().has_upper_bonus();

        if filled.is_empty() && !bonus_unlocked {
            None
        } else {
            Some(Self {
                player: after.player_id(),
                filled,
                bonus_unlocked,
            })
        }
    }
}
