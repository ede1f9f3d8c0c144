mod changes;

use crate::state::PlayerScore;

pub use changes::PlayerChanges;

/// Transitions observed between two ledger snapshots.
///
/// Detection works on deltas rather than on raw rows, so a delta must be
/// built from the snapshot captured immediately before a mutation and the
/// one captured right after it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreDelta {
    /// Changed rows, in the order they appear in the after snapshot.
    pub players: Vec<PlayerChanges>,
}

impl ScoreDelta {
    /// Creates a delta by comparing two snapshots row by row.
    ///
    /// Rows are matched by player id. A row present only in `after` is
    /// compared against an empty row; a row present only in `before` is
    /// ignored since entries are never removed.
    pub fn from_snapshots(before: &[PlayerScore], after: &[PlayerScore]) -> Self {
        let players = after
            .iter()
            .filter_map(|row| {
                let id = row.player_id();
                match before.iter().find(|prev| prev.player_id() == id) {
                    Some(prev) => PlayerChanges::from_rows(prev, row),
                    None => PlayerChanges::from_rows(&PlayerScore::new(id), row),
                }
            })
            .collect();

        Self { players }
    }

    /// Returns true if no row changed.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn player(&self, id: crate::state::PlayerId) -> Option<&PlayerChanges> {
        self.players.iter().find(|changes| changes.player == id)
    }
}
