use super::{Player, PlayerId, PlayerScore, ScoreCategory};

/// Reasons a score entry is rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LedgerError {
    #[error("player {player} has no row on the scoresheet")]
    UnknownPlayer { player: PlayerId },

    #[error("{category} is already set to {existing} for player {player}")]
    AlreadySet {
        player: PlayerId,
        category: ScoreCategory,
        existing: u32,
    },

    #[error("{value} is not a valid {category} entry for player {player}")]
    OutOfRange {
        player: PlayerId,
        category: ScoreCategory,
        value: u32,
    },
}

impl LedgerError {
    /// Stable identifier for this error variant.
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownPlayer { .. } => "unknown_player",
            Self::AlreadySet { .. } => "already_set",
            Self::OutOfRange { .. } => "out_of_range",
        }
    }
}

/// Owns every player's score row. The single write path is
/// [`set_category_score`](Self::set_category_score).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreLedger {
    rows: Vec<PlayerScore>,
}

impl ScoreLedger {
    /// Creates empty rows for the given players, in order.
    pub fn new(players: impl IntoIterator<Item = PlayerId>) -> Self {
        let mut rows: Vec<PlayerScore> = Vec::new();
        for id in players {
            if rows.iter().all(|row| row.player_id() != id) {
                rows.push(PlayerScore::new(id));
            }
        }
        Self { rows }
    }

    pub fn for_players(players: &[Player]) -> Self {
        Self::new(players.iter().map(|player| player.id))
    }

    pub fn score(&self, player: PlayerId) -> Option<&PlayerScore> {
        self.rows.iter().find(|row| row.player_id() == player)
    }

    pub fn scores(&self) -> &[PlayerScore] {
        &self.rows
    }

    /// Checks an entry without applying it.
    pub fn validate(
        &self,
        player: PlayerId,
        category: ScoreCategory,
        value: u32,
    ) -> Result<(), LedgerError> {
        let row = self
            .score(player)
            .ok_or(LedgerError::UnknownPlayer { player })?;

        if let Some(existing) = row.get(category) {
            return Err(LedgerError::AlreadySet {
                player,
                category,
                existing,
            });
        }

        if !category.accepts(value) {
            return Err(LedgerError::OutOfRange {
                player,
                category,
                value,
            });
        }

        Ok(())
    }

    /// Records `value` in `category` for `player`.
    ///
    /// A rejected write leaves the ledger untouched. On success the updated
    /// row is returned; its totals are derived on read.
    pub fn set_category_score(
        &mut self,
        player: PlayerId,
        category: ScoreCategory,
        value: u32,
    ) -> Result<&PlayerScore, LedgerError> {
        self.validate(player, category, value)?;

        let row = self
            .rows
            .iter_mut()
            .find(|row| row.player_id() == player)
            .ok_or(LedgerError::UnknownPlayer { player })?;
        row.record(category, value);
        Ok(&*row)
    }

    /// Clears every entry, keeping the same player rows.
    pub fn reset(&mut self) {
        for row in &mut self.rows {
            *row = PlayerScore::new(row.player_id());
        }
    }
}
