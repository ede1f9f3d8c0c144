use crate::config::ScoreConfig;
use crate::state::{Player, PlayerId, PlayerScore};

use super::ScoreEngine;

/// Whose turn it is, derived purely from fill state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnStatus {
    /// Player who should enter a score next. `None` once the game is
    /// finished or when nobody is seated.
    pub current_player: Option<PlayerId>,
    /// One more than the fewest categories any player has filled, so a
    /// finished game reports one past the last round.
    pub turn_number: u32,
    pub is_finished: bool,
}

impl TurnStatus {
    const NO_PLAYERS: Self = Self {
        current_player: None,
        turn_number: 0,
        is_finished: true,
    };
}

/// Resolves the active player.
///
/// Turns are free-order: the player with the fewest filled categories acts
/// next, and ties go to the earliest seat. The game is finished once even
/// the most-behind player has filled every category.
pub fn resolve_turn(scores: &[PlayerScore], players: &[Player]) -> TurnStatus {
    let behind = players
        .iter()
        .map(|player| {
            let filled = scores
                .iter()
                .find(|row| row.player_id() == player.id)
                .map(PlayerScore::filled_count)
                .unwrap_or(0);
            (player.id, filled)
        })
        // min_by_key returns the first minimum, preserving seat order on ties.
        .min_by_key(|(_, filled)| *filled);

    let Some((player, min_filled)) = behind else {
        return TurnStatus::NO_PLAYERS;
    };

    let rounds = ScoreConfig::CATEGORY_COUNT as u32;
    let is_finished = min_filled >= rounds;

    TurnStatus {
        current_player: (!is_finished).then_some(player),
        turn_number: min_filled + 1,
        is_finished,
    }
}

/// Turn queries for ScoreEngine.
impl<'a> ScoreEngine<'a> {
    /// Resolves whose turn it is for the current ledger.
    pub fn turn(&self) -> TurnStatus {
        resolve_turn(self.state.ledger.scores(), &self.state.players)
    }

    /// Returns the player expected to enter a score next.
    pub fn current_player(&self) -> Option<PlayerId> {
        self.turn().current_player
    }
}
