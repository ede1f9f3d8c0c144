//! Leaderboard ordering and rank trends.
//!
//! Players are ordered by grand total, highest first. The sort is stable so
//! equal totals keep seating order, and positions are simply `index + 1`.
//! Trends compare against the leaderboard produced by the previous call.

use crate::config::ScoreConfig;
use crate::state::{Player, PlayerId, PlayerScore};

/// Direction a player's position moved since the previous ranking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Trend {
    /// Position number decreased (moved toward first).
    Up,
    /// Position number increased.
    Down,
    #[default]
    Stable,
}

impl Trend {
    fn between(previous: usize, current: usize) -> Self {
        match current.cmp(&previous) {
            std::cmp::Ordering::Less => Trend::Up,
            std::cmp::Ordering::Greater => Trend::Down,
            std::cmp::Ordering::Equal => Trend::Stable,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LeaderboardEntry {
    pub player: PlayerId,
    pub score: u32,
    /// 1-based rank.
    pub position: usize,
    pub trend: Trend,
}

/// Ranked view of every seated player.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
    is_close_game: bool,
}

impl Leaderboard {
    /// Entries in position order.
    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn leader(&self) -> Option<&LeaderboardEntry> {
        self.entries.first()
    }

    pub fn entry(&self, player: PlayerId) -> Option<&LeaderboardEntry> {
        self.entries.iter().find(|entry| entry.player == player)
    }

    pub fn position_of(&self, player: PlayerId) -> Option<usize> {
        self.entry(player).map(|entry| entry.position)
    }

    /// True when at least two players are seated and the leader is ahead of
    /// second place by less than the configured margin.
    pub fn is_close_game(&self) -> bool {
        self.is_close_game
    }
}

/// Ranks `players` by the grand totals found in `scores`.
///
/// A player without a row counts as 0. Rows for players not in `players`
/// are ignored. Trends compare against `previous`; without one every trend
/// is [`Trend::Stable`].
pub fn rank_players(
    scores: &[PlayerScore],
    players: &[Player],
    previous: Option<&Leaderboard>,
    close_game_margin: u32,
) -> Leaderboard {
    let mut standings: Vec<(PlayerId, u32)> = players
        .iter()
        .map(|player| {
            let total = scores
                .iter()
                .find(|row| row.player_id() == player.id)
                .map(PlayerScore::grand_total)
                .unwrap_or(0);
            (player.id, total)
        })
        .collect();

    // Stable: equal totals keep seating order.
    standings.sort_by(|a, b| b.1.cmp(&a.1));

    let entries: Vec<LeaderboardEntry> = standings
        .into_iter()
        .enumerate()
        .map(|(index, (player, score))| {
            let position = index + 1;
            let trend = previous
                .and_then(|board| board.position_of(player))
                .map(|before| Trend::between(before, position))
                .unwrap_or_default();
            LeaderboardEntry {
                player,
                score,
                position,
                trend,
            }
        })
        .collect();

    let is_close_game = match entries.as_slice() {
        [first, second, ..] => first.score - second.score < close_game_margin,
        _ => false,
    };

    Leaderboard {
        entries,
        is_close_game,
    }
}

/// Stateful ranker that remembers its last output for trend computation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RankingEngine {
    close_game_margin: u32,
    latest: Option<Leaderboard>,
}

impl RankingEngine {
    pub fn new(close_game_margin: u32) -> Self {
        Self {
            close_game_margin,
            latest: None,
        }
    }

    /// Ranks players and records the result as the baseline for the next call.
    pub fn rank(&mut self, scores: &[PlayerScore], players: &[Player]) -> Leaderboard {
        let board = rank_players(
            scores,
            players,
            self.latest.as_ref(),
            self.close_game_margin,
        );
        self.latest = Some(board.clone());
        board
    }

    /// Output of the most recent [`rank`](Self::rank) call.
    pub fn latest(&self) -> Option<&Leaderboard> {
        self.latest.as_ref()
    }

    /// Forgets ranking history; the next call reports stable trends.
    pub fn reset(&mut self) {
        self.latest = None;
    }
}

impl Default for RankingEngine {
    fn default() -> Self {
        Self::new(ScoreConfig::DEFAULT_CLOSE_GAME_MARGIN)
    }
}
