/// Scoring rule constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreConfig {
    /// Leader margin (exclusive) under which a game counts as close.
    pub close_game_margin: u32,
}

impl ScoreConfig {
    // ===== rule constants =====
    /// Number of scoring categories on a sheet; also the number of rounds.
    pub const CATEGORY_COUNT: usize = 13;
    /// Dice rolled per turn.
    pub const DICE_COUNT: u32 = 5;
    /// Upper section total needed to unlock the bonus.
    pub const UPPER_BONUS_THRESHOLD: u32 = 63;
    /// Award granted once the upper threshold is reached.
    pub const UPPER_BONUS: u32 = 35;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_CLOSE_GAME_MARGIN: u32 = 10;

    pub fn new() -> Self {
        Self {
            close_game_margin: Self::DEFAULT_CLOSE_GAME_MARGIN,
        }
    }

    pub fn with_close_game_margin(close_game_margin: u32) -> Self {
        Self { close_game_margin }
    }
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self::new()
    }
}
