use crate::state::PlayerId;

use super::{DisplayConfig, HapticKind, Milestone, MilestoneId, MilestoneKind};

/// Static presentation settings for one milestone kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MilestoneSpec {
    pub kind: MilestoneKind,
    pub priority: u8,
    pub full_screen: bool,
    pub title: &'static str,
    /// Appended to the player's name to form the subtitle.
    pub subtitle: Option<&'static str>,
    pub emoji: &'static str,
    pub duration_ms: u64,
    pub sound_key: &'static str,
    pub haptic: HapticKind,
}

impl MilestoneSpec {
    /// Decorates a milestone for `player`.
    pub fn build(&self, player: PlayerId, player_name: &str) -> Milestone {
        Milestone {
            id: MilestoneId::new(player, self.kind),
            kind: self.kind,
            player,
            priority: self.priority,
            full_screen: self.full_screen,
            display: DisplayConfig {
                title: self.title.to_owned(),
                subtitle: self
                    .subtitle
                    .map(|suffix| format!("{player_name} {suffix}")),
                emoji: self.emoji.to_owned(),
                duration_ms: self.duration_ms,
                sound_key: self.sound_key.to_owned(),
                haptic: self.haptic,
            },
        }
    }
}

const FULL_SCREEN_MS: u64 = 4_000;
const TOAST_MS: u64 = 2_500;

const FIVE_OF_A_KIND: MilestoneSpec = MilestoneSpec {
    kind: MilestoneKind::FiveOfAKind,
    priority: 100,
    full_screen: true,
    title: "FIVE OF A KIND!",
    subtitle: Some("rolled five of a kind"),
    emoji: "🎲",
    duration_ms: FULL_SCREEN_MS,
    sound_key: "five_of_a_kind",
    haptic: HapticKind::Heavy,
};

const GAME_WON: MilestoneSpec = MilestoneSpec {
    kind: MilestoneKind::GameWon,
    priority: 90,
    full_screen: true,
    title: "Game Over!",
    subtitle: Some("wins the game"),
    emoji: "🏆",
    duration_ms: 5_000,
    sound_key: "victory",
    haptic: HapticKind::Success,
};

const COMEBACK: MilestoneSpec = MilestoneSpec {
    kind: MilestoneKind::Comeback,
    priority: 80,
    full_screen: true,
    title: "Comeback!",
    subtitle: Some("went from last to first"),
    emoji: "🚀",
    duration_ms: FULL_SCREEN_MS,
    sound_key: "comeback",
    haptic: HapticKind::Heavy,
};

const BONUS_UNLOCKED: MilestoneSpec = MilestoneSpec {
    kind: MilestoneKind::BonusUnlocked,
    priority: 60,
    full_screen: false,
    title: "Upper Bonus!",
    subtitle: Some("earned the +35 bonus"),
    emoji: "🎁",
    duration_ms: 3_000,
    sound_key: "bonus",
    haptic: HapticKind::Success,
};

const LARGE_STRAIGHT: MilestoneSpec = MilestoneSpec {
    kind: MilestoneKind::LargeStraight,
    priority: 40,
    full_screen: false,
    title: "Large Straight",
    subtitle: Some("ran a large straight"),
    emoji: "📏",
    duration_ms: TOAST_MS,
    sound_key: "straight",
    haptic: HapticKind::Medium,
};

const FULL_HOUSE: MilestoneSpec = MilestoneSpec {
    kind: MilestoneKind::FullHouse,
    priority: 20,
    full_screen: false,
    title: "Full House",
    subtitle: Some("filled a full house"),
    emoji: "🏠",
    duration_ms: TOAST_MS,
    sound_key: "full_house",
    haptic: HapticKind::Light,
};

/// Looks up the static settings for `kind`.
pub const fn spec_for(kind: MilestoneKind) -> &'static MilestoneSpec {
    match kind {
        MilestoneKind::FiveOfAKind => &FIVE_OF_A_KIND,
        MilestoneKind::GameWon => &GAME_WON,
        MilestoneKind::Comeback => &COMEBACK,
        MilestoneKind::BonusUnlocked => &BONUS_UNLOCKED,
        MilestoneKind::LargeStraight => &LARGE_STRAIGHT,
        MilestoneKind::FullHouse => &FULL_HOUSE,
    }
}
