//! Celebration-worthy scoring events.
//!
//! Milestones are detected by diffing consecutive snapshots (see
//! [`MilestoneDetector`]), decorated from a static per-kind table, and handed
//! to a presentation queue either as a full-screen celebration or as a toast.
//! They are transient: nothing here is persisted.

mod detector;
mod rules;
mod table;

use std::fmt;

pub use detector::{DetectionInput, MilestoneDetector};
pub use rules::{
    BonusUnlockedRule, CategoryMaxRule, ComebackRule, DetectionContext, Detected, GameWonRule,
    MilestoneRule, default_rules,
};
pub use table::{MilestoneSpec, spec_for};

use crate::state::{PlayerId, ScoreCategory};

/// Kind of milestone, in no particular order.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum MilestoneKind {
    FiveOfAKind,
    LargeStraight,
    FullHouse,
    BonusUnlocked,
    Comeback,
    GameWon,
}

impl MilestoneKind {
    /// Milestone awarded for hitting a category's maximum, if that category
    /// has one worth celebrating.
    pub const fn for_category(category: ScoreCategory) -> Option<Self> {
        match category {
            ScoreCategory::FiveOfAKind => Some(Self::FiveOfAKind),
            ScoreCategory::LargeStraight => Some(Self::LargeStraight),
            ScoreCategory::FullHouse => Some(Self::FullHouse),
            _ => None,
        }
    }
}

/// How much celebrating the player asked for.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Default,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CelebrationLevel {
    /// Only the top-tier milestone.
    Minimal,
    #[default]
    Normal,
    /// Everything.
    Epic,
}

impl CelebrationLevel {
    /// Returns true if milestones of `kind` survive this level's filter.
    pub const fn allows(self, kind: MilestoneKind) -> bool {
        match self {
            Self::Minimal => matches!(kind, MilestoneKind::FiveOfAKind),
            Self::Normal => matches!(
                kind,
                MilestoneKind::FiveOfAKind | MilestoneKind::BonusUnlocked | MilestoneKind::Comeback
            ),
            Self::Epic => true,
        }
    }
}

/// Haptic pattern requested alongside a celebration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum HapticKind {
    Light,
    Medium,
    Heavy,
    Success,
}

/// Deterministic identity of a milestone: one per player per kind.
///
/// Replaying detection against unchanged state yields the same ids, which
/// is what makes the fired set a sound dedup mechanism.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MilestoneId {
    pub player: PlayerId,
    pub kind: MilestoneKind,
}

impl MilestoneId {
    pub const fn new(player: PlayerId, kind: MilestoneKind) -> Self {
        Self { player, kind }
    }
}

impl fmt::Display for MilestoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.player, self.kind)
    }
}

/// Copy and cues used to present a milestone.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplayConfig {
    pub title: String,
    pub subtitle: Option<String>,
    pub emoji: String,
    /// Auto-dismiss delay in milliseconds.
    pub duration_ms: u64,
    pub sound_key: String,
    pub haptic: HapticKind,
}

impl DisplayConfig {
    pub fn duration(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.duration_ms)
    }
}

/// A detected, decorated milestone ready for presentation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Milestone {
    pub id: MilestoneId,
    pub kind: MilestoneKind,
    pub player: PlayerId,
    /// Higher is shown first.
    pub priority: u8,
    pub full_screen: bool,
    pub display: DisplayConfig,
}

impl Milestone {
    /// Routes the milestone to its presentation channel.
    pub fn into_presentation(self) -> Presentation {
        if self.full_screen {
            Presentation::FullScreen(self)
        } else {
            Presentation::Toast(ToastPayload::from(&self))
        }
    }
}

/// Lightweight notification built from a non-full-screen milestone.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ToastPayload {
    pub id: MilestoneId,
    pub message: String,
    pub emoji: String,
    pub duration_ms: u64,
    pub priority: u8,
}

impl ToastPayload {
    pub fn duration(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.duration_ms)
    }
}

impl From<&Milestone> for ToastPayload {
    fn from(milestone: &Milestone) -> Self {
        let display = &milestone.display;
        let message = match &display.subtitle {
            Some(subtitle) => format!("{}: {}", display.title, subtitle),
            None => display.title.clone(),
        };

        Self {
            id: milestone.id,
            message,
            emoji: display.emoji.clone(),
            duration_ms: display.duration_ms,
            priority: milestone.priority,
        }
    }
}

/// Presentation channel a milestone is routed to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Presentation {
    FullScreen(Milestone),
    Toast(ToastPayload),
}

impl Presentation {
    pub fn priority(&self) -> u8 {
        match self {
            Presentation::FullScreen(milestone) => milestone.priority,
            Presentation::Toast(toast) => toast.priority,
        }
    }
}
