//! Scoring categories and the per-category entry rules.
//!
//! A sheet has 13 categories: six upper-section die faces and seven
//! lower-section combinations. Every category validates its entry either
//! against a numeric range or against a single fixed award (or zero when
//! the player scratches it).

use bitflags::bitflags;

use crate::config::ScoreConfig;

/// Section of the scoresheet a category belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Section {
    Upper,
    Lower,
}

/// Closed set of scoring categories, in sheet order.
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
    strum::EnumCount,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ScoreCategory {
    Ones,
    Twos,
    Threes,
    Fours,
    Fives,
    Sixes,
    ThreeOfAKind,
    FourOfAKind,
    FullHouse,
    SmallStraight,
    LargeStraight,
    FiveOfAKind,
    Chance,
}

impl ScoreCategory {
    /// All categories in sheet order. Index `i` holds the category whose
    /// [`index`](Self::index) is `i`.
    pub const ALL: [ScoreCategory; ScoreConfig::CATEGORY_COUNT] = [
        Self::Ones,
        Self::Twos,
        Self::Threes,
        Self::Fours,
        Self::Fives,
        Self::Sixes,
        Self::ThreeOfAKind,
        Self::FourOfAKind,
        Self::FullHouse,
        Self::SmallStraight,
        Self::LargeStraight,
        Self::FiveOfAKind,
        Self::Chance,
    ];

    pub const FULL_HOUSE_AWARD: u32 = 25;
    pub const SMALL_STRAIGHT_AWARD: u32 = 30;
    pub const LARGE_STRAIGHT_AWARD: u32 = 40;
    pub const FIVE_OF_A_KIND_AWARD: u32 = 50;

    /// Position of this category on the sheet (0-based).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn section(self) -> Section {
        match self {
            Self::Ones | Self::Twos | Self::Threes | Self::Fours | Self::Fives | Self::Sixes => {
                Section::Upper
            }
            _ => Section::Lower,
        }
    }

    #[inline]
    pub const fn is_upper(self) -> bool {
        matches!(self.section(), Section::Upper)
    }

    /// Die face counted by an upper-section category.
    pub const fn die_face(self) -> Option<u32> {
        match self {
            Self::Ones => Some(1),
            Self::Twos => Some(2),
            Self::Threes => Some(3),
            Self::Fours => Some(4),
            Self::Fives => Some(5),
            Self::Sixes => Some(6),
            _ => None,
        }
    }

    /// Entry rule for this category.
    pub const fn rule(self) -> CategoryRule {
        match self.die_face() {
            Some(face) => CategoryRule::Range {
                min: 0,
                max: face * ScoreConfig::DICE_COUNT,
            },
            None => match self {
                Self::FullHouse => CategoryRule::Fixed(Self::FULL_HOUSE_AWARD),
                Self::SmallStraight => CategoryRule::Fixed(Self::SMALL_STRAIGHT_AWARD),
                Self::LargeStraight => CategoryRule::Fixed(Self::LARGE_STRAIGHT_AWARD),
                Self::FiveOfAKind => CategoryRule::Fixed(Self::FIVE_OF_A_KIND_AWARD),
                // Any five dice sum to at least 5.
                Self::Chance => CategoryRule::Range { min: 5, max: 30 },
                _ => CategoryRule::Range { min: 0, max: 30 },
            },
        }
    }

    /// Returns true if `value` is a legal entry for this category.
    pub fn accepts(self, value: u32) -> bool {
        if !self.rule().contains(value) {
            return false;
        }
        match self.die_face() {
            Some(face) => value % face == 0,
            None => true,
        }
    }

    /// Human-readable label shown on the sheet.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ones => "Ones",
            Self::Twos => "Twos",
            Self::Threes => "Threes",
            Self::Fours => "Fours",
            Self::Fives => "Fives",
            Self::Sixes => "Sixes",
            Self::ThreeOfAKind => "Three of a Kind",
            Self::FourOfAKind => "Four of a Kind",
            Self::FullHouse => "Full House",
            Self::SmallStraight => "Small Straight",
            Self::LargeStraight => "Large Straight",
            Self::FiveOfAKind => "Five of a Kind",
            Self::Chance => "Chance",
        }
    }
}

/// Validation rule attached to a category.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CategoryRule {
    /// Any value in `[min, max]`.
    Range { min: u32, max: u32 },
    /// Either zero (scratched) or exactly the fixed award.
    Fixed(u32),
}

impl CategoryRule {
    pub const fn contains(&self, value: u32) -> bool {
        match *self {
            CategoryRule::Range { min, max } => value >= min && value <= max,
            CategoryRule::Fixed(award) => value == 0 || value == award,
        }
    }

    /// Highest value the rule admits.
    pub const fn max(&self) -> u32 {
        match *self {
            CategoryRule::Range { max, .. } => max,
            CategoryRule::Fixed(award) => award,
        }
    }
}

bitflags! {
    /// Set of categories, one bit per [`ScoreCategory::index`].
    ///
    /// Used for fill-state on a sheet and for tracking which categories were
    /// newly filled between two snapshots.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct CategorySet: u16 {
        const ONES            = 1 << 0;
        const TWOS            = 1 << 1;
        const THREES          = 1 << 2;
        const FOURS           = 1 << 3;
        const FIVES           = 1 << 4;
        const SIXES           = 1 << 5;
        const THREE_OF_A_KIND = 1 << 6;
        const FOUR_OF_A_KIND  = 1 << 7;
        const FULL_HOUSE      = 1 << 8;
        const SMALL_STRAIGHT  = 1 << 9;
        const LARGE_STRAIGHT  = 1 << 10;
        const FIVE_OF_A_KIND  = 1 << 11;
        const CHANCE          = 1 << 12;

        const UPPER = Self::ONES.bits()
            | Self::TWOS.bits()
            | Self::THREES.bits()
            | Self::FOURS.bits()
            | Self::FIVES.bits()
            | Self::SIXES.bits();
    }
}

impl CategorySet {
    #[inline]
    pub const fn of(category: ScoreCategory) -> Self {
        Self::from_bits_retain(1 << category.index())
    }

    #[inline]
    pub const fn has(self, category: ScoreCategory) -> bool {
        self.contains(Self::of(category))
    }

    /// Number of categories in the set.
    #[inline]
    pub const fn len(self) -> u32 {
        self.bits().count_ones()
    }

    /// Categories in the set, in sheet order.
    pub fn categories(self) -> impl Iterator<Item = ScoreCategory> {
        ScoreCategory::ALL
            .into_iter()
            .filter(move |category| self.has(*category))
    }
}

impl From<ScoreCategory> for CategorySet {
    fn from(category: ScoreCategory) -> Self {
        Self::of(category)
    }
}
