//! Scorekeeper configuration structures and loaders.
use std::env;

use scorepad_core::{CelebrationLevel, ScoreConfig};

/// Runtime configuration for a [`crate::Scorekeeper`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScorekeeperConfig {
    pub score: ScoreConfig,
    /// Level used by the default settings provider.
    pub celebration_level: CelebrationLevel,
    /// Arm a timer for every displayed celebration.
    pub auto_dismiss: bool,
    /// Overrides the duration of every toast.
    pub toast_duration_ms: Option<u64>,
}

impl Default for ScorekeeperConfig {
    fn default() -> Self {
        Self {
            score: ScoreConfig::default(),
            celebration_level: CelebrationLevel::default(),
            auto_dismiss: true,
            toast_duration_ms: None,
        }
    }
}

impl ScorekeeperConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `SCOREPAD_CELEBRATION_LEVEL` - minimal, normal or epic (default: normal)
    /// - `SCOREPAD_AUTO_DISMISS` - Arm auto-dismiss timers (default: true)
    /// - `SCOREPAD_TOAST_DURATION_MS` - Toast duration override (default: per milestone)
    ///
    /// Unparseable values fall back to the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(level) = read_var::<CelebrationLevel>(&lookup, "SCOREPAD_CELEBRATION_LEVEL") {
            config.celebration_level = level;
        }
        if let Some(enabled) = read_var_bool(&lookup, "SCOREPAD_AUTO_DISMISS") {
            config.auto_dismiss = enabled;
        }
        if let Some(duration) = read_var::<u64>(&lookup, "SCOREPAD_TOAST_DURATION_MS") {
            config.toast_duration_ms = Some(duration.max(1));
        }

        config
    }

    pub fn with_celebration_level(mut self, level: CelebrationLevel) -> Self {
        self.celebration_level = level;
        self
    }

    pub fn with_auto_dismiss(mut self, enabled: bool) -> Self {
        self.auto_dismiss = enabled;
        self
    }

    pub fn with_toast_duration_ms(mut self, duration_ms: u64) -> Self {
        self.toast_duration_ms = Some(duration_ms);
        self
    }
}

fn read_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    lookup(key)?.trim().parse().ok()
}

fn read_var_bool(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<bool> {
    match lookup(key)?.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
