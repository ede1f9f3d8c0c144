//! Services the scorekeeper consumes from its host.
//!
//! Sound playback, haptics and settings storage live outside this crate.
//! Hosts plug in implementations through [`crate::ScorekeeperBuilder`]; the
//! scorekeeper never reaches for a global instance.
use std::sync::Arc;

use scorepad_core::CelebrationLevel;

/// Fire-and-forget audio cue.
pub trait SoundService: Send + Sync {
    /// Plays the cue registered under `sound_key`.
    fn play(&self, sound_key: &str);
}

/// Fire-and-forget haptic cue.
pub trait HapticService: Send + Sync {
    /// Triggers the pattern named `haptic` (`light`, `medium`, `heavy`,
    /// `success`).
    fn trigger(&self, haptic: &str);
}

/// Source of user settings, read on every detection pass.
pub trait SettingsProvider: Send + Sync {
    fn celebration_level(&self) -> CelebrationLevel;
}

impl<T: SoundService + ?Sized> SoundService for Arc<T> {
    fn play(&self, sound_key: &str) {
        (**self).play(sound_key)
    }
}

impl<T: HapticService + ?Sized> HapticService for Arc<T> {
    fn trigger(&self, haptic: &str) {
        (**self).trigger(haptic)
    }
}

impl<T: SettingsProvider + ?Sized> SettingsProvider for Arc<T> {
    fn celebration_level(&self) -> CelebrationLevel {
        (**self).celebration_level()
    }
}

/// Settings fixed at construction time.
#[derive(Clone, Copy, Debug, Default)]
pub struct StaticSettings {
    level: CelebrationLevel,
}

impl StaticSettings {
    pub const fn new(level: CelebrationLevel) -> Self {
        Self { level }
    }
}

impl SettingsProvider for StaticSettings {
    fn celebration_level(&self) -> CelebrationLevel {
        self.level
    }
}

/// Sound and haptic sink that drops every cue.
/// Useful for headless hosts or as a fallback.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentCues;

impl SoundService for SilentCues {
    fn play(&self, _sound_key: &str) {}
}

impl HapticService for SilentCues {
    fn trigger(&self, _haptic: &str) {}
}
