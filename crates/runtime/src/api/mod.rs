//! Public runtime API surface.
//!
//! This module gathers the error type and the service traits that hosts
//! implement, so the rest of the crate can stay focused on orchestration.

pub mod errors;
pub mod providers;

pub use errors::{Result, RuntimeError};
pub use providers::{HapticService, SettingsProvider, SilentCues, SoundService, StaticSettings};
