//! Runtime orchestration around the scoring rules.
//!
//! This crate wires the deterministic [`scorepad_core`] engine to the outside
//! world: injected sound, haptic and settings services, a two-channel
//! celebration queue with auto-dismiss timers on tokio, and configuration
//! read from the environment. Presentation layers embed [`Scorekeeper`] and
//! poll it for the current full-screen milestone and toast.
//!
//! Modules are organized by responsibility:
//! - [`scorekeeper`] hosts the façade and its builder
//! - [`api`] exposes the error type and the service traits hosts implement
//! - [`celebration`] owns the presentation queue and its timers
//! - [`config`] loads runtime settings
pub mod api;
pub mod celebration;
pub mod config;
pub mod scorekeeper;

pub use api::{
    HapticService, Result, RuntimeError, SettingsProvider, SilentCues, SoundService,
    StaticSettings,
};
pub use celebration::{CelebrationCenter, CelebrationQueue, Channel, PendingCounts};
pub use config::ScorekeeperConfig;
pub use scorekeeper::{Scorekeeper, ScorekeeperBuilder};
