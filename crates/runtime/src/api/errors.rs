//! Unified error types surfaced by the runtime API.
//!
//! Wraps rejected score entries and roster problems so presentation layers
//! can bubble them up with consistent context.
use thiserror::Error;

use scorepad_core::{ExecuteError, PlayerId};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Execute(#[from] ExecuteError),

    #[error("player {player} is seated more than once")]
    DuplicatePlayer { player: PlayerId },
}

impl RuntimeError {
    /// Stable identifier for the failure, suitable for user-facing lookups.
    pub fn error_code(&self) -> &'static str {
        match self {
            RuntimeError::Execute(error) => error.error_code(),
            RuntimeError::DuplicatePlayer { .. } => "duplicate_player",
        }
    }
}
