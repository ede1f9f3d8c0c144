//! Error types for the score update pipeline.

use crate::state::LedgerError;

/// Errors surfaced while applying a score mutation through the engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecuteError {
    #[error("score entry rejected: {0}")]
    Rejected(#[from] LedgerError),
}

impl ExecuteError {
    /// Stable identifier of the underlying failure.
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Rejected(error) => error.error_code(),
        }
    }
}
