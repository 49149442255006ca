use crate::types::FormatError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no sheet {0}")]
    MissingSheet(String),
    #[error("no recent: the newest ledger transaction was not found in the staging sheet")]
    NoRecent,
    #[error("invalid state: {0}")]
    InvalidState(String),
    #[error(transparent)]
    Format(#[from] FormatError)
}

impl EngineError {
    pub fn missing_sheet(name: &str) -> Self {
        Self::MissingSheet(name.to_string())
    }

    pub fn invalid_state(reason: impl Into<String>) -> Self {
        Self::InvalidState(reason.into())
    }

    /// A sheet the procedure needs does not exist.
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::MissingSheet(_))
    }

    /// The stored sheets disagree with each other and cannot be reconciled automatically.
    pub fn is_integrity(&self) -> bool {
        matches!(self, Self::NoRecent | Self::InvalidState(_))
    }
}
