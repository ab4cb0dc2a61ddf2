use thiserror::Error;

/// Failure taxonomy for gateway calls and client-side checks.
///
/// Partial outcomes of multi-step workflows are deliberately *not* part of
/// this enum: a workflow whose primary step succeeded reports through its own
/// outcome type so it can never be mistaken for a failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum GalleryError {
    /// Network unreachable, or the backend answered with a non-2xx status.
    #[error("transport failure: {reason}")]
    Transport { reason: String },
    /// The backend answered 2xx but not in the shape its contract promises
    /// (malformed body, or a success-string acknowledgment that does not
    /// match the expected literal).
    #[error("contract violation: {reason}")]
    Contract { reason: String },
    /// Input rejected client-side. Nothing was sent to the backend.
    #[error("validation failure: {reason}")]
    Validation { reason: String },
}

impl GalleryError {
    pub fn transport(reason: impl Into<String>) -> Self {
        Self::Transport {
            reason: reason.into(),
        }
    }

    pub fn contract(reason: impl Into<String>) -> Self {
        Self::Contract {
            reason: reason.into(),
        }
    }

    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}
