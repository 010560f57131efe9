use thiserror::Error;

/// Misuse of the emitter API.
///
/// Both variants are recoverable: the emitter logs a warning, leaves its
/// registry untouched and hands the error back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmitterError {
    #[error("invalid event name: {0:?}")]
    InvalidName(String),

    #[error("missing callback for {0:?}")]
    MissingCallback(String),
}

pub type Result<T> = std::result::Result<T, EmitterError>;
