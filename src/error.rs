// WHY: single error taxonomy for every component so callers can match on failure kind
// Semantic validation failures are NOT errors here; they surface as Ok(None) from the owning operation

use thiserror::Error;

/// Errors raised by siftkit operations
#[derive(Debug, Error)]
pub enum SiftError {
    /// Input violates a structural precondition (programmer error)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A configuration name was not recognized under the strict policy
    #[error("unknown {kind} '{value}', expected one of {expected:?}")]
    UnknownValue {
        kind: &'static str,
        value: String,
        expected: &'static [&'static str],
    },

    /// The filter set removed every item with a nonzero sampling range
    #[error("filter set excludes all reachable probability mass")]
    FilterExhausted,

    /// Rejection sampling gave up after the configured number of draws
    #[error("no eligible item drawn after {attempts} attempts")]
    RetriesExhausted { attempts: usize },

    #[error("pattern compilation failed: {0}")]
    Pattern(#[from] regex_automata::meta::BuildError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result alias used across the library
pub type Result<T> = std::result::Result<T, SiftError>;

impl SiftError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        SiftError::InvalidArgument(msg.into())
    }
}
