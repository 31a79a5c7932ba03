//! Error types for prediction-engine operations.

use chrono::{DateTime, Utc};
use ephem::EphemerisError;
use std::fmt;

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors that can occur while scoring an instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The query instant precedes the cycle epoch; elapsed time would be
    /// negative and the cycle walk is undefined there.
    InstantBeforeEpoch {
        epoch: DateTime<Utc>,
        instant: DateTime<Utc>,
    },
    /// The ephemeris provider failed; propagated verbatim.
    Ephemeris(EphemerisError),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InstantBeforeEpoch { epoch, instant } => write!(
                f,
                "instant {} precedes the cycle epoch {}",
                instant, epoch
            ),
            EngineError::Ephemeris(err) => write!(f, "ephemeris failure: {}", err),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Ephemeris(err) => Some(err),
            _ => None,
        }
    }
}

impl From<EphemerisError> for EngineError {
    fn from(err: EphemerisError) -> Self {
        EngineError::Ephemeris(err)
    }
}
