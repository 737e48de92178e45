//! Error types for the quasi-random sequencer.
//!
//! Every variant describes a violated caller contract. Errors are raised
//! eagerly, before any sequencer state is mutated, and are never recovered
//! internally. The near-overflow counter reset is not an error.

use thiserror::Error;

/// Sequencer errors.
///
/// # Examples
/// ```
/// use qrand_core::SequencerError;
///
/// let err = SequencerError::InvalidDimension { requested: 1001, max: 1000 };
/// assert!(err.to_string().contains("1001"));
/// ```
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SequencerError {
    /// Requested dimensionality exceeds the prime table.
    #[error("Invalid dimensionality {requested}: must not exceed {max}")]
    InvalidDimension {
        /// The requested dimensionality
        requested: usize,
        /// The largest supported dimensionality
        max: usize,
    },

    /// Empty interval or argument size mismatch in a distribution adapter.
    #[error("Invalid range: {reason}")]
    InvalidRange {
        /// Description of the offending argument
        reason: String,
    },

    /// Serialised state text does not follow the positional format.
    #[error("Malformed sequencer state at field {field}: {reason}")]
    MalformedState {
        /// Zero-based index of the offending comma-separated field
        field: usize,
        /// Description of the problem
        reason: String,
    },

    /// Covariance matrix cannot be square-rooted.
    #[error("Invalid covariance matrix: {reason}")]
    InvalidCovariance {
        /// Description of the problem
        reason: String,
    },

    /// Sampling requested from a sequencer that was never reset or loaded.
    #[error("Sequencer has not been initialised")]
    NotInitialised,
}

impl SequencerError {
    /// Create an invalid range error
    pub fn invalid_range(reason: impl Into<String>) -> Self {
        Self::InvalidRange {
            reason: reason.into(),
        }
    }

    /// Create a malformed state error
    pub fn malformed(field: usize, reason: impl Into<String>) -> Self {
        Self::MalformedState {
            field,
            reason: reason.into(),
        }
    }

    /// Create an invalid covariance error
    pub fn invalid_covariance(reason: impl Into<String>) -> Self {
        Self::InvalidCovariance {
            reason: reason.into(),
        }
    }

    /// Size mismatch between an argument and the sequencer dimensionality.
    pub(crate) fn size_mismatch(what: &str, expected: usize, got: usize) -> Self {
        Self::invalid_range(format!(
            "{} has {} components, expected {}",
            what, got, expected
        ))
    }
}

/// Result alias for sequencer operations.
pub type Result<T> = std::result::Result<T, SequencerError>;
