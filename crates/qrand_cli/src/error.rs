//! Error types for the qrand CLI.

use thiserror::Error;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// CLI configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Sequencer configuration error
    #[error("Sequencer configuration error: {0}")]
    SequencerConfig(#[from] qrand_core::ConfigError),

    /// Sampling or state error raised by the sequencer
    #[error("Sequencer error: {0}")]
    Sequencer(#[from] qrand_core::SequencerError),

    /// Invalid command argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A restored sequencer disagreed with the one it was saved from
    #[error("Checkpoint diverged at point {point}")]
    CheckpointDiverged {
        /// Point count of the original when the outputs differed
        point: u64,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON output error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV output error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl CliError {
    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CliError::invalid_argument("--points must be positive");
        assert!(err.to_string().contains("--points must be positive"));
    }

    #[test]
    fn test_checkpoint_divergence_display() {
        let err = CliError::CheckpointDiverged { point: 1_005 };
        assert_eq!(err.to_string(), "Checkpoint diverged at point 1005");
    }

    #[test]
    fn test_sequencer_error_conversion() {
        let err: CliError = qrand_core::SequencerError::NotInitialised.into();
        assert!(matches!(err, CliError::Sequencer(_)));
        assert!(err.to_string().starts_with("Sequencer error"));
    }
}
