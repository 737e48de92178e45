//! Sequencer configuration.
//!
//! [`SequencerConfig`] describes how to obtain a ready sequencer: either a
//! fresh one of a given dimensionality scrambled from a seed, or a resumed one
//! from a saved state. It can be assembled through a builder or read from TOML.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::error::SequencerError;
use crate::primes::MAX_DIMENSIONALITY;
use crate::rng::ScrambleRng;
use crate::sequencer::{QRandSequencer, SequencerState};

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Dimensionality missing, zero or above the prime table.
    #[error("Invalid dimensionality: {0}. Must be between 1 and 1000")]
    InvalidDimensionality(usize),

    /// Saved state disagrees with the configured dimensionality.
    #[error("Saved state has dimensionality {found}, configuration asks for {expected}")]
    StateMismatch {
        /// Configured dimensionality
        expected: usize,
        /// Dimensionality stored in the state
        found: usize,
    },

    /// Configuration file could not be read.
    #[error("Configuration file error: {0}")]
    FileError(String),

    /// Configuration text is not valid TOML for this schema.
    #[error("Configuration parse error: {0}")]
    ParseError(String),

    /// Sequencer rejected the configuration.
    #[error(transparent)]
    Sequencer(#[from] SequencerError),
}

/// Sequencer configuration.
///
/// # Examples
///
/// ```rust
/// use qrand_core::config::SequencerConfig;
///
/// let config = SequencerConfig::builder()
///     .dimensionality(8)
///     .seed(42)
///     .build()
///     .expect("valid configuration");
///
/// let seq = config.build_sequencer().unwrap();
/// assert_eq!(seq.dimensionality(), 8);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SequencerConfig {
    /// Dimensionality of generated points.
    pub dimensionality: usize,
    /// Seed of the scrambling source; drawn from entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Serialised state to resume from instead of scrambling afresh.
    #[serde(default)]
    pub state: Option<String>,
}

impl SequencerConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> SequencerConfigBuilder {
        SequencerConfigBuilder::default()
    }

    /// Parses and validates a TOML document.
    ///
    /// ```rust
    /// use qrand_core::config::SequencerConfig;
    ///
    /// let config = SequencerConfig::from_toml_str("dimensionality = 3\nseed = 7\n").unwrap();
    /// assert_eq!(config.seed, Some(7));
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: SequencerConfig =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| {
                ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e))
            })?;
        Self::from_toml_str(&content)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `dimensionality` is 0 or greater than 1000
    /// - `state` does not parse, or parses to another dimensionality
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dimensionality == 0 || self.dimensionality > MAX_DIMENSIONALITY {
            return Err(ConfigError::InvalidDimensionality(self.dimensionality));
        }
        if let Some(text) = &self.state {
            self.parse_state(text)?;
        }
        Ok(())
    }

    fn parse_state(&self, text: &str) -> Result<SequencerState, ConfigError> {
        let state: SequencerState = text.parse()?;
        if state.dimensionality() != self.dimensionality {
            return Err(ConfigError::StateMismatch {
                expected: self.dimensionality,
                found: state.dimensionality(),
            });
        }
        Ok(state)
    }

    /// Builds the sequencer described by this configuration.
    ///
    /// A saved state takes precedence over the seed.
    pub fn build_sequencer(&self) -> Result<QRandSequencer, ConfigError> {
        self.validate()?;
        if let Some(text) = &self.state {
            let mut sequencer = QRandSequencer::default();
            sequencer.set_state(self.parse_state(text)?);
            info!(
                dimensionality = self.dimensionality,
                count = sequencer.count(),
                "resumed sequencer from saved state"
            );
            return Ok(sequencer);
        }

        let mut rng = match self.seed {
            Some(seed) => ScrambleRng::from_seed(seed),
            None => ScrambleRng::from_entropy(),
        };
        let sequencer = QRandSequencer::new(self.dimensionality, &mut rng)?;
        info!(
            dimensionality = self.dimensionality,
            seed = rng.seed(),
            "scrambled new sequencer"
        );
        Ok(sequencer)
    }
}

/// Builder for [`SequencerConfig`].
#[derive(Clone, Debug, Default)]
pub struct SequencerConfigBuilder {
    dimensionality: Option<usize>,
    seed: Option<u64>,
    state: Option<String>,
}

impl SequencerConfigBuilder {
    /// Sets the dimensionality of generated points.
    #[inline]
    pub fn dimensionality(mut self, dimensionality: usize) -> Self {
        self.dimensionality = Some(dimensionality);
        self
    }

    /// Sets the scrambling seed.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets a serialised state to resume from.
    #[inline]
    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the dimensionality is missing or invalid, or
    /// the state does not match it.
    pub fn build(self) -> Result<SequencerConfig, ConfigError> {
        let config = SequencerConfig {
            dimensionality: self
                .dimensionality
                .ok_or(ConfigError::InvalidDimensionality(0))?,
            seed: self.seed,
            state: self.state,
        };
        config.validate()?;
        Ok(config)
    }
}
