//! # qrand_core
//!
//! Scrambled Halton quasi-random sequences and the distributions derived
//! from them.
//!
//! A [`QRandSequencer`] assigns a distinct prime base to every coordinate,
//! scrambles the radix digits of each coordinate with a fixed permutation and
//! counts points with growable mixed-radix counters. Points cover the unit
//! hypercube far more evenly than pseudo-random draws, which makes them a good
//! fit for numerical integration, stochastic search and sampling-based
//! optimisation where reproducible coverage matters.
//!
//! ## Module Structure
//!
//! - [`sequencer`]: counter engine, overflow policy and state checkpointing
//! - [`distributions`]: uniform, integer and Gaussian adapters
//! - [`covariance`]: covariance square roots for correlated Gaussians
//! - [`batch`]: parallel batch generation over cloned sequencers
//! - [`rng`]: scrambling sources and the low-discrepancy sequence trait
//! - [`config`]: builder and TOML configuration
//! - [`primes`]: the prime base table
//!
//! ## Usage Example
//!
//! ```rust
//! use qrand_core::rng::ScrambleRng;
//! use qrand_core::QRandSequencer;
//!
//! let mut rng = ScrambleRng::from_seed(2024);
//! let mut seq = QRandSequencer::new(3, &mut rng).unwrap();
//!
//! let uniform = seq.uniform_vector(0.0, 10.0).unwrap();
//! let dice = seq.integer_vector(1, 7).unwrap();
//! let normal = seq.gaussian_standard().unwrap();
//! assert_eq!((uniform.len(), dice.len(), normal.len()), (3, 3, 3));
//!
//! // Checkpoint and resume exactly
//! let saved = seq.to_state_string();
//! let mut resumed = QRandSequencer::from_state_str(&saved).unwrap();
//! assert_eq!(resumed.advance(), seq.advance());
//! ```
//!
//! ## Thread Safety
//!
//! A sequencer is mutated by every sample and is meant to be owned by one
//! worker. Parallel consumers clone it and [`skip`](QRandSequencer::skip) each
//! clone to a disjoint range, as [`batch`] does.

#![warn(missing_docs)]

pub mod batch;
pub mod config;
pub mod covariance;
pub mod distributions;
pub mod error;
pub mod primes;
pub mod rng;
pub mod sequencer;

// Re-export commonly used items for convenience
pub use config::{ConfigError, SequencerConfig};
pub use distributions::EXACT_INTEGER_RANGE;
pub use error::{Result, SequencerError};
pub use primes::MAX_DIMENSIONALITY;
pub use sequencer::{QRandSequencer, SequencePoint, SequencerState};
