//! # Randomness Infrastructure
//!
//! Scrambling sources and the quasi-Monte Carlo sequence trait.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: scrambling sources are seeded, so a sequencer is a
//!   pure function of its seed and dimensionality
//! - **Injection**: the scrambling source is passed into
//!   [`QRandSequencer::reset`](crate::QRandSequencer::reset); there is no
//!   process-wide generator
//! - **Static dispatch**: [`Scrambler`] has a generic method and is consumed
//!   through generics only
//!
//! ## Module Structure
//!
//! - [`prng`]: seeded `StdRng` wrapper used as the default scrambling source
//! - [`scrambler`]: the scrambling capability, implemented for every `rand::Rng`
//! - [`qmc`]: the low-discrepancy sequence trait
//!
//! ## Usage Example
//!
//! ```rust
//! use qrand_core::rng::{LowDiscrepancySequence, ScrambleRng};
//! use qrand_core::QRandSequencer;
//!
//! let mut rng = ScrambleRng::from_seed(12345);
//! let mut seq = QRandSequencer::new(4, &mut rng).unwrap();
//!
//! let mut point = vec![0.0; seq.dimension()];
//! seq.next_point(&mut point).unwrap();
//! ```

mod prng;
mod qmc;
mod scrambler;

// Public re-exports
pub use prng::ScrambleRng;
pub use qmc::LowDiscrepancySequence;
pub use scrambler::Scrambler;
