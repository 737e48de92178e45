//! Quasi-Monte Carlo sequence trait.
//!
//! Low-discrepancy sequences cover the unit hypercube more evenly than
//! pseudo-random draws, which typically speeds up convergence of numerical
//! integration and sampling-based search.

use crate::error::Result;

/// Trait for low-discrepancy sequences used in quasi-Monte Carlo methods.
///
/// Implemented by [`QRandSequencer`](crate::QRandSequencer).
///
/// # Examples
///
/// ```rust
/// use qrand_core::rng::{LowDiscrepancySequence, ScrambleRng};
/// use qrand_core::QRandSequencer;
///
/// let mut seq = QRandSequencer::new(3, &mut ScrambleRng::from_seed(1)).unwrap();
/// let mut point = [0.0; 3];
/// seq.next_point(&mut point).unwrap();
/// assert!(point.iter().all(|&x| (0.0..1.0).contains(&x)));
/// ```
pub trait LowDiscrepancySequence {
    /// Returns the dimensionality of the sequence.
    fn dimension(&self) -> usize;

    /// Advances the sequence and writes the next point into `point`.
    ///
    /// Each coordinate lies in the interval [0, 1).
    ///
    /// # Errors
    ///
    /// Fails when `point.len() != self.dimension()` or the sequence has not
    /// been initialised.
    fn next_point(&mut self, point: &mut [f64]) -> Result<()>;

    /// Skips ahead by `n` points in the sequence.
    ///
    /// This is useful for parallel computation where different workers
    /// need to process non-overlapping portions of the sequence.
    fn skip(&mut self, n: u64);
}
