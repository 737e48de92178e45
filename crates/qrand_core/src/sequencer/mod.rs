//! Scrambled Halton sequencer.
//!
//! [`QRandSequencer`] owns, for every internal coordinate, a prime base, a
//! digit permutation fixing zero and a growable mixed-radix counter. Each call
//! to [`advance`](QRandSequencer::advance) increments all counters and
//! reconstructs one `(value, max_value)` pair per coordinate; the ratio
//! `value / max_value` is the scrambled radical inverse of the point index.
//!
//! ## Overflow policy
//!
//! Coordinates are reconstructed into `u64`. When any coordinate's denominator
//! leaves no room for another digit, every counter is cleared and the point
//! count restarts at zero. The sequence is therefore periodic with a period of
//! roughly `2^62` points; points may repeat after that.
//!
//! ## Example
//!
//! ```rust
//! use qrand_core::rng::ScrambleRng;
//! use qrand_core::QRandSequencer;
//!
//! let mut seq = QRandSequencer::new(3, &mut ScrambleRng::from_seed(9)).unwrap();
//! assert_eq!(seq.padded_dimensionality(), 4);
//!
//! let point = seq.advance();
//! assert_eq!(point.len(), 4);
//! for (value, max) in point.values.iter().zip(&point.max_values) {
//!     assert!(value < max);
//! }
//! ```

mod counter;
mod state;

pub use state::SequencerState;

use tracing::{debug, trace, warn};

use crate::error::{Result, SequencerError};
use crate::primes::{FIRST_PRIMES, MAX_DIMENSIONALITY};
use crate::rng::{LowDiscrepancySequence, Scrambler};

/// One raw point of the sequence.
///
/// `values[i] / max_values[i]` lies in `[0, 1)` for every padded coordinate.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SequencePoint {
    /// Scrambled numerators, one per padded coordinate.
    pub values: Vec<u64>,
    /// Denominators `base^digits`, one per padded coordinate.
    pub max_values: Vec<u64>,
}

impl SequencePoint {
    /// Number of padded coordinates in the point.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` when the point has no coordinates.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Coordinate `i` as a real number in `[0, 1)`.
    #[inline]
    pub fn unit(&self, i: usize) -> f64 {
        self.values[i] as f64 / self.max_values[i] as f64
    }
}

/// Scrambled Halton quasi-random sequence generator.
///
/// A sequencer is a plain owned value: it is not shared, carries no hidden
/// global state and must not be advanced from several threads at once. Use
/// one instance per worker, or [`skip`](Self::skip) cloned instances to
/// disjoint ranges.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QRandSequencer {
    /// Dimensionality requested by the caller (possibly odd).
    dimensionality: usize,
    /// Prime base of each padded coordinate.
    bases: Vec<u32>,
    /// Digit permutation of each padded coordinate; `permutations[i][0] == 0`.
    permutations: Vec<Vec<u32>>,
    /// Point index of each padded coordinate in its base, least significant first.
    counters: Vec<Vec<u32>>,
    /// Points generated since the last reset.
    count: u64,
}

impl QRandSequencer {
    /// Creates a sequencer of the given dimensionality.
    ///
    /// A dimensionality of zero yields an uninitialised sequencer that can be
    /// reset or loaded later.
    ///
    /// # Errors
    ///
    /// Returns [`SequencerError::InvalidDimension`] if `dimensionality`
    /// exceeds 1000.
    pub fn new<S: Scrambler + ?Sized>(dimensionality: usize, scrambler: &mut S) -> Result<Self> {
        let mut sequencer = Self::default();
        if dimensionality != 0 {
            sequencer.reset(dimensionality, scrambler)?;
        }
        Ok(sequencer)
    }

    /// Reinitialises the sequencer.
    ///
    /// Takes the first `padded` primes (dimensionality rounded up to even),
    /// shuffles their assignment to coordinates, draws one permutation of
    /// `[1, base)` per coordinate while keeping digit 0 fixed, clears all
    /// counters and sets the point count to zero.
    ///
    /// # Errors
    ///
    /// Returns [`SequencerError::InvalidDimension`] if `dimensionality`
    /// exceeds 1000; the sequencer is left untouched.
    pub fn reset<S: Scrambler + ?Sized>(
        &mut self,
        dimensionality: usize,
        scrambler: &mut S,
    ) -> Result<()> {
        if dimensionality > MAX_DIMENSIONALITY {
            return Err(SequencerError::InvalidDimension {
                requested: dimensionality,
                max: MAX_DIMENSIONALITY,
            });
        }
        let padded = dimensionality + dimensionality % 2;

        let mut bases: Vec<u32> = FIRST_PRIMES[..padded].iter().map(|&p| u32::from(p)).collect();
        scrambler.scramble(&mut bases);

        let permutations = bases
            .iter()
            .map(|&base| {
                let mut permutation: Vec<u32> = (0..base).collect();
                scrambler.scramble(&mut permutation[1..]);
                permutation
            })
            .collect();

        self.dimensionality = dimensionality;
        self.bases = bases;
        self.permutations = permutations;
        self.counters = vec![Vec::new(); padded];
        self.count = 0;

        debug!(dimensionality, padded, "sequencer reset");
        Ok(())
    }

    /// Dimensionality requested by the caller.
    #[inline]
    pub fn dimensionality(&self) -> usize {
        self.dimensionality
    }

    /// Number of internal coordinates (dimensionality rounded up to even).
    #[inline]
    pub fn padded_dimensionality(&self) -> usize {
        self.bases.len()
    }

    /// Points generated since the last reset.
    #[inline]
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Prime base of each padded coordinate.
    #[inline]
    pub fn bases(&self) -> &[u32] {
        &self.bases
    }

    /// Digit permutation of each padded coordinate.
    #[inline]
    pub fn permutations(&self) -> &[Vec<u32>] {
        &self.permutations
    }

    /// Current digits of each padded coordinate, least significant first.
    #[inline]
    pub fn counters(&self) -> &[Vec<u32>] {
        &self.counters
    }

    /// Returns `true` once the sequencer has been reset or loaded.
    #[inline]
    pub fn is_initialised(&self) -> bool {
        !self.bases.is_empty()
    }

    /// Number of points after which the sequence wraps around.
    ///
    /// The count always stays below this value.
    pub fn period(&self) -> u64 {
        counter::period(&self.bases)
    }

    /// Generates the next raw point.
    ///
    /// Returns one `(value, max_value)` pair per padded coordinate. An
    /// uninitialised sequencer yields an empty point.
    pub fn advance(&mut self) -> SequencePoint {
        let padded = self.padded_dimensionality();
        let mut point = SequencePoint {
            values: vec![0; padded],
            max_values: vec![0; padded],
        };
        self.step(&mut point.values, &mut point.max_values);
        point
    }

    /// Generates the next raw point into caller-owned buffers.
    ///
    /// # Errors
    ///
    /// Returns [`SequencerError::InvalidRange`] when a buffer length differs
    /// from [`padded_dimensionality`](Self::padded_dimensionality); nothing is
    /// advanced in that case.
    pub fn advance_into(&mut self, values: &mut [u64], max_values: &mut [u64]) -> Result<()> {
        let padded = self.padded_dimensionality();
        if values.len() != padded {
            return Err(SequencerError::size_mismatch("values", padded, values.len()));
        }
        if max_values.len() != padded {
            return Err(SequencerError::size_mismatch(
                "max_values",
                padded,
                max_values.len(),
            ));
        }
        self.step(values, max_values);
        Ok(())
    }

    fn step(&mut self, values: &mut [u64], max_values: &mut [u64]) {
        if !self.is_initialised() {
            return;
        }
        let mut should_reset = false;
        let coordinates = self
            .bases
            .iter()
            .zip(&self.permutations)
            .zip(self.counters.iter_mut());

        for (i, ((&base, permutation), digits)) in coordinates.enumerate() {
            counter::increment(digits, base);
            let (value, max_value) = counter::scrambled_value(digits, permutation, base);
            values[i] = value;
            max_values[i] = max_value;
            should_reset |= counter::near_ceiling(max_value, base);
        }

        if should_reset {
            warn!(
                points = self.count + 1,
                "counter headroom exhausted, restarting sequence"
            );
            self.counters.iter_mut().for_each(Vec::clear);
            self.count = 0;
        } else {
            self.count += 1;
        }
    }

    /// Skips `n` points.
    ///
    /// The result is identical to calling [`advance`](Self::advance) `n`
    /// times, including wrap-around, but costs one base conversion per
    /// coordinate.
    pub fn skip(&mut self, n: u64) {
        if !self.is_initialised() || n == 0 {
            return;
        }
        let period = u128::from(self.period());
        // count < period, so the remainder fits in u64
        let target = ((u128::from(self.count) + u128::from(n)) % period) as u64;
        trace!(from = self.count, to = target, skipped = n, "skip ahead");
        self.count = target;
        self.rebuild_counters();
    }

    /// Rebuilds every digit counter from the point count.
    fn rebuild_counters(&mut self) {
        let count = self.count;
        self.counters.resize_with(self.bases.len(), Vec::new);
        for (digits, &base) in self.counters.iter_mut().zip(&self.bases) {
            counter::digits_of(count, base, digits);
        }
    }

    /// Fails with [`SequencerError::NotInitialised`] before any reset or load.
    pub(crate) fn ensure_initialised(&self) -> Result<()> {
        if self.is_initialised() {
            Ok(())
        } else {
            Err(SequencerError::NotInitialised)
        }
    }
}

impl LowDiscrepancySequence for QRandSequencer {
    fn dimension(&self) -> usize {
        self.dimensionality
    }

    fn next_point(&mut self, point: &mut [f64]) -> Result<()> {
        self.ensure_initialised()?;
        if point.len() != self.dimensionality {
            return Err(SequencerError::size_mismatch(
                "point",
                self.dimensionality,
                point.len(),
            ));
        }
        let raw = self.advance();
        for (i, x) in point.iter_mut().enumerate() {
            *x = raw.unit(i);
        }
        Ok(())
    }

    fn skip(&mut self, n: u64) {
        QRandSequencer::skip(self, n)
    }
}
