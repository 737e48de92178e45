//! Distribution adapters over the raw sequence.
//!
//! Each adapter validates its arguments, advances the sequencer exactly once
//! and rescales the `(value, max_value)` pairs:
//!
//! - uniform reals on per-coordinate intervals
//! - integers on per-coordinate ranges, exact for ranges below
//!   [`EXACT_INTEGER_RANGE`]
//! - Gaussian vectors via Box–Muller, optionally scaled by a diagonal or
//!   correlated through a covariance square root
//!
//! All outputs have the caller's dimensionality; the padding coordinate of an
//! odd-dimensional sequencer is dropped.

use std::f64::consts::PI;

use nalgebra::{DMatrix, DVector};

use crate::error::{Result, SequencerError};
use crate::sequencer::QRandSequencer;

/// Integer ranges below this width are mapped with exact integer arithmetic.
///
/// Wider ranges go through `f64`. The threshold is a heuristic carried over
/// for compatibility; either branch lands within one unit of the other.
pub const EXACT_INTEGER_RANGE: u64 = u64::MAX / 20_000;

impl QRandSequencer {
    fn check_len(&self, what: &str, len: usize) -> Result<()> {
        if len != self.dimensionality() {
            return Err(SequencerError::size_mismatch(
                what,
                self.dimensionality(),
                len,
            ));
        }
        Ok(())
    }

    /// Uniform point with every coordinate in `[min, max]`.
    ///
    /// Coordinates are `min + (max - min) * u` with `u` in `[0, 1)`. The upper
    /// bound is excluded for `[0, 1)`, but rounding can land exactly on `max`
    /// for other intervals, most visibly narrow ones far from zero.
    ///
    /// # Errors
    ///
    /// [`SequencerError::InvalidRange`] unless `min < max`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use qrand_core::rng::ScrambleRng;
    /// use qrand_core::QRandSequencer;
    ///
    /// let mut seq = QRandSequencer::new(3, &mut ScrambleRng::from_seed(1)).unwrap();
    /// let point = seq.uniform_vector(-1.0, 1.0).unwrap();
    /// assert_eq!(point.len(), 3);
    /// assert!(point.iter().all(|&x| (-1.0..=1.0).contains(&x)));
    /// ```
    pub fn uniform_vector(&mut self, min: f64, max: f64) -> Result<Vec<f64>> {
        if !(min < max) {
            return Err(SequencerError::invalid_range(format!(
                "min {} must be less than max {}",
                min, max
            )));
        }
        let dim = self.dimensionality();
        self.uniform_vector_bounds(&vec![min; dim], &vec![max; dim])
    }

    /// Uniform point with coordinate `i` in `[min[i], max[i]]`.
    ///
    /// As with [`uniform_vector`](Self::uniform_vector), `max[i]` is only
    /// reachable through rounding.
    ///
    /// # Errors
    ///
    /// [`SequencerError::InvalidRange`] if a bound vector does not have the
    /// sequencer dimensionality or `min[i] >= max[i]` for some `i`.
    pub fn uniform_vector_bounds(&mut self, min: &[f64], max: &[f64]) -> Result<Vec<f64>> {
        self.ensure_initialised()?;
        self.check_len("min", min.len())?;
        self.check_len("max", max.len())?;
        for (i, (lo, hi)) in min.iter().zip(max).enumerate() {
            if !(lo < hi) {
                return Err(SequencerError::invalid_range(format!(
                    "coordinate {}: min {} must be less than max {}",
                    i, lo, hi
                )));
            }
        }

        let point = self.advance();
        Ok(min
            .iter()
            .zip(max)
            .enumerate()
            .map(|(i, (&lo, &hi))| lo + (hi - lo) * point.unit(i))
            .collect())
    }

    /// Integer point with every coordinate in `[min, max)`.
    ///
    /// # Errors
    ///
    /// [`SequencerError::InvalidRange`] unless `min < max`.
    pub fn integer_vector(&mut self, min: i64, max: i64) -> Result<Vec<i64>> {
        if min >= max {
            return Err(SequencerError::invalid_range(format!(
                "min {} must be less than max {}",
                min, max
            )));
        }
        let dim = self.dimensionality();
        self.integer_vector_bounds(&vec![min; dim], &vec![max; dim])
    }

    /// Integer point with coordinate `i` in `[min[i], max[i])`.
    ///
    /// Ranges narrower than [`EXACT_INTEGER_RANGE`] use
    /// `min + value * range / max_value` in exact integer arithmetic; wider
    /// ranges use `min + floor(value / max_value * range)` in `f64`.
    ///
    /// # Errors
    ///
    /// [`SequencerError::InvalidRange`] if a bound vector does not have the
    /// sequencer dimensionality or `min[i] >= max[i]` for some `i`.
    pub fn integer_vector_bounds(&mut self, min: &[i64], max: &[i64]) -> Result<Vec<i64>> {
        self.ensure_initialised()?;
        self.check_len("min", min.len())?;
        self.check_len("max", max.len())?;
        for (i, (lo, hi)) in min.iter().zip(max).enumerate() {
            if lo >= hi {
                return Err(SequencerError::invalid_range(format!(
                    "coordinate {}: min {} must be less than max {}",
                    i, lo, hi
                )));
            }
        }

        let point = self.advance();
        Ok(min
            .iter()
            .zip(max)
            .enumerate()
            .map(|(i, (&lo, &hi))| {
                let range = (i128::from(hi) - i128::from(lo)) as u64;
                let offset = scale_to_range(point.values[i], point.max_values[i], range);
                (i128::from(lo) + i128::from(offset)) as i64
            })
            .collect())
    }

    /// Standard normal vector `N(0, I)` of the sequencer dimensionality.
    ///
    /// Consumes one point and applies Box–Muller to each pair of padded
    /// coordinates: `r = sqrt(-2 ln(1 - x1))`, `phi = 2 pi x2`, giving
    /// `r cos(phi)` and `r sin(phi)`.
    ///
    /// # Errors
    ///
    /// [`SequencerError::NotInitialised`] before any reset or load.
    pub fn gaussian_standard(&mut self) -> Result<DVector<f64>> {
        self.ensure_initialised()?;
        let point = self.advance();
        debug_assert!(point.len() % 2 == 0, "padded dimensionality must be even");

        let mut out = Vec::with_capacity(point.len());
        for pair in 0..point.len() / 2 {
            let x1 = point.unit(2 * pair);
            let x2 = point.unit(2 * pair + 1);
            let r = (-2.0 * (1.0 - x1).ln()).sqrt();
            let phi = 2.0 * PI * x2;
            out.push(r * phi.cos());
            out.push(r * phi.sin());
        }
        out.truncate(self.dimensionality());
        Ok(DVector::from_vec(out))
    }

    /// Gaussian vector `N(center, diag(std_dev^2))`.
    ///
    /// # Errors
    ///
    /// [`SequencerError::InvalidRange`] if `center` or `std_dev` does not have
    /// the sequencer dimensionality.
    pub fn gaussian_diagonal(&mut self, center: &[f64], std_dev: &[f64]) -> Result<DVector<f64>> {
        self.ensure_initialised()?;
        self.check_len("center", center.len())?;
        self.check_len("std_dev", std_dev.len())?;

        let z = self.gaussian_standard()?;
        let scaled = z.component_mul(&DVector::from_column_slice(std_dev));
        Ok(scaled + DVector::from_column_slice(center))
    }

    /// Gaussian vector `center + S z` with covariance `S Sᵀ`.
    ///
    /// `sqrt_covariance` is typically obtained from
    /// [`sqrt_covariance`](crate::covariance::sqrt_covariance).
    ///
    /// # Errors
    ///
    /// [`SequencerError::InvalidRange`] if `center` does not have the
    /// sequencer dimensionality or the matrix is not square of that size.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nalgebra::DMatrix;
    /// use qrand_core::covariance::sqrt_covariance;
    /// use qrand_core::rng::ScrambleRng;
    /// use qrand_core::QRandSequencer;
    ///
    /// let covariance = DMatrix::from_row_slice(2, 2, &[4.0, 1.0, 1.0, 2.0]);
    /// let root = sqrt_covariance(&covariance).unwrap();
    ///
    /// let mut seq = QRandSequencer::new(2, &mut ScrambleRng::from_seed(5)).unwrap();
    /// let sample = seq.gaussian_correlated(&[10.0, -3.0], &root).unwrap();
    /// assert_eq!(sample.len(), 2);
    /// ```
    pub fn gaussian_correlated(
        &mut self,
        center: &[f64],
        sqrt_covariance: &DMatrix<f64>,
    ) -> Result<DVector<f64>> {
        self.ensure_initialised()?;
        self.check_len("center", center.len())?;
        let dim = self.dimensionality();
        if sqrt_covariance.nrows() != dim || sqrt_covariance.ncols() != dim {
            return Err(SequencerError::invalid_range(format!(
                "covariance root is {}x{}, expected {}x{}",
                sqrt_covariance.nrows(),
                sqrt_covariance.ncols(),
                dim,
                dim
            )));
        }

        let z = self.gaussian_standard()?;
        Ok(DVector::from_column_slice(center) + sqrt_covariance * z)
    }
}

/// Maps `value / max_value` onto `[0, range)`.
fn scale_to_range(value: u64, max_value: u64, range: u64) -> u64 {
    if range < EXACT_INTEGER_RANGE {
        scale_exact(value, max_value, range)
    } else {
        scale_float(value, max_value, range)
    }
}

/// `value * range / max_value`, widened so the product cannot overflow.
fn scale_exact(value: u64, max_value: u64, range: u64) -> u64 {
    (u128::from(value) * u128::from(range) / u128::from(max_value)) as u64
}

/// `floor(value / max_value * range)`, kept below `range` against round-up.
fn scale_float(value: u64, max_value: u64, range: u64) -> u64 {
    let offset = (value as f64 / max_value as f64 * range as f64).floor() as u64;
    offset.min(range - 1)
}
