//! Parallel batch generation.
//!
//! A batch of `n` points is split into contiguous chunks. Each rayon worker
//! clones the sequencer, skips to the start of its chunk and samples it on its
//! own instance, so no sequencer is ever shared between threads. The output is
//! identical to drawing the `n` points sequentially, and the caller's
//! sequencer ends up positioned right after the batch.

use nalgebra::DVector;
use rayon::prelude::*;

use crate::error::{Result, SequencerError};
use crate::sequencer::QRandSequencer;

/// Minimum number of points handed to one worker.
const MIN_CHUNK: usize = 256;

/// Samples `n_points` points in parallel with `sample`, in sequence order.
///
/// `sample` must advance its sequencer by exactly one point per call, which
/// holds for every distribution adapter of [`QRandSequencer`].
///
/// # Errors
///
/// Propagates the first error returned by `sample`; the caller's sequencer is
/// not advanced in that case.
pub fn par_generate<T, F>(
    sequencer: &mut QRandSequencer,
    n_points: usize,
    sample: F,
) -> Result<Vec<T>>
where
    T: Send,
    F: Fn(&mut QRandSequencer) -> Result<T> + Sync,
{
    sequencer.ensure_initialised()?;
    if n_points == 0 {
        return Ok(Vec::new());
    }

    let chunk = (n_points / rayon::current_num_threads()).max(MIN_CHUNK);
    let starts: Vec<usize> = (0..n_points).step_by(chunk).collect();
    let template = &*sequencer;

    let chunks: Vec<Vec<T>> = starts
        .par_iter()
        .map(|&start| {
            let end = (start + chunk).min(n_points);
            let mut local = template.clone();
            local.skip(start as u64);
            (start..end)
                .map(|_| sample(&mut local))
                .collect::<Result<Vec<T>>>()
        })
        .collect::<Result<_>>()?;

    sequencer.skip(n_points as u64);
    Ok(chunks.into_iter().flatten().collect())
}

/// Draws `n_points` uniform points on `[min, max)^d` in parallel.
///
/// # Examples
///
/// ```rust
/// use qrand_core::batch::uniform_batch;
/// use qrand_core::rng::ScrambleRng;
/// use qrand_core::QRandSequencer;
///
/// let mut seq = QRandSequencer::new(2, &mut ScrambleRng::from_seed(3)).unwrap();
/// let points = uniform_batch(&mut seq, 1_000, 0.0, 1.0).unwrap();
/// assert_eq!(points.len(), 1_000);
/// assert_eq!(seq.count(), 1_000);
/// ```
pub fn uniform_batch(
    sequencer: &mut QRandSequencer,
    n_points: usize,
    min: f64,
    max: f64,
) -> Result<Vec<Vec<f64>>> {
    if !(min < max) {
        return Err(SequencerError::invalid_range(format!(
            "min {} must be less than max {}",
            min, max
        )));
    }
    par_generate(sequencer, n_points, |seq| seq.uniform_vector(min, max))
}

/// Draws `n_points` standard normal vectors in parallel.
pub fn gaussian_batch(
    sequencer: &mut QRandSequencer,
    n_points: usize,
) -> Result<Vec<DVector<f64>>> {
    par_generate(sequencer, n_points, QRandSequencer::gaussian_standard)
}
