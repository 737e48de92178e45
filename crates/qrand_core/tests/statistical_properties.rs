//! Statistical behaviour of the derived distributions.
//!
//! Quasi-random points are deterministic, so these checks use fixed seeds and
//! tolerances well inside what a scrambled Halton sequence achieves.

use approx::assert_relative_eq;
use nalgebra::{DMatrix, DVector};
use qrand_core::batch::{gaussian_batch, par_generate, uniform_batch};
use qrand_core::covariance::sqrt_covariance;
use qrand_core::rng::ScrambleRng;
use qrand_core::QRandSequencer;

fn seeded(dimensionality: usize, seed: u64) -> QRandSequencer {
    QRandSequencer::new(dimensionality, &mut ScrambleRng::from_seed(seed)).unwrap()
}

/// Each tenth of every coordinate receives close to its share of points.
#[test]
fn test_uniform_bin_coverage() {
    let mut seq = seeded(6, 99);
    let n = 10_000;
    let points = uniform_batch(&mut seq, n, 0.0, 1.0).unwrap();

    for d in 0..6 {
        let mut bins = [0usize; 10];
        for p in &points {
            bins[(p[d] * 10.0) as usize] += 1;
        }
        for &hits in &bins {
            assert!((940..=1060).contains(&hits), "coordinate {} bin count {}", d, hits);
        }
    }
}

/// Per-coordinate means of uniform samples converge quickly.
#[test]
fn test_uniform_coordinate_means() {
    let mut seq = seeded(16, 5);
    let n = 16_384;
    let points = uniform_batch(&mut seq, n, -1.0, 1.0).unwrap();
    for d in 0..16 {
        let mean = points.iter().map(|p| p[d]).sum::<f64>() / n as f64;
        assert!(mean.abs() < 0.025, "coordinate {} mean {}", d, mean);
    }
}

/// Dice rolls hit every face evenly.
#[test]
fn test_integer_faces_even() {
    let mut seq = seeded(3, 21);
    let n = 6_000;
    let rolls = par_generate(&mut seq, n, |s| s.integer_vector(1, 7)).unwrap();
    for d in 0..3 {
        let mut faces = [0usize; 6];
        for roll in &rolls {
            faces[(roll[d] - 1) as usize] += 1;
        }
        for &count in &faces {
            assert!((900..=1100).contains(&count), "face count {}", count);
        }
    }
}

/// Standard normal batches have zero mean, unit variance and no correlation.
#[test]
fn test_gaussian_batch_moments() {
    let mut seq = seeded(4, 2718);
    let n = 20_000;
    let samples = gaussian_batch(&mut seq, n).unwrap();

    let mean = samples.iter().fold(DVector::zeros(4), |acc, s| acc + s) / n as f64;
    for m in mean.iter() {
        assert!(m.abs() < 0.04, "mean {}", m);
    }

    let cov = sample_covariance(&samples, &mean);
    for i in 0..4 {
        for j in 0..4 {
            let target = if i == j { 1.0 } else { 0.0 };
            assert!((cov[(i, j)] - target).abs() < 0.05, "cov[{},{}] = {}", i, j, cov[(i, j)]);
        }
    }
}

/// Correlated draws reproduce the target covariance.
#[test]
fn test_correlated_covariance_estimate() {
    let target = DMatrix::from_row_slice(3, 3, &[4.0, 1.2, -0.8, 1.2, 1.0, 0.3, -0.8, 0.3, 2.25]);
    let root = sqrt_covariance(&target).unwrap();
    assert_relative_eq!(&root * root.transpose(), target.clone(), epsilon = 1e-10);

    let center = [10.0, -5.0, 0.5];
    let mut seq = seeded(3, 31);
    let n = 20_000;
    let samples = par_generate(&mut seq, n, |s| s.gaussian_correlated(&center, &root)).unwrap();

    let mean = samples.iter().fold(DVector::zeros(3), |acc, s| acc + s) / n as f64;
    for (m, c) in mean.iter().zip(center) {
        assert!((m - c).abs() < 0.08, "mean {} vs {}", m, c);
    }
    let cov = sample_covariance(&samples, &mean);
    for i in 0..3 {
        for j in 0..3 {
            let tolerance = 0.06 * (target[(i, i)] * target[(j, j)]).sqrt() + 0.02;
            assert!(
                (cov[(i, j)] - target[(i, j)]).abs() < tolerance,
                "cov[{},{}] = {} vs {}",
                i,
                j,
                cov[(i, j)],
                target[(i, j)]
            );
        }
    }
}

fn sample_covariance(samples: &[DVector<f64>], mean: &DVector<f64>) -> DMatrix<f64> {
    let dim = mean.len();
    let mut cov = DMatrix::zeros(dim, dim);
    for s in samples {
        let centred = s - mean;
        cov += &centred * centred.transpose();
    }
    cov / (samples.len() - 1) as f64
}
