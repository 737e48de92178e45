//! Covariance square roots for correlated Gaussian sampling.
//!
//! Given a symmetric positive semi-definite covariance `C = Z Λ Zᵀ`, the
//! matrix `S = Z Λ^½` satisfies `S Sᵀ = C`. Feeding `S` to
//! [`QRandSequencer::gaussian_correlated`](crate::QRandSequencer::gaussian_correlated)
//! turns independent normals into samples with covariance `C`.

use nalgebra::DMatrix;

use crate::error::{Result, SequencerError};

/// Relative tolerance for symmetry and for round-off negative eigenvalues.
const TOLERANCE: f64 = 1e-10;

/// Computes `S = Z Λ^½` from the symmetric eigen-decomposition of `covariance`.
///
/// Eigenvalues that are negative only through round-off (within
/// `1e-10 * max |λ|`) are clamped to zero.
///
/// # Errors
///
/// [`SequencerError::InvalidCovariance`] if the matrix is empty, not square,
/// not symmetric, contains non-finite entries or has a clearly negative
/// eigenvalue.
///
/// # Examples
///
/// ```rust
/// use approx::assert_relative_eq;
/// use nalgebra::DMatrix;
/// use qrand_core::covariance::sqrt_covariance;
///
/// let covariance = DMatrix::from_row_slice(2, 2, &[2.0, 0.5, 0.5, 1.0]);
/// let root = sqrt_covariance(&covariance).unwrap();
/// assert_relative_eq!(&root * root.transpose(), covariance, epsilon = 1e-12);
/// ```
pub fn sqrt_covariance(covariance: &DMatrix<f64>) -> Result<DMatrix<f64>> {
    let (rows, cols) = covariance.shape();
    if rows == 0 || rows != cols {
        return Err(SequencerError::invalid_covariance(format!(
            "expected a non-empty square matrix, got {}x{}",
            rows, cols
        )));
    }
    if covariance.iter().any(|x| !x.is_finite()) {
        return Err(SequencerError::invalid_covariance(
            "matrix contains non-finite entries",
        ));
    }

    let magnitude = covariance.amax().max(1.0);
    for i in 0..rows {
        for j in (i + 1)..cols {
            if (covariance[(i, j)] - covariance[(j, i)]).abs() > TOLERANCE * magnitude {
                return Err(SequencerError::invalid_covariance(format!(
                    "matrix is not symmetric at ({}, {})",
                    i, j
                )));
            }
        }
    }

    let eigen = covariance.clone().symmetric_eigen();
    let floor = -TOLERANCE * eigen.eigenvalues.amax().max(f64::MIN_POSITIVE);
    let mut root = eigen.eigenvectors;
    for (j, &lambda) in eigen.eigenvalues.iter().enumerate() {
        if lambda < floor {
            return Err(SequencerError::invalid_covariance(format!(
                "eigenvalue {} is negative ({})",
                j, lambda
            )));
        }
        let mut column = root.column_mut(j);
        column *= lambda.max(0.0).sqrt();
    }
    Ok(root)
}
