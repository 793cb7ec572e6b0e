// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Degeneracy grouping and basis selection over a stored eigenbasis.
//!
//! Eigenvalues arrive sorted in non-decreasing order; values that agree
//! within a tolerance form one energy level. Selecting N levels means
//! selecting the sum of the first N level multiplicities worth of
//! eigenvectors, so a degenerate ground state counts as one level but
//! contributes several basis vectors.

use ndarray::{s, Array1, Array2};
use num_complex::Complex64;

use crate::error::{Error, Result};

/// Partition a non-decreasing eigenvalue sequence into degeneracy groups.
///
/// Returns the multiplicity of each level in order. Two consecutive
/// eigenvalues belong to the same level when their distance from the
/// level's first element is at most `tolerance`. The terminal group always
/// includes the unbroken tail of the sequence.
pub fn level_multiplicities(eigenvalues: &[f64], tolerance: f64) -> Result<Vec<usize>> {
    if eigenvalues.is_empty() {
        return Err(Error::InvalidInput("empty eigenvalue sequence".into()));
    }
    if tolerance.is_nan() || tolerance < 0.0 {
        return Err(Error::InvalidInput(format!(
            "tolerance must be non-negative, got {}",
            tolerance
        )));
    }
    if let Some(v) = eigenvalues.iter().find(|v| !v.is_finite()) {
        return Err(Error::InvalidInput(format!(
            "non-finite eigenvalue {}",
            v
        )));
    }

    let mut mults = Vec::new();
    let mut start = 0;
    while start < eigenvalues.len() {
        let mut mult = 0;
        for &v in &eigenvalues[start..] {
            if (eigenvalues[start] - v).abs() > tolerance {
                break;
            }
            mult += 1;
        }
        mults.push(mult);
        start += mult;
    }

    Ok(mults)
}

/// An eigenvalue/eigenvector pair set, immutable once loaded.
///
/// Eigenvectors are stored as rows of a K×D complex matrix, ordered by
/// eigenvalue.
#[derive(Debug, Clone)]
pub struct Eigenbasis {
    eigenvalues: Array1<f64>,
    eigenvectors: Array2<Complex64>,
}

impl Eigenbasis {
    /// Build an eigenbasis from parallel eigenvalue/eigenvector arrays.
    ///
    /// The number of eigenvalues must equal the number of eigenvector rows.
    pub fn new(eigenvalues: Array1<f64>, eigenvectors: Array2<Complex64>) -> Result<Self> {
        if eigenvalues.len() != eigenvectors.nrows() {
            return Err(Error::DimensionMismatch {
                expected: eigenvalues.len(),
                actual: eigenvectors.nrows(),
            });
        }
        Ok(Self {
            eigenvalues,
            eigenvectors,
        })
    }

    pub fn eigenvalues(&self) -> &Array1<f64> {
        &self.eigenvalues
    }

    pub fn eigenvectors(&self) -> &Array2<Complex64> {
        &self.eigenvectors
    }

    /// Hilbert-space dimension D (row length of the eigenvector matrix).
    pub fn dimension(&self) -> usize {
        self.eigenvectors.ncols()
    }

    /// Select the eigenvectors spanning the first `levels` energy levels.
    ///
    /// Computes the degeneracy grouping of the stored eigenvalues, sums the
    /// first `levels` multiplicities to obtain the basis size K, and returns
    /// the first K eigenvector rows together with K.
    ///
    /// # Errors
    /// `Error::InvalidInput` if `levels` is zero or exceeds the number of
    /// available groups.
    pub fn select_levels(&self, levels: usize, tolerance: f64) -> Result<(Array2<Complex64>, usize)> {
        if levels == 0 {
            return Err(Error::InvalidInput("level count must be at least 1".into()));
        }

        let mults = level_multiplicities(&self.eigenvalues.to_vec(), tolerance)?;
        if levels > mults.len() {
            return Err(Error::InvalidInput(format!(
                "requested {} levels but only {} are available",
                levels,
                mults.len()
            )));
        }

        let total: usize = mults[..levels].iter().sum();
        Ok((self.eigenvectors.slice(s![..total, ..]).to_owned(), total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr1;

    fn basis_of(eigenvalues: &[f64], dim: usize) -> Eigenbasis {
        // Row i gets amplitude 1 at column i so selections are recognizable.
        let k = eigenvalues.len();
        let mut vecs = Array2::zeros((k, dim));
        for i in 0..k {
            vecs[[i, i % dim]] = Complex64::new(1.0, 0.0);
        }
        Eigenbasis::new(arr1(eigenvalues), vecs).unwrap()
    }

    #[test]
    fn test_multiplicities_empty_fails() {
        let err = level_multiplicities(&[], 1e-9).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_multiplicities_single_value() {
        assert_eq!(level_multiplicities(&[0.5], 1e-9).unwrap(), vec![1]);
    }

    #[test]
    fn test_multiplicities_degenerate_ground_state() {
        let mults = level_multiplicities(&[0.0, 0.0, 1.0], 1e-9).unwrap();
        assert_eq!(mults, vec![2, 1]);
    }

    #[test]
    fn test_multiplicities_all_degenerate() {
        let mults = level_multiplicities(&[2.0, 2.0, 2.0, 2.0], 1e-9).unwrap();
        assert_eq!(mults, vec![4]);
    }

    #[test]
    fn test_multiplicities_terminal_group_includes_tail() {
        // The last group breaks nowhere; its multiplicity is the tail length.
        let mults = level_multiplicities(&[0.0, 1.0, 1.0, 1.0], 1e-9).unwrap();
        assert_eq!(mults, vec![1, 3]);
    }

    #[test]
    fn test_multiplicities_sum_equals_length() {
        let vals = [0.0, 0.0, 0.1, 0.1000000001, 0.5, 1.0, 1.0, 2.5];
        for &tol in &[0.0, 1e-9, 1e-3, 0.2, 10.0] {
            let mults = level_multiplicities(&vals, tol).unwrap();
            let total: usize = mults.iter().sum();
            assert_eq!(total, vals.len(), "tolerance {}", tol);
        }
    }

    #[test]
    fn test_multiplicities_within_tolerance_same_group() {
        let mults = level_multiplicities(&[1.0, 1.0 + 1e-10, 1.1], 1e-9).unwrap();
        assert_eq!(mults, vec![2, 1]);
    }

    #[test]
    fn test_multiplicities_zero_tolerance_splits_everything() {
        let mults = level_multiplicities(&[0.0, 1e-15, 2e-15], 0.0).unwrap();
        assert_eq!(mults, vec![1, 1, 1]);
    }

    #[test]
    fn test_multiplicities_rejects_negative_tolerance() {
        assert!(level_multiplicities(&[0.0, 1.0], -1e-9).is_err());
    }

    #[test]
    fn test_multiplicities_rejects_non_finite_values() {
        assert!(level_multiplicities(&[0.0, f64::NAN], 1e-9).is_err());
        assert!(level_multiplicities(&[0.0, f64::INFINITY], 1e-9).is_err());
    }

    #[test]
    fn test_eigenbasis_length_mismatch() {
        let vals = arr1(&[0.0, 1.0]);
        let vecs = Array2::<Complex64>::zeros((3, 4));
        let err = Eigenbasis::new(vals, vecs).unwrap_err();
        assert!(matches!(
            err,
            Error::DimensionMismatch {
                expected: 2,
                actual: 3
            }
        ));
    }

    #[test]
    fn test_select_levels_degenerate_scenario() {
        // eigenvalues [0, 0, 1]: 1 level -> 2 vectors, 2 levels -> 3 vectors.
        let basis = basis_of(&[0.0, 0.0, 1.0], 4);

        let (vecs, k) = basis.select_levels(1, 1e-9).unwrap();
        assert_eq!(k, 2);
        assert_eq!(vecs.nrows(), 2);

        let (vecs, k) = basis.select_levels(2, 1e-9).unwrap();
        assert_eq!(k, 3);
        assert_eq!(vecs.nrows(), 3);
    }

    #[test]
    fn test_select_levels_returns_leading_rows() {
        let basis = basis_of(&[0.0, 0.0, 1.0], 4);
        let (vecs, _) = basis.select_levels(1, 1e-9).unwrap();
        assert_eq!(vecs[[0, 0]], Complex64::new(1.0, 0.0));
        assert_eq!(vecs[[1, 1]], Complex64::new(1.0, 0.0));
    }

    #[test]
    fn test_select_levels_zero_fails() {
        let basis = basis_of(&[0.0, 1.0], 2);
        assert!(matches!(
            basis.select_levels(0, 1e-9),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_select_levels_too_many_fails() {
        let basis = basis_of(&[0.0, 0.0, 1.0], 4);
        assert!(matches!(
            basis.select_levels(3, 1e-9),
            Err(Error::InvalidInput(_))
        ));
    }
}
