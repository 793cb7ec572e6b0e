// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Unitary-state simulator boundary.
//!
//! The coherent-state builder delegates raw amplitude preparation to an
//! external statevector simulator. The simulator is injected as a trait
//! object so tests can substitute a mock and so the backend choice never
//! lives in process-wide state.

use ndarray::Array1;
use num_complex::Complex64;

use crate::error::{Error, Result};

/// Single-qubit rotation parameters in the u(θ, φ, λ) convention.
///
/// Applied to |0⟩ this prepares cos(θ/2)|0⟩ + e^{iφ} sin(θ/2)|1⟩; λ only
/// matters for non-trivial input states and is carried for interface
/// completeness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QubitRotation {
    pub theta: f64,
    pub phi: f64,
    pub lambda: f64,
}

/// A statevector backend preparing product states from per-qubit rotations.
///
/// Implementations return a normalized amplitude vector of length 2^L in
/// their own basis-index convention: bit i of the index is the state of
/// qubit i, with `1` meaning the rotated-into state. The caller is
/// responsible for any convention remapping.
pub trait StateSimulator {
    /// Prepare the product state where qubit i is rotated by `rotations[i]`
    /// from |0⟩.
    fn product_state(&self, rotations: &[QubitRotation]) -> Result<Array1<Complex64>>;
}

/// Dense product-state simulator.
///
/// Computes amplitudes directly from the tensor-product structure: the
/// amplitude at index n is the product over qubits of the single-qubit
/// amplitude selected by bit i of n.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenseSimulator;

impl StateSimulator for DenseSimulator {
    fn product_state(&self, rotations: &[QubitRotation]) -> Result<Array1<Complex64>> {
        if rotations.is_empty() {
            return Err(Error::InvalidInput(
                "product state needs at least one qubit".into(),
            ));
        }

        // Single-qubit amplitude pairs (|0⟩ component, |1⟩ component).
        let pairs: Vec<[Complex64; 2]> = rotations
            .iter()
            .map(|r| {
                let half = r.theta / 2.0;
                [
                    Complex64::new(half.cos(), 0.0),
                    Complex64::from_polar(half.sin(), r.phi),
                ]
            })
            .collect();

        let dim = 1usize << rotations.len();
        let mut amplitudes = Array1::zeros(dim);
        for n in 0..dim {
            let mut amp = Complex64::new(1.0, 0.0);
            for (i, pair) in pairs.iter().enumerate() {
                amp *= pair[(n >> i) & 1];
            }
            amplitudes[n] = amp;
        }

        Ok(amplitudes)
    }
}
