// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Overlap optimizer implementation.

use ndarray::{Array1, Array2};
use num_complex::Complex64;
use rand::Rng;

use super::types::OptimizerConfig;
use crate::error::{Error, Result};

/// A single mutation of the cached superposition buffer.
///
/// The two constructors make the illegal "index without delta" call
/// unrepresentable; the buffer and the coefficient vector change together in
/// both cases.
#[derive(Debug, Clone, Copy)]
enum BufferUpdate {
    /// Recompute the buffer from scratch as Σ cᵢ·basisᵢ.
    FullRebuild,
    /// Add `delta` to coefficient `index` and fold `delta·basis[index]`
    /// into the buffer in O(D).
    Incremental { index: usize, delta: Complex64 },
}

/// Gradient-descent engine minimizing the overlap distance between a
/// superposition of basis vectors and a fixed target state.
///
/// The optimizer owns its coefficient vector and a cached superposition
/// buffer; both are mutated in place by every [`step`](Self::step). The
/// gradient is estimated by forward finite differences using incremental
/// single-coefficient perturbations, so each trial costs O(D) instead of a
/// full O(K·D) rebuild.
#[derive(Debug)]
pub struct OverlapOptimizer {
    basis: Array2<Complex64>,
    target: Array1<Complex64>,
    config: OptimizerConfig,
    coeff: Array1<Complex64>,
    buffer: Array1<Complex64>,
    norm: f64,
}

impl OverlapOptimizer {
    /// Create an optimizer over a K×D basis aiming at a D-dimensional target.
    ///
    /// When `initial` is absent, the real and imaginary coefficient parts are
    /// drawn independently and uniformly from [0, 1) using the injected
    /// generator. The superposition buffer is built once before returning.
    ///
    /// # Errors
    /// - `Error::InvalidArgument` for a non-finite or non-positive γ or δ
    /// - `Error::InvalidInput` for an empty basis
    /// - `Error::DimensionMismatch` when the target length differs from the
    ///   basis row length, or a supplied `initial` length differs from K
    pub fn new<R: Rng + ?Sized>(
        basis: Array2<Complex64>,
        config: OptimizerConfig,
        target: Array1<Complex64>,
        initial: Option<Array1<Complex64>>,
        rng: &mut R,
    ) -> Result<Self> {
        config.validate()?;

        let total_vectors = basis.nrows();
        let vector_size = basis.ncols();
        if total_vectors == 0 || vector_size == 0 {
            return Err(Error::InvalidInput("basis must be non-empty".into()));
        }
        if target.len() != vector_size {
            return Err(Error::DimensionMismatch {
                expected: vector_size,
                actual: target.len(),
            });
        }

        let coeff = match initial {
            Some(c) => {
                if c.len() != total_vectors {
                    return Err(Error::DimensionMismatch {
                        expected: total_vectors,
                        actual: c.len(),
                    });
                }
                c
            }
            None => Array1::from_shape_fn(total_vectors, |_| {
                Complex64::new(rng.gen(), rng.gen())
            }),
        };

        let mut optimizer = Self {
            basis,
            target,
            config,
            coeff,
            buffer: Array1::zeros(vector_size),
            norm: 0.0,
        };
        optimizer.update_superposition(BufferUpdate::FullRebuild);
        Ok(optimizer)
    }

    /// Current value of the objective: 1 − |⟨target, buffer/norm⟩|.
    ///
    /// Range [0, 2]; 0 means the normalized superposition matches the target
    /// up to a global phase.
    pub fn overlap(&self) -> f64 {
        let inner: Complex64 = self
            .target
            .iter()
            .zip(self.buffer.iter())
            .map(|(t, b)| t.conj() * b)
            .sum();
        1.0 - inner.norm() / self.norm
    }

    /// A copy of the current coefficient vector.
    pub fn coefficients(&self) -> Array1<Complex64> {
        self.coeff.clone()
    }

    /// The normalized current superposition, as a fresh copy.
    pub fn get_approximation(&self) -> Array1<Complex64> {
        self.buffer.mapv(|c| c / self.norm)
    }

    /// One fixed-step descent update: coefficients −= γ·gradient, then a
    /// full superposition rebuild.
    pub fn step(&mut self) {
        let gradient = self.gradient();
        self.coeff
            .scaled_add(Complex64::new(-self.config.gamma, 0.0), &gradient);
        self.update_superposition(BufferUpdate::FullRebuild);
    }

    /// Repeat [`step`](Self::step) exactly `steps` times; no early stopping.
    pub fn run(&mut self, steps: usize) {
        for _ in 0..steps {
            self.step();
        }
    }

    fn update_superposition(&mut self, update: BufferUpdate) {
        match update {
            BufferUpdate::FullRebuild => {
                self.buffer.fill(Complex64::new(0.0, 0.0));
                for (c, vec) in self.coeff.iter().zip(self.basis.rows()) {
                    self.buffer.scaled_add(*c, &vec);
                }
            }
            BufferUpdate::Incremental { index, delta } => {
                self.buffer.scaled_add(delta, &self.basis.row(index));
                self.coeff[index] += delta;
            }
        }

        self.norm = self.buffer.iter().map(|c| c.norm_sqr()).sum::<f64>().sqrt();
    }

    /// Forward-difference gradient of the overlap w.r.t. each coefficient's
    /// real and imaginary part.
    ///
    /// Per coefficient the sequence is: perturb by +δ, measure; move to
    /// −δ+δi (drops the real probe, adds the imaginary one), measure;
    /// perturb by −δi to restore the exact pre-gradient state. The restore
    /// must complete before the next index is touched — every later trial
    /// assumes the buffer matches the unperturbed coefficients.
    fn gradient(&mut self) -> Array1<Complex64> {
        let delta = self.config.delta;
        let mut result = Array1::zeros(self.coeff.len());

        let e0 = self.overlap();

        for idx in 0..self.coeff.len() {
            self.update_superposition(BufferUpdate::Incremental {
                index: idx,
                delta: Complex64::new(delta, 0.0),
            });
            let e1 = self.overlap();
            let d_re = (e1 - e0) / delta;

            self.update_superposition(BufferUpdate::Incremental {
                index: idx,
                delta: Complex64::new(-delta, delta),
            });
            let e1 = self.overlap();
            let d_im = (e1 - e0) / delta;

            self.update_superposition(BufferUpdate::Incremental {
                index: idx,
                delta: Complex64::new(0.0, -delta),
            });

            result[idx] = Complex64::new(d_re, d_im);
        }

        result
    }
}
