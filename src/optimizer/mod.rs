// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Overlap minimization by finite-difference gradient descent.
//!
//! Approximates a fixed target state as a linear combination of a selected
//! eigenvector basis by minimizing 1 − |⟨target, approximation⟩| over the
//! complex coefficients.
//!
//! # Architecture
//!
//! - [`OptimizerConfig`]: step size γ and finite-difference step δ
//! - [`OverlapOptimizer`]: coefficient vector, cached superposition buffer,
//!   gradient estimation, and the descent loop
//!
//! The gradient is estimated one coefficient at a time with an incremental
//! perturbation of the cached buffer (O(D) per trial). Each perturbation is
//! undone before the next coefficient is probed, so the buffer always equals
//! the current coefficient superposition between trials.

pub mod descent;
pub mod types;

pub use descent::OverlapOptimizer;
pub use types::OptimizerConfig;
