// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Coherent-state overlap optimization.
//!
//! This crate approximates a target quantum state — a product (coherent)
//! state built from classical unit-vector spins — as a linear combination of
//! a contiguous block of Hamiltonian eigenvectors, selected by energy-level
//! degeneracy. The approximation is found by fixed-step gradient descent on
//! the overlap distance 1 − |⟨target, approximation⟩| with numerically
//! estimated gradients.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────┐      ┌──────────────────────┐
//! │   spectrum    │      │      coherent        │
//! │ level groups, │      │ spins → rotations →  │
//! │ basis select  │      │ simulator → remap    │
//! └───────┬───────┘      └──────────┬───────────┘
//!         │ basis (K×D)             │ target (D)
//!         └──────────┬──────────────┘
//!                    ▼
//!          ┌──────────────────┐      ┌──────────────┐
//!          │    optimizer     │─────▶│     spin     │
//!          │ gradient descent │ state│ reconstruct  │
//!          └──────────────────┘      └──────────────┘
//! ```
//!
//! # Modules
//!
//! - [`spectrum`]: Degeneracy grouping and eigenbasis selection
//! - [`coherent`]: Coherent-state construction and the simulator boundary
//! - [`spin`]: Per-site spin expectation values and spin reconstruction
//! - [`optimizer`]: The overlap-distance gradient-descent engine
//! - [`store`]: JSON array-store adapter for inputs and results
//! - [`error`]: Error types

pub mod coherent;
pub mod error;
pub mod optimizer;
pub mod spectrum;
pub mod spin;
pub mod store;

pub use coherent::{coherent_state, DenseSimulator, StateSimulator};
pub use error::{Error, Result};
pub use optimizer::{OptimizerConfig, OverlapOptimizer};
pub use spectrum::Eigenbasis;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
