// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Coherent-state construction from classical spins.
//!
//! A classical spin configuration — one unit 3-vector per lattice site —
//! defines a product state where each site's qubit points along its spin
//! direction. The raw amplitudes come from a [`StateSimulator`]; the
//! simulator's basis convention maps bit value 1 to the rotated-into state,
//! the inverse of this crate's spin-up convention, so every basis index is
//! bit-inverted on the way out.

pub mod simulator;

use ndarray::{Array1, ArrayView2};
use num_complex::Complex64;

use crate::error::{Error, Result};

pub use simulator::{DenseSimulator, QubitRotation, StateSimulator};

/// Build the normalized coherent state for a classical spin configuration.
///
/// `spins` is an L×3 array of unit vectors (sx, sy, sz). For each site the
/// polar angle is θ = arccos(sz) and the azimuth φ = atan2(sy, sx), except
/// that φ is pinned to 0 when θ ≤ `tolerance` (the azimuth is undefined at
/// the poles). The resulting per-site rotations are delegated to
/// `simulator` and the returned amplitudes are remapped into this crate's
/// bit convention without renormalization.
pub fn coherent_state<S: StateSimulator + ?Sized>(
    spins: ArrayView2<'_, f64>,
    tolerance: f64,
    simulator: &S,
) -> Result<Array1<Complex64>> {
    if spins.ncols() != 3 {
        return Err(Error::InvalidInput(format!(
            "spins must have 3 components per site, got {}",
            spins.ncols()
        )));
    }

    let rotations: Vec<QubitRotation> = spins
        .rows()
        .into_iter()
        .map(|s| {
            let theta = s[2].acos();
            let phi = if theta > tolerance {
                s[1].atan2(s[0])
            } else {
                0.0
            };
            QubitRotation {
                theta,
                phi,
                lambda: 0.0,
            }
        })
        .collect();

    let raw = simulator.product_state(&rotations)?;
    remap_bit_convention(&raw)
}

/// Remap a state vector between the simulator's bit convention and this
/// crate's.
///
/// The simulator assigns bit value 1 to the rotated-into (spin-down) state;
/// this crate assigns bit value 1 to spin-up. The destination index is the
/// source index with every bit flipped; amplitudes are copied unchanged.
/// The map is an involution: applying it twice restores the input.
pub fn remap_bit_convention(vec: &Array1<Complex64>) -> Result<Array1<Complex64>> {
    let dim = vec.len();
    if dim == 0 || !dim.is_power_of_two() {
        return Err(Error::InvalidInput(format!(
            "state dimension must be a power of two, got {}",
            dim
        )));
    }

    let mask = dim - 1;
    let mut out = Array1::zeros(dim);
    for (n, &amp) in vec.iter().enumerate() {
        out[n ^ mask] = amp;
    }
    Ok(out)
}
