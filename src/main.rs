// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Overlap optimization CLI.
//!
//! # Usage
//!
//! ```bash
//! # Approximate a classical spin configuration in a truncated eigenbasis
//! qubit-os-overlap minimize spins.json eigen.json --states 2 --steps 100
//!
//! # Reconstruct classical spins from a stored state vector
//! qubit-os-overlap reconstruct statevector_approximation.json spins.json
//!
//! # Print the error trajectory of a finished run
//! qubit-os-overlap errors coefficients.json
//! ```

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use ndarray::Array2;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use qubit_os_overlap::coherent::{coherent_state, DenseSimulator};
use qubit_os_overlap::optimizer::{OptimizerConfig, OverlapOptimizer};
use qubit_os_overlap::spin::reconstruct_spins;
use qubit_os_overlap::store::{
    self, ApproximationDocument, ComplexMatrix, ComplexVector, ResultsDocument, RunParameters,
    SpinDocument,
};
use qubit_os_overlap::{Result, VERSION};

/// Coherent-state overlap optimization
#[derive(Parser)]
#[command(name = "qubit-os-overlap")]
#[command(author = "QubitOS Contributors")]
#[command(version = VERSION)]
#[command(about = "Approximate classical-spin coherent states in a truncated eigenbasis")]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the overlap minimization
    Minimize {
        /// Path to the file with the classical spin configuration defining
        /// the target coherent state
        spins: PathBuf,

        /// Path to the file with dense eigenvectors
        eigenvectors: PathBuf,

        /// Total states with different energy involved in the run (each
        /// state may be degenerate)
        #[arg(long, default_value_t = 2)]
        states: usize,

        /// Total number of gradient descent steps
        #[arg(long, default_value_t = 100)]
        steps: usize,

        /// Gradient descent step value
        #[arg(long, default_value_t = 0.1)]
        gamma: f64,

        /// Finite difference approximation step for the derivative
        #[arg(long, default_value_t = 1e-3)]
        delta: f64,

        /// Path to a previous run's results to seed the coefficients
        #[arg(long)]
        start: Option<PathBuf>,

        /// Tolerance for floating point comparison
        #[arg(long, default_value_t = 1e-9)]
        tolerance: f64,

        /// Root of the eigenvector datasets in the input file
        #[arg(long, default_value = "")]
        root: String,
    },

    /// Reconstruct classical spins from a stored state vector
    Reconstruct {
        /// Path to the file with eigenvectors
        vec: PathBuf,

        /// Path to the file with classical site coordinates
        coordinates: PathBuf,

        /// Index of the state to use (should be non-degenerate)
        #[arg(long, default_value_t = 0)]
        state: usize,

        /// Root of the eigenvectors dataset in the input file
        #[arg(long, default_value = "")]
        root: String,

        /// Tolerance for floating point comparison
        #[arg(long, default_value_t = 1e-9)]
        tolerance: f64,
    },

    /// Print the error trajectory of a results file
    Errors {
        /// Path to the file with minimization results
        results: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_level);

    match cli.command {
        Commands::Minimize {
            spins,
            eigenvectors,
            states,
            steps,
            gamma,
            delta,
            start,
            tolerance,
            root,
        } => minimize(
            &spins,
            &eigenvectors,
            states,
            steps,
            OptimizerConfig { gamma, delta },
            start.as_deref(),
            tolerance,
            &root,
        ),

        Commands::Reconstruct {
            vec,
            coordinates,
            state,
            root,
            tolerance,
        } => reconstruct(&vec, &coordinates, state, &root, tolerance),

        Commands::Errors { results } => {
            let results = ResultsDocument::load(&results)?;
            for (i, e) in results.error_evolution.iter().enumerate() {
                println!("{} {}", i, e);
            }
            Ok(())
        }
    }
}

/// Initialize logging with tracing.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .init();
}

#[allow(clippy::too_many_arguments)]
fn minimize(
    spins_path: &Path,
    eigenvectors_path: &Path,
    states: usize,
    steps: usize,
    config: OptimizerConfig,
    start: Option<&Path>,
    tolerance: f64,
    root: &str,
) -> Result<()> {
    if steps == 0 {
        return Ok(());
    }

    // Inspect the level multiplicities and read the matching block of vectors.
    let basis = store::load_eigenbasis(eigenvectors_path, root)?;
    let (vectors, total_vectors) = basis.select_levels(states, tolerance)?;
    println!("Total vectors involved: {}", total_vectors);

    // The target state vector is constructed from the classical spins.
    let spin_doc = SpinDocument::load(spins_path)?;
    let target = coherent_state(spin_doc.spins_array().view(), tolerance, &DenseSimulator)?;

    // Seed coefficients from a previous run if given.
    let mut initial = None;
    if let Some(start_path) = start {
        let previous = ResultsDocument::load(start_path)?;
        if (previous.parameters.gamma - config.gamma).abs() > tolerance {
            warn!(
                old = previous.parameters.gamma,
                new = config.gamma,
                "gamma was changed between runs"
            );
        }
        if (previous.parameters.delta - config.delta).abs() > tolerance {
            warn!(
                old = previous.parameters.delta,
                new = config.delta,
                "delta was changed between runs"
            );
        }
        initial = Some(previous.coefficients.to_array()?);
    }

    let mut optimizer = OverlapOptimizer::new(
        vectors,
        config,
        target,
        initial,
        &mut rand::thread_rng(),
    )?;

    // Keep the entire evolution; use OverlapOptimizer::run when the
    // trajectory is not needed.
    let mut coeff_evolution = Array2::zeros((steps + 1, total_vectors));
    let mut error_evolution = Vec::with_capacity(steps + 1);
    coeff_evolution.row_mut(0).assign(&optimizer.coefficients());
    error_evolution.push(optimizer.overlap());

    println!("Error value:");
    println!("0 {}", error_evolution[0]);

    for n in 1..=steps {
        optimizer.step();
        let error = optimizer.overlap();
        coeff_evolution.row_mut(n).assign(&optimizer.coefficients());
        error_evolution.push(error);
        println!("{} {}", n, error);
    }

    info!(
        final_error = error_evolution[steps],
        steps, "minimization finished"
    );

    let results = ResultsDocument {
        k: total_vectors,
        coefficients_evolution: ComplexMatrix::from_array(&coeff_evolution),
        error_evolution: error_evolution.clone(),
        coefficients: ComplexVector::from_array(&optimizer.coefficients()),
        error: error_evolution[steps],
        parameters: RunParameters {
            delta: config.delta,
            gamma: config.gamma,
            steps,
            eigenvectors_file: eigenvectors_path.to_string_lossy().into_owned(),
            spins: spin_doc.spins.clone(),
            coordinates: spin_doc.coordinates.clone(),
        },
    };
    results.save(Path::new("coefficients.json"))?;

    ApproximationDocument::new(&optimizer.get_approximation())
        .save(Path::new("statevector_approximation.json"))?;

    Ok(())
}

fn reconstruct(
    vec_path: &Path,
    coordinates_path: &Path,
    state: usize,
    root: &str,
    tolerance: f64,
) -> Result<()> {
    let vec = store::load_statevector(vec_path, root, state)?;
    let coordinates = store::load_coordinates(coordinates_path)?;
    let sites = coordinates.len();

    let spins = reconstruct_spins(vec.view(), sites, tolerance);

    let output = store::reconstructed_output_path(vec_path)?;
    let doc = SpinDocument {
        spins: spins
            .rows()
            .into_iter()
            .map(|r| [r[0], r[1], r[2]])
            .collect(),
        coordinates,
    };
    doc.save(&output)?;

    info!(output = %output.display(), sites, "spins reconstructed");
    Ok(())
}
