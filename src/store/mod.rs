// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! JSON array-store adapter.
//!
//! Persists the datasets the pipelines exchange: the eigenbasis source
//! (read-only, addressed under a caller-chosen root prefix), the classical
//! spin configuration with site coordinates, and the optimization results.
//! Complex arrays are stored as separate real/imaginary planes.

use std::fs;
use std::path::{Path, PathBuf};

use ndarray::{Array1, Array2};
use num_complex::Complex64;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result, StoreError};
use crate::spectrum::Eigenbasis;

/// A complex vector as parallel real/imaginary planes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplexVector {
    pub re: Vec<f64>,
    pub im: Vec<f64>,
}

impl ComplexVector {
    pub fn from_array(vec: &Array1<Complex64>) -> Self {
        Self {
            re: vec.iter().map(|c| c.re).collect(),
            im: vec.iter().map(|c| c.im).collect(),
        }
    }

    pub fn to_array(&self) -> Result<Array1<Complex64>> {
        if self.re.len() != self.im.len() {
            return Err(StoreError::Malformed {
                name: "complex vector".into(),
                message: format!(
                    "re plane has {} elements, im plane has {}",
                    self.re.len(),
                    self.im.len()
                ),
            }
            .into());
        }
        Ok(self
            .re
            .iter()
            .zip(self.im.iter())
            .map(|(&re, &im)| Complex64::new(re, im))
            .collect())
    }
}

/// A complex matrix as parallel real/imaginary planes, row-major.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplexMatrix {
    pub re: Vec<Vec<f64>>,
    pub im: Vec<Vec<f64>>,
}

impl ComplexMatrix {
    pub fn from_array(mat: &Array2<Complex64>) -> Self {
        Self {
            re: mat.rows().into_iter().map(|r| r.iter().map(|c| c.re).collect()).collect(),
            im: mat.rows().into_iter().map(|r| r.iter().map(|c| c.im).collect()).collect(),
        }
    }

    pub fn to_array(&self) -> Result<Array2<Complex64>> {
        let malformed = |message: String| -> Error {
            StoreError::Malformed {
                name: "complex matrix".into(),
                message,
            }
            .into()
        };

        if self.re.len() != self.im.len() {
            return Err(malformed(format!(
                "re plane has {} rows, im plane has {}",
                self.re.len(),
                self.im.len()
            )));
        }
        let rows = self.re.len();
        let cols = self.re.first().map_or(0, |r| r.len());
        let mut data = Vec::with_capacity(rows * cols);
        for (re_row, im_row) in self.re.iter().zip(self.im.iter()) {
            if re_row.len() != cols || im_row.len() != cols {
                return Err(malformed("ragged rows".into()));
            }
            for (&re, &im) in re_row.iter().zip(im_row.iter()) {
                data.push(Complex64::new(re, im));
            }
        }
        Array2::from_shape_vec((rows, cols), data)
            .map_err(|e| malformed(e.to_string()))
    }
}

/// Normalize a root prefix the way the CLI expects: always one trailing `/`.
pub fn normalize_root(root: &str) -> String {
    if root.ends_with('/') {
        root.to_string()
    } else {
        format!("{}/", root)
    }
}

/// Walk the root prefix segments and return the named dataset node.
fn dataset<'a>(doc: &'a Value, root: &str, name: &str) -> Result<&'a Value> {
    let missing = || -> Error {
        StoreError::MissingDataset {
            root: root.to_string(),
            name: name.to_string(),
        }
        .into()
    };

    let mut node = doc;
    for segment in root.split('/').filter(|s| !s.is_empty()) {
        node = node.get(segment).ok_or_else(missing)?;
    }
    node.get(name).ok_or_else(missing)
}

fn read_document(path: &Path) -> Result<Value> {
    Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
}

fn decode<T: DeserializeOwned>(node: &Value) -> Result<T> {
    Ok(serde_json::from_value(node.clone())?)
}

/// Load an eigenbasis from the `eigenvalues`/`eigenvectors` datasets under
/// the given root prefix.
pub fn load_eigenbasis(path: &Path, root: &str) -> Result<Eigenbasis> {
    let doc = read_document(path)?;
    let root = normalize_root(root);

    let eigenvalues: Vec<f64> = decode(dataset(&doc, &root, "eigenvalues")?)?;
    let eigenvectors: ComplexMatrix = decode(dataset(&doc, &root, "eigenvectors")?)?;

    Eigenbasis::new(Array1::from(eigenvalues), eigenvectors.to_array()?)
}

/// Load one state vector (by row index) from the `eigenvectors` dataset.
pub fn load_statevector(path: &Path, root: &str, index: usize) -> Result<Array1<Complex64>> {
    let doc = read_document(path)?;
    let root = normalize_root(root);

    let eigenvectors: ComplexMatrix = decode(dataset(&doc, &root, "eigenvectors")?)?;
    let mat = eigenvectors.to_array()?;
    if index >= mat.nrows() {
        return Err(Error::InvalidInput(format!(
            "state index {} out of range ({} vectors stored)",
            index,
            mat.nrows()
        )));
    }
    Ok(mat.row(index).to_owned())
}

/// Classical spin configuration with site coordinates.
///
/// `coordinates` rows may be 2- or 3-dimensional; they are carried through
/// untouched for provenance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpinDocument {
    pub spins: Vec<[f64; 3]>,
    pub coordinates: Vec<Vec<f64>>,
}

impl SpinDocument {
    pub fn load(path: &Path) -> Result<Self> {
        Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        write_json(path, self)
    }

    /// The spins as an L×3 array.
    pub fn spins_array(&self) -> Array2<f64> {
        let mut arr = Array2::zeros((self.spins.len(), 3));
        for (i, s) in self.spins.iter().enumerate() {
            for (j, &v) in s.iter().enumerate() {
                arr[[i, j]] = v;
            }
        }
        arr
    }
}

/// Load the `coordinates` dataset from a spin or coordinates file.
pub fn load_coordinates(path: &Path) -> Result<Vec<Vec<f64>>> {
    let doc = read_document(path)?;
    decode(dataset(&doc, "/", "coordinates")?)
}

/// Scalar run parameters plus provenance, persisted with the results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunParameters {
    pub delta: f64,
    pub gamma: f64,
    pub steps: usize,
    pub eigenvectors_file: String,
    pub spins: Vec<[f64; 3]>,
    pub coordinates: Vec<Vec<f64>>,
}

/// Full results of a minimization run: per-iteration trajectories, final
/// values and run parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultsDocument {
    pub k: usize,
    pub coefficients_evolution: ComplexMatrix,
    pub error_evolution: Vec<f64>,
    pub coefficients: ComplexVector,
    pub error: f64,
    pub parameters: RunParameters,
}

impl ResultsDocument {
    pub fn load(path: &Path) -> Result<Self> {
        Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        write_json(path, self)
    }
}

/// Final normalized approximation, stored as a one-row `eigenvectors`
/// dataset so it can feed back into the eigenbasis readers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApproximationDocument {
    pub eigenvectors: ComplexMatrix,
}

impl ApproximationDocument {
    pub fn new(state: &Array1<Complex64>) -> Self {
        let row = ComplexVector::from_array(state);
        Self {
            eigenvectors: ComplexMatrix {
                re: vec![row.re],
                im: vec![row.im],
            },
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        write_json(path, self)
    }
}

/// Derive the reconstruction output path by inserting `reconstructed_spins`
/// before the input's extension.
///
/// # Errors
/// `StoreError::OutputCollision` if the derived name equals the input name.
pub fn reconstructed_output_path(input: &Path) -> Result<PathBuf> {
    let name = input.to_string_lossy();
    let mut parts: Vec<&str> = name.split('.').collect();
    let insert_at = parts.len().saturating_sub(1);
    parts.insert(insert_at, "reconstructed_spins");
    let derived = parts.join(".");

    if derived == name {
        return Err(StoreError::OutputCollision(name.into_owned()).into());
    }
    Ok(PathBuf::from(derived))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    fs::write(path, serde_json::to_string_pretty(value)?)?;
    Ok(())
}
