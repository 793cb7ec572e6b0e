// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Optimizer configuration types.

use crate::error::{Error, Result};

/// Configuration for the overlap optimizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptimizerConfig {
    /// Gradient descent step size.
    pub gamma: f64,
    /// Finite-difference step for the gradient estimate.
    pub delta: f64,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            gamma: 0.1,
            delta: 1e-3,
        }
    }
}

impl OptimizerConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<()> {
        if !self.gamma.is_finite() || self.gamma <= 0.0 {
            return Err(Error::InvalidArgument("gamma must be finite and > 0".into()));
        }
        if !self.delta.is_finite() || self.delta <= 0.0 {
            return Err(Error::InvalidArgument("delta must be finite and > 0".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(OptimizerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_gamma_rejected() {
        let config = OptimizerConfig {
            gamma: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_negative_delta_rejected() {
        let config = OptimizerConfig {
            delta: -1e-3,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_nan_gamma_rejected() {
        let config = OptimizerConfig {
            gamma: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
