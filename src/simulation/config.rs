// src/simulation/config.rs

//! Simulator settings: built-in defaults, optionally overridden from TOML.
//!
//! ```toml
//! max_qubits = 8
//! default_rotation_angle = 1.5707963267948966
//! validate_norm = true
//! ```

use crate::core::{
    DEFAULT_ROTATION_ANGLE, DENSE_QUBIT_LIMIT, MAX_QUBITS, NORM_TOLERANCE, PROBABILITY_THRESHOLD, Result, SimError,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Largest register accepted, at most `DENSE_QUBIT_LIMIT`. Operators are
    /// dense `2^N x 2^N` matrices, so memory and time grow as `4^N`.
    pub max_qubits: usize,
    /// Angle used for a rotation gate that arrives without one.
    pub default_rotation_angle: f64,
    /// Cut-off for [`crate::SimulationResult::probability_map`] callers that use the config.
    pub probability_threshold: f64,
    /// Check `sum |a_i|^2 ≈ 1` after every applied gate and fail the run otherwise.
    pub validate_norm: bool,
    pub norm_tolerance: f64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            max_qubits: MAX_QUBITS,
            default_rotation_angle: DEFAULT_ROTATION_ANGLE,
            probability_threshold: PROBABILITY_THRESHOLD,
            validate_norm: false,
            norm_tolerance: NORM_TOLERANCE,
        }
    }
}

impl SimulatorConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: SimulatorConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| SimError::Config {
            message: format!("reading {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&text)
    }

    pub fn with_max_qubits(mut self, max_qubits: usize) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    pub fn with_default_rotation_angle(mut self, angle: f64) -> Self {
        self.default_rotation_angle = angle;
        self
    }

    pub fn with_probability_threshold(mut self, threshold: f64) -> Self {
        self.probability_threshold = threshold;
        self
    }

    pub fn with_norm_validation(mut self, tolerance: f64) -> Self {
        self.validate_norm = true;
        self.norm_tolerance = tolerance;
        self
    }

    /// Rejects settings no run could use.
    pub fn validate(&self) -> Result<()> {
        if self.max_qubits == 0 || self.max_qubits > DENSE_QUBIT_LIMIT {
            return Err(SimError::Config {
                message: format!("max_qubits must be between 1 and {}, got {}", DENSE_QUBIT_LIMIT, self.max_qubits),
            });
        }
        if !self.default_rotation_angle.is_finite() {
            return Err(SimError::Config { message: "default_rotation_angle must be finite".to_string() });
        }
        let tolerance_ok = self.norm_tolerance.is_finite() && self.norm_tolerance > 0.0;
        let threshold_ok = self.probability_threshold.is_finite() && self.probability_threshold >= 0.0;
        if !tolerance_ok || !threshold_ok {
            return Err(SimError::Config {
                message: "norm_tolerance must be positive and probability_threshold non-negative".to_string(),
            });
        }
        Ok(())
    }
}
