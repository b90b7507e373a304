// src/estimator/config.rs

use serde::{Deserialize, Serialize};

use crate::error::{DemandError, Result};
use crate::numeric::is_valid_variance;

/// Noise model for the random-walk demand filter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimatorConfig {
    /// Q: variance of the true demand drift per period.
    pub process_noise: f64,
    /// R: variance of observed sales around true demand.
    pub measurement_noise: f64,
    /// Prior variance used when the filter seeds itself from a series.
    pub initial_uncertainty: f64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            process_noise: 0.1,
            measurement_noise: 1.0,
            initial_uncertainty: 10.0,
        }
    }
}

impl EstimatorConfig {
    pub fn new(process_noise: f64, measurement_noise: f64) -> Self {
        Self {
            process_noise,
            measurement_noise,
            ..Self::default()
        }
    }

    pub fn with_initial_uncertainty(mut self, initial_uncertainty: f64) -> Self {
        self.initial_uncertainty = initial_uncertainty;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !is_valid_variance(self.process_noise) {
            return Err(DemandError::InvalidNoise {
                name: "process_noise",
                value: self.process_noise,
            });
        }
        if !is_valid_variance(self.measurement_noise) {
            return Err(DemandError::InvalidNoise {
                name: "measurement_noise",
                value: self.measurement_noise,
            });
        }
        if self.process_noise == 0.0 && self.measurement_noise == 0.0 {
            return Err(DemandError::DegenerateNoise);
        }
        if !is_valid_variance(self.initial_uncertainty) {
            return Err(DemandError::InvalidUncertainty(self.initial_uncertainty));
        }
        Ok(())
    }
}
