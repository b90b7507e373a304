// src/estimator/state.rs

use serde::Serialize;

use crate::error::{DemandError, Result};

/// Current belief about the demand rate: point estimate `x` and its variance `P`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FilterState {
    pub estimate: f64,
    pub variance: f64,
}

impl FilterState {
    pub fn new(estimate: f64, variance: f64) -> Self {
        Self { estimate, variance }
    }

    /// Random-walk time update. The estimate carries over unchanged.
    pub(crate) fn predict(&mut self, process_noise: f64) {
        self.variance += process_noise;
    }

    /// Measurement update. Returns the Kalman gain that was applied.
    pub(crate) fn correct(&mut self, measurement: f64, measurement_noise: f64) -> Result<f64> {
        let innovation_variance = self.variance + measurement_noise;
        if innovation_variance <= 0.0 {
            return Err(DemandError::DegenerateNoise);
        }

        // K = P / (P + R), always in [0, 1] while P and R are non-negative.
        let gain = self.variance / innovation_variance;
        let residual = measurement - self.estimate;

        let estimate = self.estimate + gain * residual;
        let variance = self.variance * (1.0 - gain);

        // Extreme finite inputs can still overflow the residual.
        if !estimate.is_finite() {
            return Err(DemandError::NonFiniteEstimate(estimate));
        }

        debug_assert!(variance >= 0.0, "variance went negative");
        self.estimate = estimate;
        self.variance = variance;
        Ok(gain)
    }
}
