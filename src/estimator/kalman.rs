// src/estimator/kalman.rs

//! Scalar Kalman filter over a random-walk demand model.
//!
//! ```text
//! x[t] = x[t-1] + w,  w ~ N(0, Q)
//! z[t] = x[t]   + v,  v ~ N(0, R)
//! ```
//!
//! Both the transition and the observation matrix are the scalar 1, so the
//! predict step only inflates the variance and the update step is a weighted
//! blend of prediction and observation.

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::error::{DemandError, Result};
use crate::estimator::config::EstimatorConfig;
use crate::estimator::state::FilterState;
use crate::model::observation::Observation;
use crate::numeric::is_valid_variance;

/// Result of a single `update` call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UpdateOutcome {
    pub state: FilterState,
    /// Gain actually applied; exactly 0.0 when the observation was missing.
    pub gain: f64,
    pub observed: bool,
}

/// Per-step output of `run_filter`, aligned index-for-index with the input series.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterTrace {
    pub estimates: Vec<f64>,
    pub uncertainties: Vec<f64>,
}

impl FilterTrace {
    fn with_capacity(n: usize) -> Self {
        Self {
            estimates: Vec::with_capacity(n),
            uncertainties: Vec::with_capacity(n),
        }
    }

    fn push(&mut self, state: FilterState) {
        self.estimates.push(state.estimate);
        self.uncertainties.push(state.variance);
    }

    pub fn len(&self) -> usize {
        self.estimates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.estimates.is_empty()
    }

    /// The most recent `(estimate, variance)` pair, which is what the policy engine consumes.
    pub fn latest(&self) -> Option<FilterState> {
        let estimate = *self.estimates.last()?;
        let variance = *self.uncertainties.last()?;
        Some(FilterState::new(estimate, variance))
    }

    pub fn iter(&self) -> impl Iterator<Item = FilterState> + '_ {
        self.estimates
            .iter()
            .zip(&self.uncertainties)
            .map(|(&e, &v)| FilterState::new(e, v))
    }
}

/// Demand-rate estimator for a single SKU.
///
/// Starts uninitialized; `initialize`, `reset` or `run_filter` moves it to ready.
/// Each SKU needs its own instance.
#[derive(Debug, Clone)]
pub struct StateEstimator {
    config: EstimatorConfig,
    state: Option<FilterState>,
    update_count: u64,
}

impl StateEstimator {
    pub fn new(config: EstimatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            state: None,
            update_count: 0,
        })
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    pub fn state(&self) -> Option<FilterState> {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state.is_some()
    }

    /// Number of updates that carried an actual observation.
    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    pub fn initialize(&mut self, initial_value: f64, initial_uncertainty: f64) -> Result<()> {
        if !initial_value.is_finite() {
            return Err(DemandError::NonFiniteObservation(initial_value));
        }
        if !is_valid_variance(initial_uncertainty) {
            return Err(DemandError::InvalidUncertainty(initial_uncertainty));
        }
        self.state = Some(FilterState::new(initial_value, initial_uncertainty));
        self.update_count = 0;
        Ok(())
    }

    /// Re-seeds the filter at `value` with the configured prior uncertainty.
    pub fn reset(&mut self, value: f64) -> Result<()> {
        self.initialize(value, self.config.initial_uncertainty)
    }

    pub fn predict(&mut self) -> Result<FilterState> {
        let process_noise = self.config.process_noise;
        let state = self.state.as_mut().ok_or(DemandError::Uninitialized)?;
        state.predict(process_noise);
        Ok(*state)
    }

    /// Folds one observation into the estimate. A missing observation leaves the
    /// state exactly as `predict` produced it.
    pub fn update(&mut self, observation: Observation) -> Result<UpdateOutcome> {
        let measurement_noise = self.config.measurement_noise;
        let state = self.state.as_mut().ok_or(DemandError::Uninitialized)?;

        let measurement = match observation.value() {
            None => {
                return Ok(UpdateOutcome {
                    state: *state,
                    gain: 0.0,
                    observed: false,
                })
            }
            Some(v) if !v.is_finite() => return Err(DemandError::NonFiniteObservation(v)),
            Some(v) => v,
        };

        let gain = state.correct(measurement, measurement_noise)?;
        let updated = *state;
        self.update_count += 1;

        Ok(UpdateOutcome {
            state: updated,
            gain,
            observed: true,
        })
    }

    /// Runs predict + update over a whole series, oldest observation first.
    ///
    /// The filter is seeded from the first element, or from 0.0 when that
    /// element is missing, using the configured initial uncertainty.
    pub fn run_filter(&mut self, series: &[Observation]) -> Result<FilterTrace> {
        let first = series.first().ok_or(DemandError::EmptySeries)?;
        self.reset(first.value().unwrap_or(0.0))?;

        let mut trace = FilterTrace::with_capacity(series.len());
        let mut missing = 0usize;

        for (step, observation) in series.iter().enumerate() {
            self.predict()?;
            let outcome = self.update(*observation)?;
            if !outcome.observed {
                missing += 1;
            }
            trace!(
                step,
                estimate = outcome.state.estimate,
                variance = outcome.state.variance,
                gain = outcome.gain,
                "filter step"
            );
            trace.push(outcome.state);
        }

        if missing == series.len() {
            warn!(
                steps = series.len(),
                "series contained no observations; estimate is the prior"
            );
        }
        debug!(
            steps = series.len(),
            missing,
            final_estimate = trace.estimates.last().copied(),
            final_variance = trace.uncertainties.last().copied(),
            "filter run complete"
        );

        Ok(trace)
    }
}
