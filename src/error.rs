// src/error.rs

use thiserror::Error;

/// Errors raised by the estimator, the policy engine and the reporting layer.
///
/// Every variant is deterministic: retrying with the same input fails the same way.
#[derive(Debug, Error)]
pub enum DemandError {
    #[error("{name} must be a finite, non-negative variance (got {value})")]
    InvalidNoise { name: &'static str, value: f64 },

    #[error("process noise and measurement noise cannot both be zero")]
    DegenerateNoise,

    #[error("initial uncertainty must be a finite, non-negative variance (got {0})")]
    InvalidUncertainty(f64),

    #[error("estimator has not been initialized")]
    Uninitialized,

    #[error("observation must be finite or explicitly missing (got {0})")]
    NonFiniteObservation(f64),

    #[error("update produced a non-finite estimate ({0}); state left unchanged")]
    NonFiniteEstimate(f64),

    #[error("cannot run the filter over an empty series")]
    EmptySeries,

    #[error("service level must lie strictly inside (0, 1) (got {0})")]
    ServiceLevelOutOfRange(f64),

    #[error("lead time must be at least one period (got {0})")]
    InvalidLeadTime(u32),

    #[error("batch inputs have mismatched lengths: {skus} skus, {inventory} inventory levels, {estimates} estimates, {uncertainties} uncertainties")]
    LengthMismatch {
        skus: usize,
        inventory: usize,
        estimates: usize,
        uncertainties: usize,
    },

    #[error("invalid distribution parameters: {0}")]
    InvalidDistribution(String),

    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DemandError>;
