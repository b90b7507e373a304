//! Demand-rate estimation with a scalar Kalman filter, and the dead-inventory
//! diagnostics built on top of its estimate and variance.
//!
//! ```no_run
//! use demand_kalman::estimator::{config::EstimatorConfig, kalman::StateEstimator};
//! use demand_kalman::model::observation::from_raw_series;
//! use demand_kalman::policy::{config::PolicyConfig, engine::InventoryPolicy};
//!
//! # fn main() -> demand_kalman::error::Result<()> {
//! let sales = from_raw_series(&[12.0, 9.0, f64::NAN, 11.0, 10.0]);
//! let mut estimator = StateEstimator::new(EstimatorConfig::default())?;
//! let trace = estimator.run_filter(&sales)?;
//!
//! let policy = InventoryPolicy::new(PolicyConfig::default())?;
//! if let Some(latest) = trace.latest() {
//!     let report = policy.detect_dead_inventory("SKU_1", 140.0, latest.estimate, latest.variance);
//!     println!("{report:?}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod estimator;
pub mod io;
pub mod model;
pub mod numeric;
pub mod observability;
pub mod policy;
