// src/io/demand.rs

use rand::Rng;
use rand_distr::{Bernoulli, Distribution, Normal};

use crate::error::{DemandError, Result};
use crate::model::observation::Observation;

/// A synthetic daily series with its known ground truth.
#[derive(Debug, Clone)]
pub struct SyntheticDemand {
    /// True demand rate per day.
    pub truth: Vec<f64>,
    /// What the sales feed reports: truth plus noise, with some days missing.
    pub observations: Vec<Observation>,
}

impl SyntheticDemand {
    /// Observed values with NaN for missing days.
    pub fn observed_values(&self) -> Vec<f64> {
        self.observations
            .iter()
            .map(|o| o.value().unwrap_or(f64::NAN))
            .collect()
    }
}

/// Generates a demand schedule where every day has the exact same value.
/// Useful for convergence tests.
pub fn generate_constant_demand(days: usize, value: f64) -> Vec<f64> {
    vec![value; days]
}

/// Generates a random-walk demand rate observed through Gaussian noise.
///
/// # Arguments
/// * `days` - Length of the series.
/// * `start` - True demand on day 0.
/// * `drift_std` - Standard deviation of the day-to-day change in true demand.
/// * `noise_std` - Standard deviation of observed sales around true demand.
/// * `missing_probability` - Chance that a day has no sales record at all.
pub fn generate_random_walk_demand<R: Rng + ?Sized>(
    rng: &mut R,
    days: usize,
    start: f64,
    drift_std: f64,
    noise_std: f64,
    missing_probability: f64,
) -> Result<SyntheticDemand> {
    // Normal::new accepts negative standard deviations.
    for (name, std_dev) in [("drift", drift_std), ("noise", noise_std)] {
        if !(std_dev.is_finite() && std_dev >= 0.0) {
            return Err(DemandError::InvalidDistribution(format!(
                "{name}: standard deviation must be finite and non-negative (got {std_dev})"
            )));
        }
    }

    let drift = Normal::new(0.0, drift_std)
        .map_err(|e| DemandError::InvalidDistribution(format!("drift: {e}")))?;
    let noise = Normal::new(0.0, noise_std)
        .map_err(|e| DemandError::InvalidDistribution(format!("noise: {e}")))?;
    let gaps = Bernoulli::new(missing_probability)
        .map_err(|e| DemandError::InvalidDistribution(format!("missing: {e}")))?;

    let mut truth = Vec::with_capacity(days);
    let mut observations = Vec::with_capacity(days);

    let mut level = start;
    for day in 0..days {
        if day > 0 {
            level += drift.sample(rng);
        }
        truth.push(level);

        if gaps.sample(rng) {
            observations.push(Observation::Missing);
        } else {
            observations.push(Observation::Observed(level + noise.sample(rng)));
        }
    }

    Ok(SyntheticDemand {
        truth,
        observations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn constant_demand_has_requested_length() {
        assert_eq!(generate_constant_demand(3, 4.0), vec![4.0, 4.0, 4.0]);
    }

    #[test]
    fn same_seed_same_series() {
        let a = generate_random_walk_demand(&mut StdRng::seed_from_u64(11), 50, 20.0, 1.0, 3.0, 0.2)
            .unwrap();
        let b = generate_random_walk_demand(&mut StdRng::seed_from_u64(11), 50, 20.0, 1.0, 3.0, 0.2)
            .unwrap();
        assert_eq!(a.truth, b.truth);
        assert_eq!(a.observations, b.observations);
        assert_eq!(a.truth.len(), 50);
        assert_eq!(a.truth[0], 20.0);
    }

    #[test]
    fn missing_probability_extremes() {
        let mut rng = StdRng::seed_from_u64(3);
        let all_missing = generate_random_walk_demand(&mut rng, 10, 5.0, 1.0, 1.0, 1.0).unwrap();
        assert!(all_missing.observations.iter().all(Observation::is_missing));
        assert!(all_missing.observed_values().iter().all(|v| v.is_nan()));

        let none_missing = generate_random_walk_demand(&mut rng, 10, 5.0, 1.0, 1.0, 0.0).unwrap();
        assert!(none_missing.observations.iter().all(|o| !o.is_missing()));
    }

    #[test]
    fn invalid_parameters_are_reported() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = generate_random_walk_demand(&mut rng, 10, 5.0, -1.0, 1.0, 0.0).unwrap_err();
        assert!(matches!(err, DemandError::InvalidDistribution(_)));
        let err = generate_random_walk_demand(&mut rng, 10, 5.0, 1.0, -0.5, 0.0).unwrap_err();
        assert!(matches!(err, DemandError::InvalidDistribution(ref m) if m.starts_with("noise")));
        let err = generate_random_walk_demand(&mut rng, 10, 5.0, f64::NAN, 1.0, 0.0).unwrap_err();
        assert!(matches!(err, DemandError::InvalidDistribution(_)));
        let err = generate_random_walk_demand(&mut rng, 10, 5.0, 1.0, 1.0, 1.5).unwrap_err();
        assert!(matches!(err, DemandError::InvalidDistribution(_)));
    }
}
