// src/numeric.rs

//! Small numeric helpers shared by the estimator and the policy engine.

/// Rounds half away from zero to `places` decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Mean squared error between two aligned series.
///
/// Pairs beyond the shorter series are ignored. Returns 0.0 for empty input.
pub fn mean_squared_error(actual: &[f64], predicted: &[f64]) -> f64 {
    let n = actual.len().min(predicted.len());
    if n == 0 {
        return 0.0;
    }
    actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| {
            let d = a - p;
            d * d
        })
        .sum::<f64>()
        / n as f64
}

/// True when `value` can be used as a variance.
pub(crate) fn is_valid_variance(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_requested_precision() {
        assert_eq!(round_to(4.351874, 2), 4.35);
        assert_eq!(round_to(17.407496, 2), 17.41);
        assert_eq!(round_to(85.12955, 1), 85.1);
        assert_eq!(round_to(-2.5, 0), -3.0);
        assert_eq!(round_to(0.0, 2), 0.0);
    }

    #[test]
    fn mse_of_identical_series_is_zero() {
        assert_eq!(mean_squared_error(&[1.0, 2.0], &[1.0, 2.0]), 0.0);
        assert_eq!(mean_squared_error(&[], &[]), 0.0);
        assert!((mean_squared_error(&[0.0, 0.0], &[1.0, 3.0]) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn variance_validation_rejects_negative_and_nan() {
        assert!(is_valid_variance(0.0));
        assert!(is_valid_variance(10.0));
        assert!(!is_valid_variance(-1e-9));
        assert!(!is_valid_variance(f64::NAN));
        assert!(!is_valid_variance(f64::INFINITY));
    }
}
