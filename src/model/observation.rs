// src/model/observation.rs

use serde::Serialize;

/// One period of demand as reported upstream.
///
/// `Missing` means "no valid record for this period" (calendar gap, out-of-stock day).
/// It is not the same as `Observed(0.0)`, which is a real day with zero sales.
/// `Observed(NaN)` is read as `Missing` everywhere, the same as `Observation::from(NaN)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Observation {
    Observed(f64),
    Missing,
}

impl Observation {
    /// The measured value, or `None` for a missing (or NaN) period.
    pub fn value(&self) -> Option<f64> {
        match self {
            Observation::Observed(v) if !v.is_nan() => Some(*v),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        self.value().is_none()
    }
}

/// NaN is the conventional missing marker in numeric sales exports.
impl From<f64> for Observation {
    fn from(value: f64) -> Self {
        if value.is_nan() {
            Observation::Missing
        } else {
            Observation::Observed(value)
        }
    }
}

impl From<Option<f64>> for Observation {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Observation::Missing, Observation::from)
    }
}

/// Converts a raw numeric series (NaN = missing) into observations.
pub fn from_raw_series(raw: &[f64]) -> Vec<Observation> {
    raw.iter().copied().map(Observation::from).collect()
}
