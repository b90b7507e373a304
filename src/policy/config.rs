// src/policy/config.rs

use serde::{Deserialize, Serialize};

use crate::error::{DemandError, Result};

/// Replenishment parameters for the stocking policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Periods (days) between placing and receiving a replenishment order.
    pub lead_time: u32,
    /// Target probability of not stocking out during the lead time.
    pub service_level: f64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            lead_time: 7,
            service_level: 0.95,
        }
    }
}

impl PolicyConfig {
    pub fn new(lead_time: u32, service_level: f64) -> Self {
        Self {
            lead_time,
            service_level,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.lead_time == 0 {
            return Err(DemandError::InvalidLeadTime(self.lead_time));
        }
        if !(self.service_level > 0.0 && self.service_level < 1.0) {
            return Err(DemandError::ServiceLevelOutOfRange(self.service_level));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_a_week_at_95_percent() {
        let config = PolicyConfig::default();
        assert_eq!(config, PolicyConfig::new(7, 0.95));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_zero_lead_time() {
        assert!(matches!(
            PolicyConfig::new(0, 0.95).validate(),
            Err(DemandError::InvalidLeadTime(0))
        ));
    }

    #[test]
    fn rejects_service_level_on_or_outside_bounds() {
        for s in [0.0, 1.0, -0.5, 1.5, f64::NAN] {
            assert!(matches!(
                PolicyConfig::new(7, s).validate(),
                Err(DemandError::ServiceLevelOutOfRange(_))
            ));
        }
    }
}
