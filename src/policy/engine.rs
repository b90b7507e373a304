// src/policy/engine.rs

//! Inventory policy driven by the demand filter's output.
//!
//! The estimator's variance `P` stands in for per-period demand variance, so the
//! stocking targets widen automatically when the filter is unsure.

use tracing::{debug, info};

use crate::error::{DemandError, Result};
use crate::model::analysis::AnalysisResult;
use crate::numeric::round_to;
use crate::policy::config::PolicyConfig;
use crate::policy::normal::inverse_normal_cdf;

const UNIT_PRECISION: i32 = 2;
const PCT_PRECISION: i32 = 1;

/// Units on hand above the target level. Never negative.
pub fn excess_units(current_inventory: f64, target_inventory: f64) -> f64 {
    (current_inventory - target_inventory).max(0.0)
}

/// Share of on-hand stock that is excess, in percent.
///
/// Formula: 100 * Excess / CurrentInventory, or 0 when nothing is on hand.
pub fn reduction_potential_pct(excess_units: f64, current_inventory: f64) -> f64 {
    if current_inventory > 0.0 {
        100.0 * excess_units / current_inventory
    } else {
        0.0
    }
}

/// Lead-time stocking policy with a fixed service level.
#[derive(Debug, Clone)]
pub struct InventoryPolicy {
    config: PolicyConfig,
    z_score: f64,
}

impl InventoryPolicy {
    pub fn new(config: PolicyConfig) -> Result<Self> {
        config.validate()?;
        let z_score = inverse_normal_cdf(config.service_level)?;
        debug!(
            lead_time = config.lead_time,
            service_level = config.service_level,
            z_score,
            "inventory policy configured"
        );
        Ok(Self { config, z_score })
    }

    pub fn lead_time(&self) -> u32 {
        self.config.lead_time
    }

    pub fn service_level(&self) -> f64 {
        self.config.service_level
    }

    /// z = Φ⁻¹(service_level), fixed at construction.
    pub fn z_score(&self) -> f64 {
        self.z_score
    }

    /// Buffer against demand uncertainty over the lead time.
    ///
    /// # Formula
    /// SafetyStock = Z * sqrt(P * L)
    ///
    /// Variance of L i.i.d. increments adds up linearly, so the standard
    /// deviation over the window scales with sqrt(L). Negative `P` is treated as 0.
    pub fn safety_stock(&self, variance: f64) -> f64 {
        let lead_time = self.config.lead_time as f64;
        self.z_score * (variance.max(0.0) * lead_time).sqrt()
    }

    /// Safety stock for every step of a filter's uncertainty trace.
    pub fn safety_stock_series(&self, uncertainties: &[f64]) -> Vec<f64> {
        uncertainties
            .iter()
            .map(|&variance| self.safety_stock(variance))
            .collect()
    }

    /// Expected consumption during the lead time.
    pub fn cycle_stock(&self, demand_rate: f64) -> f64 {
        demand_rate * self.config.lead_time as f64
    }

    /// CycleStock + SafetyStock, floored at zero.
    pub fn target_inventory(&self, demand_rate: f64, variance: f64) -> f64 {
        (self.cycle_stock(demand_rate) + self.safety_stock(variance)).max(0.0)
    }

    /// Single-SKU excess-inventory analysis.
    pub fn detect_dead_inventory(
        &self,
        sku: &str,
        current_inventory: f64,
        demand_estimate: f64,
        demand_uncertainty: f64,
    ) -> AnalysisResult {
        let safety_stock = self.safety_stock(demand_uncertainty);
        let target = self.target_inventory(demand_estimate, demand_uncertainty);
        let excess = excess_units(current_inventory, target);
        let reduction = reduction_potential_pct(excess, current_inventory);

        AnalysisResult {
            sku: sku.to_string(),
            current_inventory: round_to(current_inventory, UNIT_PRECISION),
            estimated_demand: round_to(demand_estimate, UNIT_PRECISION),
            target_inventory: round_to(target, UNIT_PRECISION),
            safety_stock: round_to(safety_stock, UNIT_PRECISION),
            excess_units: round_to(excess, UNIT_PRECISION),
            reduction_potential_pct: round_to(reduction, PCT_PRECISION),
        }
    }

    /// Analyses parallel per-SKU inputs and ranks them by reduction potential,
    /// largest first. Ties keep their input order.
    pub fn batch_analysis<S: AsRef<str>>(
        &self,
        skus: &[S],
        inventory_levels: &[f64],
        demand_estimates: &[f64],
        uncertainties: &[f64],
    ) -> Result<Vec<AnalysisResult>> {
        let n = skus.len();
        if inventory_levels.len() != n || demand_estimates.len() != n || uncertainties.len() != n {
            return Err(DemandError::LengthMismatch {
                skus: n,
                inventory: inventory_levels.len(),
                estimates: demand_estimates.len(),
                uncertainties: uncertainties.len(),
            });
        }

        let mut results: Vec<AnalysisResult> = skus
            .iter()
            .zip(inventory_levels)
            .zip(demand_estimates)
            .zip(uncertainties)
            .map(|(((sku, &inventory), &estimate), &uncertainty)| {
                self.detect_dead_inventory(sku.as_ref(), inventory, estimate, uncertainty)
            })
            .collect();

        // sort_by is stable, so equal percentages stay in input order.
        results.sort_by(|a, b| {
            b.reduction_potential_pct
                .total_cmp(&a.reduction_potential_pct)
        });

        let flagged = results.iter().filter(|r| r.has_excess()).count();
        let total_excess: f64 = results.iter().map(|r| r.excess_units).sum();
        info!(
            skus = n,
            flagged,
            total_excess,
            "dead inventory batch analysis complete"
        );

        Ok(results)
    }
}
