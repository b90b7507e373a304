// src/model/analysis.rs

use serde::Serialize;

/// Dead-inventory diagnosis for one SKU.
///
/// Unit quantities are rounded to 2 decimals, `reduction_potential_pct` to 1 decimal.
/// Field names are the stable contract for any reporting layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub sku: String,
    pub current_inventory: f64,
    pub estimated_demand: f64,
    pub target_inventory: f64,
    pub safety_stock: f64,
    pub excess_units: f64,
    pub reduction_potential_pct: f64,
}

impl AnalysisResult {
    pub fn has_excess(&self) -> bool {
        self.excess_units > 0.0
    }
}
