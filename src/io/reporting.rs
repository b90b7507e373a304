// src/io/reporting.rs

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::estimator::kalman::FilterTrace;
use crate::model::analysis::AnalysisResult;
use crate::model::observation::Observation;

/// One row of the per-day filter export. Missing days leave `observed` empty.
#[derive(Debug, Clone, Serialize)]
pub struct TraceRecord<'a> {
    pub sku: &'a str,
    pub step: usize,
    pub observed: Option<f64>,
    pub estimate: f64,
    pub uncertainty: f64,
}

/// CSV sink for filter traces of one or more SKUs, sharing a single header.
pub struct TraceWriter<W: Write> {
    wtr: csv::Writer<W>,
}

impl<W: Write> TraceWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            wtr: csv::Writer::from_writer(writer),
        }
    }

    /// Appends one row per input observation for `sku`.
    pub fn append(
        &mut self,
        sku: &str,
        observations: &[Observation],
        trace: &FilterTrace,
    ) -> Result<usize> {
        let mut rows = 0;
        for (step, (observation, state)) in observations.iter().zip(trace.iter()).enumerate() {
            self.wtr.serialize(TraceRecord {
                sku,
                step,
                observed: observation.value(),
                estimate: state.estimate,
                uncertainty: state.variance,
            })?;
            rows += 1;
        }
        Ok(rows)
    }

    pub fn flush(&mut self) -> Result<()> {
        self.wtr.flush()?;
        Ok(())
    }
}

/// Writes ranked analysis results as CSV, preserving their order.
pub fn write_analysis<W: Write>(writer: W, results: &[AnalysisResult]) -> Result<usize> {
    let mut wtr = csv::Writer::from_writer(writer);
    for record in results {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(results.len())
}

/// Writes ranked analysis results to a CSV file.
///
/// # Arguments
/// * `file_path` - Destination (e.g., "reports/dead_inventory.csv").
/// * `results` - Output of `InventoryPolicy::batch_analysis`.
pub fn write_analysis_file<P: AsRef<Path>>(file_path: P, results: &[AnalysisResult]) -> Result<()> {
    let path = file_path.as_ref();
    let file = std::fs::File::create(path)?;
    let rows = write_analysis(file, results)?;
    info!(rows, path = %path.display(), "exported dead inventory report");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::config::EstimatorConfig;
    use crate::estimator::kalman::StateEstimator;

    #[test]
    fn analysis_csv_has_stable_header() {
        let results = vec![AnalysisResult {
            sku: "DEAD_SKU".to_string(),
            current_inventory: 500.0,
            estimated_demand: 10.0,
            target_inventory: 74.35,
            safety_stock: 4.35,
            excess_units: 425.65,
            reduction_potential_pct: 85.1,
        }];

        let mut buf = Vec::new();
        let rows = write_analysis(&mut buf, &results).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();

        assert_eq!(rows, 1);
        assert_eq!(
            lines.next(),
            Some("sku,current_inventory,estimated_demand,target_inventory,safety_stock,excess_units,reduction_potential_pct")
        );
        assert_eq!(lines.next(), Some("DEAD_SKU,500.0,10.0,74.35,4.35,425.65,85.1"));
    }

    #[test]
    fn trace_csv_leaves_missing_days_blank() {
        let observations = vec![Observation::Observed(4.0), Observation::Missing];
        let trace = StateEstimator::new(EstimatorConfig::default())
            .unwrap()
            .run_filter(&observations)
            .unwrap();

        let mut buf = Vec::new();
        let rows = {
            let mut out = TraceWriter::new(&mut buf);
            let rows = out.append("SKU_1", &observations, &trace).unwrap();
            out.flush().unwrap();
            rows
        };
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(rows, 2);
        assert_eq!(lines[0], "sku,step,observed,estimate,uncertainty");
        assert!(lines[1].starts_with("SKU_1,0,4.0,4.0,"));
        assert!(lines[2].starts_with("SKU_1,1,,4.0,"));
    }

    #[test]
    fn trace_writer_shares_one_header_across_skus() {
        let observations = vec![Observation::Observed(2.0)];
        let trace = StateEstimator::new(EstimatorConfig::default())
            .unwrap()
            .run_filter(&observations)
            .unwrap();

        let mut buf = Vec::new();
        {
            let mut out = TraceWriter::new(&mut buf);
            out.append("A", &observations, &trace).unwrap();
            out.append("B", &observations, &trace).unwrap();
            out.flush().unwrap();
        }
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("A,0,"));
        assert!(lines[2].starts_with("B,0,"));
    }
}
