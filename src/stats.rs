//! # Cycle Statistics Module
//!
//! Read-only views of the already-aggregated load test statistics that the
//! charts are drawn from. Nothing here computes percentiles or averages; the
//! values arrive finalized from the aggregation step and are only formatted.
//!
//! ## Statistic Kinds
//!
//! Each cycle (one concurrency level) may carry any subset of:
//!
//! - **test**: whole-test throughput and error rate
//! - **page**: page-level throughput, error rate and response time distribution
//! - **response**: all requests aggregated
//! - **response_step**: one record per named request step
//!
//! A kind missing from a cycle is skipped for that chart, never zero-filled.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Response time percentiles reported for a record
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Percentiles {
    pub perc10: f64,
    pub perc50: f64,
    pub perc90: f64,
    pub perc95: f64,
}

/// Test-level statistics for one cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestStat {
    pub cvus: u32,
    /// Successful tests per second
    pub tps: f64,
    pub error_percent: f64,
}

/// Page or request statistics for one cycle, with a duration distribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatRecord {
    pub cvus: u32,
    /// Successful pages or requests per second
    pub rps: f64,
    pub error_percent: f64,
    pub min: f64,
    pub avg: f64,
    pub max: f64,
    pub percentiles: Percentiles,
}

/// Everything known about a single cycle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CycleStats {
    #[serde(default)]
    pub test: Option<TestStat>,
    #[serde(default)]
    pub page: Option<StatRecord>,
    #[serde(default)]
    pub response: Option<StatRecord>,
    #[serde(default)]
    pub response_step: BTreeMap<String, StatRecord>,
}

/// The statistic kinds a throughput chart can be drawn from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatKind {
    Test,
    Page,
    Response,
    ResponseStep(String),
}

/// A record reduced to the columns a chart table needs
///
/// `distribution` is `None` for test-level rows, which have no duration
/// columns.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRow {
    pub cvus: u32,
    pub metric: String,
    pub error_percent: f64,
    pub distribution: Option<Distribution>,
}

/// Min/avg/max and percentile columns in table order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Distribution {
    pub min: f64,
    pub avg: f64,
    pub max: f64,
    pub percentiles: Percentiles,
}

impl From<&StatRecord> for Distribution {
    fn from(record: &StatRecord) -> Self {
        Self {
            min: record.min,
            avg: record.avg,
            max: record.max,
            percentiles: record.percentiles,
        }
    }
}

/// Aggregated statistics for a whole load test run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoadTestStats {
    /// Configured concurrency levels, in run order
    pub cycles: Vec<u32>,
    /// Per-cycle statistics keyed by index into `cycles`
    #[serde(default)]
    pub results: BTreeMap<usize, CycleStats>,
}

impl LoadTestStats {
    /// Iterate cycles in run order, skipping cycles with no results
    pub fn cycle_stats(&self) -> impl Iterator<Item = &CycleStats> {
        (0..self.cycles.len()).filter_map(move |i| self.results.get(&i))
    }

    /// Collect the chart rows for one statistic kind
    ///
    /// Cycles without that kind are left out.
    pub fn rows(&self, kind: &StatKind) -> Vec<ChartRow> {
        self.cycle_stats()
            .filter_map(|cycle| match kind {
                StatKind::Test => cycle.test.as_ref().map(|t| ChartRow {
                    cvus: t.cvus,
                    metric: crate::utils::format_value(t.tps),
                    error_percent: t.error_percent,
                    distribution: None,
                }),
                StatKind::Page => cycle.page.as_ref().map(record_row),
                StatKind::Response => cycle.response.as_ref().map(record_row),
                StatKind::ResponseStep(step) => cycle.response_step.get(step).map(|r| ChartRow {
                    cvus: r.cvus,
                    // The step chart carries the step name in the metric column
                    metric: crate::utils::sanitize_file_stem(step),
                    error_percent: r.error_percent,
                    distribution: Some(Distribution::from(r)),
                }),
            })
            .collect()
    }

    /// All request step names present in any cycle, sorted
    pub fn step_names(&self) -> Vec<String> {
        let steps: BTreeSet<&String> = self
            .cycle_stats()
            .flat_map(|cycle| cycle.response_step.keys())
            .collect();
        steps.into_iter().cloned().collect()
    }
}

fn record_row(record: &StatRecord) -> ChartRow {
    ChartRow {
        cvus: record.cvus,
        metric: crate::utils::format_value(record.rps),
        error_percent: record.error_percent,
        distribution: Some(Distribution::from(record)),
    }
}

/// True when any row reports a nonzero error rate
pub fn has_errors(rows: &[ChartRow]) -> bool {
    rows.iter().any(|row| row.error_percent != 0.0)
}
