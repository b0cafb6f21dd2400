//! # Report Driver
//!
//! Loads the report input, renders every chart it supports and writes the
//! `charts.json` manifest that the document assembly step reads.
//!
//! ## Input Layout
//!
//! ```text
//! {
//!   "cycles":  [1, 5, 10],
//!   "results": { "0": { "test": {..}, "page": {..}, "response": {..},
//!                       "response_step": { "001.001": {..} } } },
//!   "monitor": { "web01": [ {sample}, .. ] }
//! }
//! ```
//!
//! `results` is keyed by the index into `cycles`; `monitor` is optional.

use crate::{
    chart::{ChartArtifact, ChartConfig, ChartGenerator},
    gnuplot::ChartRenderer,
    monitor::MonitorSample,
    stats::{CycleStats, LoadTestStats},
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Everything a report run draws from
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "RawReportInput")]
pub struct ReportInput {
    pub stats: LoadTestStats,
    /// Monitoring samples per host, each list in time order
    pub monitor: BTreeMap<String, Vec<MonitorSample>>,
}

// Flat on-disk layout. Not `#[serde(flatten)]`: flattening loses the
// integer keys of `results`.
#[derive(Deserialize)]
struct RawReportInput {
    cycles: Vec<u32>,
    #[serde(default)]
    results: BTreeMap<usize, CycleStats>,
    #[serde(default)]
    monitor: BTreeMap<String, Vec<MonitorSample>>,
}

impl From<RawReportInput> for ReportInput {
    fn from(raw: RawReportInput) -> Self {
        Self {
            stats: LoadTestStats {
                cycles: raw.cycles,
                results: raw.results,
            },
            monitor: raw.monitor,
        }
    }
}

impl ReportInput {
    /// Load a report input from a JSON file
    ///
    /// Read and parse failures carry the file path in their context, so the
    /// top-level error message names the offending file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read report input {:?}", path))?;
        let input: ReportInput = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse report input {:?}", path))?;
        debug!(
            "Loaded {} cycles, {} results, {} monitored hosts",
            input.stats.cycles.len(),
            input.stats.results.len(),
            input.monitor.len()
        );
        Ok(input)
    }
}

/// Generates all charts for a report and records what was produced
///
/// ## Lifecycle
///
/// 1. [`ReportManager::new`] validates the chart configuration and prepares
///    the report directory
/// 2. [`ReportManager::render`] draws every chart, stopping at the first failure
/// 3. [`ReportManager::finalize`] writes the manifest of everything rendered
pub struct ReportManager {
    generator: ChartGenerator,
    artifacts: Vec<ChartArtifact>,
    rendered: bool,
}

impl ReportManager {
    /// Create a report manager writing into `report_dir`
    ///
    /// `cycles` is the configured cycle sequence; it fixes the x axis mode
    /// for every per-cycle chart of the report.
    pub fn new(
        report_dir: &Path,
        config: ChartConfig,
        cycles: &[u32],
        renderer: Box<dyn ChartRenderer>,
    ) -> Result<Self> {
        let rendered = renderer.produces_images();
        let generator = ChartGenerator::new(config, report_dir, cycles, renderer)?;
        Ok(Self {
            generator,
            artifacts: Vec::new(),
            rendered,
        })
    }

    /// Render every chart the input supports
    ///
    /// Returns all artifacts recorded so far, including those of earlier
    /// calls.
    pub fn render(&mut self, input: &ReportInput) -> Result<&[ChartArtifact]> {
        info!("Generating charts into {:?}", self.generator.report_dir());
        let artifacts = self.generator.render_all(&input.stats, &input.monitor)?;
        self.artifacts.extend(artifacts);
        Ok(&self.artifacts)
    }

    /// Write the chart manifest and return its path
    ///
    /// `rendered` in the manifest is false when the renderer only wrote
    /// scripts, so consumers know not to look for images.
    pub fn finalize(&self) -> Result<PathBuf> {
        let manifest = ChartManifest {
            version: crate::VERSION.to_string(),
            generated_at: chrono::Utc::now(),
            rendered: self.rendered,
            x_axis: if self.generator.axis_mode().is_labels() {
                "labels".to_string()
            } else {
                "numeric".to_string()
            },
            charts: self.artifacts.clone(),
        };
        let path = self
            .generator
            .report_dir()
            .join(crate::defaults::MANIFEST_FILE);
        let json = serde_json::to_string_pretty(&manifest)?;
        std::fs::write(&path, json).with_context(|| format!("Failed to write {:?}", path))?;

        info!(
            "{} charts written, manifest: {:?}",
            self.artifacts.len(),
            path
        );
        Ok(path)
    }
}

/// Manifest listing every chart of a report run
///
/// The document assembly step reads this to find the images.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChartManifest {
    pub version: String,
    pub generated_at: chrono::DateTime<chrono::Utc>,
    /// False when only data files and scripts were written
    pub rendered: bool,
    pub x_axis: String,
    pub charts: Vec<ChartArtifact>,
}
