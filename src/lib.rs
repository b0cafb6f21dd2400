//! # Load Charts Library
//!
//! Renders load test results as gnuplot charts. Already-aggregated statistics
//! for each cycle (one concurrency level) and raw host monitoring samples are
//! written out as whitespace-delimited data tables, paired with generated
//! gnuplot scripts, and rendered to PNG images by running `gnuplot`.
//!
//! ## Charts
//!
//! - **Tests**: successful tests per second by concurrent users
//! - **Pages / Requests**: throughput plus a response time distribution chart
//! - **Request steps**: response time distribution for each named step
//! - **Monitored hosts**: users, CPU and load, network and memory over time
//!
//! Per-cycle charts switch to a two-panel layout with an error percentage
//! panel whenever a cycle reports errors, and to category x labels when the
//! configured cycles are not strictly increasing.
//!
//! ## Architecture Overview
//!
//! - `axis`: numeric vs label x-axis selection
//! - `chart`: layout decisions, data tables and chart scripts
//! - `cli`: command-line parsing and conversion to `ChartConfig`
//! - `gnuplot`: script builder and the renderer seam
//! - `monitor`: rates and deltas derived from monitoring samples
//! - `report`: input loading, chart run and manifest output
//! - `stats`: read-only views of per-cycle statistics
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use load_charts::{ChartConfig, GnuplotRenderer, ReportInput, ReportManager};
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let input = ReportInput::from_file(Path::new("stats.json"))?;
//!     let mut manager = ReportManager::new(
//!         Path::new("report"),
//!         ChartConfig::default(),
//!         &input.stats.cycles,
//!         Box::new(GnuplotRenderer::default()),
//!     )?;
//!     manager.render(&input)?;
//!     manager.finalize()?;
//!     Ok(())
//! }
//! ```

/// X-axis mode selection
///
/// Decides once per report whether the concurrent-users axis is numeric or
/// made of category labels.
pub mod axis;

/// Chart layout and script generation
///
/// Contains `ChartGenerator`, which writes each chart's data table and script
/// and hands the script to the renderer.
pub mod chart;

/// Command-line interface and configuration
pub mod cli;

pub mod error;

/// Gnuplot script building and subprocess rendering
pub mod gnuplot;

pub mod logging;

/// Monitoring sample derivations
///
/// CPU busy fraction, network rates and memory deltas between consecutive
/// samples of a host.
pub mod monitor;

/// Input loading and chart manifest output
pub mod report;

/// Per-cycle statistic records
pub mod stats;

pub mod utils;

pub use axis::{select_axis_mode, AxisMode};
pub use chart::{ChartArtifact, ChartConfig, ChartGenerator, ChartKind, PanelLayout};
pub use cli::{Args, DistributionDisplay};
pub use error::ChartError;
pub use gnuplot::{ChartRenderer, GnuplotRenderer, ScriptOnly};
pub use monitor::MonitorSample;
pub use report::{ReportInput, ReportManager};
pub use stats::{CycleStats, LoadTestStats, StatRecord, TestStat};

/// The current version, recorded in the chart manifest
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration values
pub mod defaults {
    /// Per-cycle chart size with few cycles
    ///
    /// Square 480 pixel charts fit two side by side in a report page.
    pub const CHART_SIZE: (u32, u32) = (480, 480);

    /// Widest a per-cycle chart grows as cycles are added
    pub const BIG_CHART_SIZE: (u32, u32) = (640, 480);

    /// Horizontal pixels reserved per plotted cycle
    pub const PIXELS_PER_CYCLE: u32 = 50;

    /// Four stacked monitor panels need extra height
    pub const MONITOR_CHART_SIZE: (u32, u32) = (640, 768);

    /// Plotting program looked up on `PATH`
    pub const GNUPLOT_PROGRAM: &str = "gnuplot";

    /// Default output directory
    pub const REPORT_DIR: &str = "report";

    /// Manifest file name inside the report directory
    pub const MANIFEST_FILE: &str = "charts.json";
}
