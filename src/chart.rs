//! # Chart Generator Module
//!
//! Writes the data table and gnuplot script for each chart, then hands the
//! script to a [`ChartRenderer`]. All layout decisions are made here:
//!
//! - **Panels**: a chart whose rows all report a zero error rate gets a single
//!   panel. As soon as one row has errors, the primary plot moves to the top
//!   70% and an error percentage panel fills the bottom 30%, sharing the x range.
//! - **X axis**: numeric `[0:max]` or category labels, as chosen by
//!   [`select_axis_mode`] for the whole report.
//! - **Durations**: percentile candlesticks or a min/avg/max error line,
//!   according to [`DistributionDisplay`].
//!
//! ## Data Table Columns
//!
//! ```text
//! 1    2         3     4   5   6   7   8   9   10
//! CUs  <METRIC>  ERROR MIN AVG MAX P10 P50 P90 P95
//! ```
//!
//! The duration columns are only present for page and request charts. Scripts
//! reference these fixed positions.

use crate::{
    axis::{label_reason, select_axis_mode, AxisMode},
    cli::DistributionDisplay,
    error::ChartError,
    gnuplot::{escape, ChartRenderer, Layer, Script},
    monitor::{derive_rows, MonitorSample, MONITOR_HEADER},
    stats::{has_errors, ChartRow, LoadTestStats, StatKind},
    utils::{format_value, sanitize_file_stem, validate_chart_size, MISSING_VALUE},
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const COL_METRIC: usize = 2;
const COL_ERROR: usize = 3;
const COL_MIN: usize = 4;
const COL_AVG: usize = 5;
const COL_MAX: usize = 6;
const COL_P10: usize = 7;
const COL_P50: usize = 8;
const COL_P90: usize = 9;
const COL_P95: usize = 10;

const DISTRIBUTION_HEADER: &str = "MIN AVG MAX P10 P50 P90 P95";
const CVUS_LABEL: &str = "Concurrent Users";

/// Chart rendering options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Size of per-cycle charts with few cycles
    pub chart_size: (u32, u32),
    /// Upper bound a per-cycle chart may widen to
    pub big_chart_size: (u32, u32),
    /// Size of the four-panel monitor charts
    pub monitor_chart_size: (u32, u32),
    pub distribution: DistributionDisplay,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            chart_size: crate::defaults::CHART_SIZE,
            big_chart_size: crate::defaults::BIG_CHART_SIZE,
            monitor_chart_size: crate::defaults::MONITOR_CHART_SIZE,
            distribution: DistributionDisplay::Percentiles,
        }
    }
}

impl ChartConfig {
    /// Check every size is usable and the big size is not smaller than the base
    pub fn validate(&self) -> Result<()> {
        validate_chart_size(self.chart_size)?;
        validate_chart_size(self.big_chart_size)?;
        validate_chart_size(self.monitor_chart_size)?;
        if self.big_chart_size.0 < self.chart_size.0 {
            return Err(ChartError::InvalidConfig(format!(
                "big chart width {} is smaller than chart width {}",
                self.big_chart_size.0, self.chart_size.0
            ))
            .into());
        }
        Ok(())
    }

    /// Chart size for a chart plotting `points` cycles
    ///
    /// Each cycle gets 50 pixels of width once that exceeds the base width,
    /// up to the big chart size.
    pub fn chart_size_for(&self, points: usize) -> (u32, u32) {
        let wanted = (points as u32).saturating_mul(crate::defaults::PIXELS_PER_CYCLE);
        if wanted <= self.chart_size.0 {
            self.chart_size
        } else if wanted < self.big_chart_size.0 {
            (wanted, self.big_chart_size.1)
        } else {
            self.big_chart_size
        }
    }
}

/// What a chart shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartKind {
    Tests,
    Pages,
    Requests,
    RequestStep { step: String },
    Monitor { host: String },
}

/// Panel arrangement chosen for a chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelLayout {
    Single,
    WithErrorPanel,
    MonitorStack,
}

/// Files produced for one chart, relative to the report directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartArtifact {
    #[serde(flatten)]
    pub kind: ChartKind,
    pub data: String,
    pub script: String,
    pub images: Vec<String>,
    pub layout: PanelLayout,
}

/// The plot drawn in the main (top) panel of a per-cycle chart
#[derive(Debug, Clone, PartialEq)]
pub enum PrimaryPlot {
    Throughput {
        title: String,
        ylabel: String,
        legend: String,
    },
    ResponseTime {
        title: String,
    },
}

/// Description of one per-cycle chart
#[derive(Debug, Clone, PartialEq)]
pub struct ThroughputChart {
    pub kind: ChartKind,
    /// File stem for the data and script files
    pub stem: String,
    /// Statistic rows are drawn from
    pub stat: StatKind,
    /// Header name of column 2
    pub metric_column: String,
    pub primary: PrimaryPlot,
    pub primary_image: String,
    /// Follow-up response time image and its title
    pub response_image: Option<(String, String)>,
    /// Pin the error panel to 0-100% with 20% tics
    pub fixed_error_scale: bool,
}

impl ThroughputChart {
    /// Successful tests per second, with the error panel pinned to 0-100%
    pub fn tests() -> Self {
        Self {
            kind: ChartKind::Tests,
            stem: "tests".to_string(),
            stat: StatKind::Test,
            metric_column: "STPS".to_string(),
            primary: PrimaryPlot::Throughput {
                title: "Successful Tests Per Second".to_string(),
                ylabel: "Test/s".to_string(),
                legend: "STPS".to_string(),
            },
            primary_image: "tests.png".to_string(),
            response_image: None,
            fixed_error_scale: true,
        }
    }

    /// Successful pages per second, followed by the page response time image
    pub fn pages() -> Self {
        Self {
            kind: ChartKind::Pages,
            stem: "pages".to_string(),
            stat: StatKind::Page,
            metric_column: "SPPS".to_string(),
            primary: PrimaryPlot::Throughput {
                title: "Successful Pages Per Second".to_string(),
                ylabel: "Pages Per Second".to_string(),
                legend: "SPPS".to_string(),
            },
            primary_image: "pages_spps.png".to_string(),
            response_image: Some(("pages.png".to_string(), "Pages Response time".to_string())),
            fixed_error_scale: false,
        }
    }

    /// Requests per second, followed by the request response time image
    pub fn requests() -> Self {
        Self {
            kind: ChartKind::Requests,
            stem: "requests".to_string(),
            stat: StatKind::Response,
            metric_column: "RPS".to_string(),
            primary: PrimaryPlot::Throughput {
                title: "Requests Per Second".to_string(),
                ylabel: "Requests Per Second".to_string(),
                legend: "RPS".to_string(),
            },
            primary_image: "requests_rps.png".to_string(),
            response_image: Some((
                "requests.png".to_string(),
                "Requests Response time".to_string(),
            )),
            fixed_error_scale: false,
        }
    }

    /// Response time of one request step
    ///
    /// The step name is sanitized for the file stem but kept verbatim in the
    /// title. Two names that sanitize alike are told apart by
    /// [`ChartGenerator::render_all`], which renames the later chart with
    /// [`ThroughputChart::with_stem`].
    ///
    /// ## Examples
    ///
    /// ```rust
    /// # use load_charts::chart::ThroughputChart;
    /// let chart = ThroughputChart::request_step("login/submit");
    /// assert_eq!(chart.stem, "request_login_submit");
    /// assert_eq!(chart.primary_image, "request_login_submit.png");
    /// ```
    pub fn request_step(step: &str) -> Self {
        let stem = format!("request_{}", sanitize_file_stem(step));
        Self {
            kind: ChartKind::RequestStep {
                step: step.to_string(),
            },
            primary_image: format!("{}.png", stem),
            stem,
            stat: StatKind::ResponseStep(step.to_string()),
            metric_column: "STEP".to_string(),
            primary: PrimaryPlot::ResponseTime {
                title: format!("Request {} Response time", step),
            },
            response_image: None,
            fixed_error_scale: false,
        }
    }

    /// Move the chart to another file stem
    ///
    /// Image names that start with the old stem follow it, so
    /// `pages_spps.png` becomes `pages-2_spps.png`.
    pub fn with_stem(mut self, stem: String) -> Self {
        let old = std::mem::replace(&mut self.stem, stem);
        self.primary_image = restem(&self.primary_image, &old, &self.stem);
        if let Some((image, _)) = self.response_image.as_mut() {
            *image = restem(image.as_str(), &old, &self.stem);
        }
        self
    }

    fn with_distribution(&self) -> bool {
        !matches!(self.stat, StatKind::Test)
    }
}

fn restem(image: &str, old: &str, new: &str) -> String {
    match image.strip_prefix(old) {
        Some(rest) => format!("{}{}", new, rest),
        None => image.to_string(),
    }
}

/// File stem of the monitor chart for `host`
pub fn monitor_stem(host: &str) -> String {
    format!("{}_monitor", sanitize_file_stem(host))
}

/// Reserve `stem`, or the first free `stem-N` (N >= 2) if it is taken
///
/// Sanitizing step and host names can map distinct names onto one stem;
/// each chart must still own its data, script and image files.
///
/// ## Examples
///
/// ```rust
/// # use std::collections::HashSet;
/// # use load_charts::chart::claim_stem;
/// let mut used = HashSet::new();
/// assert_eq!(claim_stem(&mut used, "request_a_b"), "request_a_b");
/// assert_eq!(claim_stem(&mut used, "request_a_b"), "request_a_b-2");
/// assert_eq!(claim_stem(&mut used, "request_a_b"), "request_a_b-3");
/// ```
pub fn claim_stem(used: &mut HashSet<String>, stem: &str) -> String {
    if used.insert(stem.to_string()) {
        return stem.to_string();
    }
    let mut n = 2;
    loop {
        let candidate = format!("{}-{}", stem, n);
        if used.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

/// Render the data table for a per-cycle chart
///
/// The header names every column; the seven duration columns are appended
/// only when `with_distribution` is set. Rows whose record carries no
/// distribution get the missing marker in those columns.
///
/// The output depends only on the rows, so rendering the same statistics
/// twice yields identical bytes.
///
/// ## Examples
///
/// ```rust
/// # use load_charts::chart::throughput_table;
/// # use load_charts::stats::ChartRow;
/// let rows = vec![ChartRow {
///     cvus: 10,
///     metric: "12.5".to_string(),
///     error_percent: 0.0,
///     distribution: None,
/// }];
/// assert_eq!(throughput_table("STPS", false, &rows), "CUs STPS ERROR\n10 12.5 0\n");
/// ```
pub fn throughput_table(metric_column: &str, with_distribution: bool, rows: &[ChartRow]) -> String {
    let mut header = format!("CUs {} ERROR", metric_column);
    if with_distribution {
        header.push(' ');
        header.push_str(DISTRIBUTION_HEADER);
    }
    let mut lines = vec![header];
    for row in rows {
        let mut values = vec![
            row.cvus.to_string(),
            row.metric.clone(),
            format_value(row.error_percent),
        ];
        if with_distribution {
            match &row.distribution {
                Some(d) => values.extend(
                    [
                        d.min,
                        d.avg,
                        d.max,
                        d.percentiles.perc10,
                        d.percentiles.perc50,
                        d.percentiles.perc90,
                        d.percentiles.perc95,
                    ]
                    .iter()
                    .map(|v| format_value(*v)),
                ),
                None => values.extend((0..7).map(|_| MISSING_VALUE.to_string())),
            }
        }
        lines.push(values.join(" "));
    }
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Writes chart data and scripts into a report directory and renders them
///
/// The generator owns the decisions shared by every chart of a report: the
/// configured sizes, the axis mode derived from the configured cycles and
/// the renderer the scripts are handed to.
pub struct ChartGenerator {
    config: ChartConfig,
    report_dir: PathBuf,
    axis: AxisMode,
    renderer: Box<dyn ChartRenderer>,
}

impl ChartGenerator {
    /// Create a generator for a report whose configured cycles are `cycles`
    ///
    /// Validates `config`, creates `report_dir` if needed and selects the
    /// axis mode. Label mode is announced with the condition that forced it.
    pub fn new(
        config: ChartConfig,
        report_dir: &Path,
        cycles: &[u32],
        renderer: Box<dyn ChartRenderer>,
    ) -> Result<Self> {
        config.validate()?;
        std::fs::create_dir_all(report_dir)
            .with_context(|| format!("Failed to create report directory {:?}", report_dir))?;
        let axis = select_axis_mode(cycles);
        if let Some(reason) = label_reason(cycles) {
            warn!("Cycles {:?} {}, using x tic labels", cycles, reason);
        }
        Ok(Self {
            config,
            report_dir: report_dir.to_path_buf(),
            axis,
            renderer,
        })
    }

    /// Axis mode every per-cycle chart of this report uses
    pub fn axis_mode(&self) -> AxisMode {
        self.axis
    }

    /// Directory receiving every file this generator writes
    pub fn report_dir(&self) -> &Path {
        &self.report_dir
    }

    /// Render every chart the statistics and monitoring samples support
    ///
    /// Charts are produced one after another in a fixed order: tests, pages,
    /// requests, each request step, then each monitored host. Every chart
    /// gets its own file stem; a sanitized name that repeats an earlier stem
    /// is suffixed with `-2`, `-3` and so on.
    ///
    /// The first render failure aborts the run. Files written before it stay
    /// on disk.
    pub fn render_all(
        &self,
        stats: &LoadTestStats,
        monitor: &BTreeMap<String, Vec<MonitorSample>>,
    ) -> Result<Vec<ChartArtifact>> {
        let mut charts = vec![
            ThroughputChart::tests(),
            ThroughputChart::pages(),
            ThroughputChart::requests(),
        ];
        charts.extend(
            stats
                .step_names()
                .iter()
                .map(|step| ThroughputChart::request_step(step)),
        );

        let mut used = HashSet::new();
        let mut artifacts = Vec::new();
        for chart in charts {
            let stem = claim_stem(&mut used, &chart.stem);
            let chart = if stem == chart.stem {
                chart
            } else {
                warn!("File stem {} is taken, writing {:?} as {}", chart.stem, chart.kind, stem);
                chart.with_stem(stem)
            };
            let rows = stats.rows(&chart.stat);
            if let Some(artifact) = self.render_throughput_chart(&chart, &rows)? {
                artifacts.push(artifact);
            }
        }
        for (host, samples) in monitor {
            let wanted = monitor_stem(host);
            let stem = claim_stem(&mut used, &wanted);
            if stem != wanted {
                warn!("File stem {} is taken, writing monitor chart of {} as {}", wanted, host, stem);
            }
            artifacts.push(self.render_monitor_chart_as(host, &stem, samples)?);
        }
        Ok(artifacts)
    }

    /// Write, script and render one per-cycle chart
    ///
    /// Returns `None` without touching the filesystem when no cycle carries
    /// the chart's statistic.
    pub fn render_throughput_chart(
        &self,
        chart: &ThroughputChart,
        rows: &[ChartRow],
    ) -> Result<Option<ChartArtifact>> {
        if rows.is_empty() {
            debug!("No {:?} statistics, skipping {} chart", chart.stat, chart.stem);
            return Ok(None);
        }
        let data_name = format!("{}.data", chart.stem);
        let script_name = format!("{}.gplot", chart.stem);

        let table = throughput_table(&chart.metric_column, chart.with_distribution(), rows);
        self.write_file(&data_name, &table)?;

        let (script, layout) = self.throughput_script(chart, rows, &data_name);
        self.write_file(&script_name, &script.to_text())?;

        info!(
            "Rendering {} chart ({} cycles, {:?})",
            chart.stem,
            rows.len(),
            layout
        );
        self.renderer.render(&self.report_dir.join(&script_name))?;

        let mut images = vec![chart.primary_image.clone()];
        if let Some((image, _)) = &chart.response_image {
            images.push(image.clone());
        }
        Ok(Some(ChartArtifact {
            kind: chart.kind.clone(),
            data: data_name,
            script: script_name,
            images,
            layout,
        }))
    }

    /// Build the script for a per-cycle chart
    ///
    /// The primary plot is either the throughput line or, for request step
    /// charts, the response time layers. Without errors it is the only plot
    /// on the image. With errors it moves into the top panel of a multiplot
    /// and the error rate is drawn below it on the same x range. Page and
    /// request charts then switch output to their response time image and
    /// plot the duration layers there.
    pub fn throughput_script(
        &self,
        chart: &ThroughputChart,
        rows: &[ChartRow],
        data_name: &str,
    ) -> (Script, PanelLayout) {
        let cvus: usize = rows.len();
        let mut script = Script::new();
        script
            .output(&chart.primary_image)
            .terminal_png(self.config.chart_size_for(cvus))
            .set(&format!("datafile missing \"{}\"", MISSING_VALUE));

        let primary_layers = match &chart.primary {
            PrimaryPlot::Throughput {
                title,
                ylabel,
                legend,
            } => {
                script.title(title).ylabel(ylabel);
                vec![Layer::new(
                    Some(data_name),
                    self.axis.using(&[COL_METRIC]),
                    "linespoints lw 2 lt 2",
                    Some(legend.as_str()),
                )]
            }
            PrimaryPlot::ResponseTime { title } => {
                script
                    .title(title)
                    .ylabel("Duration (s)")
                    .set("bars 5.0")
                    .set("style fill solid .25");
                self.response_time_layers(data_name)
            }
        };
        script.xlabel(CVUS_LABEL).set("grid back");
        if let Some(range) = self.axis.range_directive() {
            script.line(range);
        }

        let layout = if has_errors(rows) {
            self.error_panels(
                &mut script,
                &primary_layers,
                data_name,
                chart.fixed_error_scale,
            );
            PanelLayout::WithErrorPanel
        } else {
            script.plot(&primary_layers);
            PanelLayout::Single
        };

        if let Some((image, title)) = &chart.response_image {
            script
                .output(image)
                .title(title)
                .xlabel(CVUS_LABEL)
                .ylabel("Duration (s)")
                .set("autoscale y")
                .set("bars 5.0")
                .set("grid back")
                .set("style fill solid .25");
            script.plot(&self.response_time_layers(data_name));
        }
        (script, layout)
    }

    /// Layers drawing the duration distribution of each cycle
    ///
    /// In percentile mode two candlestick layers approximate a box plot: the
    /// first spans p50 to p90 with a whisker to p95, the second spans p10 to
    /// p50 with a whisker down to min. The average is drawn as a line on top.
    pub fn response_time_layers(&self, data_name: &str) -> Vec<Layer> {
        match self.config.distribution {
            DistributionDisplay::Percentiles => vec![
                Layer::new(
                    Some(data_name),
                    self.axis.using(&[COL_P50, COL_P50, COL_P95, COL_P90]),
                    "candlesticks lt 1 lw 1 whiskerbars 0.5",
                    Some("med/p90/p95"),
                ),
                Layer::new(
                    None,
                    self.axis.using(&[COL_P10, COL_MIN, COL_P50, COL_P50]),
                    "candlesticks lt 2 lw 1 whiskerbars 0.5",
                    Some("min/p10/med"),
                ),
                Layer::new(
                    None,
                    self.axis.using(&[COL_AVG]),
                    "lines lt 3 lw 2",
                    Some("avg"),
                ),
            ],
            DistributionDisplay::MinAvgMax => vec![Layer::new(
                Some(data_name),
                self.axis.using(&[COL_AVG, COL_MIN, COL_MAX]),
                "yerrorlines lt 1 lw 2",
                Some("min/avg/max"),
            )],
        }
    }

    /// Emit the two-panel multiplot: primary on top, error rate below
    fn error_panels(
        &self,
        script: &mut Script,
        primary: &[Layer],
        data_name: &str,
        fixed_error_scale: bool,
    ) {
        script
            .set("format x \"\"")
            .set("multiplot")
            .unset("title")
            .unset("xlabel")
            .set("size 1, 0.7")
            .set("origin 0, 0.3")
            .set("lmargin 5")
            .set("bmargin 0");
        script.plot(primary);
        script
            .set("format x \"% g\"")
            .set("bmargin 3")
            .set("autoscale y")
            .set("style fill solid .25")
            .set("size 1.0, 0.3");
        if fixed_error_scale {
            script.set("ytics 20");
        }
        script
            .xlabel(CVUS_LABEL)
            .ylabel("% errors")
            .set("origin 0.0, 0.0");
        if fixed_error_scale {
            script.set("yrange [0:100]");
        }
        script.plot(&[Layer::new(
            Some(data_name),
            self.axis.using(&[COL_ERROR]),
            "linespoints lt 1 lw 2",
            Some("% Errors"),
        )]);
        script.unset("multiplot").set("size 1.0, 1.0");
    }

    /// Write, script and render the four-panel chart of one monitored host
    ///
    /// Fails with [`ChartError::EmptyMonitorSeries`] when there are no
    /// samples: a host that reported nothing is a collection problem, not an
    /// empty chart.
    pub fn render_monitor_chart(
        &self,
        host: &str,
        samples: &[MonitorSample],
    ) -> Result<ChartArtifact> {
        self.render_monitor_chart_as(host, &monitor_stem(host), samples)
    }

    fn render_monitor_chart_as(
        &self,
        host: &str,
        stem: &str,
        samples: &[MonitorSample],
    ) -> Result<ChartArtifact> {
        if samples.is_empty() {
            return Err(ChartError::EmptyMonitorSeries {
                host: host.to_string(),
            }
            .into());
        }
        let data_name = format!("{}.data", stem);
        let script_name = format!("{}.gplot", stem);
        let image_name = format!("{}.png", stem);

        let mut table = String::from(MONITOR_HEADER);
        table.push('\n');
        for row in derive_rows(samples) {
            table.push_str(&row.to_line());
            table.push('\n');
        }
        self.write_file(&data_name, &table)?;

        let script = self.monitor_script(host, &data_name, &image_name);
        self.write_file(&script_name, &script.to_text())?;

        info!("Rendering monitor chart for {} ({} samples)", host, samples.len());
        self.renderer.render(&self.report_dir.join(&script_name))?;

        Ok(ChartArtifact {
            kind: ChartKind::Monitor {
                host: host.to_string(),
            },
            data: data_name,
            script: script_name,
            images: vec![image_name],
            layout: PanelLayout::MonitorStack,
        })
    }

    /// Build the monitor chart script
    ///
    /// Four stacked panels share a clock x axis read from column 1:
    /// concurrent users, CPU with load averages, network traffic, and memory
    /// with swap. The axis mode of the report does not apply here.
    ///
    /// Columns: 1 TIME, 2 CUs, 3 CPU, 4-6 LOAD1/5/15, 7 MEM, 8 SWAP,
    /// 9 NETIN, 10 NETOUT.
    pub fn monitor_script(&self, host: &str, data_name: &str, image_name: &str) -> Script {
        let mut script = Script::new();
        script
            .output(image_name)
            .terminal_png(self.config.monitor_chart_size)
            .set(&format!("datafile missing \"{}\"", MISSING_VALUE))
            .line(format!(
                "set multiplot layout 4, 1 title \"Monitoring {}\"",
                escape(host)
            ))
            .set("grid back")
            .set("xdata time")
            .set("timefmt \"%H:%M:%S\"")
            .set("format x \"%H:%M\"");

        script
            .line("set title \"Concurrent Users\" offset 0, -2")
            .ylabel("CUs");
        script.plot(&[Layer::new(
            Some(data_name),
            time_using(&[2]),
            "impulse lw 2 lt 3",
            None,
        )]);

        script.title("Load average").ylabel("loadavg");
        script.plot(&[
            Layer::new(
                Some(data_name),
                time_using(&[3]),
                "impulse lw 2 lt 1",
                Some("CPU 1=100%"),
            ),
            Layer::new(None, time_using(&[4]), "lines lw 2 lt 3", Some("Load 1min")),
            Layer::new(None, time_using(&[5]), "lines lw 2 lt 4", Some("Load 5min")),
            Layer::new(None, time_using(&[6]), "lines lw 2 lt 5", Some("Load 15min")),
        ]);

        script.title("Network traffic").ylabel("kB/s");
        script.plot(&[
            Layer::new(Some(data_name), time_using(&[9]), "lines lw 2 lt 2", Some("In")),
            Layer::new(None, time_using(&[10]), "lines lw 1 lt 1", Some("Out")),
        ]);

        script.title("Memory usage").ylabel("kB");
        script.plot(&[
            Layer::new(Some(data_name), time_using(&[7]), "lines lw 2 lt 2", Some("Memory")),
            Layer::new(None, time_using(&[8]), "lines lw 2 lt 1", Some("Swap")),
        ]);

        script.unset("multiplot");
        script
    }

    fn write_file(&self, name: &str, content: &str) -> Result<()> {
        let path = self.report_dir.join(name);
        std::fs::write(&path, content).with_context(|| format!("Failed to write {:?}", path))?;
        debug!("Wrote {:?}", path);
        Ok(())
    }
}

// Monitor panels plot against the clock in column 1 regardless of axis mode
fn time_using(columns: &[usize]) -> String {
    let ys: Vec<String> = columns.iter().map(|c| c.to_string()).collect();
    format!("1:{}", ys.join(":"))
}
