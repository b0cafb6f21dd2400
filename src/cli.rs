//! # Command-Line Interface
//!
//! Argument definitions for the `load-charts` binary, built with clap's
//! derive API.
//!
//! ## Option Groups
//!
//! - **Input and output**: report input file, report directory, plotting
//!   program, `--no-render`
//! - **Chart options**: per-cycle, big and monitor chart sizes, distribution
//!   display
//! - **Logging**: `--verbose` and `--log-file`; `RUST_LOG` overrides the level
//!
//! Sizes are parsed with [`parse_chart_size`] and checked against the png
//! terminal limits when the chart generator is created.

use crate::chart::ChartConfig;
use crate::utils::parse_chart_size;
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Load Charts - render load test statistics as gnuplot charts
#[derive(Parser, Debug, Clone)]
#[clap(version, about, long_about = None)]
pub struct Args {
    /// Report input file (JSON with cycles, results and monitor samples)
    #[clap(value_name = "INPUT")]
    pub input: PathBuf,

    /// Directory receiving data files, scripts, images and the manifest
    #[clap(short = 'o', long, default_value = crate::defaults::REPORT_DIR)]
    pub report_dir: PathBuf,

    /// Plotting program to run on each script
    #[clap(long, default_value = crate::defaults::GNUPLOT_PROGRAM)]
    pub gnuplot: PathBuf,

    /// Write data files and scripts only, without running the plotting program
    #[clap(long, default_value_t = false)]
    pub no_render: bool,

    /// Size of per-cycle charts (WIDTHxHEIGHT)
    #[clap(long, value_parser = parse_chart_size, default_value = "480x480", help_heading = "Chart Options")]
    pub chart_size: (u32, u32),

    /// Largest size a per-cycle chart may widen to with many cycles (WIDTHxHEIGHT)
    #[clap(long, value_parser = parse_chart_size, default_value = "640x480", help_heading = "Chart Options")]
    pub big_chart_size: (u32, u32),

    /// Size of monitored host charts (WIDTHxHEIGHT)
    #[clap(long, value_parser = parse_chart_size, default_value = "640x768", help_heading = "Chart Options")]
    pub monitor_chart_size: (u32, u32),

    /// How response time distributions are drawn
    #[clap(long, value_enum, default_value_t = DistributionDisplay::Percentiles, help_heading = "Chart Options")]
    pub distribution: DistributionDisplay,

    /// Verbose output
    #[clap(short = 'v', long, default_value_t = false)]
    pub verbose: bool,

    /// Write logs to this file instead of the terminal
    #[clap(long)]
    pub log_file: Option<PathBuf>,
}

/// Response time distribution display
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DistributionDisplay {
    /// Candlesticks of min/p10/median and median/p90/p95, plus the average
    #[clap(name = "percentiles")]
    Percentiles,

    /// Average with min and max error bars
    #[clap(name = "min-avg-max")]
    MinAvgMax,
}

impl std::fmt::Display for DistributionDisplay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DistributionDisplay::Percentiles => write!(f, "Percentiles"),
            DistributionDisplay::MinAvgMax => write!(f, "Min/Avg/Max"),
        }
    }
}

/// Chart options from the command line
///
/// The result is not validated yet; `ChartConfig::validate` runs when the
/// generator is created, so bad combinations (a big size narrower than the
/// base size) are reported with the other configuration errors.
impl From<&Args> for ChartConfig {
    fn from(args: &Args) -> Self {
        Self {
            chart_size: args.chart_size,
            big_chart_size: args.big_chart_size,
            monitor_chart_size: args.monitor_chart_size,
            distribution: args.distribution,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["load-charts", "report.json"]);
        assert_eq!(args.input, PathBuf::from("report.json"));
        assert_eq!(args.report_dir, PathBuf::from(crate::defaults::REPORT_DIR));
        assert_eq!(args.gnuplot, PathBuf::from("gnuplot"));
        assert!(!args.no_render);

        let config = ChartConfig::from(&args);
        assert_eq!(config, ChartConfig::default());
    }

    #[test]
    fn test_args_chart_options() {
        let args = Args::parse_from([
            "load-charts",
            "report.json",
            "--chart-size",
            "320x240",
            "--distribution",
            "min-avg-max",
            "--no-render",
        ]);
        let config = ChartConfig::from(&args);
        assert_eq!(config.chart_size, (320, 240));
        assert_eq!(config.distribution, DistributionDisplay::MinAvgMax);
        assert!(args.no_render);
    }

    #[test]
    fn test_invalid_chart_size_rejected() {
        let result = Args::try_parse_from(["load-charts", "report.json", "--chart-size", "big"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_distribution_display() {
        assert_eq!(DistributionDisplay::Percentiles.to_string(), "Percentiles");
        assert_eq!(DistributionDisplay::MinAvgMax.to_string(), "Min/Avg/Max");
    }
}
