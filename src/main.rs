//! # Load Charts - Main Entry Point
//!
//! Reads a report input file and renders its charts:
//! 1. **Initialize logging**: colorized terminal output or a plain log file
//! 2. **Parse arguments**: input file, report directory, chart options
//! 3. **Load input**: per-cycle statistics and monitoring samples
//! 4. **Render charts**: one chart at a time, failing on the first render error
//! 5. **Write manifest**: `charts.json` listing every produced file

use anyhow::Result;
use clap::Parser;
use load_charts::{
    chart::ChartConfig,
    cli::Args,
    gnuplot::{ChartRenderer, GnuplotRenderer, ScriptOnly},
    report::{ReportInput, ReportManager},
};
use tracing::{error, info};

/// Application entry point
///
/// Fully synchronous: each chart is written and rendered before the next one
/// starts, so output order and file contents are deterministic.
fn main() -> Result<()> {
    // Parse command-line arguments using clap derive API
    // Chart sizes are parsed and range-checked here
    let args = Args::parse();

    // Initialize logging before anything else can fail
    // The guard flushes the log file writer when main returns
    let _guard = load_charts::logging::init(args.verbose, args.log_file.as_deref())?;

    info!("Starting Load Charts {}", load_charts::VERSION);
    info!("Configuration: {:?}", args);

    if let Err(e) = run(&args) {
        error!("Chart generation failed: {:#}", e);
        return Err(e);
    }
    Ok(())
}

/// Load the input, render every chart and write the manifest
fn run(args: &Args) -> Result<()> {
    // Convert CLI options into the chart configuration
    // Validation happens when the generator is created
    let config = ChartConfig::from(args);
    let input = ReportInput::from_file(&args.input)?;

    // Pick the renderer: gnuplot subprocess, or scripts only
    let renderer: Box<dyn ChartRenderer> = if args.no_render {
        info!("Rendering disabled, writing data files and scripts only");
        Box::new(ScriptOnly)
    } else {
        let gnuplot = GnuplotRenderer::new(&args.gnuplot);
        info!("Rendering charts with {}", gnuplot.program().display());
        Box::new(gnuplot)
    };

    // Render in a fixed order; the first failed chart aborts the run
    let mut manager =
        ReportManager::new(&args.report_dir, config, &input.stats.cycles, renderer)?;
    manager.render(&input)?;

    // Manifest goes last so it only lists charts that were produced
    manager.finalize()?;

    info!("Load Charts completed successfully");
    Ok(())
}
