#![cfg(unix)]

use anyhow::Result;
use load_charts::{
    report::{ReportInput, ReportManager},
    ChartConfig, ChartError, GnuplotRenderer,
};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

const INPUT: &str = r#"{
    "cycles": [10],
    "results": { "0": { "test": { "cvus": 10, "tps": 3.0, "error_percent": 0.0 } } }
}"#;

/// Write an executable shell script standing in for gnuplot.
fn fake_gnuplot(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("fake-gnuplot");
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
    path
}

fn manager(report_dir: &Path, program: &Path) -> Result<(ReportManager, ReportInput)> {
    let input: ReportInput = serde_json::from_str(INPUT)?;
    let manager = ReportManager::new(
        report_dir,
        ChartConfig::default(),
        &input.stats.cycles,
        Box::new(GnuplotRenderer::new(program)),
    )?;
    Ok((manager, input))
}

#[test]
fn renderer_runs_in_report_directory() -> Result<()> {
    let tools = tempfile::tempdir()?;
    let report = tempfile::tempdir()?;
    // Record the working directory and the script argument
    let program = fake_gnuplot(tools.path(), "pwd > ran_in.txt\necho \"$1\" >> ran_in.txt");

    let (mut manager, input) = manager(report.path(), &program)?;
    manager.render(&input)?;

    let log = std::fs::read_to_string(report.path().join("ran_in.txt"))?;
    let mut lines = log.lines();
    let cwd = std::fs::canonicalize(lines.next().unwrap())?;
    assert_eq!(cwd, std::fs::canonicalize(report.path())?);
    assert!(lines.next().unwrap().ends_with("tests.gplot"));

    // Single cycle: label mode, no numeric range
    let script = std::fs::read_to_string(report.path().join("tests.gplot"))?;
    assert!(script.contains("u :2:xticlabels(1)"));
    Ok(())
}

#[test]
fn nonzero_exit_fails_with_command_and_output() -> Result<()> {
    let tools = tempfile::tempdir()?;
    let report = tempfile::tempdir()?;
    let program = fake_gnuplot(tools.path(), "echo \"line 1: invalid command\" >&2\nexit 3");

    let (mut manager, input) = manager(report.path(), &program)?;
    let err = manager.render(&input).unwrap_err();

    match err.downcast_ref::<ChartError>() {
        Some(ChartError::RenderFailed {
            command,
            status,
            output,
        }) => {
            assert!(command.contains("fake-gnuplot"));
            assert!(command.contains("tests.gplot"));
            assert_eq!(*status, Some(3));
            assert_eq!(output, "line 1: invalid command");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    // The data and script were written before the render failed
    assert!(report.path().join("tests.data").exists());
    assert!(report.path().join("tests.gplot").exists());
    Ok(())
}
