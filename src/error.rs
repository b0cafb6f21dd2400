//! Error types for chart generation
//!
//! Most of the crate propagates `anyhow::Error` with context, the same way the
//! binary does. The failures a caller may want to tell apart are collected in
//! [`ChartError`] so they can be matched with `downcast_ref`.

use std::path::PathBuf;
use thiserror::Error;

/// Distinguishable chart generation failures
#[derive(Debug, Error)]
pub enum ChartError {
    /// The plotting program ran but exited with a nonzero status.
    #[error("Failed to run gnuplot cmd: {command}\n{output}")]
    RenderFailed {
        command: String,
        status: Option<i32>,
        output: String,
    },

    /// The plotting program could not be started at all.
    #[error("Failed to spawn gnuplot cmd: {command}: {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// A monitored host has no samples to plot.
    #[error("No monitoring samples for host '{host}'")]
    EmptyMonitorSeries { host: String },

    /// The script path has no parent directory to run the plotting program in.
    #[error("Script path {path:?} has no parent directory")]
    InvalidScriptPath { path: PathBuf },

    /// Chart configuration values outside the accepted range.
    #[error("Invalid chart configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_failed_message_contains_command_and_output() {
        let err = ChartError::RenderFailed {
            command: "cd /tmp/report; gnuplot /tmp/report/tests.gplot".to_string(),
            status: Some(1),
            output: "line 3: undefined variable".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("gnuplot /tmp/report/tests.gplot"));
        assert!(msg.contains("undefined variable"));
    }

    #[test]
    fn test_empty_monitor_series_names_host() {
        let err = ChartError::EmptyMonitorSeries {
            host: "db-1".to_string(),
        };
        assert_eq!(err.to_string(), "No monitoring samples for host 'db-1'");
    }
}
