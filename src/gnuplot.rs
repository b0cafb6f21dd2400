//! # Gnuplot Script Building and Rendering
//!
//! Scripts are assembled line by line with [`Script`] and rendered by a
//! [`ChartRenderer`]. The production renderer runs the `gnuplot` executable
//! as a blocking subprocess from the chart's output directory, so every file
//! reference inside a script is a bare relative file name.
//!
//! ## Rendering Contract
//!
//! - The subprocess working directory is the directory holding the script
//! - stdout and stderr are captured together for error reporting
//! - A nonzero exit status is fatal: there is no retry and no fallback image

use crate::error::ChartError;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

/// One data series in a `plot` command
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    /// Data file name; `None` reuses the previous layer's file (`""`)
    pub source: Option<String>,
    /// Column spec for `using`
    pub using: String,
    /// Plotting style, e.g. `linespoints lw 2 lt 2`
    pub style: String,
    /// Legend title; `None` emits `notitle`
    pub title: Option<String>,
}

impl Layer {
    pub fn new(source: Option<&str>, using: String, style: &str, title: Option<&str>) -> Self {
        Self {
            source: source.map(str::to_string),
            using,
            style: style.to_string(),
            title: title.map(str::to_string),
        }
    }

    fn to_clause(&self) -> String {
        let source = self.source.as_deref().unwrap_or("");
        let title = match &self.title {
            Some(t) => format!("t \"{}\"", escape(t)),
            None => "notitle".to_string(),
        };
        format!(
            "\"{}\" u {} {} w {}",
            escape(source),
            self.using,
            title,
            self.style
        )
    }
}

/// A gnuplot script under construction
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Script {
    lines: Vec<String>,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a raw line
    pub fn line<S: Into<String>>(&mut self, line: S) -> &mut Self {
        self.lines.push(line.into());
        self
    }

    /// Append `set <directive>`
    pub fn set(&mut self, directive: &str) -> &mut Self {
        self.line(format!("set {}", directive))
    }

    /// Append `unset <directive>`
    pub fn unset(&mut self, directive: &str) -> &mut Self {
        self.line(format!("unset {}", directive))
    }

    pub fn output(&mut self, image: &str) -> &mut Self {
        self.line(format!("set output \"{}\"", escape(image)))
    }

    pub fn title(&mut self, title: &str) -> &mut Self {
        self.line(format!("set title \"{}\"", escape(title)))
    }

    pub fn xlabel(&mut self, label: &str) -> &mut Self {
        self.line(format!("set xlabel \"{}\"", escape(label)))
    }

    pub fn ylabel(&mut self, label: &str) -> &mut Self {
        self.line(format!("set ylabel \"{}\"", escape(label)))
    }

    pub fn terminal_png(&mut self, size: (u32, u32)) -> &mut Self {
        self.line(format!("set terminal png size {},{}", size.0, size.1))
    }

    /// Append a `plot` command drawing every layer
    pub fn plot(&mut self, layers: &[Layer]) -> &mut Self {
        let clauses: Vec<String> = layers.iter().map(Layer::to_clause).collect();
        self.line(format!("plot {}", clauses.join(", ")))
    }

    /// Number of `plot` commands in the script
    pub fn plot_count(&self) -> usize {
        self.lines.iter().filter(|l| l.starts_with("plot ")).count()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Script text, newline terminated
    pub fn to_text(&self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }
}

/// Escape backslashes and double quotes for a double-quoted gnuplot string
pub(crate) fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Turns a written script into an image
pub trait ChartRenderer {
    /// Render the script at `script_path`
    fn render(&self, script_path: &Path) -> Result<(), ChartError>;

    /// Whether this renderer produces images at all
    fn produces_images(&self) -> bool {
        true
    }
}

/// Runs the gnuplot executable as a subprocess
#[derive(Debug, Clone)]
pub struct GnuplotRenderer {
    program: PathBuf,
}

impl GnuplotRenderer {
    /// Create a renderer running `program`, looked up on `PATH` when it is a
    /// bare name
    pub fn new<P: Into<PathBuf>>(program: P) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// The plotting program this renderer runs
    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Default for GnuplotRenderer {
    fn default() -> Self {
        Self::new(crate::defaults::GNUPLOT_PROGRAM)
    }
}

impl ChartRenderer for GnuplotRenderer {
    fn render(&self, script_path: &Path) -> Result<(), ChartError> {
        let script = absolute(script_path).map_err(|source| ChartError::SpawnFailed {
            command: format!("{} {}", self.program.display(), script_path.display()),
            source,
        })?;
        let dir = script
            .parent()
            .ok_or_else(|| ChartError::InvalidScriptPath {
                path: script.clone(),
            })?
            .to_path_buf();
        let command = format!(
            "cd {}; {} {}",
            dir.display(),
            self.program.display(),
            script.display()
        );
        debug!("Running: {}", command);

        let output = Command::new(&self.program)
            .arg(&script)
            .current_dir(&dir)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| ChartError::SpawnFailed {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
            combined.push_str(&String::from_utf8_lossy(&output.stderr));
            return Err(ChartError::RenderFailed {
                command,
                status: output.status.code(),
                output: combined.trim_end().to_string(),
            });
        }
        Ok(())
    }
}

/// Writes data and scripts but renders nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptOnly;

impl ChartRenderer for ScriptOnly {
    fn render(&self, script_path: &Path) -> Result<(), ChartError> {
        debug!("Skipping render of {}", script_path.display());
        Ok(())
    }

    fn produces_images(&self) -> bool {
        false
    }
}

fn absolute(path: &Path) -> std::io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}
