//! # Utility Functions
//!
//! Formatting and validation helpers shared by the chart generators and the
//! command-line front end.
//!
//! ## Key Functionality Categories
//!
//! - **Formatting**: stable text for data table cells, null markers, clock labels
//! - **Validation**: chart configuration checks with clear error messages
//! - **Paths**: file names for chart artifacts
//!
//! ## Usage Examples
//!
//! ```rust
//! use load_charts::utils::*;
//!
//! # fn main() -> anyhow::Result<()> {
//! assert_eq!(format_value(12.0), "12");
//! assert_eq!(format_value(0.25), "0.25");
//! assert_eq!(format_optional(None), "?");
//!
//! validate_chart_size((480, 480))?; // OK
//! # Ok(())
//! # }
//! ```

use anyhow::Result;
use chrono::{Local, TimeZone};

/// Marker written to data tables for values that cannot be computed
///
/// Scripts declare it with `set datafile missing`, so gnuplot leaves a gap
/// instead of plotting a zero.
pub const MISSING_VALUE: &str = "?";

/// Format a number for a data table cell
///
/// Uses the shortest representation that round-trips, so the same input
/// always produces the same bytes. Whole numbers drop the fractional part.
///
/// ## Examples
///
/// ```rust
/// # use load_charts::utils::format_value;
/// assert_eq!(format_value(3.0), "3");
/// assert_eq!(format_value(1.5), "1.5");
/// assert_eq!(format_value(-0.125), "-0.125");
/// ```
pub fn format_value(value: f64) -> String {
    if value.is_finite() {
        format!("{}", value)
    } else {
        MISSING_VALUE.to_string()
    }
}

/// Format an optional derived value, writing the missing marker for `None`
pub fn format_optional(value: Option<f64>) -> String {
    value.map_or_else(|| MISSING_VALUE.to_string(), format_value)
}

/// Format a Unix timestamp (seconds) as a local `HH:MM:SS` clock label
///
/// Monitor charts read this column back with `set timefmt "%H:%M:%S"`.
/// Timestamps that cannot be represented produce the missing marker.
pub fn format_clock(timestamp: f64) -> String {
    let secs = timestamp.floor() as i64;
    let nanos = ((timestamp - timestamp.floor()) * 1e9) as u32;
    match Local.timestamp_opt(secs, nanos).single() {
        Some(datetime) => datetime.format("%H:%M:%S").to_string(),
        None => MISSING_VALUE.to_string(),
    }
}

/// Validate that a chart size is usable by the png terminal
///
/// ## Validation Rules
///
/// - **Minimum**: 100 pixels in each dimension, below which axis labels overlap
/// - **Maximum**: 10000 pixels in each dimension
pub fn validate_chart_size(size: (u32, u32)) -> Result<()> {
    let (width, height) = size;
    if width < 100 || height < 100 {
        anyhow::bail!(
            "Chart size {}x{} is too small (minimum 100x100)",
            width,
            height
        );
    }
    if width > 10_000 || height > 10_000 {
        anyhow::bail!(
            "Chart size {}x{} is too large (maximum 10000x10000)",
            width,
            height
        );
    }
    Ok(())
}

/// Parse a `WIDTHxHEIGHT` chart size argument (e.g. "640x480")
pub fn parse_chart_size(s: &str) -> Result<(u32, u32), String> {
    let s = s.trim();
    let (w, h) = s
        .split_once(|c: char| c == 'x' || c == 'X' || c == ',')
        .ok_or_else(|| format!("Invalid chart size '{}', expected WIDTHxHEIGHT", s))?;
    let width = w
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("Invalid chart width: {}", w))?;
    let height = h
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("Invalid chart height: {}", h))?;
    Ok((width, height))
}

/// Make a request step name safe to use inside a file name
///
/// Step names are usually dotted numbers such as `001.002`; anything other
/// than ASCII alphanumerics, dots, dashes and underscores becomes `_`.
pub fn sanitize_file_stem(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
