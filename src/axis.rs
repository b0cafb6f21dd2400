//! X-axis selection for per-cycle charts
//!
//! A numeric x-axis assumes strictly increasing concurrency levels. When the
//! configured cycle sequence is a single value, repeats a value, or goes
//! backwards, points would overlap or draw right to left, so the charts fall
//! back to category labels placed at row positions.
//!
//! The mode is chosen once per report and passed into script generation, so
//! every `using` clause and range directive is produced in the right form
//! directly.

use std::collections::HashSet;
use std::fmt;

/// How the concurrent-users axis is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisMode {
    /// Plot against the CUs values with range `[0:max]`
    Numeric { max: u32 },
    /// Plot against row position, labelled with the CUs column
    Labels,
}

/// Why a cycle sequence cannot use a numeric axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelReason {
    SingleCycle,
    DuplicateCycles,
    UnorderedCycles,
}

/// Reads as a predicate on the cycles, e.g. "Cycles [10, 10] repeat a value"
impl fmt::Display for LabelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelReason::SingleCycle => write!(f, "have a single value"),
            LabelReason::DuplicateCycles => write!(f, "repeat a value"),
            LabelReason::UnorderedCycles => write!(f, "are not in ascending order"),
        }
    }
}

/// Check a cycle sequence, returning the reason label mode is needed
pub fn label_reason(cycles: &[u32]) -> Option<LabelReason> {
    if cycles.len() <= 1 {
        return Some(LabelReason::SingleCycle);
    }
    let distinct: HashSet<u32> = cycles.iter().copied().collect();
    if distinct.len() != cycles.len() {
        return Some(LabelReason::DuplicateCycles);
    }
    if cycles.windows(2).any(|pair| pair[0] > pair[1]) {
        return Some(LabelReason::UnorderedCycles);
    }
    None
}

/// Choose the axis mode for a configured cycle sequence
pub fn select_axis_mode(cycles: &[u32]) -> AxisMode {
    match label_reason(cycles) {
        Some(_) => AxisMode::Labels,
        None => AxisMode::Numeric {
            // label_reason guarantees at least two cycles here
            max: cycles.iter().copied().max().unwrap_or_default(),
        },
    }
}

impl AxisMode {
    /// The `set xrange` directive, absent in label mode
    pub fn range_directive(&self) -> Option<String> {
        match self {
            AxisMode::Numeric { max } => Some(format!("set xrange [0:{}]", max)),
            AxisMode::Labels => None,
        }
    }

    /// Build a `using` column spec with the CUs column as x
    ///
    /// `columns` are the 1-based y columns in plotting-style order.
    ///
    /// ```rust
    /// # use load_charts::axis::AxisMode;
    /// assert_eq!(AxisMode::Numeric { max: 10 }.using(&[2]), "1:2");
    /// assert_eq!(AxisMode::Labels.using(&[8, 8, 10, 9]), ":8:8:10:9:xticlabels(1)");
    /// ```
    pub fn using(&self, columns: &[usize]) -> String {
        let ys: Vec<String> = columns.iter().map(|c| c.to_string()).collect();
        match self {
            AxisMode::Numeric { .. } => format!("1:{}", ys.join(":")),
            AxisMode::Labels => format!(":{}:xticlabels(1)", ys.join(":")),
        }
    }

    pub fn is_labels(&self) -> bool {
        matches!(self, AxisMode::Labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increasing_cycles_use_numeric_range() {
        assert_eq!(
            select_axis_mode(&[1, 5, 10, 20]),
            AxisMode::Numeric { max: 20 }
        );
        assert_eq!(select_axis_mode(&[2, 3]), AxisMode::Numeric { max: 3 });
    }

    #[test]
    fn test_degenerate_cycles_use_labels() {
        assert_eq!(select_axis_mode(&[10]), AxisMode::Labels);
        assert_eq!(select_axis_mode(&[10, 10, 20]), AxisMode::Labels);
        assert_eq!(select_axis_mode(&[20, 10, 30]), AxisMode::Labels);
        assert_eq!(select_axis_mode(&[]), AxisMode::Labels);
    }

    #[test]
    fn test_label_reasons() {
        assert_eq!(label_reason(&[10]), Some(LabelReason::SingleCycle));
        assert_eq!(
            label_reason(&[10, 10, 20]),
            Some(LabelReason::DuplicateCycles)
        );
        assert_eq!(
            label_reason(&[20, 10, 30]),
            Some(LabelReason::UnorderedCycles)
        );
        // Non-adjacent duplicates are still duplicates
        assert_eq!(
            label_reason(&[10, 20, 10]),
            Some(LabelReason::DuplicateCycles)
        );
        assert_eq!(label_reason(&[1, 2, 3]), None);
    }

    #[test]
    fn test_label_reason_messages() {
        fn message(cycles: &[u32]) -> String {
            label_reason(cycles)
                .map(|reason| format!("Cycles {:?} {}", cycles, reason))
                .unwrap_or_default()
        }
        assert_eq!(message(&[10]), "Cycles [10] have a single value");
        assert_eq!(message(&[10, 10, 20]), "Cycles [10, 10, 20] repeat a value");
        assert_eq!(
            message(&[20, 10, 30]),
            "Cycles [20, 10, 30] are not in ascending order"
        );
        assert_eq!(message(&[1, 2]), "");
    }

    #[test]
    fn test_range_directive() {
        assert_eq!(
            AxisMode::Numeric { max: 50 }.range_directive().as_deref(),
            Some("set xrange [0:50]")
        );
        assert!(AxisMode::Labels.range_directive().is_none());
    }

    #[test]
    fn test_using_spec() {
        let numeric = AxisMode::Numeric { max: 5 };
        assert_eq!(numeric.using(&[2]), "1:2");
        assert_eq!(numeric.using(&[7, 4, 8, 8]), "1:7:4:8:8");
        assert_eq!(AxisMode::Labels.using(&[3]), ":3:xticlabels(1)");
    }
}
