//! # Host Monitoring Series
//!
//! Converts raw monitoring samples of one host into the rows of a monitor
//! chart table. Counters in the samples are cumulative, so rates come from
//! differencing each sample with the one before it:
//!
//! - **CPU**: busy jiffies delta over total (busy + idle) jiffies delta
//! - **Network**: byte delta / (1024 * elapsed seconds), i.e. kB/s
//! - **Memory / swap**: used amount minus the first sample's used amount
//!
//! A derived value that cannot be computed, because a counter is absent from
//! either sample or the interval is empty, is `None` and lands in the data
//! table as the missing marker.

use serde::{Deserialize, Serialize};

/// One observation of a monitored host
///
/// Field aliases accept the camel-case names written by the monitoring
/// collector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorSample {
    /// Unix timestamp in seconds
    pub time: f64,
    /// `<test>:<cycle>:<cvus>` identifying the running cycle
    pub key: String,
    #[serde(alias = "memTotal")]
    pub mem_total: u64,
    #[serde(alias = "memFree")]
    pub mem_free: u64,
    #[serde(alias = "swapTotal")]
    pub swap_total: u64,
    #[serde(alias = "swapFree")]
    pub swap_free: u64,
    #[serde(alias = "loadAvg1min")]
    pub load_avg_1: f64,
    #[serde(alias = "loadAvg5min")]
    pub load_avg_5: f64,
    #[serde(alias = "loadAvg15min")]
    pub load_avg_15: f64,
    /// Cumulative busy CPU jiffies
    #[serde(default, alias = "CPUTotalJiffies")]
    pub cpu_total_jiffies: Option<u64>,
    /// Cumulative idle CPU jiffies
    #[serde(default, alias = "IDLTotalJiffies")]
    pub idle_total_jiffies: Option<u64>,
    #[serde(default, alias = "receiveBytes")]
    pub receive_bytes: Option<u64>,
    #[serde(default, alias = "transmitBytes")]
    pub transmit_bytes: Option<u64>,
}

impl MonitorSample {
    /// Concurrent users recorded in the sample key, if the key is well formed
    pub fn cvus(&self) -> Option<&str> {
        let mut parts = self.key.split(':');
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(_), Some(_), Some(cvus), None) if !cvus.is_empty() => Some(cvus),
            _ => None,
        }
    }

    fn busy_and_total(&self) -> Option<(u64, u64)> {
        let busy = self.cpu_total_jiffies?;
        let idle = self.idle_total_jiffies?;
        Some((busy, busy + idle))
    }
}

/// One row of a monitor chart table
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorRow {
    /// Local `HH:MM:SS` clock label
    pub time: String,
    pub cvus: Option<String>,
    /// Busy fraction of the interval ending at this sample, 1.0 = 100%
    pub cpu: Option<f64>,
    pub load1: f64,
    pub load5: f64,
    pub load15: f64,
    /// Memory used relative to the first sample
    pub mem: i64,
    /// Swap used relative to the first sample
    pub swap: i64,
    /// Received kB/s
    pub net_in: Option<f64>,
    /// Transmitted kB/s
    pub net_out: Option<f64>,
}

/// Header line of the monitor data table
pub const MONITOR_HEADER: &str = "TIME CUs CPU LOAD1 LOAD5 LOAD15 MEM SWAP NETIN NETOUT";

impl MonitorRow {
    /// Space separated table line in [`MONITOR_HEADER`] order
    pub fn to_line(&self) -> String {
        use crate::utils::{format_optional, format_value, MISSING_VALUE};
        [
            self.time.clone(),
            self.cvus.clone().unwrap_or_else(|| MISSING_VALUE.to_string()),
            format_optional(self.cpu),
            format_value(self.load1),
            format_value(self.load5),
            format_value(self.load15),
            self.mem.to_string(),
            self.swap.to_string(),
            format_optional(self.net_in),
            format_optional(self.net_out),
        ]
        .join(" ")
    }
}

/// CPU busy fraction between two samples
///
/// Busy and idle jiffies are cumulative; the fraction is the busy delta over
/// the delta of busy plus idle, so 1.0 means every core was busy for the
/// whole interval.
///
/// `None` when either sample lacks jiffy counters or the total did not
/// advance.
pub fn cpu_usage(prev: &MonitorSample, cur: &MonitorSample) -> Option<f64> {
    let (prev_busy, prev_total) = prev.busy_and_total()?;
    let (cur_busy, cur_total) = cur.busy_and_total()?;
    let dt = cur_total as i128 - prev_total as i128;
    if dt <= 0 {
        return None;
    }
    Some((cur_busy as i128 - prev_busy as i128) as f64 / dt as f64)
}

/// Byte counter rate in kB/s between two samples
///
/// `None` when either counter is absent or no time elapsed. A counter that
/// went backwards (interface reset) yields a negative rate rather than being
/// hidden.
///
/// ## Examples
///
/// ```rust
/// # use load_charts::monitor::network_rate;
/// assert_eq!(network_rate(Some(1000), Some(2024), 1.0), Some(1.0));
/// assert_eq!(network_rate(Some(0), Some(4096), 2.0), Some(2.0));
/// assert_eq!(network_rate(None, Some(2024), 1.0), None);
/// assert_eq!(network_rate(Some(1000), Some(2024), 0.0), None);
/// ```
pub fn network_rate(prev: Option<u64>, cur: Option<u64>, elapsed_secs: f64) -> Option<f64> {
    let (prev, cur) = (prev?, cur?);
    if elapsed_secs <= 0.0 {
        return None;
    }
    Some((cur as i128 - prev as i128) as f64 / (1024.0 * elapsed_secs))
}

/// Derive chart rows for one host's samples, in sample order
///
/// The first row has no previous interval: its CPU value is reported as 0
/// and its network rates as missing. Memory and swap totals are taken from
/// the first sample.
pub fn derive_rows(samples: &[MonitorSample]) -> Vec<MonitorRow> {
    let first = match samples.first() {
        Some(first) => first,
        None => return Vec::new(),
    };
    let used = |total: u64, free: u64| total as i64 - free as i64;
    let mem_base = used(first.mem_total, first.mem_free);
    let swap_base = used(first.swap_total, first.swap_free);

    samples
        .iter()
        .enumerate()
        .map(|(i, sample)| {
            let (cpu, net_in, net_out) = if i == 0 {
                (Some(0.0), None, None)
            } else {
                let prev = &samples[i - 1];
                let elapsed = sample.time - prev.time;
                (
                    cpu_usage(prev, sample),
                    network_rate(prev.receive_bytes, sample.receive_bytes, elapsed),
                    network_rate(prev.transmit_bytes, sample.transmit_bytes, elapsed),
                )
            };
            MonitorRow {
                time: crate::utils::format_clock(sample.time),
                cvus: sample.cvus().map(str::to_string),
                cpu,
                load1: sample.load_avg_1,
                load5: sample.load_avg_5,
                load15: sample.load_avg_15,
                mem: used(first.mem_total, sample.mem_free) - mem_base,
                swap: used(first.swap_total, sample.swap_free) - swap_base,
                net_in,
                net_out,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(time: f64) -> MonitorSample {
        MonitorSample {
            time,
            key: "test_simple:0:10".to_string(),
            mem_total: 8_000_000,
            mem_free: 4_000_000,
            swap_total: 2_000_000,
            swap_free: 2_000_000,
            load_avg_1: 0.5,
            load_avg_5: 0.25,
            load_avg_15: 0.1,
            cpu_total_jiffies: None,
            idle_total_jiffies: None,
            receive_bytes: None,
            transmit_bytes: None,
        }
    }

    #[test]
    fn test_network_rate_one_kb_per_second() {
        let mut a = sample(100.0);
        let mut b = sample(101.0);
        a.receive_bytes = Some(1000);
        b.receive_bytes = Some(2024);
        let rows = derive_rows(&[a, b]);
        assert_eq!(rows[0].net_in, None);
        let rate = rows[1].net_in.unwrap();
        assert!((rate - 1.0).abs() < 1e-9);
        assert_eq!(rows[1].net_out, None);
    }

    #[test]
    fn test_cpu_usage_null_when_total_unchanged() {
        let mut a = sample(0.0);
        let mut b = sample(5.0);
        a.cpu_total_jiffies = Some(100);
        a.idle_total_jiffies = Some(900);
        b.cpu_total_jiffies = Some(100);
        b.idle_total_jiffies = Some(900);
        assert_eq!(cpu_usage(&a, &b), None);
    }

    #[test]
    fn test_cpu_usage_fraction() {
        let mut a = sample(0.0);
        let mut b = sample(5.0);
        a.cpu_total_jiffies = Some(100);
        a.idle_total_jiffies = Some(900);
        b.cpu_total_jiffies = Some(150);
        b.idle_total_jiffies = Some(1050);
        // 50 busy out of 200 elapsed
        assert_eq!(cpu_usage(&a, &b), Some(0.25));
    }

    #[test]
    fn test_cpu_usage_null_when_counters_missing() {
        let mut a = sample(0.0);
        let b = sample(5.0);
        a.cpu_total_jiffies = Some(100);
        a.idle_total_jiffies = Some(900);
        assert_eq!(cpu_usage(&a, &b), None);
        let rows = derive_rows(&[a, b]);
        assert_eq!(rows[0].cpu, Some(0.0));
        assert_eq!(rows[1].cpu, None);
    }

    #[test]
    fn test_memory_is_delta_from_first_sample() {
        let a = sample(0.0);
        let mut b = sample(1.0);
        let mut c = sample(2.0);
        b.mem_free = 3_000_000;
        c.mem_free = 4_500_000;
        c.swap_free = 1_999_000;
        let rows = derive_rows(&[a, b, c]);
        assert_eq!(rows[0].mem, 0);
        assert_eq!(rows[1].mem, 1_000_000);
        assert_eq!(rows[2].mem, -500_000);
        assert_eq!(rows[2].swap, 1_000);
    }

    #[test]
    fn test_zero_elapsed_time_gives_missing_rate() {
        assert_eq!(network_rate(Some(0), Some(2048), 0.0), None);
        assert_eq!(network_rate(Some(0), Some(2048), 2.0), Some(1.0));
        assert_eq!(network_rate(None, Some(2048), 2.0), None);
    }

    #[test]
    fn test_cvus_from_key() {
        let mut s = sample(0.0);
        assert_eq!(s.cvus(), Some("10"));
        s.key = "broken".to_string();
        assert_eq!(s.cvus(), None);
        s.key = "a:b:c:d".to_string();
        assert_eq!(s.cvus(), None);
    }

    #[test]
    fn test_row_line_uses_missing_marker() {
        let rows = derive_rows(&[sample(0.0), sample(1.0)]);
        let line = rows[1].to_line();
        let cols: Vec<&str> = line.split(' ').collect();
        assert_eq!(cols.len(), MONITOR_HEADER.split(' ').count());
        assert_eq!(cols[1], "10");
        assert_eq!(cols[2], "?");
        assert_eq!(cols[3], "0.5");
        assert_eq!(cols[8], "?");
        assert_eq!(cols[9], "?");
    }

    #[test]
    fn test_deserialize_collector_field_names() {
        let json = r#"{
            "time": 1700000000.5, "key": "t:1:20",
            "memTotal": 100, "memFree": 50, "swapTotal": 10, "swapFree": 10,
            "loadAvg1min": 1.0, "loadAvg5min": 0.5, "loadAvg15min": 0.2,
            "CPUTotalJiffies": 10, "IDLTotalJiffies": 90, "receiveBytes": 5
        }"#;
        let s: MonitorSample = serde_json::from_str(json).unwrap();
        assert_eq!(s.cpu_total_jiffies, Some(10));
        assert_eq!(s.receive_bytes, Some(5));
        assert_eq!(s.transmit_bytes, None);
        assert_eq!(s.cvus(), Some("20"));
    }

    #[test]
    fn test_empty_samples_give_no_rows() {
        assert!(derive_rows(&[]).is_empty());
    }
}
