// Shared fixture writers

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use loadstats_analyze::config::AnalyzeConfig;

/// Defaults with chart rendering off, so tests need no fonts.
pub fn test_config() -> AnalyzeConfig {
    let mut cfg = AnalyzeConfig::default();
    cfg.output.charts = false;
    cfg
}

pub fn write(dir: &Path, name: &str, content: &str) {
    fs::create_dir_all(dir).expect("create dir");
    fs::write(dir.join(name), content).expect("write fixture");
}

pub fn k6_summary(count: u64, rate: f64, failed: f64, avg: f64, p95: f64, max: f64) -> String {
    format!(
        r#"{{
  "metrics": {{
    "http_reqs": {{"values": {{"count": {count}, "rate": {rate}}}}},
    "http_req_failed": {{"values": {{"rate": {failed}}}}},
    "http_req_duration": {{"values": {{"avg": {avg}, "p(95)": {p95}, "max": {max}}}}}
  }}
}}"#
    )
}

/// sar capture with one `all` row per idle value, plus a per-core row that
/// must be ignored.
pub fn sar_capture(idles: &[f64], memused_pct: &[f64]) -> String {
    let mut s = String::from("Linux 6.1.0 (node)  01/15/2025  _x86_64_  (2 CPU)\n\n");
    s.push_str("10:00:00        CPU     %user     %nice   %system   %iowait    %steal     %idle\n");
    for (i, idle) in idles.iter().enumerate() {
        s.push_str(&format!(
            "10:00:{:02}        all      1.00      0.00      1.00      0.00      0.00     {:.2}\n",
            i + 1,
            idle
        ));
        s.push_str(&format!(
            "10:00:{:02}          0      1.00      0.00      1.00      0.00      0.00      0.00\n",
            i + 1
        ));
    }
    s.push_str("Average:        all      1.00      0.00      1.00      0.00      0.00     50.00\n\n");
    s.push_str("10:00:00    kbmemfree kbmemused  %memused kbbuffers  kbcached  kbcommit   %commit  kbactive   kbinact\n");
    for (i, pct) in memused_pct.iter().enumerate() {
        s.push_str(&format!(
            "10:00:{:02}      1000000   3000000     {:.2}     10000    200000   3000000     20.00    100000     50000\n",
            i + 1,
            pct
        ));
    }
    s.push_str("Average:      1000000   3000000     50.00     10000    200000   3000000     20.00    100000     50000\n");
    s
}

pub fn iostat_capture(rows: &[(&str, f64, f64)]) -> String {
    let mut s = String::from("avg-cpu:  %user   %nice %system %iowait  %steal   %idle\n           5.00    0.00    1.00    0.50    0.00   93.50\n\n");
    s.push_str("Device            r/s     w/s     rkB/s     wkB/s  %util\n");
    for (dev, r, w) in rows {
        s.push_str(&format!("{:<16} {:>5.2} {:>7.2}     16.00     32.00   0.10\n", dev, r, w));
    }
    s.push('\n');
    s
}

pub fn system_metrics(loads: &[f64]) -> String {
    let mut s = String::from("timestamp,load_1min,load_5min\n");
    for (i, load) in loads.iter().enumerate() {
        s.push_str(&format!("2025-01-15 10:00:{:02},{},0.5\n", i * 5, load));
    }
    s
}
