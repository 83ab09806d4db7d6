// loadstats_analyze - k6 summary reader
// Copyright (C) 2025 loadstats_analyze contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! # k6 summary reader
//!
//! Each distributed k6 run writes `k6-summary-<REGION>-<epoch>.json` from its
//! `handleSummary` hook. Only a handful of values are read; any missing key
//! reads as 0.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AnalyzeError, Result};

pub const UNKNOWN_REGION: &str = "unknown";

/// Per-run load-test figures. Durations are in milliseconds, as k6 reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadTestSummary {
    pub region: String,
    pub total_requests: u64,
    /// Percentage of failed requests (0-100).
    pub failed_requests: f64,
    pub avg_duration: f64,
    pub p95_duration: f64,
    pub max_duration: f64,
    pub requests_per_sec: f64,
}

/// Derive the region from a summary file name.
///
/// `k6-summary-east-1736935200.json` and `k6-summary-us-east-1234.json` both
/// give `east`: when the name ends in a numeric run stamp, the segment just
/// before it is the region. Otherwise the third `-` separated segment is
/// used. Names with fewer than three segments give `None`.
pub fn region_from_filename(file_name: &str) -> Option<String> {
    let stem = file_name.strip_suffix(".json").unwrap_or(file_name);
    let parts: Vec<&str> = stem.split('-').collect();
    if parts.len() < 3 {
        return None;
    }
    let last = parts[parts.len() - 1];
    let stamped = !last.is_empty() && last.bytes().all(|b| b.is_ascii_digit());
    let region = if stamped && parts.len() >= 4 {
        parts[parts.len() - 2]
    } else {
        parts[2]
    };
    if region.is_empty() {
        None
    } else {
        Some(region.to_string())
    }
}

/// [`region_from_filename`] with the `unknown` fallback, or an error when
/// `strict` is set.
pub fn resolve_region(file_name: &str, strict: bool) -> Result<String> {
    match region_from_filename(file_name) {
        Some(region) => Ok(region),
        None if strict => Err(AnalyzeError::RegionName(file_name.to_string())),
        None => {
            tracing::warn!(
                "{}: no region in file name, filing under '{}'",
                file_name,
                UNKNOWN_REGION
            );
            Ok(UNKNOWN_REGION.to_string())
        }
    }
}

fn metric_value(metrics: &Value, metric: &str, key: &str) -> f64 {
    metrics
        .get(metric)
        .and_then(|m| m.get("values"))
        .and_then(|v| v.get(key))
        .and_then(Value::as_f64)
        .unwrap_or(0.0)
}

/// Build a summary from an already-decoded k6 document.
pub fn summary_from_value(region: String, doc: &Value) -> LoadTestSummary {
    let empty = Value::Null;
    let metrics = doc.get("metrics").unwrap_or(&empty);
    LoadTestSummary {
        region,
        total_requests: metric_value(metrics, "http_reqs", "count").max(0.0).round() as u64,
        failed_requests: metric_value(metrics, "http_req_failed", "rate") * 100.0,
        avg_duration: metric_value(metrics, "http_req_duration", "avg"),
        p95_duration: metric_value(metrics, "http_req_duration", "p(95)"),
        max_duration: metric_value(metrics, "http_req_duration", "max"),
        requests_per_sec: metric_value(metrics, "http_reqs", "rate"),
    }
}

/// Read one summary file. The region comes from the file name, never from
/// the JSON content.
pub fn parse_summary_file(path: &Path, strict_region: bool) -> Result<LoadTestSummary> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let region = resolve_region(&file_name, strict_region)?;

    let text = std::fs::read_to_string(path).map_err(|e| AnalyzeError::io(path, e))?;
    let doc: Value = serde_json::from_str(&text).map_err(|source| AnalyzeError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(summary_from_value(region, &doc))
}
