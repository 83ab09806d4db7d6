// loadstats_analyze - periodic system-metrics CSV parser
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

//! # system_metrics CSV parser
//!
//! Unlike the sar and iostat parsers this one is strict: any CSV error or an
//! unparseable `timestamp` cell rejects the whole file.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::{AnalyzeError, Result};

pub const TIMESTAMP_COLUMN: &str = "timestamp";
pub const LOAD_1MIN_COLUMN: &str = "load_1min";

/// One sample row. Only cells that parse as finite numbers are kept in
/// `values`; `nan` and `inf` cells are treated as missing.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsRow {
    pub timestamp: NaiveDateTime,
    pub values: HashMap<String, f64>,
}

impl MetricsRow {
    pub fn get(&self, column: &str) -> Option<f64> {
        self.values.get(column).copied()
    }
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Accepts the timestamp shapes the monitoring scripts have produced:
/// ISO-8601 with or without `T`, RFC 3339 with an offset, bare dates, and
/// integer epoch seconds.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0);
    }
    if let Ok(epoch) = s.parse::<i64>() {
        return DateTime::from_timestamp(epoch, 0).map(|dt| dt.naive_utc());
    }
    None
}

/// Parse CSV text. `origin` only labels errors.
pub fn parse_system_metrics<R: Read>(reader: R, origin: &Path) -> Result<Vec<MetricsRow>> {
    let csv_err = |source| AnalyzeError::Csv {
        path: origin.to_path_buf(),
        source,
    };

    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = rdr.headers().map_err(csv_err)?.clone();
    let ts_idx = headers
        .iter()
        .position(|h| h == TIMESTAMP_COLUMN)
        .ok_or_else(|| AnalyzeError::MissingColumn {
            path: origin.to_path_buf(),
            column: TIMESTAMP_COLUMN.to_string(),
        })?;

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record.map_err(csv_err)?;
        let raw_ts = record.get(ts_idx).unwrap_or_default();
        let timestamp = parse_timestamp(raw_ts).ok_or_else(|| AnalyzeError::Timestamp {
            path: origin.to_path_buf(),
            value: raw_ts.to_string(),
        })?;

        let values = headers
            .iter()
            .zip(record.iter())
            .enumerate()
            .filter(|(i, _)| *i != ts_idx)
            .filter_map(|(_, (name, cell))| {
                let value = cell.parse::<f64>().ok().filter(|v| v.is_finite())?;
                Some((name.to_string(), value))
            })
            .collect();
        rows.push(MetricsRow { timestamp, values });
    }
    Ok(rows)
}

/// Read and parse one `system_metrics_*.csv` file.
pub fn parse_system_metrics_file(path: &Path) -> Result<Vec<MetricsRow>> {
    let file = std::fs::File::open(path).map_err(|e| AnalyzeError::io(path, e))?;
    parse_system_metrics(file, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn parse(text: &str) -> Result<Vec<MetricsRow>> {
        parse_system_metrics(text.as_bytes(), Path::new("system_metrics_test.csv"))
    }

    #[test]
    fn parses_rows_with_load_column() {
        let rows = parse(
            "timestamp,load_1min,load_5min,host\n\
             2025-01-15 10:00:00,0.50,0.40,node-a\n\
             2025-01-15T10:00:05,1.50,0.45,node-a\n",
        )
        .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get(LOAD_1MIN_COLUMN), Some(0.5));
        assert_eq!(rows[1].timestamp.second(), 5);
        // non-numeric cells are not kept
        assert_eq!(rows[0].get("host"), None);
        assert_eq!(rows[0].values.len(), 2);
    }

    #[test]
    fn non_finite_cells_are_missing() {
        let rows = parse(
            "timestamp,load_1min\n\
             2025-01-15 10:00:00,1.0\n\
             2025-01-15 10:00:05,nan\n\
             2025-01-15 10:00:10,3.0\n\
             2025-01-15 10:00:15,inf\n",
        )
        .unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[1].get(LOAD_1MIN_COLUMN), None);
        assert_eq!(rows[3].get(LOAD_1MIN_COLUMN), None);

        let (avg, peak) = crate::aggregate::load_average(&rows);
        assert_eq!(avg, 2.0);
        assert_eq!(peak, 3.0);
    }

    #[test]
    fn bad_timestamp_rejects_whole_file() {
        let err = parse(
            "timestamp,load_1min\n\
             2025-01-15 10:00:00,0.50\n\
             not-a-time,1.00\n",
        )
        .unwrap_err();
        match err {
            AnalyzeError::Timestamp { value, path } => {
                assert_eq!(value, "not-a-time");
                assert!(path.ends_with("system_metrics_test.csv"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_timestamp_column_is_an_error() {
        let err = parse("time,load_1min\n2025-01-15 10:00:00,0.5\n").unwrap_err();
        assert!(matches!(err, AnalyzeError::MissingColumn { .. }));
    }

    #[test]
    fn ragged_row_is_an_error() {
        let err = parse("timestamp,load_1min\n2025-01-15 10:00:00,0.5,9\n").unwrap_err();
        assert!(matches!(err, AnalyzeError::Csv { .. }));
    }

    #[test]
    fn timestamp_shapes() {
        assert!(parse_timestamp("2025-01-15 10:00:00.250").is_some());
        assert!(parse_timestamp("2025-01-15T10:00:00+02:00").is_some());
        assert!(parse_timestamp("2025-01-15").is_some());
        let epoch = parse_timestamp("1736935200").unwrap();
        assert_eq!(epoch.hour(), 10);
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("yesterday").is_none());
    }
}
