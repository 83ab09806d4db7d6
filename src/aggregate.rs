// loadstats_analyze - per-region metric aggregation
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

//! # Metric aggregation
//!
//! Reduces the concatenated series of one monitored region to a single
//! [`RegionSummary`]. Each metric family is computed on its own; an empty
//! family leaves its fields at 0.

use serde::{Deserialize, Serialize};

use crate::iostat::IoRecord;
use crate::sar::{CpuRecord, MemoryRecord, SarReport};
use crate::sysmetrics::{LOAD_1MIN_COLUMN, MetricsRow};

pub const IO_READ_COLUMN: &str = "r/s";
pub const IO_WRITE_COLUMN: &str = "w/s";

// ========== Stats helpers ==========

/// Arithmetic mean, 0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Maximum, 0 for an empty slice.
pub fn max(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }
}

// ========== Series ==========

/// All records of one region, concatenated across every matching file.
#[derive(Debug, Clone, Default)]
pub struct RegionSeries {
    pub cpu: Vec<CpuRecord>,
    pub memory: Vec<MemoryRecord>,
    pub io: Vec<IoRecord>,
    pub system: Vec<MetricsRow>,
}

impl RegionSeries {
    pub fn add_sar(&mut self, report: SarReport) {
        self.cpu.extend(report.cpu);
        self.memory.extend(report.memory);
    }

    pub fn add_io(&mut self, rows: Vec<IoRecord>) {
        self.io.extend(rows);
    }

    pub fn add_system(&mut self, rows: Vec<MetricsRow>) {
        self.system.extend(rows);
    }
}

/// Aggregated statistics for one monitored region.
///
/// `io_read_avg`/`io_write_avg` are sums of the per-interval `r/s` and `w/s`
/// rates across all devices, samples and files, not time averages. The
/// names are kept for compatibility with existing summary tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionSummary {
    pub region: String,
    pub cpu_avg: f64,
    pub cpu_max: f64,
    pub memory_avg_pct: f64,
    pub memory_max_pct: f64,
    pub io_read_avg: f64,
    pub io_write_avg: f64,
    pub load_avg: f64,
    pub load_max: f64,
}

impl RegionSummary {
    #[cfg(test)]
    pub(crate) fn empty(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            cpu_avg: 0.0,
            cpu_max: 0.0,
            memory_avg_pct: 0.0,
            memory_max_pct: 0.0,
            io_read_avg: 0.0,
            io_write_avg: 0.0,
            load_avg: 0.0,
            load_max: 0.0,
        }
    }
}

/// (mean, max) of `100 - idle` over the aggregate `all` rows.
pub fn cpu_usage(rows: &[CpuRecord]) -> (f64, f64) {
    let usage: Vec<f64> = rows.iter().filter(|r| r.is_all()).map(CpuRecord::usage).collect();
    (mean(&usage), max(&usage))
}

/// (mean, max) of `memused_pct`.
pub fn memory_usage(rows: &[MemoryRecord]) -> (f64, f64) {
    let pct: Vec<f64> = rows.iter().map(|r| r.memused_pct).collect();
    (mean(&pct), max(&pct))
}

/// (sum of r/s, sum of w/s). Rows lacking a column add nothing.
pub fn io_totals(rows: &[IoRecord]) -> (f64, f64) {
    let sum = |col: &str| rows.iter().filter_map(|r| r.get(col)).sum::<f64>();
    (sum(IO_READ_COLUMN), sum(IO_WRITE_COLUMN))
}

/// (mean, max) of `load_1min` over rows that carry it.
pub fn load_average(rows: &[MetricsRow]) -> (f64, f64) {
    let load: Vec<f64> = rows.iter().filter_map(|r| r.get(LOAD_1MIN_COLUMN)).collect();
    (mean(&load), max(&load))
}

/// Reduce a region's series. The name is supplied by the caller (it comes
/// from the monitoring directory, not from file contents).
pub fn summarize_region(region: &str, series: &RegionSeries) -> RegionSummary {
    let (cpu_avg, cpu_max) = cpu_usage(&series.cpu);
    let (memory_avg_pct, memory_max_pct) = memory_usage(&series.memory);
    let (io_read_avg, io_write_avg) = io_totals(&series.io);
    let (load_avg, load_max) = load_average(&series.system);
    RegionSummary {
        region: region.to_string(),
        cpu_avg,
        cpu_max,
        memory_avg_pct,
        memory_max_pct,
        io_read_avg,
        io_write_avg,
        load_avg,
        load_max,
    }
}
