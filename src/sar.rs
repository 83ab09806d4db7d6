// loadstats_analyze - sar CPU/memory report parser
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

//! # sar CPU/memory parser
//!
//! Turns the data rows of a `cpu_memory_*.log` capture into typed records.
//! Column positions are fixed per table; rows that are too short or carry a
//! non-numeric value are dropped without comment.

use std::fs;
use std::path::Path;

use crate::classify::{SectionKind, SectionTracker};
use crate::error::{AnalyzeError, Result};

/// Minimum tokens for a CPU row: time cpu user nice system iowait steal idle
pub const CPU_MIN_TOKENS: usize = 8;
/// Minimum tokens for a memory row: time + 7 required columns.
pub const MEMORY_MIN_TOKENS: usize = 8;

/// CPU identifier sar uses for the all-cores aggregate row.
pub const CPU_ALL: &str = "all";

/// A numeric cell. `nan` and `inf` parse as floats but count as bad cells.
fn number(cell: &str) -> Option<f64> {
    cell.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// One row of the sar CPU table (percentages).
#[derive(Debug, Clone, PartialEq)]
pub struct CpuRecord {
    pub time: String,
    pub cpu: String,
    pub user: f64,
    pub nice: f64,
    pub system: f64,
    pub iowait: f64,
    pub steal: f64,
    pub idle: f64,
}

impl CpuRecord {
    pub fn is_all(&self) -> bool {
        self.cpu == CPU_ALL
    }

    pub fn usage(&self) -> f64 {
        100.0 - self.idle
    }

    fn from_tokens(cols: &[&str]) -> Option<Self> {
        if cols.len() < CPU_MIN_TOKENS {
            return None;
        }
        Some(Self {
            time: cols[0].to_string(),
            cpu: cols[1].to_string(),
            user: number(cols[2])?,
            nice: number(cols[3])?,
            system: number(cols[4])?,
            iowait: number(cols[5])?,
            steal: number(cols[6])?,
            idle: number(cols[7])?,
        })
    }
}

/// One row of the sar memory table. `active`/`inactive` are absent on
/// older sysstat releases and read as 0 then.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryRecord {
    pub time: String,
    pub memfree: f64,
    pub memused: f64,
    pub memused_pct: f64,
    pub buffers: f64,
    pub cached: f64,
    pub commit: f64,
    pub commit_pct: f64,
    pub active: f64,
    pub inactive: f64,
}

impl MemoryRecord {
    fn from_tokens(cols: &[&str]) -> Option<Self> {
        if cols.len() < MEMORY_MIN_TOKENS {
            return None;
        }
        let optional = |idx: usize| -> Option<f64> {
            match cols.get(idx) {
                Some(v) => number(v),
                None => Some(0.0),
            }
        };
        Some(Self {
            time: cols[0].to_string(),
            memfree: number(cols[1])?,
            memused: number(cols[2])?,
            memused_pct: number(cols[3])?,
            buffers: number(cols[4])?,
            cached: number(cols[5])?,
            commit: number(cols[6])?,
            commit_pct: number(cols[7])?,
            active: optional(8)?,
            inactive: optional(9)?,
        })
    }
}

/// Everything recovered from one sar capture.
#[derive(Debug, Clone, Default)]
pub struct SarReport {
    pub cpu: Vec<CpuRecord>,
    pub memory: Vec<MemoryRecord>,
}

/// Split a data row, folding a 12-hour `AM`/`PM` marker into the time
/// token so the column positions match the 24-hour layout.
fn tokenize(line: &str) -> Vec<String> {
    let mut cols: Vec<String> = line.split_whitespace().map(str::to_string).collect();
    if cols.len() > 1 && (cols[1] == "AM" || cols[1] == "PM") {
        let marker = cols.remove(1);
        cols[0] = format!("{} {}", cols[0], marker);
    }
    cols
}

/// Parse the text of a sar CPU/memory capture.
pub fn parse_sar(content: &str) -> SarReport {
    let mut tracker = SectionTracker::new();
    let mut report = SarReport::default();

    for line in content.lines() {
        let Some(kind) = tracker.feed(line) else {
            continue;
        };
        let owned = tokenize(line.trim());
        let cols: Vec<&str> = owned.iter().map(String::as_str).collect();
        match kind {
            SectionKind::Cpu => {
                if let Some(rec) = CpuRecord::from_tokens(&cols) {
                    report.cpu.push(rec);
                }
            }
            SectionKind::Memory => {
                if let Some(rec) = MemoryRecord::from_tokens(&cols) {
                    report.memory.push(rec);
                }
            }
        }
    }
    report
}

/// Read and parse one `cpu_memory_*.log` file.
pub fn parse_sar_file(path: &Path) -> Result<SarReport> {
    let content = fs::read_to_string(path).map_err(|e| AnalyzeError::io(path, e))?;
    Ok(parse_sar(&content))
}
