// loadstats_analyze - iostat device report parser
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

/*!
    # iostat.rs

    Parser for `iostat -x` captures (`io_*.log`).

    iostat prints one report per interval, separated by blank lines. Each
    device report has its own header row, and the column set depends on
    the sysstat version, so column names are taken from the header rather
    than from fixed positions:

    ```text
    Device            r/s     w/s     rkB/s     wkB/s   rrqm/s   wrqm/s  %rrqm  %wrqm r_await w_await aqu-sz rareq-sz wareq-sz  svctm  %util
    sda              1.00    2.00     16.00     32.00     0.00     0.00   0.00   0.00    0.50    0.70   0.00    16.00    16.00   0.30   0.10
    ```

    Blocks without a `Device` + `r/s` header (e.g. the `avg-cpu:` block)
    contribute nothing.
*/

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{AnalyzeError, Result};

/// One device row from one interval.
#[derive(Debug, Clone, PartialEq)]
pub struct IoRecord {
    pub device: String,
    /// Header column name -> value, e.g. `"r/s" -> 1.0`.
    pub fields: HashMap<String, f64>,
}

impl IoRecord {
    pub fn get(&self, column: &str) -> Option<f64> {
        self.fields.get(column).copied()
    }
}

fn is_header(line: &str) -> bool {
    line.contains("Device") && line.contains("r/s")
}

/// Split text into runs of non-blank lines.
fn blocks(content: &str) -> Vec<Vec<&str>> {
    let mut out = Vec::new();
    let mut cur: Vec<&str> = Vec::new();
    for line in content.lines() {
        if line.trim().is_empty() {
            if !cur.is_empty() {
                out.push(std::mem::take(&mut cur));
            }
        } else {
            cur.push(line);
        }
    }
    if !cur.is_empty() {
        out.push(cur);
    }
    out
}

fn parse_row(headers: &[&str], line: &str) -> Option<IoRecord> {
    let cols: Vec<&str> = line.split_whitespace().collect();
    if cols.len() < headers.len() {
        return None;
    }
    let mut fields = HashMap::with_capacity(headers.len());
    for (name, value) in headers.iter().zip(cols.iter()).skip(1) {
        let value = value.parse::<f64>().ok().filter(|v| v.is_finite())?;
        fields.insert((*name).to_string(), value);
    }
    Some(IoRecord {
        device: cols[0].to_string(),
        fields,
    })
}

/// Parse an iostat capture into a flat list of device rows, in file order.
pub fn parse_iostat(content: &str) -> Vec<IoRecord> {
    let mut rows = Vec::new();
    for block in blocks(content) {
        if block.len() < 2 {
            continue;
        }
        let Some(header_idx) = block.iter().position(|l| is_header(l)) else {
            continue;
        };
        let headers: Vec<&str> = block[header_idx].split_whitespace().collect();
        rows.extend(
            block[header_idx + 1..]
                .iter()
                .filter_map(|line| parse_row(&headers, line)),
        );
    }
    rows
}

/// Read and parse one `io_*.log` file.
pub fn parse_iostat_file(path: &Path) -> Result<Vec<IoRecord>> {
    let content = fs::read_to_string(path).map_err(|e| AnalyzeError::io(path, e))?;
    Ok(parse_iostat(&content))
}
