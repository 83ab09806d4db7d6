// loadstats_analyze - sar line classifier
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
    # classify.rs

    Line classifier for sar CPU/memory reports.

    A sar capture interleaves several tables, each introduced by a header
    line and closed by an `Average:` line:

    ```text
    12:00:01        CPU     %user     %nice   %system   %iowait    %steal     %idle
    12:00:02        all      5.03      0.00      1.01      0.00      0.00     93.97
    Average:        all      5.03      0.00      1.01      0.00      0.00     93.97

    12:00:01    kbmemfree kbmemused  %memused kbbuffers  kbcached  kbcommit   %commit  kbactive   kbinact
    12:00:02      1234567   3456789     45.10     12345    234567   3456789     20.00    123456     23456
    ```

    [`SectionTracker`] walks the lines once, forward only, and remembers which
    table is currently open.
*/

use std::sync::LazyLock;

use regex::Regex;

static TIMESTAMP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}:\d{2}:\d{2}").expect("timestamp pattern is valid"));

/// Which sar table a data line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Cpu,
    Memory,
}

/// Classification of a single report line, independent of any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Header of a table; opens a new section.
    Header(SectionKind),
    /// `Average:` summary; closes the open section.
    SectionEnd,
    /// Timestamp-prefixed row.
    Data,
    Other,
}

/// Classify one line. Header checks win over the timestamp check because
/// sar prefixes its header rows with a timestamp as well.
pub fn classify_line(line: &str) -> LineKind {
    let line = line.trim();
    if line.contains("CPU") && line.contains("%user") {
        LineKind::Header(SectionKind::Cpu)
    } else if line.contains("kbmemfree") || line.contains("memfree") {
        LineKind::Header(SectionKind::Memory)
    } else if line.starts_with("Average:") {
        LineKind::SectionEnd
    } else if TIMESTAMP_RE.is_match(line) {
        LineKind::Data
    } else {
        LineKind::Other
    }
}

/// Single-pass state machine over a sar report.
#[derive(Debug, Default)]
pub struct SectionTracker {
    current: Option<SectionKind>,
}

impl SectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    fn current(&self) -> Option<SectionKind> {
        self.current
    }

    /// Consume the next line. Returns the open section when the line is a
    /// data row for it, `None` for headers, terminators, stray data rows
    /// and anything unrecognised.
    pub fn feed(&mut self, line: &str) -> Option<SectionKind> {
        match classify_line(line) {
            LineKind::Header(kind) => {
                self.current = Some(kind);
                None
            }
            LineKind::SectionEnd => {
                self.current = None;
                None
            }
            LineKind::Data => self.current,
            LineKind::Other => None,
        }
    }
}
