// loadstats_analyze - library root
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

//! # loadstats_analyze
//!
//! Post-run analysis for distributed k6 load tests: reads the per-region k6
//! summaries and the sar / iostat / system-metric captures recorded on each
//! node, and reduces them to one comparison table per results directory.

pub mod aggregate;
pub mod analyze;
pub mod classify;
pub mod config;
pub mod error;
pub mod iostat;
pub mod k6;
pub mod output;
pub mod plot;
pub mod region;
pub mod sar;
pub mod sysmetrics;
