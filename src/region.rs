// loadstats_analyze - cross-region reporting
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

//! Global roll-ups over per-region tables, and the console tables that go
//! with them. Region order is the caller's (discovery) order.

use crate::aggregate::{RegionSummary, max, mean};
use crate::k6::LoadTestSummary;

/// Roll-up across [`RegionSummary`] rows.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemRollup {
    pub region_count: usize,
    /// Mean of the per-region averages.
    pub cpu_avg: f64,
    /// Max of the per-region maxima.
    pub cpu_max: f64,
    pub memory_avg_pct: f64,
    pub memory_max_pct: f64,
    pub io_read_total: f64,
    pub io_write_total: f64,
    pub load_avg: f64,
    pub load_max: f64,
}

/// Roll-up across [`LoadTestSummary`] rows.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadTestRollup {
    pub run_count: usize,
    pub total_requests: u64,
    pub failed_requests_avg: f64,
    pub avg_duration_avg: f64,
    pub requests_per_sec_total: f64,
}

fn column<T>(rows: &[T], f: impl Fn(&T) -> f64) -> Vec<f64> {
    rows.iter().map(f).collect()
}

/// `None` when there are no regions.
pub fn rollup_regions(regions: &[RegionSummary]) -> Option<SystemRollup> {
    if regions.is_empty() {
        return None;
    }
    Some(SystemRollup {
        region_count: regions.len(),
        cpu_avg: mean(&column(regions, |r| r.cpu_avg)),
        cpu_max: max(&column(regions, |r| r.cpu_max)),
        memory_avg_pct: mean(&column(regions, |r| r.memory_avg_pct)),
        memory_max_pct: max(&column(regions, |r| r.memory_max_pct)),
        io_read_total: column(regions, |r| r.io_read_avg).iter().sum(),
        io_write_total: column(regions, |r| r.io_write_avg).iter().sum(),
        load_avg: mean(&column(regions, |r| r.load_avg)),
        load_max: max(&column(regions, |r| r.load_max)),
    })
}

/// `None` when there are no runs.
pub fn rollup_load_tests(runs: &[LoadTestSummary]) -> Option<LoadTestRollup> {
    if runs.is_empty() {
        return None;
    }
    Some(LoadTestRollup {
        run_count: runs.len(),
        total_requests: runs.iter().map(|r| r.total_requests).sum(),
        failed_requests_avg: mean(&column(runs, |r| r.failed_requests)),
        avg_duration_avg: mean(&column(runs, |r| r.avg_duration)),
        requests_per_sec_total: column(runs, |r| r.requests_per_sec).iter().sum(),
    })
}

// ========== Console output ==========

/// Per-run load-test table followed by the roll-up.
pub fn print_load_tests(runs: &[LoadTestSummary]) {
    let Some(rollup) = rollup_load_tests(runs) else {
        println!("No load-test data.");
        return;
    };
    println!(
        "{:<12} {:>12} {:>10} {:>12} {:>12} {:>12} {:>12}",
        "Region", "Requests", "Errors(%)", "Avg(ms)", "P95(ms)", "Max(ms)", "Req/s"
    );
    for r in runs {
        println!(
            "{:<12} {:>12} {:>10.2} {:>12.2} {:>12.2} {:>12.2} {:>12.2}",
            r.region.to_uppercase(),
            r.total_requests,
            r.failed_requests,
            r.avg_duration,
            r.p95_duration,
            r.max_duration,
            r.requests_per_sec
        );
    }
    println!();
    println!("Runs analysed:        {}", rollup.run_count);
    println!("Total requests:       {}", rollup.total_requests);
    println!("Mean error rate:      {:.2}%", rollup.failed_requests_avg);
    println!("Mean response time:   {:.2}ms", rollup.avg_duration_avg);
    println!("Total throughput:     {:.2} req/s", rollup.requests_per_sec_total);
}

/// Per-region system table followed by the roll-up.
pub fn print_regions(regions: &[RegionSummary]) {
    let Some(rollup) = rollup_regions(regions) else {
        println!("No system metrics data.");
        return;
    };
    println!(
        "{:<12} {:>9} {:>9} {:>9} {:>9} {:>12} {:>12} {:>9} {:>9}",
        "Region", "CPU(%)", "CPUmax", "Mem(%)", "Memmax", "Read r/s", "Write w/s", "Load", "Loadmax"
    );
    for r in regions {
        println!(
            "{:<12} {:>9.1} {:>9.1} {:>9.1} {:>9.1} {:>12.2} {:>12.2} {:>9.2} {:>9.2}",
            r.region.to_uppercase(),
            r.cpu_avg,
            r.cpu_max,
            r.memory_avg_pct,
            r.memory_max_pct,
            r.io_read_avg,
            r.io_write_avg,
            r.load_avg,
            r.load_max
        );
    }
    println!();
    println!("{}", rollup_text(&rollup));
}

/// Summary block shared by the console report and the chart's text panel.
pub fn rollup_text(r: &SystemRollup) -> String {
    format!(
        "Regions analysed: {}\n\
         CPU mean: {:.2}%\n\
         CPU max: {:.2}%\n\
         Memory mean: {:.2}%\n\
         Memory max: {:.2}%\n\
         Load mean: {:.2}\n\
         Load max: {:.2}",
        r.region_count,
        r.cpu_avg,
        r.cpu_max,
        r.memory_avg_pct,
        r.memory_max_pct,
        r.load_avg,
        r.load_max
    )
}
