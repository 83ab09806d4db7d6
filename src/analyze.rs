// loadstats_analyze - results directory analysis
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
    # analyze.rs

    Walks one results directory and runs every parser over it:

    ```text
    results/
      k6-summary-east-1736935200.json
      k6-summary-west-1736935201.json
      monitoring_east/
        cpu_memory_1736935200.log
        io_1736935200.log
        system_metrics_1736935200.csv
      monitoring_west/
        ...
    ```

    A file that fails to read or parse is logged and skipped; its peers are
    unaffected. [`analyze_results_dir`] only reads; [`run_scenario`] also
    prints the report and hands it to [`crate::output`] and [`crate::plot`].
*/

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::aggregate::{RegionSeries, RegionSummary, summarize_region};
use crate::config::AnalyzeConfig;
use crate::error::{AnalyzeError, Result};
use crate::k6::{LoadTestSummary, parse_summary_file};
use crate::region::{print_load_tests, print_regions, rollup_load_tests};
use crate::{iostat, output, plot, sar, sysmetrics};

/// Which halves of the analysis to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisMode {
    Full,
    LoadTests,
    System,
}

impl AnalysisMode {
    fn load_tests(self) -> bool {
        matches!(self, AnalysisMode::Full | AnalysisMode::LoadTests)
    }

    fn system(self) -> bool {
        matches!(self, AnalysisMode::Full | AnalysisMode::System)
    }
}

/// Everything learned from one results directory.
#[derive(Debug, Clone, Default)]
pub struct ScenarioReport {
    pub results_dir: PathBuf,
    pub load_tests: Vec<LoadTestSummary>,
    pub regions: Vec<RegionSummary>,
}

/// Directory entries in listing order, or sorted by name when `sort` is set.
fn list_dir(dir: &Path, sort: bool) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| AnalyzeError::io(dir, e))?;
    let mut paths: Vec<PathBuf> = entries.filter_map(|e| e.ok().map(|e| e.path())).collect();
    if sort {
        paths.sort();
    }
    Ok(paths)
}

fn file_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|n| n.to_str())
}

/// Regular files named `<prefix>*<suffix>`.
pub fn matching_files(dir: &Path, prefix: &str, suffix: &str, sort: bool) -> Result<Vec<PathBuf>> {
    Ok(list_dir(dir, sort)?
        .into_iter()
        .filter(|p| p.is_file())
        .filter(|p| {
            file_name(p).is_some_and(|n| {
                n.len() >= prefix.len() + suffix.len() && n.starts_with(prefix) && n.ends_with(suffix)
            })
        })
        .collect())
}

/// `(region, directory)` for every `monitoring_<region>` subdirectory.
pub fn monitoring_dirs(results_dir: &Path, cfg: &AnalyzeConfig) -> Result<Vec<(String, PathBuf)>> {
    let prefix = &cfg.files.monitoring_prefix;
    Ok(list_dir(results_dir, cfg.analysis.sort_regions)?
        .into_iter()
        .filter(|p| p.is_dir())
        .filter_map(|p| {
            let region = file_name(&p)?.strip_prefix(prefix.as_str())?.to_string();
            Some((region, p))
        })
        .collect())
}

/// Parse every k6 summary in `results_dir`.
pub fn load_test_summaries(results_dir: &Path, cfg: &AnalyzeConfig) -> Result<Vec<LoadTestSummary>> {
    let files = matching_files(
        results_dir,
        &cfg.files.summary_prefix,
        &cfg.files.summary_suffix,
        cfg.analysis.sort_regions,
    )?;
    if files.is_empty() {
        warn!("No load-test summary files in {}", results_dir.display());
    }

    let mut runs = Vec::with_capacity(files.len());
    for path in files {
        match parse_summary_file(&path, cfg.analysis.strict_region_names) {
            Ok(summary) => {
                debug!("{} -> region {}", path.display(), summary.region);
                runs.push(summary);
            }
            Err(e) => warn!("Skipping {}: {}", path.display(), e),
        }
    }
    Ok(runs)
}

/// Load every capture file of one region into a single series.
pub fn collect_region(region_dir: &Path, cfg: &AnalyzeConfig) -> RegionSeries {
    let f = &cfg.files;
    let sort = cfg.analysis.sort_regions;
    let mut series = RegionSeries::default();

    let list = |prefix: &str, suffix: &str| match matching_files(region_dir, prefix, suffix, sort) {
        Ok(files) => files,
        Err(e) => {
            warn!("{}", e);
            Vec::new()
        }
    };

    for path in list(f.cpu_memory_prefix.as_str(), f.cpu_memory_suffix.as_str()) {
        info!("Processing {}", path.display());
        match sar::parse_sar_file(&path) {
            Ok(report) => {
                debug!("{}: {} cpu rows, {} memory rows", path.display(), report.cpu.len(), report.memory.len());
                series.add_sar(report);
            }
            Err(e) => warn!("Skipping {}: {}", path.display(), e),
        }
    }

    for path in list(f.io_prefix.as_str(), f.io_suffix.as_str()) {
        info!("Processing {}", path.display());
        match iostat::parse_iostat_file(&path) {
            Ok(rows) => {
                debug!("{}: {} device rows", path.display(), rows.len());
                series.add_io(rows);
            }
            Err(e) => warn!("Skipping {}: {}", path.display(), e),
        }
    }

    for path in list(f.system_metrics_prefix.as_str(), f.system_metrics_suffix.as_str()) {
        info!("Processing {}", path.display());
        match sysmetrics::parse_system_metrics_file(&path) {
            Ok(rows) => series.add_system(rows),
            Err(e) => warn!("Skipping {}: {}", path.display(), e),
        }
    }

    series
}

/// One [`RegionSummary`] per monitoring directory, in discovery order.
pub fn region_summaries(results_dir: &Path, cfg: &AnalyzeConfig) -> Result<Vec<RegionSummary>> {
    let dirs = monitoring_dirs(results_dir, cfg)?;
    if dirs.is_empty() {
        warn!("No monitoring directories in {}", results_dir.display());
    }
    Ok(dirs
        .into_iter()
        .map(|(region, dir)| {
            info!("Analysing region {}", region);
            summarize_region(&region, &collect_region(&dir, cfg))
        })
        .collect())
}

/// Parse and aggregate one results directory without writing anything.
pub fn analyze_results_dir(results_dir: &Path, cfg: &AnalyzeConfig, mode: AnalysisMode) -> Result<ScenarioReport> {
    if !results_dir.is_dir() {
        return Err(AnalyzeError::MissingPath(results_dir.to_path_buf()));
    }
    let mut report = ScenarioReport {
        results_dir: results_dir.to_path_buf(),
        ..Default::default()
    };
    if mode.load_tests() {
        report.load_tests = load_test_summaries(results_dir, cfg)?;
    }
    if mode.system() {
        report.regions = region_summaries(results_dir, cfg)?;
    }
    Ok(report)
}

/// Write tables and charts for a finished report. Failures are logged;
/// a chart failure never stops the CSV export.
pub fn write_outputs(report: &ScenarioReport, cfg: &AnalyzeConfig) {
    let dir = &report.results_dir;
    let out = &cfg.output;

    if !report.load_tests.is_empty() {
        if out.charts {
            let path = dir.join(&out.analysis_chart);
            match plot::plot_load_tests(&path, &report.load_tests, out.chart_width, out.chart_height) {
                Ok(()) => info!("Charts saved to {}", path.display()),
                Err(e) => warn!("{}", e),
            }
        }
        let path = dir.join(&out.analysis_csv);
        match output::write_load_tests_csv(&path, &report.load_tests) {
            Ok(()) => info!("Summary saved to {}", path.display()),
            Err(e) => warn!("{}", e),
        }
    }

    if !report.regions.is_empty() {
        if out.charts {
            let path = dir.join(&out.system_chart);
            match plot::plot_regions(&path, &report.regions, out.chart_width, out.chart_height) {
                Ok(()) => info!("System charts saved to {}", path.display()),
                Err(e) => warn!("{}", e),
            }
        }
        let path = dir.join(&out.system_csv);
        match output::write_regions_csv(&path, &report.regions) {
            Ok(()) => info!("System summary saved to {}", path.display()),
            Err(e) => warn!("{}", e),
        }
    }
}

/// Analyse, print and write one results directory. A missing directory is
/// reported and yields an empty report.
pub fn run_scenario(results_dir: &Path, cfg: &AnalyzeConfig, mode: AnalysisMode) -> ScenarioReport {
    println!("Analyzing results in: {}", results_dir.display());
    println!("{}", "=".repeat(60));

    let report = match analyze_results_dir(results_dir, cfg, mode) {
        Ok(r) => r,
        Err(e) => {
            warn!("{}", e);
            return ScenarioReport {
                results_dir: results_dir.to_path_buf(),
                ..Default::default()
            };
        }
    };

    if mode.load_tests() {
        println!("\nLoad tests");
        println!("{}", "-".repeat(30));
        print_load_tests(&report.load_tests);
    }
    if mode.system() {
        println!("\nSystem metrics");
        println!("{}", "-".repeat(30));
        print_regions(&report.regions);
    }
    write_outputs(&report, cfg);
    report
}

/// A/B comparison: each directory gets its own full, independent analysis.
pub fn compare_scenarios(
    unsharded_dir: &Path,
    sharded_dir: &Path,
    cfg: &AnalyzeConfig,
    mode: AnalysisMode,
) -> (ScenarioReport, ScenarioReport) {
    println!("\nScenario comparison");
    println!("{}", "=".repeat(40));

    println!("\nScenario UNSHARDED:");
    let unsharded = run_scenario(unsharded_dir, cfg, mode);
    println!("\nScenario SHARDED:");
    let sharded = run_scenario(sharded_dir, cfg, mode);

    print_comparison(&unsharded, &sharded);
    (unsharded, sharded)
}

fn print_comparison(a: &ScenarioReport, b: &ScenarioReport) {
    let (Some(ra), Some(rb)) = (rollup_load_tests(&a.load_tests), rollup_load_tests(&b.load_tests)) else {
        return;
    };
    println!("\n{:<22} {:>14} {:>14}", "", "Unsharded", "Sharded");
    println!("{:<22} {:>14} {:>14}", "Total requests", ra.total_requests, rb.total_requests);
    println!(
        "{:<22} {:>14.2} {:>14.2}",
        "Mean error rate (%)", ra.failed_requests_avg, rb.failed_requests_avg
    );
    println!(
        "{:<22} {:>14.2} {:>14.2}",
        "Mean response (ms)", ra.avg_duration_avg, rb.avg_duration_avg
    );
    println!(
        "{:<22} {:>14.2} {:>14.2}",
        "Throughput (req/s)", ra.requests_per_sec_total, rb.requests_per_sec_total
    );
}
