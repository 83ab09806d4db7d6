// loadstats_analyze - Load-test & system metrics analyzer (Main Entry)
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
    # main.rs

    Command-line frontend for loadstats_analyze:
    - `<dir>`: full analysis of one results directory
    - `<dir_unsharded> <dir_sharded>`: A/B comparison
    - `-k <dir>`: k6 load-test summaries only
    - `-s <dir>`: system metrics only
    - `-c <config.toml>`: optional config file (any mode)
    - `-h`: Help/usage
*/

use std::env;
use std::path::PathBuf;

use loadstats_analyze::analyze::{AnalysisMode, compare_scenarios, run_scenario};
use loadstats_analyze::config::AnalyzeConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

// Increment as tool evolves
const VERSION_NUMBER: &str = "1.0.0";

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z"))
    }
}

/// Prints usage/help.
fn usage(prog: &str) {
    println!("loadstats_analyze {}", VERSION_NUMBER);
    eprintln!(
"Usage:
    {prog} <results_dir>                        # Full analysis (k6 + system metrics)
    {prog} <dir_unsharded> <dir_sharded>        # Compare two scenarios
    {prog} -k <results_dir>                     # k6 load-test summaries only
    {prog} -s <results_dir>                     # System metrics only
    {prog} -c <config.toml> ...                 # Use a config file
    {prog} -h                                   # Show this help/usage

    Outputs are written into the results directory:
      analysis_summary.csv, performance_analysis.png
      system_metrics_summary.csv, system_metrics_analysis.png

    Set RUST_LOG=debug for per-file parsing detail."
    );
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    let args: Vec<String> = env::args().collect();
    let prog = args.first().map(String::as_str).unwrap_or("loadstats_analyze");

    let mut config_path: Option<PathBuf> = None;
    let mut mode = AnalysisMode::Full;
    let mut dirs: Vec<PathBuf> = Vec::new();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                usage(prog);
                return Ok(());
            }
            "-c" if i + 1 < args.len() => {
                config_path = Some(PathBuf::from(&args[i + 1]));
                i += 2;
                continue;
            }
            "-c" => {
                eprintln!("Option -c requires a config file path");
                usage(prog);
                std::process::exit(1);
            }
            "-k" => mode = AnalysisMode::LoadTests,
            "-s" => mode = AnalysisMode::System,
            s if s.starts_with('-') => {
                eprintln!("Unknown option: {}", s);
                usage(prog);
                std::process::exit(1);
            }
            s => dirs.push(PathBuf::from(s)),
        }
        i += 1;
    }

    if dirs.is_empty() || dirs.len() > 2 {
        usage(prog);
        std::process::exit(1);
    }

    let cfg = AnalyzeConfig::load(config_path.as_deref())?;

    if let [unsharded, sharded] = dirs.as_slice() {
        compare_scenarios(unsharded, sharded, &cfg, mode);
    } else {
        run_scenario(&dirs[0], &cfg, mode);
    }
    Ok(())
}
