// loadstats_analyze - Configuration
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

//! Optional TOML configuration. Every key has a default matching the file
//! layout produced by the distributed k6 runs, so running without a config
//! file is the normal case.

use std::path::{Path, PathBuf};

use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "loadstats.toml";
pub const CONFIG_ENV_VAR: &str = "LOADSTATS_CONFIG";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnalyzeConfig {
    pub files: FilesConfig,
    pub output: OutputConfig,
    pub analysis: AnalysisConfig,
}

/// File-name conventions used to discover inputs inside a results directory.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    pub summary_prefix: String,
    pub summary_suffix: String,
    pub monitoring_prefix: String,
    pub cpu_memory_prefix: String,
    pub cpu_memory_suffix: String,
    pub io_prefix: String,
    pub io_suffix: String,
    pub system_metrics_prefix: String,
    pub system_metrics_suffix: String,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            summary_prefix: "k6-summary-".into(),
            summary_suffix: ".json".into(),
            monitoring_prefix: "monitoring_".into(),
            cpu_memory_prefix: "cpu_memory_".into(),
            cpu_memory_suffix: ".log".into(),
            io_prefix: "io_".into(),
            io_suffix: ".log".into(),
            system_metrics_prefix: "system_metrics_".into(),
            system_metrics_suffix: ".csv".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub analysis_csv: String,
    pub analysis_chart: String,
    pub system_csv: String,
    pub system_chart: String,
    pub chart_width: u32,
    pub chart_height: u32,
    /// Set to false to skip PNG rendering (tables are still written).
    pub charts: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            analysis_csv: "analysis_summary.csv".into(),
            analysis_chart: "performance_analysis.png".into(),
            system_csv: "system_metrics_summary.csv".into(),
            system_chart: "system_metrics_analysis.png".into(),
            chart_width: 1800,
            chart_height: 1200,
            charts: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Order regions and input files by name instead of directory-listing order.
    pub sort_regions: bool,
    /// Reject k6 summary names that do not carry a region instead of
    /// filing them under `unknown`.
    pub strict_region_names: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sort_regions: true,
            strict_region_names: false,
        }
    }
}

impl AnalyzeConfig {
    /// Load from an explicit path, then `$LOADSTATS_CONFIG`, then
    /// `./loadstats.toml`. Falls back to defaults when none of them exist.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let path = match explicit {
            Some(p) => Some(p.to_path_buf()),
            None => std::env::var(CONFIG_ENV_VAR)
                .ok()
                .map(PathBuf::from)
                .or_else(|| {
                    let p = PathBuf::from(DEFAULT_CONFIG_FILE);
                    p.exists().then_some(p)
                }),
        };

        match path {
            Some(p) => {
                let s = std::fs::read_to_string(&p)
                    .map_err(|e| anyhow::anyhow!("reading {}: {}", p.display(), e))?;
                tracing::debug!("Loaded config from {}", p.display());
                Self::load_from_str(&s)
            }
            None => Ok(Self::default()),
        }
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AnalyzeConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        let f = &self.files;
        for (key, value) in [
            ("files.summary_prefix", &f.summary_prefix),
            ("files.monitoring_prefix", &f.monitoring_prefix),
            ("files.cpu_memory_prefix", &f.cpu_memory_prefix),
            ("files.io_prefix", &f.io_prefix),
            ("files.system_metrics_prefix", &f.system_metrics_prefix),
        ] {
            anyhow::ensure!(!value.is_empty(), "{} must be non-empty", key);
        }

        let o = &self.output;
        for (key, value) in [
            ("output.analysis_csv", &o.analysis_csv),
            ("output.analysis_chart", &o.analysis_chart),
            ("output.system_csv", &o.system_csv),
            ("output.system_chart", &o.system_chart),
        ] {
            anyhow::ensure!(!value.is_empty(), "{} must be non-empty", key);
        }
        anyhow::ensure!(
            o.chart_width > 0,
            "output.chart_width must be > 0, got {}",
            o.chart_width
        );
        anyhow::ensure!(
            o.chart_height > 0,
            "output.chart_height must be > 0, got {}",
            o.chart_height
        );
        Ok(())
    }
}
