// loadstats_analyze - CSV summary tables
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

//! Flat CSV export of the summary tables, one header row plus one row per
//! region or run. Column names are the struct field names.

use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::aggregate::RegionSummary;
use crate::error::{AnalyzeError, Result};
use crate::k6::LoadTestSummary;

fn write_rows<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let csv_err = |source| AnalyzeError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut wtr = csv::Writer::from_path(path).map_err(csv_err)?;
    for row in rows {
        wtr.serialize(row).map_err(csv_err)?;
    }
    wtr.flush().map_err(|e| AnalyzeError::io(path, e))
}

fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let csv_err = |source| AnalyzeError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut rdr = csv::Reader::from_path(path).map_err(csv_err)?;
    rdr.deserialize().map(|row| row.map_err(csv_err)).collect()
}

/// `system_metrics_summary.csv`
pub fn write_regions_csv(path: &Path, regions: &[RegionSummary]) -> Result<()> {
    write_rows(path, regions)
}

pub fn read_regions_csv(path: &Path) -> Result<Vec<RegionSummary>> {
    read_rows(path)
}

/// `analysis_summary.csv`
pub fn write_load_tests_csv(path: &Path, runs: &[LoadTestSummary]) -> Result<()> {
    write_rows(path, runs)
}

pub fn read_load_tests_csv(path: &Path) -> Result<Vec<LoadTestSummary>> {
    read_rows(path)
}
