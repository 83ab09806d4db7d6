// loadstats_analyze - Error types
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

//! File-level failures. Row-level problems (short or non-numeric lines)
//! never show up here: the parsers drop those rows silently.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("path not found: {}", .0.display())]
    MissingPath(PathBuf),

    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("column '{column}' missing from {}", path.display())]
    MissingColumn { path: PathBuf, column: String },

    #[error("unparseable timestamp '{value}' in {}", path.display())]
    Timestamp { path: PathBuf, value: String },

    #[error("malformed JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot derive region from file name '{0}'")]
    RegionName(String),

    #[error("chart rendering failed for {}: {message}", path.display())]
    Render { path: PathBuf, message: String },
}

impl AnalyzeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            AnalyzeError::MissingPath(path)
        } else {
            AnalyzeError::Io { path, source }
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalyzeError>;
