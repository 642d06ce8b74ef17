use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Startup / load errors
// ---------------------------------------------------------------------------

/// Everything that can go wrong between reading the source file and
/// opening the dashboard window. None of these occur after startup.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// The source file is missing or could not be read.
    #[error("data file {path:?} is unavailable: {source}")]
    DataUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was readable but produced no usable exam rows.
    #[error("data file {path:?} contains no usable exam rows")]
    EmptyDataset { path: PathBuf },

    /// A column required by the column mapping is absent from the header.
    #[error("data file {path:?} has no '{column}' column (found: {found:?})")]
    MissingColumn {
        path: PathBuf,
        column: String,
        found: Vec<String>,
    },

    /// A single row failed validation. Rows are skipped, so this only
    /// ever shows up in log output.
    #[error("row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    /// The file could be opened but its contents are not valid for the format.
    #[error("failed to parse {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}

impl DashboardError {
    pub(crate) fn unavailable(path: &std::path::Path, source: std::io::Error) -> Self {
        DashboardError::DataUnavailable {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn parse(path: &std::path::Path, message: impl ToString) -> Self {
        DashboardError::Parse {
            path: path.to_path_buf(),
            message: message.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
