//! Error handling for the roster crate.

use std::io;
use std::path::{Path, PathBuf};

use arrow::error::ArrowError;
use parquet::errors::ParquetError;

/// Specialized error type for roster operations
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    /// Error opening, reading or writing a file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error building or converting Arrow data
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Error reading or writing Parquet data
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    /// Error serializing rows into Arrow arrays
    #[error("Row conversion error: {0}")]
    RowConversion(#[from] serde_arrow::Error),

    /// Error reading a configuration file or writing JSON output
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The backing store failed; nothing was applied
    #[error("Store error: {message}{}", path_suffix(.path.as_deref()))]
    Store {
        /// What went wrong
        message: String,
        /// Worksheet file involved, if any
        path: Option<PathBuf>,
    },

    /// The worksheet does not have the expected shape
    #[error("Schema error: {0}")]
    Schema(String),

    /// Worksheet or export file with an extension we cannot handle
    #[error("Unsupported file format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
}

fn path_suffix(path: Option<&Path>) -> String {
    path.map(|p| format!(" ({})", p.display()))
        .unwrap_or_default()
}

impl RosterError {
    /// Create a store error with a message
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
            path: None,
        }
    }

    /// Create a schema error with a message
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema(message.into())
    }

    /// Attach the worksheet path to a store error
    #[must_use]
    pub fn with_path(self, path: &Path) -> Self {
        match self {
            Self::Store { message, .. } => Self::Store {
                message,
                path: Some(path.to_path_buf()),
            },
            other => other,
        }
    }
}

/// Result type for roster operations
pub type Result<T> = std::result::Result<T, RosterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display_includes_path() {
        let err = RosterError::store("sheet is locked").with_path(Path::new("/tmp/pegawai.csv"));
        assert_eq!(err.to_string(), "Store error: sheet is locked (/tmp/pegawai.csv)");
    }

    #[test]
    fn test_with_path_leaves_other_errors_alone() {
        let err = RosterError::schema("missing header").with_path(Path::new("x.csv"));
        assert_eq!(err.to_string(), "Schema error: missing header");
    }
}
