//! Static dataset loading shared by the camera and closure directories.
//!
//! Both datasets are read once at startup. A load either yields every
//! record or fails; there is no partially-populated directory.

use std::path::{Path, PathBuf};

/// Errors raised while loading a static dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// The file could not be read
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV could not be parsed (bad quoting, missing column, bad type)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The JSON document could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A record parsed but violates a data-integrity rule
    #[error("invalid record {index}: {reason}")]
    InvalidRecord { index: usize, reason: String },
}

impl DatasetError {
    pub(crate) fn invalid(index: usize, reason: impl Into<String>) -> Self {
        DatasetError::InvalidRecord {
            index,
            reason: reason.into(),
        }
    }
}

/// Read a whole dataset file into memory.
pub(crate) fn read_to_string(path: &Path) -> Result<String, DatasetError> {
    std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_io_error() {
        let err = read_to_string(Path::new("does/not/exist.csv")).unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
        assert!(err.to_string().contains("does/not/exist.csv"));
    }

    #[test]
    fn error_display() {
        let err = DatasetError::invalid(3, "missing rw_DateTo");
        assert_eq!(err.to_string(), "invalid record 3: missing rw_DateTo");
    }
}
