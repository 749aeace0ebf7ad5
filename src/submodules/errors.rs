use std::path::{Path, PathBuf};

use thiserror::Error;

pub type DataResult<T> = Result<T, DataError>;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("unknown test case `{0}` (expected test1 or test2)")]
    UnknownCase(String),
    #[error("unknown coupling index {0} (expected 20, 10 or 5)")]
    UnknownCoupling(u32),
    #[error("dataset not found: {} [{table}]", .path.display())]
    DatasetNotFound { path: PathBuf, table: String },
    #[error("metadata sidecar not found: {}", .0.display())]
    MetadataNotFound(PathBuf),
    #[error("metadata sidecar {} is not valid JSON: {source}", .path.display())]
    MetadataMalformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("malformed dataset {}: {reason}", .path.display())]
    MalformedDataset { path: PathBuf, reason: String },
    #[error("{observable} is not stored by the {source_kind} output")]
    UnsupportedObservable {
        observable: &'static str,
        source_kind: &'static str,
    },
    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration {}: {reason}", .path.display())]
    Config { path: PathBuf, reason: String },
}

impl DataError {
    pub fn malformed(path: &Path, reason: impl Into<String>) -> Self {
        DataError::MalformedDataset {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    pub fn not_found(path: &Path, table: impl Into<String>) -> Self {
        DataError::DatasetNotFound {
            path: path.to_path_buf(),
            table: table.into(),
        }
    }

    /// Maps a failed read to `DatasetNotFound` when the file is absent and to
    /// `Io` otherwise.
    pub fn from_io(path: &Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            DataError::not_found(path, "file")
        } else {
            DataError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_maps_to_dataset_not_found() {
        let err = DataError::from_io(
            Path::new("a/b.out"),
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, DataError::DatasetNotFound { .. }));
        assert!(err.to_string().contains("a/b.out"));
    }

    #[test]
    fn other_io_failures_stay_io() {
        let err = DataError::from_io(
            Path::new("a/b.out"),
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "no"),
        );
        assert!(matches!(err, DataError::Io { .. }));
    }
}
