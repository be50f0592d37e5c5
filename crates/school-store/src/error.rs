//! Error types for the record store.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Failures reading or writing the store file.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The file exists but could not be read or written.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file has content that is not a valid document.
    #[error("malformed store file {path}: {source}")]
    Parse {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The document could not be encoded.
    #[error("failed to encode document: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Failures of record store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record under this id.
    #[error("unknown student id: {0}")]
    UnknownStudent(String),

    /// The mutation was applied in memory but not written to disk.
    #[error("failed to persist store: {0}")]
    Persist(#[from] StorageError),
}

/// Result type for record store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = StoreError::UnknownStudent("ghost".into());
        assert_eq!(err.to_string(), "unknown student id: ghost");

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = StoreError::from(StorageError::Io {
            path: Utf8PathBuf::from("/srv/DATABASE.json"),
            source: io,
        });
        assert_eq!(
            err.to_string(),
            "failed to persist store: I/O error on /srv/DATABASE.json: denied"
        );
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StoreError>();
    }
}
