//! JSON file storage for the student document.

use crate::error::StorageError;
use crate::schema::Document;
use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;
use std::fs;

/// Environment variable overriding the store location.
pub const DB_PATH_ENV: &str = "SCHOOL_DB_PATH";

/// File name used under the home directory.
const DEFAULT_FILE_NAME: &str = "DATABASE.json";

/// Single-file JSON storage.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    /// Path to the JSON file
    path: Utf8PathBuf,
}

impl JsonStorage {
    /// Create a new storage instance. A leading `~/` is expanded.
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            path: expand_home(path.into()),
        }
    }

    /// Get default storage path.
    ///
    /// Priority:
    /// 1. SCHOOL_DB_PATH environment variable (if set)
    /// 2. ~/DATABASE.json
    pub fn default_path() -> Utf8PathBuf {
        if let Ok(custom_path) = std::env::var(DB_PATH_ENV) {
            return expand_home(Utf8PathBuf::from(custom_path));
        }

        match home_dir() {
            Some(home) => home.join(DEFAULT_FILE_NAME),
            None => Utf8PathBuf::from(DEFAULT_FILE_NAME),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Ensure storage directory exists.
    pub fn ensure_dir(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if parent.as_str().is_empty() {
                return Ok(());
            }
            fs::create_dir_all(parent).map_err(|source| StorageError::Io {
                path: parent.to_owned(),
                source,
            })?;
        }
        Ok(())
    }
}

/// Whole-document persistence used by the record store.
///
/// Implementors supply the explicit `read`/`write`; `load`/`save` are the
/// fail-safe forms that never surface an error.
pub trait DocumentStorage {
    /// Human-readable location, for logs.
    fn location(&self) -> String;

    /// Read the document. Missing or blank storage is an empty document.
    fn read(&self) -> Result<Document, StorageError>;

    /// Replace the stored document.
    fn write(&self, document: &Document) -> Result<(), StorageError>;

    /// Read the document, falling back to an empty one on any failure.
    fn load(&self) -> Document {
        match self.read() {
            Ok(document) => {
                tracing::debug!(
                    location = %self.location(),
                    records = document.len(),
                    "Loaded store"
                );
                document
            }
            Err(err) => {
                tracing::warn!(error = %err, "Store unreadable, using empty document");
                Document::new()
            }
        }
    }

    /// Write the document, reporting success as a flag.
    fn save(&self, document: &Document) -> bool {
        match self.write(document) {
            Ok(()) => {
                tracing::debug!(
                    location = %self.location(),
                    records = document.len(),
                    "Saved store"
                );
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "Failed to save store");
                false
            }
        }
    }
}

impl DocumentStorage for JsonStorage {
    fn location(&self) -> String {
        self.path.to_string()
    }

    /// Unreadable or malformed content is an error.
    fn read(&self) -> Result<Document, StorageError> {
        if !self.path.exists() {
            return Ok(Document::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })?;

        if content.trim().is_empty() {
            return Ok(Document::new());
        }

        serde_json::from_str(&content).map_err(|source| StorageError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Overwrite the file in place, indented by four spaces.
    fn write(&self, document: &Document) -> Result<(), StorageError> {
        self.ensure_dir()?;

        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        document
            .serialize(&mut serializer)
            .map_err(StorageError::Serialize)?;

        fs::write(&self.path, buf).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

/// Get home directory.
fn home_dir() -> Option<Utf8PathBuf> {
    dirs::home_dir().and_then(|home| Utf8PathBuf::from_path_buf(home).ok())
}

fn expand_home(path: Utf8PathBuf) -> Utf8PathBuf {
    match path.as_str().strip_prefix("~/") {
        Some(rest) => match home_dir() {
            Some(home) => home.join(rest),
            None => path,
        },
        None if path.as_str() == "~" => home_dir().unwrap_or(path),
        None => path,
    }
}
