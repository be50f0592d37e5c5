//! Student record store.
//!
//! Provides:
//! - Record schema (identity, secret, per-subject grades)
//! - Single-file JSON storage
//! - Grade aggregation
//! - Account lifecycle and grade operations

pub mod error;
pub mod grades;
pub mod schema;
pub mod storage;
pub mod store;

pub use error::{StorageError, StoreError, StoreResult};
pub use schema::{Document, NewStudent, ScoreKind, StudentRecord, SubjectGrades, normalize_subject};
pub use storage::{DocumentStorage, JsonStorage};
pub use store::{OverallAverage, RecordStore};
