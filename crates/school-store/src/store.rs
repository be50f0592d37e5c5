//! Record store - account lifecycle and grade operations.
//!
//! Every operation reloads the whole document from disk before acting and
//! every mutation writes the whole document back. Nothing is cached between
//! calls, so edits made by another process between two calls are seen.
//! Within one process the document lock serializes operations; across
//! processes there is no locking and a concurrent writer can lose updates.

use crate::error::{StoreError, StoreResult};
use crate::grades;
use crate::schema::{
    Document, NewStudent, ScoreKind, StudentRecord, SubjectGrades, normalize_subject,
};
use crate::storage::{DocumentStorage, JsonStorage};
use parking_lot::Mutex;

/// Outcome of an overall-average computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverallAverage {
    /// The blended average, now stored on the subject.
    Computed(f64),
    /// The subject exists but has no scores of either kind.
    NoScores,
    /// Unknown student id, or the student has no such subject.
    NotFound,
}

/// The student record store.
#[derive(Debug)]
pub struct RecordStore<S = JsonStorage> {
    /// Backing file.
    storage: S,

    /// Last loaded document. Held for the whole reload-modify-save cycle.
    document: Mutex<Document>,
}

impl<S: DocumentStorage> RecordStore<S> {
    /// Open a store over the given storage.
    pub fn new(storage: S) -> Self {
        let document = storage.load();
        Self {
            storage,
            document: Mutex::new(document),
        }
    }

    /// The backing storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Run `f` against a freshly reloaded document under the lock.
    ///
    /// Unreadable storage is treated as empty, so a mutation made here
    /// replaces whatever the storage held.
    fn with_document<T>(&self, f: impl FnOnce(&mut Document) -> T) -> T {
        let mut document = self.document.lock();
        *document = match self.storage.read() {
            Ok(loaded) => loaded,
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    location = %self.storage.location(),
                    "Store unreadable, using empty document; the next write discards its contents"
                );
                Document::new()
            }
        };
        f(&mut document)
    }

    fn persist(&self, document: &Document) -> StoreResult<()> {
        self.storage.write(document).map_err(|err| {
            tracing::warn!(error = %err, "Mutation not persisted");
            StoreError::from(err)
        })
    }

    /// Whether a record exists under `id`.
    pub fn exists(&self, id: &str) -> bool {
        self.with_document(|document| document.contains_key(id))
    }

    /// A copy of the record under `id`.
    pub fn fetch(&self, id: &str) -> Option<StudentRecord> {
        self.with_document(|document| document.get(id).cloned())
    }

    /// The record under `id` if its secret equals `secret` exactly.
    pub fn authenticate(&self, id: &str, secret: &str) -> Option<StudentRecord> {
        self.with_document(|document| {
            document
                .get(id)
                .filter(|record| record.secret_matches(secret))
                .cloned()
        })
    }

    /// Insert a new record with no grades under the caller-supplied `id`.
    ///
    /// An existing record under the same id is replaced.
    pub fn enroll(&self, student: NewStudent, id: &str) -> StoreResult<()> {
        self.with_document(|document| {
            if document.insert(id.to_string(), student.into_record()).is_some() {
                tracing::warn!(id, "Enrollment replaced an existing record");
            }
            self.persist(document)?;
            tracing::info!(id, "Enrolled student");
            Ok(())
        })
    }

    /// Append a score to a subject and refresh that kind's average.
    ///
    /// The subject is created on first use. The other kind's average and
    /// the overall average are left as they were. No range check is done
    /// here. Returns the subject's grades after the append.
    pub fn add_score(
        &self,
        id: &str,
        subject: &str,
        score: f64,
        kind: ScoreKind,
    ) -> StoreResult<SubjectGrades> {
        let subject = normalize_subject(subject);
        self.with_document(|document| {
            let record = document
                .get_mut(id)
                .ok_or_else(|| StoreError::UnknownStudent(id.to_string()))?;

            let grades = record.grades.entry(subject.clone()).or_default();
            grades.push(kind, score);
            let updated = grades.clone();

            self.persist(document)?;
            tracing::info!(id, subject = %subject, %kind, score, "Recorded score");
            Ok(updated)
        })
    }

    /// Compute and store the overall average for one subject.
    ///
    /// Only a `Computed` outcome mutates the record. `Err` means the value
    /// was computed but could not be written.
    pub fn compute_overall_average(&self, id: &str, subject: &str) -> StoreResult<OverallAverage> {
        let subject = normalize_subject(subject);
        self.with_document(|document| {
            let Some(grades) = document
                .get_mut(id)
                .and_then(|record| record.grades.get_mut(&subject))
            else {
                return Ok(OverallAverage::NotFound);
            };

            let Some(average) = grades::overall(grades.quiz_average, grades.homework_average)
            else {
                return Ok(OverallAverage::NoScores);
            };

            grades.overall_average = Some(average);
            self.persist(document)?;
            tracing::info!(id, subject = %subject, average, "Computed overall average");
            Ok(OverallAverage::Computed(average))
        })
    }

    /// Remove the record under `id`, returning it.
    pub fn unenroll(&self, id: &str) -> StoreResult<StudentRecord> {
        self.with_document(|document| {
            let record = document
                .remove(id)
                .ok_or_else(|| StoreError::UnknownStudent(id.to_string()))?;
            self.persist(document)?;
            tracing::info!(id, "Unenrolled student");
            Ok(record)
        })
    }
}
