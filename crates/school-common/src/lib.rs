//! Common utilities for callers of the student record store.
//!
//! This crate provides what the store expects from the layer above it:
//! - Score input validation
//! - Secret confirmation
//! - Student id generation
//! - Logging setup

pub mod id;
pub mod logging;
pub mod validate;

pub use id::new_student_id;
pub use logging::{init_logging, is_debug_enabled};
pub use validate::{MAX_SCORE, MIN_SCORE, ScoreError, parse_score, secrets_match};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::id::new_student_id;
    pub use crate::logging::init_logging;
    pub use crate::validate::{ScoreError, parse_score, secrets_match};
    pub use anyhow::{Context, Result};
}
