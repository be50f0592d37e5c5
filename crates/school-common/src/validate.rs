//! Input checks applied before anything reaches the store.

use thiserror::Error;

/// Lowest accepted score.
pub const MIN_SCORE: f64 = 0.0;

/// Highest accepted score.
pub const MAX_SCORE: f64 = 20.0;

/// Rejected score input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoreError {
    #[error("not a number: {0:?}")]
    NotANumber(String),

    #[error("score {0} is outside 0-20")]
    OutOfRange(f64),
}

/// Parse a candidate score and check it lies in [0, 20].
pub fn parse_score(input: &str) -> Result<f64, ScoreError> {
    let value: f64 = input
        .trim()
        .parse()
        .map_err(|_| ScoreError::NotANumber(input.to_string()))?;

    if !(MIN_SCORE..=MAX_SCORE).contains(&value) {
        return Err(ScoreError::OutOfRange(value));
    }
    Ok(value)
}

/// Exact, case-sensitive comparison of two secrets.
///
/// Used both for the confirmation prompt at enrollment and for login.
/// Secrets are compared in plain text; nothing is hashed.
pub fn secrets_match(submitted: &str, expected: &str) -> bool {
    submitted == expected
}
