//! Error handling for guidesmith.
//!
//! A single [`GuideError`] enum covers both the import core (the three
//! parse-stage kinds: malformed input, structural, validation) and the
//! surrounding binary (IO, database, config). Parse-stage errors never
//! escape the import boundary raw; the reporter folds them into an
//! `ImportResult` with `success = false`.

use std::io;

use thiserror::Error;

/// Main error type for guidesmith operations.
#[derive(Error, Debug)]
pub enum GuideError {
    /// Input text could not be interpreted at all: missing required CSV
    /// columns, empty input, undecidable format.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// Input was readable but its structure is inconsistent: an orphan step
    /// heading, an unterminated quoted CSV field.
    #[error("structural error: {0}")]
    StructuralError(String),

    /// A record failed a field-level rule, e.g. a title that is empty after
    /// trimming.
    #[error("validation error: {0}")]
    ValidationError(String),

    #[error("import input is {size} bytes, over the {limit} byte limit")]
    InputTooLarge { size: usize, limit: usize },

    #[error("guide not found: {0}")]
    GuideNotFound(i64),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),
}

impl GuideError {
    /// Whether this error belongs to the parse stage and should be reported
    /// through the `{success: false, message}` envelope rather than thrown
    /// past the import boundary.
    #[must_use]
    pub fn is_parse_failure(&self) -> bool {
        matches!(
            self,
            Self::MalformedInput(_) | Self::StructuralError(_) | Self::ValidationError(_)
        )
    }
}

/// Convenience result type for guidesmith operations.
pub type Result<T> = std::result::Result<T, GuideError>;
