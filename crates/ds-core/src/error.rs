//! # AppError
//!
//! Centralized error handling for the Diskuss ecosystem.
//! Maps domain-specific failures to actionable error types.

use thiserror::Error;

/// The primary error type for all ds-core operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (e.g., Board, Thread)
    #[error("{0} not found: {1}")]
    NotFound(String, String),

    /// Submission failure (e.g., missing title, blank comment text)
    #[error("invalid submission: {0}")]
    InvalidSubmission(String),

    /// Infrastructure failure (e.g., DB down)
    #[error("internal service error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn board_not_found(name: &str) -> Self {
        AppError::NotFound("board".into(), name.into())
    }

    pub fn thread_not_found(id: i64) -> Self {
        AppError::NotFound("thread".into(), id.to_string())
    }
}

/// A specialized Result type for Diskuss logic.
pub type Result<T> = std::result::Result<T, AppError>;
