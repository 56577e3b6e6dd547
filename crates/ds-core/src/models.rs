//! # Domain Models
//!
//! These structs represent the core entities of Diskuss. Threads and comments
//! carry integer ids that only ever increase for the lifetime of the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// A named topic channel (e.g., /abc/). The board set is fixed at startup;
/// its thread collection lives behind the [`crate::traits::BoardRepo`] port.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    /// Short identifier used in URLs, unique case-insensitively
    pub name: String,
    pub description: String,
}

/// A top-level post with its own comment collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thread {
    pub id: i64,
    pub title: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    /// Append-only; dropped wholesale when the thread is evicted
    pub comments: Vec<Comment>,
}

/// A reply attached to exactly one thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// A thread as it appears on a board page: no comment bodies, just the count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadSummary {
    pub id: i64,
    pub title: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub comment_count: usize,
}

impl Thread {
    pub fn summary(&self) -> ThreadSummary {
        ThreadSummary {
            id: self.id,
            title: self.title.clone(),
            text: self.text.clone(),
            created_at: self.created_at,
            comment_count: self.comments.len(),
        }
    }

    pub fn posted_at(&self) -> String {
        format_timestamp(self.created_at)
    }
}

impl Comment {
    pub fn posted_at(&self) -> String {
        format_timestamp(self.created_at)
    }
}

impl ThreadSummary {
    pub fn posted_at(&self) -> String {
        format_timestamp(self.created_at)
    }
}

fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}

/// One page of a board's thread listing.
#[derive(Debug, Clone)]
pub struct BoardPage {
    pub threads: Vec<ThreadSummary>,
    /// The page actually rendered (already normalized to >= 1)
    pub page: usize,
}

/// Raw "new thread" form submission. Fields are optional because HTML forms
/// may omit them entirely; validation turns absence and blankness into
/// [`AppError::InvalidSubmission`].
#[derive(Debug, Clone, Deserialize)]
pub struct NewThread {
    pub title: Option<String>,
    pub text: Option<String>,
}

/// Raw "new comment" form submission.
#[derive(Debug, Clone, Deserialize)]
pub struct NewComment {
    pub text: Option<String>,
}

impl NewThread {
    /// Checks both fields are present and non-blank, returning trimmed values.
    pub fn validated(self) -> Result<(String, String)> {
        let title = require_field(self.title, "title")?;
        let text = require_field(self.text, "text")?;
        Ok((title, text))
    }
}

impl NewComment {
    pub fn validated(self) -> Result<String> {
        require_field(self.text, "text")
    }
}

fn require_field(value: Option<String>, field: &str) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(AppError::InvalidSubmission(format!(
            "{field} must be present and non-empty"
        ))),
    }
}
