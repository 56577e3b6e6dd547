//! # Core Traits (Ports)
//!
//! Any storage plugin must implement these traits to be used by the binary.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Board, BoardPage, Comment, NewComment, NewThread, Thread};

/// Data persistence contract for boards, threads, and comments.
///
/// Board names are matched case-insensitively everywhere they appear as an
/// argument. Write operations are atomic per board: no caller observes a
/// half-appended or half-evicted listing, and allocated ids never repeat.
#[async_trait]
pub trait BoardRepo: Send + Sync {
    // Board Operations
    /// Case-insensitive lookup; `AppError::NotFound` on miss.
    async fn find_board(&self, name: &str) -> Result<Board>;
    /// All boards in their fixed display order.
    async fn list_boards(&self) -> Result<Vec<Board>>;

    // Thread Operations
    /// Validates, allocates id + timestamp, appends, then applies retention.
    async fn create_thread(&self, board: &str, submission: NewThread) -> Result<Thread>;
    /// One page of the board's listing, threads in creation order.
    async fn list_threads(&self, board: &str, page: usize) -> Result<BoardPage>;
    /// The thread with its comments in creation order.
    async fn get_thread(&self, board: &str, id: i64) -> Result<Thread>;

    // Comment Operations
    /// Validates and appends to an existing thread. Comments have no cap.
    async fn create_comment(&self, board: &str, thread: i64, submission: NewComment)
        -> Result<Comment>;
}
