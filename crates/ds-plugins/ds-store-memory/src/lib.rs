//! # ds-store-memory
//!
//! Process-lifetime implementation of `BoardRepo`. Each board's thread
//! listing sits behind its own mutex, so appends and evictions on one board
//! never block reads or writes on another. A single atomic counter hands out
//! thread and comment ids.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;

use ds_core::error::{AppError, Result};
use ds_core::models::{Board, BoardPage, Comment, NewComment, NewThread, Thread};
use ds_core::traits::BoardRepo;
use ds_core::{paging, retention};

pub struct MemoryBoardStore {
    /// Seed order is display order
    boards: Vec<Board>,
    /// Keyed by lowercased board name
    threads: HashMap<String, Mutex<Vec<Thread>>>,
    next_id: AtomicI64,
}

impl MemoryBoardStore {
    /// Builds the store from the seeded board list. The set is fixed for the
    /// lifetime of the store; duplicate names (case-insensitive) are rejected.
    pub fn new(seed: Vec<Board>) -> anyhow::Result<Self> {
        let mut threads = HashMap::with_capacity(seed.len());
        for board in &seed {
            let key = board.name.to_ascii_lowercase();
            if threads.insert(key, Mutex::new(Vec::new())).is_some() {
                anyhow::bail!("duplicate board name in seed: {}", board.name);
            }
        }
        Ok(Self {
            boards: seed,
            threads,
            next_id: AtomicI64::new(0),
        })
    }

    fn allocate_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn board_threads(&self, name: &str) -> Result<MutexGuard<'_, Vec<Thread>>> {
        let guard = self
            .threads
            .get(&name.to_ascii_lowercase())
            .ok_or_else(|| AppError::board_not_found(name))?
            .lock()
            // A poisoned lock means a panic mid-write; the listing itself is
            // still a valid Vec, so keep serving it.
            .unwrap_or_else(PoisonError::into_inner);
        Ok(guard)
    }
}

#[async_trait]
impl BoardRepo for MemoryBoardStore {
    async fn find_board(&self, name: &str) -> Result<Board> {
        self.boards
            .iter()
            .find(|b| b.name.eq_ignore_ascii_case(name))
            .cloned()
            .ok_or_else(|| AppError::board_not_found(name))
    }

    async fn list_boards(&self) -> Result<Vec<Board>> {
        Ok(self.boards.clone())
    }

    async fn create_thread(&self, board: &str, submission: NewThread) -> Result<Thread> {
        let (title, text) = submission.validated()?;
        let thread = Thread {
            id: self.allocate_id(),
            title,
            text,
            created_at: Utc::now(),
            comments: Vec::new(),
        };

        let mut threads = self.board_threads(board)?;
        threads.push(thread.clone());
        if retention::over_capacity(threads.len()) {
            // The just-appended thread sits at the end and is exempt; a
            // thread never evicts itself at birth.
            let established = threads.len() - 1;
            if let Some(idx) = retention::eviction_candidate(&threads[..established]) {
                threads.remove(idx);
            }
        }
        Ok(thread)
    }

    async fn list_threads(&self, board: &str, page: usize) -> Result<BoardPage> {
        let threads = self.board_threads(board)?;
        let visible = paging::page_slice(&threads, page)
            .iter()
            .map(Thread::summary)
            .collect();
        Ok(BoardPage {
            threads: visible,
            page: page.max(1),
        })
    }

    async fn get_thread(&self, board: &str, id: i64) -> Result<Thread> {
        let threads = self.board_threads(board)?;
        threads
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| AppError::thread_not_found(id))
    }

    async fn create_comment(
        &self,
        board: &str,
        thread: i64,
        submission: NewComment,
    ) -> Result<Comment> {
        let text = submission.validated()?;
        let comment = Comment {
            id: self.allocate_id(),
            text,
            created_at: Utc::now(),
        };

        let mut threads = self.board_threads(board)?;
        let target = threads
            .iter_mut()
            .find(|t| t.id == thread)
            .ok_or_else(|| AppError::thread_not_found(thread))?;
        target.comments.push(comment.clone());
        Ok(comment)
    }
}
