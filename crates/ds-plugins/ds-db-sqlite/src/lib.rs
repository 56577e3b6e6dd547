//! # ds-db-sqlite
//!
//! SQLite-backed implementation of `BoardRepo`. Ids come from per-table
//! `AUTOINCREMENT` (never reused), and every write — including the
//! insert-then-evict pair — is a single transaction, so concurrent
//! submissions never observe a partially updated board.

use std::collections::HashSet;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;

use ds_core::error::{AppError, Result};
use ds_core::models::{Board, BoardPage, Comment, NewComment, NewThread, Thread, ThreadSummary};
use ds_core::paging::PAGE_SIZE;
use ds_core::retention::MAX_THREADS;
use ds_core::traits::BoardRepo;

pub struct SqliteBoardStore {
    pool: SqlitePool,
}

fn db_err(e: sqlx::Error) -> AppError {
    AppError::Internal(e.into())
}

impl SqliteBoardStore {
    /// Connects, creates the schema if needed, and upserts the seeded boards.
    /// Duplicate names (case-insensitive) in the seed are rejected; the
    /// NOCASE upsert below would otherwise merge them silently.
    pub async fn new(url: &str, seed: Vec<Board>) -> anyhow::Result<Self> {
        let mut seen = HashSet::with_capacity(seed.len());
        for board in &seed {
            if !seen.insert(board.name.to_ascii_lowercase()) {
                anyhow::bail!("duplicate board name in seed: {}", board.name);
            }
        }

        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        // One connection: SQLite serializes writers anyway, and this keeps
        // `sqlite::memory:` databases alive across pool checkouts.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS boards (
                name        TEXT PRIMARY KEY COLLATE NOCASE,
                description TEXT NOT NULL,
                ord         INTEGER NOT NULL
            )",
        )
        .execute(&pool)
        .await?;
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS threads (
                id         INTEGER PRIMARY KEY AUTOINCREMENT,
                board      TEXT NOT NULL COLLATE NOCASE REFERENCES boards(name),
                title      TEXT NOT NULL,
                text       TEXT NOT NULL,
                created_at TEXT NOT NULL
            )",
        )
        .execute(&pool)
        .await?;
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS comments (
                id         INTEGER PRIMARY KEY AUTOINCREMENT,
                thread_id  INTEGER NOT NULL REFERENCES threads(id),
                text       TEXT NOT NULL,
                created_at TEXT NOT NULL
            )",
        )
        .execute(&pool)
        .await?;

        for (ord, board) in seed.iter().enumerate() {
            sqlx::query(
                "INSERT INTO boards (name, description, ord) VALUES (?, ?, ?)
                 ON CONFLICT(name) DO UPDATE
                 SET description = excluded.description, ord = excluded.ord",
            )
            .bind(&board.name)
            .bind(&board.description)
            .bind(ord as i64)
            .execute(&pool)
            .await?;
        }

        Ok(Self { pool })
    }
}

#[async_trait]
impl BoardRepo for SqliteBoardStore {
    async fn find_board(&self, name: &str) -> Result<Board> {
        let row = sqlx::query("SELECT name, description FROM boards WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        match row {
            Some(row) => Ok(Board {
                name: row.get("name"),
                description: row.get("description"),
            }),
            None => Err(AppError::board_not_found(name)),
        }
    }

    async fn list_boards(&self) -> Result<Vec<Board>> {
        let rows = sqlx::query("SELECT name, description FROM boards ORDER BY ord ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(rows
            .into_iter()
            .map(|row| Board {
                name: row.get("name"),
                description: row.get("description"),
            })
            .collect())
    }

    /// Inserts the thread and applies retention in one transaction, so no
    /// reader ever sees the board above its cap or half-deleted.
    async fn create_thread(&self, board: &str, submission: NewThread) -> Result<Thread> {
        let (title, text) = submission.validated()?;
        let board = self.find_board(board).await?;
        let created_at = Utc::now();

        let mut tx = self.pool.begin().await.map_err(db_err)?;

        let id = sqlx::query(
            "INSERT INTO threads (board, title, text, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&board.name)
        .bind(&title)
        .bind(&text)
        .bind(created_at)
        .execute(&mut *tx)
        .await
        .map_err(db_err)?
        .last_insert_rowid();

        let count: i64 = sqlx::query("SELECT COUNT(*) AS n FROM threads WHERE board = ?")
            .bind(&board.name)
            .fetch_one(&mut *tx)
            .await
            .map_err(db_err)?
            .get("n");

        if count as usize > MAX_THREADS {
            // Fewest comments first, lowest id on ties. The thread inserted
            // above is exempt; a thread never evicts itself at birth.
            let victim: i64 = sqlx::query(
                "SELECT t.id FROM threads t
                 LEFT JOIN comments c ON c.thread_id = t.id
                 WHERE t.board = ? AND t.id <> ?
                 GROUP BY t.id
                 ORDER BY COUNT(c.id) ASC, t.id ASC
                 LIMIT 1",
            )
            .bind(&board.name)
            .bind(id)
            .fetch_one(&mut *tx)
            .await
            .map_err(db_err)?
            .get("id");

            sqlx::query("DELETE FROM comments WHERE thread_id = ?")
                .bind(victim)
                .execute(&mut *tx)
                .await
                .map_err(db_err)?;
            sqlx::query("DELETE FROM threads WHERE id = ?")
                .bind(victim)
                .execute(&mut *tx)
                .await
                .map_err(db_err)?;
            log::debug!("evicted thread {victim} from /{}/", board.name);
        }

        tx.commit().await.map_err(db_err)?;

        Ok(Thread {
            id,
            title,
            text,
            created_at,
            comments: Vec::new(),
        })
    }

    async fn list_threads(&self, board: &str, page: usize) -> Result<BoardPage> {
        let board = self.find_board(board).await?;
        let page = page.max(1);
        // Saturate rather than cast: a wrapped-negative OFFSET would make
        // SQLite serve page 1 instead of the empty far page.
        let offset =
            i64::try_from((page - 1).saturating_mul(PAGE_SIZE)).unwrap_or(i64::MAX);

        let rows = sqlx::query(
            "SELECT t.id, t.title, t.text, t.created_at, COUNT(c.id) AS comment_count
             FROM threads t
             LEFT JOIN comments c ON c.thread_id = t.id
             WHERE t.board = ?
             GROUP BY t.id
             ORDER BY t.id ASC
             LIMIT ? OFFSET ?",
        )
        .bind(&board.name)
        .bind(PAGE_SIZE as i64)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        let threads = rows
            .into_iter()
            .map(|row| ThreadSummary {
                id: row.get("id"),
                title: row.get("title"),
                text: row.get("text"),
                created_at: row.get::<DateTime<Utc>, _>("created_at"),
                comment_count: row.get::<i64, _>("comment_count") as usize,
            })
            .collect();

        Ok(BoardPage { threads, page })
    }

    async fn get_thread(&self, board: &str, id: i64) -> Result<Thread> {
        let board = self.find_board(board).await?;

        let row = sqlx::query(
            "SELECT id, title, text, created_at FROM threads WHERE id = ? AND board = ?",
        )
        .bind(id)
        .bind(&board.name)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?
        .ok_or_else(|| AppError::thread_not_found(id))?;

        let comments = sqlx::query(
            "SELECT id, text, created_at FROM comments WHERE thread_id = ? ORDER BY id ASC",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?
        .into_iter()
        .map(|row| Comment {
            id: row.get("id"),
            text: row.get("text"),
            created_at: row.get::<DateTime<Utc>, _>("created_at"),
        })
        .collect();

        Ok(Thread {
            id: row.get("id"),
            title: row.get("title"),
            text: row.get("text"),
            created_at: row.get::<DateTime<Utc>, _>("created_at"),
            comments,
        })
    }

    async fn create_comment(
        &self,
        board: &str,
        thread: i64,
        submission: NewComment,
    ) -> Result<Comment> {
        let text = submission.validated()?;
        let board = self.find_board(board).await?;
        let created_at = Utc::now();

        let mut tx = self.pool.begin().await.map_err(db_err)?;

        sqlx::query("SELECT id FROM threads WHERE id = ? AND board = ?")
            .bind(thread)
            .bind(&board.name)
            .fetch_optional(&mut *tx)
            .await
            .map_err(db_err)?
            .ok_or_else(|| AppError::thread_not_found(thread))?;

        let id = sqlx::query("INSERT INTO comments (thread_id, text, created_at) VALUES (?, ?, ?)")
            .bind(thread)
            .bind(&text)
            .bind(created_at)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?
            .last_insert_rowid();

        tx.commit().await.map_err(db_err)?;

        Ok(Comment {
            id,
            text,
            created_at,
        })
    }
}
