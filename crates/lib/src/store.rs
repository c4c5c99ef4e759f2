//! # Video Store
//!
//! Persistence for accepted curriculum videos, backed by a local SQLite
//! database through Turso. A [`VideoStore`] wraps one run-scoped connection
//! (the pipeline is handed an explicit session instead of sharing a global
//! handle) and exposes the few operations the pipeline needs: the dedup
//! lookup, the insert, counts, and the per-level batch boundaries.

use crate::types::{DifficultyTier, NewVideo, VideoRecord};
use std::str::FromStr;
use thiserror::Error;
use tracing::info;
use turso::{params, Connection, Database};

/// Errors raised by store operations. Persistence failures are the one error
/// class the pipeline treats as fatal to a level batch.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] turso::Error),
    #[error("persisted row holds an invalid difficulty value: {0}")]
    InvalidDifficulty(String),
    #[error("insert did not return the new row id")]
    MissingInsertId,
}

/// Idempotent schema for the `videos` table. The UNIQUE constraint on `url`
/// is what backs the deduplication gate.
pub const CREATE_VIDEOS_TABLE_SQL: &str = "
    CREATE TABLE IF NOT EXISTS videos (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        course_id INTEGER NOT NULL,
        course_category TEXT NOT NULL,
        level_index INTEGER NOT NULL,
        url TEXT NOT NULL UNIQUE,
        title TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        duration_seconds INTEGER NOT NULL DEFAULT 0,
        view_count INTEGER NOT NULL DEFAULT 0,
        like_count INTEGER NOT NULL DEFAULT 0,
        resolution_height INTEGER NOT NULL DEFAULT 0,
        difficulty TEXT NOT NULL,
        order_index INTEGER NOT NULL,
        created_at DATETIME DEFAULT CURRENT_TIMESTAMP
    );
";

const VIDEO_COLUMNS: &str = "id, course_id, course_category, level_index, url, title, description,
     duration_seconds, view_count, like_count, resolution_height, difficulty, order_index";

/// A run-scoped handle on the videos table.
pub struct VideoStore {
    conn: Connection,
}

impl VideoStore {
    /// Opens a session against `db` for the duration of one ingestion run.
    pub fn new(db: &Database) -> Result<Self, StoreError> {
        let conn = db.connect()?;
        Ok(Self { conn })
    }

    /// Creates the `videos` table if it does not already exist. Safe to call
    /// on every run.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        self.conn.execute(CREATE_VIDEOS_TABLE_SQL, ()).await?;
        Ok(())
    }

    /// The deduplication gate: looks a video up by its canonical URL.
    pub async fn find_by_url(&self, url: &str) -> Result<Option<VideoRecord>, StoreError> {
        let sql = format!("SELECT {VIDEO_COLUMNS} FROM videos WHERE url = ?");
        let mut rows = self.conn.query(&sql, params![url]).await?;
        match rows.next().await? {
            Some(row) => Ok(Some(Self::record_from_row(&row)?)),
            None => Ok(None),
        }
    }

    /// Inserts a validated video and returns its assigned id.
    pub async fn insert(&self, video: &NewVideo) -> Result<i64, StoreError> {
        let mut stmt = self
            .conn
            .prepare(
                "INSERT INTO videos (course_id, course_category, level_index, url, title,
                     description, duration_seconds, view_count, like_count, resolution_height,
                     difficulty, order_index)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                 RETURNING id",
            )
            .await?;
        let mut rows = stmt
            .query(params![
                video.course_id,
                video.course_category.clone(),
                video.level_index as i64,
                video.url.clone(),
                video.title.clone(),
                video.description.clone(),
                video.duration_seconds as i64,
                video.view_count as i64,
                video.like_count as i64,
                video.resolution_height as i64,
                video.difficulty.as_str(),
                video.order_index
            ])
            .await?;
        let row = rows.next().await?.ok_or(StoreError::MissingInsertId)?;
        let id: i64 = row.get(0)?;
        Ok(id)
    }

    /// Counts persisted videos, optionally restricted to one course.
    pub async fn count(&self, course_id: Option<i64>) -> Result<i64, StoreError> {
        let mut rows = match course_id {
            Some(id) => {
                self.conn
                    .query("SELECT COUNT(*) FROM videos WHERE course_id = ?", params![id])
                    .await?
            }
            None => self.conn.query("SELECT COUNT(*) FROM videos", ()).await?,
        };
        match rows.next().await? {
            Some(row) => Ok(row.get(0)?),
            None => Ok(0),
        }
    }

    /// The next free display position. Seeded from the table so that a re-run
    /// continues the sequence instead of restarting it.
    pub async fn next_order_index(&self) -> Result<i64, StoreError> {
        let mut rows = self
            .conn
            .query("SELECT COALESCE(MAX(order_index), -1) + 1 FROM videos", ())
            .await?;
        match rows.next().await? {
            Some(row) => Ok(row.get(0)?),
            None => Ok(0),
        }
    }

    /// Opens the transaction for one level batch.
    pub async fn begin(&self) -> Result<(), StoreError> {
        self.conn.execute("BEGIN TRANSACTION", ()).await?;
        Ok(())
    }

    /// Durably commits the current level batch.
    pub async fn commit(&self) -> Result<(), StoreError> {
        self.conn.execute("COMMIT", ()).await?;
        info!("Level batch committed.");
        Ok(())
    }

    /// Discards the current level batch after a persistence failure.
    pub async fn rollback(&self) -> Result<(), StoreError> {
        self.conn.execute("ROLLBACK", ()).await?;
        Ok(())
    }

    fn record_from_row(row: &turso::Row) -> Result<VideoRecord, StoreError> {
        let level_index: i64 = row.get(3)?;
        let duration_seconds: i64 = row.get(7)?;
        let view_count: i64 = row.get(8)?;
        let like_count: i64 = row.get(9)?;
        let resolution_height: i64 = row.get(10)?;
        let difficulty: String = row.get(11)?;
        let difficulty =
            DifficultyTier::from_str(&difficulty).map_err(StoreError::InvalidDifficulty)?;
        Ok(VideoRecord {
            id: row.get(0)?,
            course_id: row.get(1)?,
            course_category: row.get(2)?,
            level_index: level_index as u32,
            url: row.get(4)?,
            title: row.get(5)?,
            description: row.get(6)?,
            duration_seconds: duration_seconds as u32,
            view_count: view_count as u64,
            like_count: like_count as u64,
            resolution_height: resolution_height as u32,
            difficulty,
            order_index: row.get(12)?,
        })
    }
}
