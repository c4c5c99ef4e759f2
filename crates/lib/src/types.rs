//! # Core Data Types
//!
//! Shared data structures for the ingestion pipeline: the ephemeral candidate
//! shape produced by source adapters, the persisted video shape owned by the
//! store, the difficulty tiers, and the per-run statistics.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A video returned by a source search, not yet validated.
///
/// Search results carry partial metadata only (typically title and identifier);
/// `fetch_details` fills in duration, counts, resolution, and the upload date.
/// Missing numeric fields default to zero and are handled by the quality
/// filter; a missing `external_id` makes the candidate unusable and the
/// pipeline discards it before filtering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateVideo {
    pub external_id: Option<String>,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub duration_seconds: u32,
    pub upload_date: Option<NaiveDate>,
    pub view_count: u64,
    pub like_count: u64,
    pub resolution_height: u32,
}

/// Difficulty tier attached to every validated video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyTier {
    Beginner,
    Intermediate,
    Advanced,
}

impl DifficultyTier {
    /// The lowercase form stored in the `difficulty` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyTier::Beginner => "beginner",
            DifficultyTier::Intermediate => "intermediate",
            DifficultyTier::Advanced => "advanced",
        }
    }
}

impl fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DifficultyTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(DifficultyTier::Beginner),
            "intermediate" => Ok(DifficultyTier::Intermediate),
            "advanced" => Ok(DifficultyTier::Advanced),
            other => Err(format!("unknown difficulty tier: {other}")),
        }
    }
}

/// A fully validated video ready to be persisted.
///
/// Built by the pipeline only after a candidate has passed every filter stage
/// and been classified; there is no partially-validated persisted state.
#[derive(Debug, Clone)]
pub struct NewVideo {
    pub course_id: i64,
    pub course_category: String,
    pub level_index: u32,
    pub url: String,
    pub title: String,
    pub description: String,
    pub duration_seconds: u32,
    pub view_count: u64,
    pub like_count: u64,
    pub resolution_height: u32,
    pub difficulty: DifficultyTier,
    pub order_index: i64,
}

/// A persisted video row, including the surrogate key assigned at insert.
#[derive(Debug, Clone)]
pub struct VideoRecord {
    pub id: i64,
    pub course_id: i64,
    pub course_category: String,
    pub level_index: u32,
    pub url: String,
    pub title: String,
    pub description: String,
    pub duration_seconds: u32,
    pub view_count: u64,
    pub like_count: u64,
    pub resolution_height: u32,
    pub difficulty: DifficultyTier,
    pub order_index: i64,
}

/// Counters aggregated over one full ingestion run.
///
/// Not persisted; reported to the operator at run end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Total candidates returned by source searches.
    pub searched: usize,
    /// Candidates accepted and persisted.
    pub added: usize,
    /// Candidates rejected by the quality filter.
    pub rejected: usize,
    /// Candidates skipped because their URL was already persisted.
    pub duplicates: usize,
    /// Levels whose batch failed to persist (non-strict mode only).
    pub failed_levels: usize,
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "searched: {}, added: {}, rejected: {}, duplicates: {}, failed levels: {}",
            self.searched, self.added, self.rejected, self.duplicates, self.failed_levels
        )
    }
}
