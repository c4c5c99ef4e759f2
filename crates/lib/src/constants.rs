//! # Shared Constants
//!
//! This module provides a centralized location for constants shared across the
//! `skillpath` workspace, so the ingestion pipeline, the CLI, and the tests
//! agree on the same values.

/// The default path for the curriculum SQLite database.
pub const DEFAULT_DB_FILE: &str = "db/skillpath.db";

/// Maximum number of characters of a video description that is persisted.
pub const MAX_DESCRIPTION_CHARS: usize = 500;

/// How many search results are requested from the source per level query.
pub const RESULTS_PER_QUERY: usize = 10;

/// How many accepted videos a single curriculum level may receive per run.
pub const VIDEOS_PER_LEVEL: usize = 3;
