//! # Test Utilities
//!
//! Shared helpers for `skillpath` tests: an isolated in-memory database with
//! the schema applied, a programmable mock video source, and a candidate
//! builder with defaults that pass the bulk filter policy.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use skillpath::source::VideoSource;
use skillpath::store::CREATE_VIDEOS_TABLE_SQL;
use skillpath::types::CandidateVideo;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use turso::Database;

// --- Test Setup ---

/// A helper struct to manage database creation for each test.
pub struct TestSetup {
    pub db: Database,
}

impl TestSetup {
    /// Creates a new, isolated in-memory database and initializes the schema.
    pub async fn new() -> Result<Self> {
        let db = turso::Builder::new_local(":memory:").build().await?;
        let conn = db.connect()?;
        conn.execute(CREATE_VIDEOS_TABLE_SQL, ()).await?;
        Ok(Self { db })
    }
}

// --- Candidate Builder ---

/// Builds a full-metadata candidate that passes every stage of the bulk
/// filter policy. Tests tweak individual fields to trigger rejections.
pub fn passing_candidate(id: &str, title: &str) -> CandidateVideo {
    CandidateVideo {
        external_id: Some(id.to_string()),
        title: title.to_string(),
        description: format!("A practical walkthrough of {title}."),
        tags: vec!["education".to_string()],
        duration_seconds: 600,
        upload_date: Some(Utc::now().date_naive() - Duration::days(60)),
        view_count: 1000,
        like_count: 50,
        resolution_height: 1080,
    }
}

// --- Mock Video Source ---

/// A programmable [`VideoSource`] for pipeline tests.
///
/// Search results are keyed by query; details are keyed by external id. Both
/// maps are behind mutexes so tests can keep programming the mock after it
/// has been handed to the ingestor.
#[derive(Clone, Default)]
pub struct MockVideoSource {
    searches: Arc<Mutex<HashMap<String, Vec<CandidateVideo>>>>,
    details: Arc<Mutex<HashMap<String, CandidateVideo>>>,
    fetch_calls: Arc<Mutex<Vec<String>>>,
}

impl MockVideoSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Programs the result list for a search query.
    pub fn add_search_results(&self, query: &str, results: Vec<CandidateVideo>) {
        self.searches
            .lock()
            .unwrap()
            .insert(query.to_string(), results);
    }

    /// Programs the full-metadata lookup for an external id.
    pub fn add_details(&self, id: &str, details: CandidateVideo) {
        self.details.lock().unwrap().insert(id.to_string(), details);
    }

    /// Programs a candidate for both search and detail lookup at once.
    pub fn add_video(&self, query: &str, candidate: CandidateVideo) {
        if let Some(id) = candidate.external_id.as_deref() {
            self.add_details(id, candidate.clone());
        }
        let mut searches = self.searches.lock().unwrap();
        searches.entry(query.to_string()).or_default().push(candidate);
    }

    /// The external ids that `fetch_details` was called with, in order.
    pub fn fetch_calls(&self) -> Vec<String> {
        self.fetch_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl VideoSource for MockVideoSource {
    async fn search(&self, query: &str, max_results: usize) -> Vec<CandidateVideo> {
        let searches = self.searches.lock().unwrap();
        searches
            .get(query)
            .map(|results| results.iter().take(max_results).cloned().collect())
            .unwrap_or_default()
    }

    async fn fetch_details(&self, external_id: &str) -> Option<CandidateVideo> {
        self.fetch_calls
            .lock()
            .unwrap()
            .push(external_id.to_string());
        self.details.lock().unwrap().get(external_id).cloned()
    }

    fn canonical_url(&self, external_id: &str) -> String {
        format!("https://videos.test/watch?v={external_id}")
    }
}
