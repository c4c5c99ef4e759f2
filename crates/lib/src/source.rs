//! # Video Source Contract
//!
//! The pipeline never talks to an external video platform directly; it goes
//! through the [`VideoSource`] trait so that adapter crates (and the mock used
//! in tests) can be swapped in. Adapters fail soft: a broken search yields an
//! empty result set and a broken lookup yields `None`, because a single bad
//! query or removed video must never abort an ingestion run.

use crate::types::CandidateVideo;
use async_trait::async_trait;

/// A searchable external video source.
#[async_trait]
pub trait VideoSource: Send + Sync {
    /// Searches the source and returns at most `max_results` candidates in
    /// source relevance order, with partial metadata.
    ///
    /// Errors are logged inside the adapter and surface as an empty vec.
    async fn search(&self, query: &str, max_results: usize) -> Vec<CandidateVideo>;

    /// Fetches full metadata for one video.
    ///
    /// Returns `None` when the video is unavailable (removed, private,
    /// geo-blocked) or the lookup fails; the caller treats that as a skip.
    async fn fetch_details(&self, external_id: &str) -> Option<CandidateVideo>;

    /// The canonical watch URL for a video at this source. This is the unique
    /// key the deduplication gate and the persisted record use.
    fn canonical_url(&self, external_id: &str) -> String;
}
