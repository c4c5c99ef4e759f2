//! # Curriculum Ingestion Pipeline
//!
//! The orchestrator of an ingestion run. For every course in catalog order and
//! every level in ascending index order it searches the video source, pipes
//! each candidate through dedup lookup, detail fetch, quality filter, and
//! difficulty classification, and persists the survivors with a monotonic
//! display order.
//!
//! Candidate-level problems (a missing identifier, an unavailable video, a
//! filter rejection, a duplicate) only ever affect that candidate. A level is
//! committed durably before the next one starts, so a crashed run keeps its
//! completed levels and can simply be re-run: the dedup gate makes re-runs
//! idempotent. Persistence failures are the one fatal class; they roll back
//! the open level batch together with its share of the run counters, and
//! either abort the run (strict mode) or are counted in `failed_levels` and
//! surfaced while the run moves on to the next level. The summary only ever
//! reports videos as added when their level committed.
//!
//! Processing is deliberately sequential: both order-index assignment and the
//! per-level acceptance cap depend on it.

use crate::catalog::{Catalog, Course, CurriculumLevel};
use crate::classify::DifficultyClassifier;
use crate::constants::{MAX_DESCRIPTION_CHARS, RESULTS_PER_QUERY, VIDEOS_PER_LEVEL};
use crate::filter::{FilterConfig, Verdict};
use crate::source::VideoSource;
use crate::store::{StoreError, VideoStore};
use crate::types::{CandidateVideo, NewVideo, RunStats};
use thiserror::Error;
use tracing::{debug, error, info};

/// Errors that abort an ingestion run.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("persistence failure: {0}")]
    Store(#[from] StoreError),
}

/// Tunables for one ingestion run.
pub struct PipelineConfig {
    /// Candidates requested from the source per level query.
    pub results_per_query: usize,
    /// Acceptance cap per level; candidates beyond it are not attempted.
    pub videos_per_level: usize,
    /// The quality-filter policy for this ingestion path.
    pub filter: FilterConfig,
    /// When set, a failed level batch aborts the whole run instead of being
    /// counted and skipped.
    pub strict: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            results_per_query: RESULTS_PER_QUERY,
            videos_per_level: VIDEOS_PER_LEVEL,
            filter: FilterConfig::bulk(),
            strict: false,
        }
    }
}

/// Assembles curricula by running the full search-filter-persist pipeline over
/// a catalog.
pub struct CurriculumIngestor<S: VideoSource> {
    source: S,
    store: VideoStore,
    catalog: Catalog,
    classifier: Box<dyn DifficultyClassifier>,
    config: PipelineConfig,
}

impl<S: VideoSource> CurriculumIngestor<S> {
    pub fn new(
        source: S,
        store: VideoStore,
        catalog: Catalog,
        classifier: Box<dyn DifficultyClassifier>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            source,
            store,
            catalog,
            classifier,
            config,
        }
    }

    /// Runs one full ingestion pass over the catalog and returns the
    /// aggregated statistics.
    pub async fn run(&self) -> Result<RunStats, PipelineError> {
        self.store.ensure_schema().await?;
        let mut stats = RunStats::default();
        let mut order_index = self.store.next_order_index().await?;

        for course in &self.catalog.courses {
            info!("Ingesting course: {}", course.title);
            for level in &course.levels {
                match self
                    .ingest_level(course, level, &mut stats, &mut order_index)
                    .await
                {
                    Ok(()) => {}
                    Err(e) if !self.config.strict => {
                        error!(
                            "Level {} of '{}' failed to persist: {e}",
                            level.level_index, course.key
                        );
                        stats.failed_levels += 1;
                    }
                    Err(e) => return Err(e),
                }
            }
        }

        info!("Ingestion finished: {stats}");
        Ok(stats)
    }

    /// Processes one curriculum level: search, then per-candidate verdicts,
    /// inside a single transaction committed at level end.
    async fn ingest_level(
        &self,
        course: &Course,
        level: &CurriculumLevel,
        stats: &mut RunStats,
        order_index: &mut i64,
    ) -> Result<(), PipelineError> {
        info!(
            level = level.level_index,
            topic = %level.topic,
            "Searching: '{}'",
            level.search_query
        );
        let candidates = self
            .source
            .search(&level.search_query, self.config.results_per_query)
            .await;
        stats.searched += candidates.len();

        // Verdict counters and order positions accrue against scratch copies;
        // a rolled-back batch must not surface in the run summary as added
        // videos, nor leave gaps in the order sequence.
        let mut level_stats = RunStats::default();
        let mut level_order = *order_index;

        self.store.begin().await?;
        match self
            .ingest_candidates(course, level, candidates, &mut level_stats, &mut level_order)
            .await
        {
            Ok(()) => {
                self.store.commit().await?;
                stats.added += level_stats.added;
                stats.rejected += level_stats.rejected;
                stats.duplicates += level_stats.duplicates;
                *order_index = level_order;
                Ok(())
            }
            Err(e) => {
                // Keep prior levels intact; only this batch is lost.
                if let Err(rollback_err) = self.store.rollback().await {
                    error!("Rollback after failed level batch also failed: {rollback_err}");
                }
                Err(e)
            }
        }
    }

    async fn ingest_candidates(
        &self,
        course: &Course,
        level: &CurriculumLevel,
        candidates: Vec<CandidateVideo>,
        stats: &mut RunStats,
        order_index: &mut i64,
    ) -> Result<(), PipelineError> {
        let mut added = 0usize;
        for candidate in candidates {
            if added >= self.config.videos_per_level {
                break;
            }

            // Without an identifier there is no URL to dedup or fetch on.
            let Some(external_id) = candidate.external_id.as_deref() else {
                debug!("Skipping candidate without an external id");
                continue;
            };
            let url = self.source.canonical_url(external_id);

            // Checked right before persistence so that the same video surfaced
            // by two queries in one run is still caught.
            if self.store.find_by_url(&url).await?.is_some() {
                debug!("Already ingested, skipping: {url}");
                stats.duplicates += 1;
                continue;
            }

            let Some(details) = self.source.fetch_details(external_id).await else {
                debug!("No details available, skipping: {url}");
                continue;
            };

            match self.config.filter.evaluate(&details) {
                Verdict::Reject(reason) => {
                    stats.rejected += 1;
                    info!("Rejected '{}': {reason}", details.title);
                    continue;
                }
                Verdict::Accept => {}
            }

            let difficulty = self.classifier.classify(&details, level.level_index);
            let video = NewVideo {
                course_id: course.course_id,
                course_category: course.key.clone(),
                level_index: level.level_index,
                url,
                title: details.title.clone(),
                description: details
                    .description
                    .chars()
                    .take(MAX_DESCRIPTION_CHARS)
                    .collect(),
                duration_seconds: details.duration_seconds,
                view_count: details.view_count,
                like_count: details.like_count,
                resolution_height: details.resolution_height,
                difficulty,
                order_index: *order_index,
            };
            self.store.insert(&video).await?;
            *order_index += 1;
            added += 1;
            stats.added += 1;
            info!("Added ({difficulty}): {}", video.title);
        }
        Ok(())
    }
}
