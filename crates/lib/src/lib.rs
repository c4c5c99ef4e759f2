//! # skillpath: curriculum video ingestion
//!
//! This crate provides the core pipeline for building video curricula for the
//! life-skills learning platform. For every configured course level it searches
//! an external video source, pushes each candidate through a staged quality
//! filter, classifies difficulty, deduplicates on the canonical video URL, and
//! persists accepted videos in curriculum order.
//!
//! The external source itself lives behind the [`source::VideoSource`] trait so
//! that adapter crates (and test mocks) can be plugged in without touching the
//! pipeline.

pub mod catalog;
pub mod classify;
pub mod constants;
pub mod filter;
pub mod pipeline;
pub mod source;
pub mod store;
pub mod types;

pub use catalog::{Catalog, CatalogError, Course, CurriculumLevel};
pub use classify::{DifficultyClassifier, LevelIndexClassifier, TitleKeywordClassifier};
pub use filter::{FilterConfig, RejectReason, Verdict};
pub use pipeline::{CurriculumIngestor, PipelineConfig, PipelineError};
pub use source::VideoSource;
pub use store::{StoreError, VideoStore};
pub use types::{CandidateVideo, DifficultyTier, NewVideo, RunStats, VideoRecord};
