//! # Difficulty Classification
//!
//! Two interchangeable strategies assign a [`DifficultyTier`] to a validated
//! video. The title-keyword heuristic comes from the standalone review path;
//! the level-index mapping comes from the bulk scraper, which trusts the
//! curriculum position instead of the title. They can disagree, so the
//! pipeline selects one explicitly per ingestion path rather than merging
//! them.

use crate::types::{CandidateVideo, DifficultyTier};

/// A strategy for assigning a difficulty tier to a validated video.
pub trait DifficultyClassifier: Send + Sync {
    /// Classifies `video` found at curriculum level `level_index`.
    fn classify(&self, video: &CandidateVideo, level_index: u32) -> DifficultyTier;
}

/// Default beginner markers scanned for in video titles.
pub const BEGINNER_KEYWORDS: [&str; 7] =
    ["intro", "beginner", "basics", "101", "start", "guide", "tutorial"];

/// Classifies from the title alone: any beginner keyword makes the video
/// Beginner, everything else defaults to Intermediate.
///
/// There is deliberately no automatic path to Advanced.
/// TODO: agree on an advanced keyword set ("masterclass", "expert", ...)
/// with the curriculum team before wiring one in.
pub struct TitleKeywordClassifier {
    keywords: Vec<String>,
}

impl TitleKeywordClassifier {
    pub fn new(keywords: Vec<String>) -> Self {
        Self { keywords }
    }
}

impl Default for TitleKeywordClassifier {
    fn default() -> Self {
        Self::new(BEGINNER_KEYWORDS.into_iter().map(String::from).collect())
    }
}

impl DifficultyClassifier for TitleKeywordClassifier {
    fn classify(&self, video: &CandidateVideo, _level_index: u32) -> DifficultyTier {
        let title = video.title.to_lowercase();
        for keyword in &self.keywords {
            if title.contains(&keyword.to_lowercase()) {
                return DifficultyTier::Beginner;
            }
        }
        DifficultyTier::Intermediate
    }
}

/// Classifies from the curriculum position: levels 1-2 are Beginner, 3-4 are
/// Intermediate, and 5 upwards are Advanced.
pub struct LevelIndexClassifier;

impl DifficultyClassifier for LevelIndexClassifier {
    fn classify(&self, _video: &CandidateVideo, level_index: u32) -> DifficultyTier {
        match level_index {
            0..=2 => DifficultyTier::Beginner,
            3..=4 => DifficultyTier::Intermediate,
            _ => DifficultyTier::Advanced,
        }
    }
}
