//! # Quality Filter
//!
//! Staged quality checks applied to every candidate video before it may enter
//! a curriculum. The stages run in a fixed order and short-circuit on the
//! first failure, so the reported reason always names the earliest violation:
//!
//! 1. duration bounds
//! 2. recency bound (permissive when the upload date is unknown)
//! 3. negative-keyword blacklist over title, description, and tags
//! 4. resolution floor
//! 5. engagement floor (like/view ratio, with a zero-view guard)
//!
//! Thresholds are configuration, not constants: the bulk scraper and the
//! curated review path have historically run with different bounds, and each
//! ingestion path supplies its own [`FilterConfig`].

use crate::types::CandidateVideo;
use chrono::{Duration, Utc};
use thiserror::Error;

/// Why a candidate was turned away. Rendered into the rejection log line.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RejectReason {
    #[error("too short ({0}s)")]
    TooShort(u32),
    #[error("too long ({0}s)")]
    TooLong(u32),
    #[error("too old (uploaded {0})")]
    TooOld(chrono::NaiveDate),
    #[error("contains blacklisted word: {0}")]
    Blacklisted(String),
    #[error("low resolution ({0}p)")]
    LowResolution(u32),
    #[error("no views")]
    NoViews,
    #[error("low engagement (like/view ratio {0:.4})")]
    LowEngagement(f64),
}

/// Outcome of running a candidate through the filter.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Accept,
    Reject(RejectReason),
}

/// Threshold set for the quality filter.
///
/// Two presets exist because two independently tuned policies coexist in the
/// platform's history: [`FilterConfig::bulk`] for the scraper that fills
/// curricula, and [`FilterConfig::curated`] for the standalone review path.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterConfig {
    pub min_duration_secs: u32,
    pub max_duration_secs: u32,
    /// Maximum upload age. `None` disables the recency stage entirely.
    pub max_age_years: Option<i64>,
    pub blacklist: Vec<String>,
    pub min_resolution_height: u32,
    /// Minimum like/view ratio. Zero disables the ratio check while keeping
    /// the zero-view rejection.
    pub min_like_ratio: f64,
}

impl FilterConfig {
    /// The bulk-ingestion policy: tight duration bounds and a short blacklist.
    pub fn bulk() -> Self {
        Self {
            min_duration_secs: 120,
            max_duration_secs: 1200,
            max_age_years: Some(4),
            blacklist: ["prank", "reaction", "funny", "fail", "compilation"]
                .into_iter()
                .map(String::from)
                .collect(),
            min_resolution_height: 720,
            min_like_ratio: 0.0,
        }
    }

    /// The curated-review policy: wide duration bounds, the full
    /// negative-keyword set, and no recency bound (a reviewer decides whether
    /// an old video still holds up).
    pub fn curated() -> Self {
        Self {
            min_duration_secs: 60,
            max_duration_secs: 10800,
            max_age_years: None,
            blacklist: [
                "parody",
                "funny",
                "reaction",
                "prank",
                "fail",
                "compilation",
                "meme",
                "satire",
                "comedy",
                "joke",
                "gameplay",
                "stream highlight",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            min_resolution_height: 720,
            min_like_ratio: 0.0,
        }
    }

    /// Runs every stage against the candidate, stopping at the first failure.
    pub fn evaluate(&self, video: &CandidateVideo) -> Verdict {
        if video.duration_seconds < self.min_duration_secs {
            return Verdict::Reject(RejectReason::TooShort(video.duration_seconds));
        }
        if video.duration_seconds > self.max_duration_secs {
            return Verdict::Reject(RejectReason::TooLong(video.duration_seconds));
        }

        // An unknown upload date is not a rejection.
        if let (Some(max_age_years), Some(uploaded)) = (self.max_age_years, video.upload_date) {
            let cutoff = Utc::now().date_naive() - Duration::days(365 * max_age_years);
            if uploaded < cutoff {
                return Verdict::Reject(RejectReason::TooOld(uploaded));
            }
        }

        let haystack = format!(
            "{} {} {}",
            video.title,
            video.description,
            video.tags.join(" ")
        )
        .to_lowercase();
        for word in &self.blacklist {
            if haystack.contains(&word.to_lowercase()) {
                return Verdict::Reject(RejectReason::Blacklisted(word.clone()));
            }
        }

        if video.resolution_height < self.min_resolution_height {
            return Verdict::Reject(RejectReason::LowResolution(video.resolution_height));
        }

        if video.view_count == 0 {
            return Verdict::Reject(RejectReason::NoViews);
        }
        let ratio = video.like_count as f64 / video.view_count as f64;
        if ratio < self.min_like_ratio {
            return Verdict::Reject(RejectReason::LowEngagement(ratio));
        }

        Verdict::Accept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passing_candidate() -> CandidateVideo {
        CandidateVideo {
            external_id: Some("abc123".to_string()),
            title: "How to iron a shirt".to_string(),
            description: "A calm walkthrough.".to_string(),
            tags: vec!["ironing".to_string()],
            duration_seconds: 600,
            upload_date: Some(Utc::now().date_naive() - Duration::days(30)),
            view_count: 1000,
            like_count: 50,
            resolution_height: 1080,
        }
    }

    #[test]
    fn accepts_a_well_formed_candidate() {
        let config = FilterConfig::bulk();
        assert_eq!(config.evaluate(&passing_candidate()), Verdict::Accept);
    }

    #[test]
    fn rejects_out_of_bounds_duration_regardless_of_other_fields() {
        let config = FilterConfig::bulk();

        let mut short = passing_candidate();
        short.duration_seconds = 30;
        assert_eq!(
            config.evaluate(&short),
            Verdict::Reject(RejectReason::TooShort(30))
        );

        let mut long = passing_candidate();
        long.duration_seconds = 5000;
        // Even with zero views the duration reason is reported, since the
        // duration stage runs first.
        long.view_count = 0;
        assert_eq!(
            config.evaluate(&long),
            Verdict::Reject(RejectReason::TooLong(5000))
        );
    }

    #[test]
    fn the_two_presets_disagree_on_duration_bounds() {
        let mut video = passing_candidate();
        video.duration_seconds = 90;
        assert!(matches!(
            FilterConfig::bulk().evaluate(&video),
            Verdict::Reject(RejectReason::TooShort(_))
        ));
        assert_eq!(FilterConfig::curated().evaluate(&video), Verdict::Accept);
    }

    #[test]
    fn rejects_stale_uploads_but_not_unknown_dates() {
        let config = FilterConfig::bulk();

        let mut old = passing_candidate();
        old.upload_date = Some(Utc::now().date_naive() - Duration::days(365 * 6));
        assert!(matches!(
            config.evaluate(&old),
            Verdict::Reject(RejectReason::TooOld(_))
        ));

        let mut unknown = passing_candidate();
        unknown.upload_date = None;
        assert_eq!(config.evaluate(&unknown), Verdict::Accept);
    }

    #[test]
    fn curated_preset_has_no_recency_bound() {
        let mut old = passing_candidate();
        old.upload_date = Some(Utc::now().date_naive() - Duration::days(365 * 10));
        assert!(matches!(
            FilterConfig::bulk().evaluate(&old),
            Verdict::Reject(RejectReason::TooOld(_))
        ));
        assert_eq!(FilterConfig::curated().evaluate(&old), Verdict::Accept);
    }

    #[test]
    fn blacklist_match_is_case_insensitive_and_names_the_keyword() {
        let config = FilterConfig::bulk();
        let mut video = passing_candidate();
        video.title = "FUNNY Laundry Fail".to_string();
        assert_eq!(
            config.evaluate(&video),
            Verdict::Reject(RejectReason::Blacklisted("funny".to_string()))
        );
    }

    #[test]
    fn blacklist_scans_description_and_tags_too() {
        let config = FilterConfig::curated();

        let mut video = passing_candidate();
        video.description = "best-of compilation of my streams".to_string();
        assert!(matches!(
            config.evaluate(&video),
            Verdict::Reject(RejectReason::Blacklisted(_))
        ));

        let mut video = passing_candidate();
        video.tags.push("Gameplay".to_string());
        assert_eq!(
            config.evaluate(&video),
            Verdict::Reject(RejectReason::Blacklisted("gameplay".to_string()))
        );
    }

    #[test]
    fn rejects_below_resolution_floor() {
        let config = FilterConfig::bulk();
        let mut video = passing_candidate();
        video.resolution_height = 480;
        assert_eq!(
            config.evaluate(&video),
            Verdict::Reject(RejectReason::LowResolution(480))
        );
    }

    #[test]
    fn zero_views_reject_without_dividing() {
        let config = FilterConfig::bulk();
        let mut video = passing_candidate();
        video.view_count = 0;
        video.like_count = 0;
        assert_eq!(config.evaluate(&video), Verdict::Reject(RejectReason::NoViews));
    }

    #[test]
    fn ratio_floor_applies_only_when_configured() {
        let mut config = FilterConfig::bulk();
        let mut video = passing_candidate();
        video.view_count = 10_000;
        video.like_count = 1;

        // Default ratio floor of 0.0 disables the check.
        assert_eq!(config.evaluate(&video), Verdict::Accept);

        config.min_like_ratio = 0.005;
        assert!(matches!(
            config.evaluate(&video),
            Verdict::Reject(RejectReason::LowEngagement(_))
        ));
    }
}
