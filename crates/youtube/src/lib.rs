//! # skillpath-youtube: YouTube Source Adapter
//!
//! Implements the [`VideoSource`] trait against an Invidious-compatible REST
//! API (`/api/v1/search` and `/api/v1/videos/{id}`), so the pipeline can pull
//! YouTube candidates without scraping YouTube itself. The instance base URL
//! is configurable, which also makes the adapter testable against a mock
//! server.
//!
//! The adapter fails soft by contract: transport, status, and decode errors
//! are logged here and surface to the pipeline as an empty search result or a
//! missing detail lookup, never as a fatal error.

use async_trait::async_trait;
use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;
use skillpath::source::VideoSource;
use skillpath::types::CandidateVideo;
use tracing::{debug, warn};

/// A public Invidious instance used when no base URL is configured.
pub const DEFAULT_API_BASE: &str = "https://yewtu.be";

// --- Wire Types ---

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItem {
    /// Search endpoints return mixed entity types; only `video` is usable.
    #[serde(default, rename = "type")]
    kind: String,
    #[serde(default)]
    video_id: Option<String>,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoDetails {
    video_id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    keywords: Vec<String>,
    #[serde(default)]
    length_seconds: u32,
    #[serde(default)]
    view_count: u64,
    #[serde(default)]
    like_count: u64,
    /// Upload time as unix seconds; zero when the instance does not know it.
    #[serde(default)]
    published: i64,
    #[serde(default)]
    format_streams: Vec<FormatStream>,
    #[serde(default)]
    adaptive_formats: Vec<FormatStream>,
}

#[derive(Deserialize)]
struct FormatStream {
    #[serde(default)]
    resolution: String,
}

/// Parses the best vertical resolution out of stream labels like `"720p"` or
/// `"1080p60"`.
fn max_resolution(streams: &[&[FormatStream]]) -> u32 {
    streams
        .iter()
        .flat_map(|list| list.iter())
        .filter_map(|stream| {
            stream
                .resolution
                .split('p')
                .next()
                .and_then(|height| height.parse::<u32>().ok())
        })
        .max()
        .unwrap_or(0)
}

impl From<VideoDetails> for CandidateVideo {
    fn from(details: VideoDetails) -> Self {
        let upload_date = (details.published > 0)
            .then(|| DateTime::from_timestamp(details.published, 0))
            .flatten()
            .map(|dt| dt.date_naive());
        let resolution_height =
            max_resolution(&[&details.format_streams, &details.adaptive_formats]);
        CandidateVideo {
            external_id: Some(details.video_id),
            title: details.title,
            description: details.description,
            tags: details.keywords,
            duration_seconds: details.length_seconds,
            upload_date,
            view_count: details.view_count,
            like_count: details.like_count,
            resolution_height,
        }
    }
}

// --- Adapter ---

/// A [`VideoSource`] backed by an Invidious-compatible API instance.
pub struct YoutubeSource {
    client: Client,
    api_base: String,
}

impl YoutubeSource {
    /// Creates an adapter against `api_base` (no trailing slash).
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_base: api_base.into(),
        }
    }

    async fn try_search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<CandidateVideo>, reqwest::Error> {
        let url = format!("{}/api/v1/search", self.api_base);
        let items: Vec<SearchItem> = self
            .client
            .get(&url)
            .query(&[("q", query), ("type", "video")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        debug!("Search for '{query}' returned {} items", items.len());

        Ok(items
            .into_iter()
            .filter(|item| item.kind.is_empty() || item.kind == "video")
            .take(max_results)
            .map(|item| CandidateVideo {
                external_id: item.video_id,
                title: item.title,
                description: item.description,
                ..Default::default()
            })
            .collect())
    }

    async fn try_fetch_details(&self, external_id: &str) -> Result<CandidateVideo, reqwest::Error> {
        let url = format!("{}/api/v1/videos/{external_id}", self.api_base);
        let details: VideoDetails = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(details.into())
    }
}

impl Default for YoutubeSource {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

#[async_trait]
impl VideoSource for YoutubeSource {
    async fn search(&self, query: &str, max_results: usize) -> Vec<CandidateVideo> {
        match self.try_search(query, max_results).await {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!("Search error for '{query}': {e}");
                Vec::new()
            }
        }
    }

    async fn fetch_details(&self, external_id: &str) -> Option<CandidateVideo> {
        match self.try_fetch_details(external_id).await {
            Ok(details) => Some(details),
            Err(e) => {
                // Removed, private, and geo-blocked videos all land here.
                warn!("No details for {external_id}: {e}");
                None
            }
        }
    }

    fn canonical_url(&self, external_id: &str) -> String {
        format!("https://www.youtube.com/watch?v={external_id}")
    }
}
