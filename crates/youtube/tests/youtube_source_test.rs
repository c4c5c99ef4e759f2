//! # YouTube Adapter Tests
//!
//! Exercises the adapter against a wiremock server standing in for an
//! Invidious-compatible API, including the soft-failure contract.

use skillpath::source::VideoSource;
use skillpath_youtube::YoutubeSource;
use std::sync::Once;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

static INIT: Once = Once::new();

/// Initializes tracing for tests.
fn setup_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt::init();
    });
}

#[tokio::test]
async fn search_decodes_video_items_and_respects_the_limit() {
    // --- 1. Arrange ---
    setup_tracing();
    let server = MockServer::start().await;
    let body = serde_json::json!([
        {"type": "video", "videoId": "v1", "title": "Laundry symbols explained", "description": "sorting"},
        {"type": "channel", "author": "Some Channel"},
        {"type": "video", "videoId": "v2", "title": "How to sort laundry"},
        {"type": "video", "videoId": "v3", "title": "Stain removal basics"}
    ]);
    Mock::given(method("GET"))
        .and(path("/api/v1/search"))
        .and(query_param("q", "laundry basics"))
        .and(query_param("type", "video"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    // --- 2. Act ---
    let source = YoutubeSource::new(server.uri());
    let results = source.search("laundry basics", 2).await;

    // --- 3. Assert ---
    // The channel item is filtered out and the limit applies afterwards.
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].external_id.as_deref(), Some("v1"));
    assert_eq!(results[0].title, "Laundry symbols explained");
    assert_eq!(results[0].description, "sorting");
    assert_eq!(results[1].external_id.as_deref(), Some("v2"));
}

#[tokio::test]
async fn search_fails_soft_on_server_errors() {
    setup_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/search"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let source = YoutubeSource::new(server.uri());
    assert!(source.search("anything", 10).await.is_empty());
}

#[tokio::test]
async fn search_fails_soft_on_malformed_bodies() {
    setup_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let source = YoutubeSource::new(server.uri());
    assert!(source.search("anything", 10).await.is_empty());
}

#[tokio::test]
async fn fetch_details_decodes_full_metadata() {
    setup_tracing();
    let server = MockServer::start().await;
    // 2021-03-01T00:00:00Z
    let body = serde_json::json!({
        "videoId": "v1",
        "title": "How to do laundry",
        "description": "A full walkthrough.",
        "keywords": ["laundry", "cleaning"],
        "lengthSeconds": 612,
        "viewCount": 150000,
        "likeCount": 4200,
        "published": 1614556800,
        "formatStreams": [{"resolution": "360p"}, {"resolution": "720p"}],
        "adaptiveFormats": [{"resolution": "1080p60"}]
    });
    Mock::given(method("GET"))
        .and(path("/api/v1/videos/v1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let source = YoutubeSource::new(server.uri());
    let details = source.fetch_details("v1").await.expect("details decoded");

    assert_eq!(details.external_id.as_deref(), Some("v1"));
    assert_eq!(details.duration_seconds, 612);
    assert_eq!(details.view_count, 150_000);
    assert_eq!(details.like_count, 4_200);
    assert_eq!(details.resolution_height, 1080);
    assert_eq!(details.tags, ["laundry", "cleaning"]);
    assert_eq!(
        details.upload_date.map(|d| d.to_string()),
        Some("2021-03-01".to_string())
    );
}

#[tokio::test]
async fn fetch_details_returns_none_for_unavailable_videos() {
    setup_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/videos/gone"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({"error": "Video unavailable"})),
        )
        .mount(&server)
        .await;

    let source = YoutubeSource::new(server.uri());
    assert!(source.fetch_details("gone").await.is_none());
}

#[test]
fn canonical_url_is_the_watch_link() {
    let source = YoutubeSource::new("https://example.test");
    assert_eq!(
        source.canonical_url("abc123"),
        "https://www.youtube.com/watch?v=abc123"
    );
}
