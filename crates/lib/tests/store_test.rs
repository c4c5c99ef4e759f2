//! # Video Store Tests
//!
//! Exercises the store operations directly against an in-memory database:
//! schema creation, the dedup lookup, inserts, counts, and the order-index
//! sequence.

use skillpath::store::VideoStore;
use skillpath::types::{DifficultyTier, NewVideo};
use skillpath_test_utils::TestSetup;

fn sample_video(url: &str, course_id: i64, order_index: i64) -> NewVideo {
    NewVideo {
        course_id,
        course_category: "adulting_101".to_string(),
        level_index: 2,
        url: url.to_string(),
        title: "Basic knife skills".to_string(),
        description: "Chopping, dicing, and keeping your fingers.".to_string(),
        duration_seconds: 540,
        view_count: 12_000,
        like_count: 800,
        resolution_height: 1080,
        difficulty: DifficultyTier::Beginner,
        order_index,
    }
}

#[tokio::test]
async fn insert_then_find_by_url_roundtrips_the_record() -> anyhow::Result<()> {
    let setup = TestSetup::new().await?;
    let store = VideoStore::new(&setup.db)?;

    let url = "https://www.youtube.com/watch?v=knife01";
    let id = store.insert(&sample_video(url, 1, 0)).await?;
    assert!(id > 0);

    let record = store.find_by_url(url).await?.expect("row exists");
    assert_eq!(record.id, id);
    assert_eq!(record.course_id, 1);
    assert_eq!(record.course_category, "adulting_101");
    assert_eq!(record.level_index, 2);
    assert_eq!(record.title, "Basic knife skills");
    assert_eq!(record.duration_seconds, 540);
    assert_eq!(record.view_count, 12_000);
    assert_eq!(record.like_count, 800);
    assert_eq!(record.resolution_height, 1080);
    assert_eq!(record.difficulty, DifficultyTier::Beginner);
    assert_eq!(record.order_index, 0);

    assert!(store.find_by_url("https://www.youtube.com/watch?v=missing").await?.is_none());
    Ok(())
}

#[tokio::test]
async fn duplicate_url_violates_the_unique_constraint() -> anyhow::Result<()> {
    let setup = TestSetup::new().await?;
    let store = VideoStore::new(&setup.db)?;

    let url = "https://www.youtube.com/watch?v=dup";
    store.insert(&sample_video(url, 1, 0)).await?;
    let err = store.insert(&sample_video(url, 1, 1)).await;
    assert!(err.is_err(), "second insert with the same url must fail");
    Ok(())
}

#[tokio::test]
async fn count_filters_by_course() -> anyhow::Result<()> {
    let setup = TestSetup::new().await?;
    let store = VideoStore::new(&setup.db)?;

    store
        .insert(&sample_video("https://www.youtube.com/watch?v=a", 1, 0))
        .await?;
    store
        .insert(&sample_video("https://www.youtube.com/watch?v=b", 1, 1))
        .await?;
    store
        .insert(&sample_video("https://www.youtube.com/watch?v=c", 2, 2))
        .await?;

    assert_eq!(store.count(None).await?, 3);
    assert_eq!(store.count(Some(1)).await?, 2);
    assert_eq!(store.count(Some(2)).await?, 1);
    assert_eq!(store.count(Some(9)).await?, 0);
    Ok(())
}

#[tokio::test]
async fn order_index_sequence_continues_from_existing_rows() -> anyhow::Result<()> {
    let setup = TestSetup::new().await?;
    let store = VideoStore::new(&setup.db)?;

    assert_eq!(store.next_order_index().await?, 0);
    store
        .insert(&sample_video("https://www.youtube.com/watch?v=a", 1, 0))
        .await?;
    store
        .insert(&sample_video("https://www.youtube.com/watch?v=b", 1, 7))
        .await?;
    assert_eq!(store.next_order_index().await?, 8);
    Ok(())
}

#[tokio::test]
async fn ensure_schema_is_idempotent() -> anyhow::Result<()> {
    // TestSetup already applied the schema once.
    let setup = TestSetup::new().await?;
    let store = VideoStore::new(&setup.db)?;
    store.ensure_schema().await?;
    store.ensure_schema().await?;
    assert_eq!(store.count(None).await?, 0);
    Ok(())
}

#[tokio::test]
async fn rolled_back_batch_leaves_no_rows() -> anyhow::Result<()> {
    let setup = TestSetup::new().await?;
    let store = VideoStore::new(&setup.db)?;

    store.begin().await?;
    store
        .insert(&sample_video("https://www.youtube.com/watch?v=tx", 1, 0))
        .await?;
    store.rollback().await?;

    assert_eq!(store.count(None).await?, 0);

    store.begin().await?;
    store
        .insert(&sample_video("https://www.youtube.com/watch?v=tx", 1, 0))
        .await?;
    store.commit().await?;
    assert_eq!(store.count(None).await?, 1);
    Ok(())
}
