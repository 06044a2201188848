use chrono::Utc;
use std::path::PathBuf;

use impact_engine::store::PostStore;
use impact_engine::{Category, Post};

fn temp_store_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("impact_store_{}_{}.json", name, std::process::id()))
}

fn make_post(id: &str, score: f64) -> Post {
    Post {
        id: id.to_string(),
        author_id: "tester".to_string(),
        image_ref: String::new(),
        caption: Some("caption".to_string()),
        tags: vec!["#tag".to_string()],
        category: Category::General,
        impact_score: score,
        created_at: Utc::now(),
        likes: 0,
        comments: 0,
        shares: 0,
    }
}

#[tokio::test]
async fn load_missing_file_starts_empty() {
    let path = temp_store_path("missing");
    let _ = std::fs::remove_file(&path);

    let store = PostStore::load(path.clone()).await.unwrap();
    assert_eq!(store.count().await, 0);
    assert!(store.list().await.is_empty());
}

#[tokio::test]
async fn add_prepends_and_persists() {
    let path = temp_store_path("prepend");
    let _ = std::fs::remove_file(&path);

    let store = PostStore::load(path.clone()).await.unwrap();
    store.add(make_post("first", 50.0)).await.unwrap();
    store.add(make_post("second", 60.0)).await.unwrap();

    let posts = store.list().await;
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].id, "second");
    assert_eq!(posts[1].id, "first");

    let reloaded = PostStore::load(path.clone()).await.unwrap();
    let posts = reloaded.list().await;
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].id, "second");

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn add_rejects_duplicate_ids() {
    let path = temp_store_path("duplicate");
    let _ = std::fs::remove_file(&path);

    let store = PostStore::load(path.clone()).await.unwrap();
    store.add(make_post("dup", 40.0)).await.unwrap();
    let err = store.add(make_post("dup", 55.0)).await.unwrap_err();

    assert!(err.contains("already exists"));
    assert_eq!(store.count().await, 1);

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn add_clamps_scores() {
    let path = temp_store_path("clamp");
    let _ = std::fs::remove_file(&path);

    let store = PostStore::load(path.clone()).await.unwrap();
    let high = store.add(make_post("high", 150.0)).await.unwrap();
    let low = store.add(make_post("low", -5.0)).await.unwrap();

    assert!((high.impact_score - 100.0).abs() < 1e-6);
    assert!((low.impact_score - 0.0).abs() < 1e-6);

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn backfill_updates_score() {
    let path = temp_store_path("backfill");
    let _ = std::fs::remove_file(&path);

    let store = PostStore::load(path.clone()).await.unwrap();
    store.add(make_post("pending", 0.0)).await.unwrap();

    let updated = store.backfill_score("pending", 88.0).await.unwrap();
    assert!((updated.impact_score - 88.0).abs() < 1e-6);

    let fetched = store.get("pending").await.unwrap();
    assert!((fetched.impact_score - 88.0).abs() < 1e-6);

    let err = store.backfill_score("unknown", 10.0).await.unwrap_err();
    assert!(err.contains("not found"));

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn backfill_clamps_and_persists() {
    let path = temp_store_path("backfill_clamp");
    let _ = std::fs::remove_file(&path);

    let store = PostStore::load(path.clone()).await.unwrap();
    store.add(make_post("pending", 0.0)).await.unwrap();

    let updated = store.backfill_score("pending", 150.0).await.unwrap();
    assert!((updated.impact_score - 100.0).abs() < 1e-6);

    let reloaded = PostStore::load(path.clone()).await.unwrap();
    let fetched = reloaded.get("pending").await.unwrap();
    assert!((fetched.impact_score - 100.0).abs() < 1e-6);

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn totals_and_top_helpers() {
    let path = temp_store_path("totals");
    let _ = std::fs::remove_file(&path);

    let store = PostStore::load(path.clone()).await.unwrap();
    store.add(make_post("strong", 90.0)).await.unwrap();
    store.add(make_post("weak", 70.0)).await.unwrap();

    assert!((store.total_impact_score().await - 160.0).abs() < 1e-6);
    assert!((store.average_impact_score().await - 80.0).abs() < 1e-6);

    let top = store.top_performing(1).await;
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].id, "strong");

    let _ = std::fs::remove_file(&path);
}
