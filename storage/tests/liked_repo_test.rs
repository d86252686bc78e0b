//! Integration tests for [`storage::LikedResponseRepository`].
//!
//! Covers insert-only retention, exact-match lookup, and usage-count
//! ordering using an in-memory SQLite database.

use storage::{LikedResponseRepository, SqlitePoolManager};

async fn test_repo() -> LikedResponseRepository {
    let pool_manager = SqlitePoolManager::new("sqlite::memory:")
        .await
        .expect("Failed to create pool");
    LikedResponseRepository::new(pool_manager)
        .await
        .expect("Failed to create repository")
}

/// **Test: Recorded response is found with usage count 1.**
#[tokio::test]
async fn test_record_and_find() {
    let repo = test_repo().await;

    repo.record(1, "what is rust?", "a systems language")
        .await
        .expect("Failed to record");

    let found = repo
        .find_response(1, "what is rust?")
        .await
        .expect("Failed to query")
        .unwrap();
    assert_eq!(found.response, "a systems language");
    assert_eq!(found.usage_count, 1);
    assert!(found.liked);
}

/// **Test: Lookup matches the exact question string.**
///
/// **Setup:** Record stored for "What is Rust?".
/// **Action:** Query with different case and extra whitespace.
/// **Expected:** No match; liked lookups are case- and whitespace-sensitive.
#[tokio::test]
async fn test_find_is_exact_match() {
    let repo = test_repo().await;

    repo.record(1, "What is Rust?", "a systems language")
        .await
        .expect("Failed to record");

    assert!(repo
        .find_response(1, "what is rust?")
        .await
        .expect("Failed to query")
        .is_none());
    assert!(repo
        .find_response(1, "What is Rust? ")
        .await
        .expect("Failed to query")
        .is_none());
}

/// **Test: Lookup is scoped to the user.**
#[tokio::test]
async fn test_find_is_per_user() {
    let repo = test_repo().await;

    repo.record(1, "q", "answer for user one")
        .await
        .expect("Failed to record");

    assert!(repo.find_response(2, "q").await.expect("Failed to query").is_none());
}

/// **Test: Repeated likes of the same pair create new rows.**
///
/// **Setup:** Same (question, response) recorded twice.
/// **Action:** `find_response`.
/// **Expected:** The later row wins (equal usage, newer creation).
#[tokio::test]
async fn test_record_never_deduplicates() {
    let repo = test_repo().await;

    repo.record(1, "q", "a").await.expect("Failed to record");
    repo.record(1, "q", "a").await.expect("Failed to record");

    let found = repo
        .find_response(1, "q")
        .await
        .expect("Failed to query")
        .unwrap();
    // Two rows exist; the newer one (higher id) is selected.
    assert_eq!(found.id, 2);
}

/// **Test: Higher usage count wins over recency.**
///
/// **Setup:** Two liked rows for the same question; the older one has its
/// usage counter incremented twice.
/// **Action:** `find_response`.
/// **Expected:** The older, more-used row is returned.
#[tokio::test]
async fn test_usage_count_orders_results() {
    let repo = test_repo().await;

    repo.record(1, "q", "older answer").await.expect("Failed to record");
    repo.record(1, "q", "newer answer").await.expect("Failed to record");

    let older = repo
        .find_response(1, "q")
        .await
        .expect("Failed to query")
        .unwrap();
    assert_eq!(older.response, "newer answer");

    // Bump the older row past the newer one.
    repo.increment_usage(1).await.expect("Failed to increment");
    repo.increment_usage(1).await.expect("Failed to increment");

    let found = repo
        .find_response(1, "q")
        .await
        .expect("Failed to query")
        .unwrap();
    assert_eq!(found.response, "older answer");
    assert_eq!(found.usage_count, 3);
}
