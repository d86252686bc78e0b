//! Integration tests for [`storage::UserRepository`].
//!
//! Covers upsert insert/update semantics using an in-memory SQLite database.

use storage::{SqlitePoolManager, UserProfile, UserRepository};

async fn test_repo() -> UserRepository {
    let pool_manager = SqlitePoolManager::new("sqlite::memory:")
        .await
        .expect("Failed to create pool");
    UserRepository::new(pool_manager)
        .await
        .expect("Failed to create repository")
}

/// **Test: Upsert inserts a new profile.**
///
/// **Setup:** Empty in-memory DB.
/// **Action:** `upsert` a profile, then `find_by_id`.
/// **Expected:** The stored profile matches the inserted attributes.
#[tokio::test]
async fn test_upsert_inserts_profile() {
    let repo = test_repo().await;

    let profile = UserProfile::new(
        42,
        Some("alice".to_string()),
        Some("Alice".to_string()),
        None,
        Some(42),
    );
    repo.upsert(&profile).await.expect("Failed to upsert");

    let found = repo.find_by_id(42).await.expect("Failed to query").unwrap();
    assert_eq!(found.id, 42);
    assert_eq!(found.username, Some("alice".to_string()));
    assert_eq!(found.first_name, Some("Alice".to_string()));
    assert_eq!(found.last_name, None);
    assert_eq!(found.private_chat_id, Some(42));
}

/// **Test: Upsert overwrites display attributes (last write wins).**
///
/// **Setup:** Profile for id 42 already stored.
/// **Action:** `upsert` the same id with changed username and names.
/// **Expected:** Attributes reflect the second write.
#[tokio::test]
async fn test_upsert_overwrites_attributes() {
    let repo = test_repo().await;

    let first = UserProfile::new(42, Some("alice".to_string()), Some("Alice".to_string()), None, None);
    repo.upsert(&first).await.expect("Failed to upsert");

    let second = UserProfile::new(
        42,
        Some("alice_renamed".to_string()),
        Some("Alicia".to_string()),
        Some("Smith".to_string()),
        None,
    );
    repo.upsert(&second).await.expect("Failed to upsert");

    let found = repo.find_by_id(42).await.expect("Failed to query").unwrap();
    assert_eq!(found.username, Some("alice_renamed".to_string()));
    assert_eq!(found.first_name, Some("Alicia".to_string()));
    assert_eq!(found.last_name, Some("Smith".to_string()));
}

/// **Test: Upsert without a private chat id keeps the stored one.**
///
/// **Setup:** Profile stored from a private chat (private_chat_id set).
/// **Action:** `upsert` again without a private chat id (e.g. group event).
/// **Expected:** The stored private chat id survives.
#[tokio::test]
async fn test_upsert_preserves_private_chat_id() {
    let repo = test_repo().await;

    let private = UserProfile::new(7, Some("bob".to_string()), None, None, Some(7));
    repo.upsert(&private).await.expect("Failed to upsert");

    let group = UserProfile::new(7, Some("bob".to_string()), None, None, None);
    repo.upsert(&group).await.expect("Failed to upsert");

    let found = repo.find_by_id(7).await.expect("Failed to query").unwrap();
    assert_eq!(found.private_chat_id, Some(7));
}

/// **Test: find_by_id returns None for an unknown user.**
#[tokio::test]
async fn test_find_by_id_not_found() {
    let repo = test_repo().await;
    let found = repo.find_by_id(999).await.expect("Failed to query");
    assert!(found.is_none());
}
