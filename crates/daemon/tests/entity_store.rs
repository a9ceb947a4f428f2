//! Integration tests for the entity store
//!
//! Exercises the store through the public API against both the in-memory
//! database and a file-backed database with a multi-connection pool.

use std::collections::HashSet;

use tempfile::TempDir;

use common::prelude::{Secret, SecretKind};
use duolink_daemon::{Database, Entity, EntityError};

/// Create an in-memory test database
async fn setup_test_db() -> Database {
    let db_url = url::Url::parse("sqlite::memory:").unwrap();
    Database::connect(&db_url).await.unwrap()
}

/// Create a file-backed test database; keep the TempDir alive for the test's duration
async fn setup_file_db() -> (Database, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("db.sqlite");
    let db_url = url::Url::parse(&format!("sqlite://{}", path.display())).unwrap();
    (Database::connect(&db_url).await.unwrap(), temp_dir)
}

#[tokio::test]
async fn test_created_secrets_are_distinct() {
    let db = setup_test_db().await;

    let mut public = HashSet::new();
    let mut private = HashSet::new();
    for _ in 0..200 {
        let entity = Entity::create(None, &db).await.unwrap();
        assert!(public.insert(entity.public_secret.as_str().to_string()));
        assert!(private.insert(entity.private_secret.as_str().to_string()));
    }

    assert!(public.is_disjoint(&private));
}

#[tokio::test]
async fn test_read_returns_last_write() {
    let db = setup_test_db().await;
    let entity = Entity::create(None, &db).await.unwrap();

    let content = Entity::get_for_read(entity.id, &entity.public_secret, &db)
        .await
        .unwrap();
    assert_eq!(content.text, "");

    Entity::replace_text(entity.id, &entity.private_secret, "first", &db)
        .await
        .unwrap();
    Entity::replace_text(entity.id, &entity.private_secret, "second", &db)
        .await
        .unwrap();

    let content = Entity::get_for_read(entity.id, &entity.public_secret, &db)
        .await
        .unwrap();
    assert_eq!(content.text, "second");
}

#[tokio::test]
async fn test_read_rejects_other_secrets() {
    let db = setup_test_db().await;
    let entity = Entity::create(Some("hidden"), &db).await.unwrap();

    let guesses = [
        Secret::from(entity.private_secret.as_str()),
        Secret::generate(SecretKind::Public),
        Secret::from(""),
        Secret::from(&entity.public_secret.as_str()[..8]),
    ];
    for guess in guesses {
        assert!(matches!(
            Entity::get_for_read(entity.id, &guess, &db).await,
            Err(EntityError::NotFound)
        ));
    }
}

#[tokio::test]
async fn test_write_with_public_secret_changes_nothing() {
    let db = setup_test_db().await;
    let entity = Entity::create(Some("original"), &db).await.unwrap();
    let public = &entity.public_secret;

    assert!(matches!(
        Entity::replace_text(entity.id, public, "clobbered", &db).await,
        Err(EntityError::NotFound)
    ));
    assert!(matches!(
        Entity::append_text(entity.id, public, " more", &db).await,
        Err(EntityError::NotFound)
    ));
    assert!(matches!(
        Entity::set_content_type(entity.id, public, "text/plain", &db).await,
        Err(EntityError::NotFound)
    ));

    let content = Entity::get_for_read(entity.id, public, &db).await.unwrap();
    assert_eq!(content.text, "original");
    assert_eq!(content.content_type, "text/html");
}

#[tokio::test]
async fn test_writes_to_unknown_id_are_not_found() {
    let db = setup_test_db().await;
    let entity = Entity::create(None, &db).await.unwrap();

    assert!(matches!(
        Entity::replace_text(entity.id + 1, &entity.private_secret, "x", &db).await,
        Err(EntityError::NotFound)
    ));
}

#[tokio::test]
async fn test_append_in_sequence() {
    let db = setup_test_db().await;
    let entity = Entity::create(None, &db).await.unwrap();

    Entity::append_text(entity.id, &entity.private_secret, "a", &db)
        .await
        .unwrap();
    Entity::append_text(entity.id, &entity.private_secret, "b", &db)
        .await
        .unwrap();

    let content = Entity::get_for_read(entity.id, &entity.public_secret, &db)
        .await
        .unwrap();
    assert!(content.text.ends_with("ab"));
    assert_eq!(content.text, "ab");
}

#[tokio::test]
async fn test_append_is_not_idempotent() {
    let db = setup_test_db().await;
    let entity = Entity::create(Some("x"), &db).await.unwrap();

    for _ in 0..2 {
        Entity::append_text(entity.id, &entity.private_secret, "y", &db)
            .await
            .unwrap();
    }

    let content = Entity::get_for_read(entity.id, &entity.public_secret, &db)
        .await
        .unwrap();
    assert_eq!(content.text, "xyy");
}

async fn assert_concurrent_appends_survive(db: Database, writers: usize) {
    let entity = Entity::create(None, &db).await.unwrap();
    let private = Secret::from(entity.private_secret.as_str());

    let handles: Vec<_> = (0..writers)
        .map(|i| {
            let db = db.clone();
            let private = private.clone();
            tokio::spawn(async move {
                let marker = format!("<{}>", i);
                Entity::append_text(entity.id, &private, &marker, &db)
                    .await
                    .unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap();
    }

    let content = Entity::get_for_read(entity.id, &entity.public_secret, &db)
        .await
        .unwrap();
    for i in 0..writers {
        let marker = format!("<{}>", i);
        assert_eq!(
            content.text.matches(&marker).count(),
            1,
            "marker {} lost or duplicated in {:?}",
            marker,
            content.text
        );
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_appends_in_memory() {
    assert_concurrent_appends_survive(setup_test_db().await, 16).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_appends_file_backed() {
    let (db, _temp_dir) = setup_file_db().await;
    assert_concurrent_appends_survive(db, 16).await;
}

#[tokio::test]
async fn test_retype_keeps_text() {
    let (db, _temp_dir) = setup_file_db().await;
    let entity = Entity::create(Some("{\"a\":1}"), &db).await.unwrap();

    Entity::set_content_type(entity.id, &entity.private_secret, "application/json", &db)
        .await
        .unwrap();

    let content = Entity::get_for_read(entity.id, &entity.public_secret, &db)
        .await
        .unwrap();
    assert_eq!(content.content_type, "application/json");
    assert_eq!(content.text, "{\"a\":1}");
}
