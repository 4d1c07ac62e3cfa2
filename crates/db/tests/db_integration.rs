//! Database integration tests.
//!
//! These tests require a running `PostgreSQL` instance.
//! Run with: `cargo test --test db_integration -- --ignored`
//!
//! Environment variables:
//!   `TEST_DB_HOST` (default: localhost)
//!   `TEST_DB_PORT` (default: 5433)
//!   `TEST_DB_USER` (default: `marquee_test`)
//!   `TEST_DB_PASSWORD` (default: `marquee_test`)
//!   `TEST_DB_NAME` (default: `marquee_test`)

#![allow(clippy::unwrap_used, clippy::expect_used)]

use marquee_db::test_utils::{TestDatabase, TestDbConfig};

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_database_connection() {
    let config = TestDbConfig::default();
    let result = TestDatabase::with_config(config).await;
    assert!(result.is_ok(), "Failed to connect: {:?}", result.err());
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_migrations_apply_cleanly() {
    let db = TestDatabase::create_unique().await.expect("Failed to create");
    marquee_db::migrate(db.connection())
        .await
        .expect("Migrations failed");
    db.drop_database().await.expect("Failed to drop");
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_vote_unique_index_enforced() {
    use chrono::Utc;
    use marquee_db::entities::{petition, user, vote, vote::VoteKind};
    use marquee_db::repositories::{PetitionRepository, UserRepository, VoteRepository};
    use marquee_common::AppError;
    use sea_orm::Set;
    use std::sync::Arc;

    let db = TestDatabase::create_unique().await.expect("Failed to create");
    marquee_db::migrate(db.connection())
        .await
        .expect("Migrations failed");

    // `DatabaseConnection` is not `Clone` when sea-orm's `mock` feature is
    // enabled (it is, via dev-dependencies), so open a second connection to
    // the same test database instead of cloning the pool handle.
    let conn = Arc::new(
        sea_orm::Database::connect(&db.config.database_url())
            .await
            .expect("Failed to connect"),
    );
    let users = UserRepository::new(Arc::clone(&conn));
    let petitions = PetitionRepository::new(Arc::clone(&conn));
    let votes = VoteRepository::new(Arc::clone(&conn));

    let user = users
        .create(user::ActiveModel {
            username: Set("voter".to_string()),
            username_lower: Set("voter".to_string()),
            password_hash: Set("x".to_string()),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        })
        .await
        .unwrap();

    let petition = petitions
        .create(petition::ActiveModel {
            movie_title: Set("Arrival".to_string()),
            movie_description: Set("sci-fi classic".to_string()),
            created_by: Set(user.id),
            created_at: Set(Utc::now().into()),
            is_processed: Set(false),
            ..Default::default()
        })
        .await
        .unwrap();

    let first = votes
        .create(vote::ActiveModel {
            petition_id: Set(petition.id),
            user_id: Set(user.id),
            vote_type: Set(VoteKind::Yes),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        })
        .await;
    assert!(first.is_ok());

    // The store-level unique index rejects the duplicate as a Conflict.
    let second = votes
        .create(vote::ActiveModel {
            petition_id: Set(petition.id),
            user_id: Set(user.id),
            vote_type: Set(VoteKind::No),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        })
        .await;
    assert!(matches!(second, Err(AppError::Conflict(_))));

    db.drop_database().await.expect("Failed to drop");
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_listing_excludes_sold_out_movies() {
    use chrono::Utc;
    use marquee_db::entities::movie;
    use marquee_db::repositories::MovieRepository;
    use sea_orm::Set;
    use std::sync::Arc;

    let db = TestDatabase::create_unique().await.expect("Failed to create");
    marquee_db::migrate(db.connection())
        .await
        .expect("Migrations failed");

    // See above: reconnect instead of cloning, since `mock` disables `Clone`.
    let movies = MovieRepository::new(Arc::new(
        sea_orm::Database::connect(&db.config.database_url())
            .await
            .expect("Failed to connect"),
    ));

    for (name, amount_left) in [("Dune", Some(0)), ("Arrival", Some(3)), ("Stalker", None)] {
        movies
            .create(movie::ActiveModel {
                name: Set(name.to_string()),
                price: Set(10),
                description: Set("test".to_string()),
                image: Set("movie_images/test.jpg".to_string()),
                amount_left: Set(amount_left),
                created_at: Set(Utc::now().into()),
                ..Default::default()
            })
            .await
            .unwrap();
    }

    // Zero stock hidden; positive and unlimited stock visible.
    let listed = movies.find_available(None).await.unwrap();
    let names: Vec<&str> = listed.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, ["Arrival", "Stalker"]);

    // Search filter composes with the stock filter.
    let searched = movies.find_available(Some("dun")).await.unwrap();
    assert!(searched.is_empty());

    db.drop_database().await.expect("Failed to drop");
}

#[test]
fn test_config_from_env() {
    let config = TestDbConfig::default();
    assert!(!config.host.is_empty());
    assert!(config.port > 0);
    assert!(!config.username.is_empty());
    assert!(!config.database.is_empty());
}

#[test]
fn test_database_url_format() {
    let config = TestDbConfig {
        host: "testhost".to_string(),
        port: 5432,
        username: "testuser".to_string(),
        password: "testpass".to_string(),
        database: "testdb".to_string(),
    };

    let url = config.database_url();
    assert!(url.starts_with("postgres://"));
    assert!(url.contains("testhost"));
    assert!(url.contains("5432"));
    assert!(url.contains("testdb"));
}
