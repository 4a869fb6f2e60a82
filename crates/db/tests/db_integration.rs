//! Database integration tests.
//!
//! These tests require a running `PostgreSQL` instance.
//! Run with: `cargo test --test db_integration -- --ignored`
//!
//! Environment variables:
//!   `TEST_DB_HOST` (default: localhost)
//!   `TEST_DB_PORT` (default: 5433)
//!   `TEST_DB_USER` (default: `suggestbox_test`)
//!   `TEST_DB_PASSWORD` (default: `suggestbox_test`)
//!   `TEST_DB_NAME` (default: `suggestbox_test`)

#![allow(clippy::unwrap_used, clippy::expect_used)]

use chrono::Utc;
use sea_orm::Set;
use std::sync::Arc;

use suggestbox_db::entities::push_subscription::SubscriptionOwner;
use suggestbox_db::entities::suggestion::SuggestionStatus;
use suggestbox_db::entities::{admin, push_subscription, suggestion};
use suggestbox_db::repositories::{
    AdminRepository, PushSubscriptionRepository, SuggestionFilter, SuggestionRepository,
};
use suggestbox_db::test_utils::{TestDatabase, TestDbConfig};

fn admin_row(id: &str, username: &str) -> admin::ActiveModel {
    admin::ActiveModel {
        id: Set(id.to_string()),
        username: Set(username.to_string()),
        password_hash: Set("$argon2id$fake-hash".to_string()),
        created_at: Set(Utc::now().into()),
        last_login_at: Set(None),
    }
}

fn suggestion_row(id: &str, student_key: &str, title: &str) -> suggestion::ActiveModel {
    suggestion::ActiveModel {
        id: Set(id.to_string()),
        student_key: Set(student_key.to_string()),
        grade: Set(2),
        title: Set(title.to_string()),
        content: Set("체육관 개방 시간을 늘려주세요".to_string()),
        status: Set(SuggestionStatus::Pending),
        answer: Set(None),
        answered_at: Set(None),
        created_at: Set(Utc::now().into()),
        updated_at: Set(Utc::now().into()),
    }
}

fn subscription_row(id: &str, owner: &SubscriptionOwner) -> push_subscription::ActiveModel {
    let (student_key, admin_id) = owner.columns();
    push_subscription::ActiveModel {
        id: Set(id.to_string()),
        student_key: Set(student_key),
        admin_id: Set(admin_id),
        endpoint: Set(format!("https://push.example/{id}")),
        p256dh: Set("p256dh-key".to_string()),
        auth: Set("auth-secret".to_string()),
        created_at: Set(Utc::now().into()),
    }
}

#[test]
fn test_config_from_env() {
    let config = TestDbConfig::default();
    assert!(!config.host.is_empty());
    assert!(config.port > 0);
    assert!(!config.username.is_empty());
    assert!(config.database_url().starts_with("postgres://"));
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_database_connection() {
    let config = TestDbConfig::default();
    let result = TestDatabase::with_config(config).await;
    assert!(result.is_ok(), "Failed to connect: {:?}", result.err());
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn admin_lookup_by_username() {
    let db = TestDatabase::create_unique().await.expect("create test db");
    let repo = AdminRepository::new(Arc::new(db.conn.clone()));

    repo.create(admin_row("a1", "head-teacher")).await.unwrap();

    let found = repo.find_by_username("head-teacher").await.unwrap();
    assert_eq!(found.map(|a| a.id), Some("a1".to_string()));

    let missing = repo.find_by_username("nobody").await.unwrap();
    assert!(missing.is_none());

    db.drop_database().await.unwrap();
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn suggestion_student_scoping_and_filters() {
    let db = TestDatabase::create_unique().await.expect("create test db");
    let repo = SuggestionRepository::new(Arc::new(db.conn.clone()));

    repo.create(suggestion_row("s1", "student-key-0001", "급식 건의"))
        .await
        .unwrap();
    repo.create(suggestion_row("s2", "student-key-0002", "교복 건의"))
        .await
        .unwrap();

    // Student scoping
    let mine = repo.find_by_student("student-key-0001", None).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, "s1");

    let other = repo
        .find_by_id_for_student("s2", "student-key-0001")
        .await
        .unwrap();
    assert!(other.is_none());

    // Search filter, case-insensitive substring
    let filter = SuggestionFilter {
        grade: None,
        status: Some(SuggestionStatus::Pending),
        q: Some("급식".to_string()),
    };
    let hits = repo.search(&filter).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "s1");

    db.drop_database().await.unwrap();
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn subscribe_replaces_prior_rows_per_owner() {
    let db = TestDatabase::create_unique().await.expect("create test db");
    let repo = PushSubscriptionRepository::new(Arc::new(db.conn.clone()));

    let student = SubscriptionOwner::Student("student-key-0001".to_string());

    repo.create(subscription_row("p1", &student)).await.unwrap();

    // Single-subscription-per-owner: delete everything, then insert anew
    let removed = repo.delete_by_owner(&student).await.unwrap();
    assert_eq!(removed, 1);
    repo.create(subscription_row("p2", &student)).await.unwrap();

    let remaining = repo.find_by_owner(&student).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, "p2");
    assert_eq!(remaining[0].owner(), Some(student.clone()));

    db.drop_database().await.unwrap();
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn admin_subscriptions_are_separate_from_students() {
    let db = TestDatabase::create_unique().await.expect("create test db");
    let admin_repo = AdminRepository::new(Arc::new(db.conn.clone()));
    let repo = PushSubscriptionRepository::new(Arc::new(db.conn.clone()));

    admin_repo.create(admin_row("a1", "head-teacher")).await.unwrap();

    let student = SubscriptionOwner::Student("student-key-0001".to_string());
    let admin = SubscriptionOwner::Admin("a1".to_string());

    repo.create(subscription_row("p1", &student)).await.unwrap();
    repo.create(subscription_row("p2", &admin)).await.unwrap();

    let admins = repo.find_admin_subscriptions().await.unwrap();
    assert_eq!(admins.len(), 1);
    assert_eq!(admins[0].id, "p2");

    // Removing the student's subscription leaves the admin's intact
    repo.delete_by_owner(&student).await.unwrap();
    assert_eq!(repo.find_admin_subscriptions().await.unwrap().len(), 1);

    db.drop_database().await.unwrap();
}
