//! Integration tests for the PostgreSQL review store
//!
//! These run against an externally provided database: set `DATABASE_URL`
//! (a `.env` file works) to enable them. Without it every test skips, so
//! the suite stays green on machines without a server.
//!
//! Each test works with its own owner entity type, keeping tests
//! independent on a shared database.

use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::json;

use review_core::{
    FieldReview, NewReview, OwnerFilter, OwnerRef, OwnerReviews, ReviewError, ReviewQuery,
    ReviewsConfig, ReviewStore, ReviewUpdate, Status,
};
use review_store::{create_pool, run_migrations, DatabaseConfig, DatabasePool, PostgresReviewStore};

async fn test_pool() -> Option<DatabasePool> {
    dotenvy::dotenv().ok();
    let url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("DATABASE_URL not set; skipping database test");
            return None;
        }
    };
    let pool = create_pool(DatabaseConfig::new(url).max_connections(5))
        .await
        .expect("failed to connect to test database");
    run_migrations(&pool).await.expect("failed to run migrations");
    Some(pool)
}

async fn test_store() -> Option<PostgresReviewStore> {
    Some(PostgresReviewStore::new(test_pool().await?))
}

/// A fresh entity type tag per call, so tests never see each other's rows
fn unique_type(prefix: &str) -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let n = COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("{prefix}_{}_{n}", std::process::id())
}

fn new_review(status: Status) -> NewReview {
    NewReview {
        status: Some(status),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_create_and_reload_round_trip() {
    let Some(store) = test_store().await else { return };
    let owner = OwnerRef::new(unique_type("documents"), 1);
    let metadata = json!({"source": "import", "attempt": 2});

    let created = store
        .create_review(
            &owner,
            FieldReview::new("email")
                .old_value(json!({"host": "old.example.com"}))
                .new_value("new@example.com")
                .status(Status::Submitted)
                .metadata(metadata.clone())
                .into_new_review(),
        )
        .await
        .unwrap();

    let reloaded = store.get_review(created.id).await.unwrap();
    assert_eq!(reloaded.status, Status::Submitted);
    assert_eq!(reloaded.field_key.as_deref(), Some("email"));
    assert_eq!(reloaded.metadata, Some(metadata));
    assert_eq!(reloaded.owner, owner);

    // The structured old value decodes back to the original map
    let decoded: serde_json::Value =
        serde_json::from_str(reloaded.field_old_value.as_deref().unwrap()).unwrap();
    assert_eq!(decoded, json!({"host": "old.example.com"}));
    assert_eq!(reloaded.field_new_value.as_deref(), Some("new@example.com"));
}

#[tokio::test]
async fn test_create_applies_configured_default_status() {
    let Some(pool) = test_pool().await else { return };
    let config = ReviewsConfig {
        default_status: Status::Submitted,
        ..Default::default()
    };
    let store = PostgresReviewStore::with_config(pool, config);
    let owner = OwnerRef::new(unique_type("documents"), 1);

    let created = store.create_review(&owner, NewReview::default()).await.unwrap();
    assert_eq!(created.status, Status::Submitted);
}

#[tokio::test]
async fn test_create_rejects_unresolvable_owner() {
    let Some(store) = test_store().await else { return };
    let err = store
        .create_review(&OwnerRef::new("", 1), NewReview::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ReviewError::Validation(_)));
}

#[tokio::test]
async fn test_search_filters_by_status_and_field() {
    let Some(store) = test_store().await else { return };
    let owner = OwnerRef::new(unique_type("documents"), 1);
    let reviews = OwnerReviews::new(&store, owner);

    reviews
        .create_field_review(FieldReview::new("email").status(Status::Pending))
        .await
        .unwrap();
    reviews
        .create_field_review(FieldReview::new("email").status(Status::Approved))
        .await
        .unwrap();
    reviews
        .create_field_review(FieldReview::new("name").status(Status::Pending))
        .await
        .unwrap();

    assert_eq!(reviews.all().await.unwrap().len(), 3);
    assert_eq!(reviews.pending().await.unwrap().len(), 2);
    assert_eq!(reviews.for_field("email").await.unwrap().len(), 2);
    assert_eq!(reviews.pending_for_field("email").await.unwrap().len(), 1);
    assert!(reviews.has_pending().await.unwrap());
    assert!(!reviews.has_rejected().await.unwrap());
}

#[tokio::test]
async fn test_latest_review_ties_break_to_highest_id() {
    let Some(pool) = test_pool().await else { return };
    let store = PostgresReviewStore::new(pool.clone());
    let owner = OwnerRef::new(unique_type("documents"), 1);

    let first = store.create_review(&owner, NewReview::default()).await.unwrap();
    let second = store.create_review(&owner, NewReview::default()).await.unwrap();

    // Force identical creation times to exercise the secondary sort key
    sqlx::query("UPDATE form_reviews SET created_at = $1 WHERE id = $2 OR id = $3")
        .bind(chrono::Utc::now())
        .bind(first.id)
        .bind(second.id)
        .execute(&pool)
        .await
        .unwrap();

    let latest = store.latest_review(&owner).await.unwrap().unwrap();
    assert_eq!(latest.id, second.id.max(first.id));
}

#[tokio::test]
async fn test_all_approved_end_to_end() {
    let Some(store) = test_store().await else { return };
    let owner = OwnerRef::new(unique_type("documents"), 1);
    let reviews = OwnerReviews::new(&store, owner);

    // Vacuous case first: zero reviews is not all-approved
    assert!(!reviews.all_approved().await.unwrap());

    reviews.create(new_review(Status::Approved)).await.unwrap();
    reviews.create(new_review(Status::Approved)).await.unwrap();
    assert!(reviews.all_approved().await.unwrap());

    reviews.create(new_review(Status::Pending)).await.unwrap();
    assert!(!reviews.all_approved().await.unwrap());
}

#[tokio::test]
async fn test_stats_counts_per_status_plus_total() {
    let Some(store) = test_store().await else { return };
    let owner = OwnerRef::new(unique_type("documents"), 1);
    let reviews = OwnerReviews::new(&store, owner);

    for status in [Status::Pending, Status::Pending, Status::Approved] {
        reviews.create(new_review(status)).await.unwrap();
    }

    let stats = reviews.stats().await.unwrap();
    assert_eq!(stats.pending, 2);
    assert_eq!(stats.submitted, 0);
    assert_eq!(stats.approved, 1);
    assert_eq!(stats.rejected, 0);
    assert_eq!(stats.total, 3);
}

#[tokio::test]
async fn test_update_records_a_decision() {
    let Some(store) = test_store().await else { return };
    let owner = OwnerRef::new(unique_type("documents"), 1);

    let created = store.create_review(&owner, NewReview::default()).await.unwrap();
    let updated = store
        .update_review(
            created.id,
            ReviewUpdate::decision(Status::Rejected, 7, Some("missing evidence".to_string())),
        )
        .await
        .unwrap();

    assert_eq!(updated.status, Status::Rejected);
    assert_eq!(updated.reviewer_id, Some(7));
    assert!(updated.reviewed_at.is_some());
    assert_eq!(updated.reviewer_notes.as_deref(), Some("missing evidence"));
    assert!(updated.updated_at >= created.updated_at);
}

#[tokio::test]
async fn test_soft_delete_hides_and_restore_reveals() {
    let Some(store) = test_store().await else { return };
    let owner = OwnerRef::new(unique_type("documents"), 1);

    let created = store.create_review(&owner, NewReview::default()).await.unwrap();
    store.delete_review(created.id).await.unwrap();

    assert!(store.get_review(created.id).await.unwrap_err().is_not_found());
    let visible = store
        .find_reviews(ReviewQuery::for_owner(owner.clone()))
        .await
        .unwrap();
    assert!(visible.is_empty());

    // Administrative access still sees the tombstoned row
    let tombstoned = store
        .find_reviews(ReviewQuery::for_owner(owner.clone()).include_deleted())
        .await
        .unwrap();
    assert_eq!(tombstoned.len(), 1);
    assert!(tombstoned[0].is_deleted());

    store.restore_review(created.id).await.unwrap();
    assert!(store.get_review(created.id).await.is_ok());

    // Deleting a missing id is a NotFound, not a silent no-op
    assert!(store.delete_review(i64::MAX).await.unwrap_err().is_not_found());
}

async fn seed_owner_review(
    store: &PostgresReviewStore,
    entity_type: &str,
    owner_id: i64,
    status: Status,
    reviewer_id: Option<i64>,
    field: &str,
) {
    let owner = OwnerRef::new(entity_type, owner_id);
    let review = NewReview {
        status: Some(status),
        reviewer_id,
        field_key: Some(field.to_string()),
        ..Default::default()
    };
    store.create_review(&owner, review).await.unwrap();
}

#[tokio::test]
async fn test_owner_scopes() {
    let Some(store) = test_store().await else { return };
    let entity_type = unique_type("documents");

    seed_owner_review(&store, &entity_type, 1, Status::Approved, Some(7), "email").await;
    seed_owner_review(&store, &entity_type, 1, Status::Approved, None, "name").await;
    seed_owner_review(&store, &entity_type, 2, Status::Approved, Some(8), "email").await;
    seed_owner_review(&store, &entity_type, 2, Status::Pending, None, "name").await;

    let has_reviews = store
        .owners_matching(OwnerFilter::has_reviews(entity_type.clone()))
        .await
        .unwrap();
    assert_eq!(has_reviews, vec![1, 2]);

    let with_pending = store
        .owners_matching(OwnerFilter::has_status(entity_type.clone(), Status::Pending))
        .await
        .unwrap();
    assert_eq!(with_pending, vec![2]);

    let all_approved = store
        .owners_matching(OwnerFilter::all_approved(entity_type.clone()))
        .await
        .unwrap();
    assert_eq!(all_approved, vec![1]);

    let reviewed_by = store
        .owners_matching(OwnerFilter::reviewed_by(entity_type.clone(), 7))
        .await
        .unwrap();
    assert_eq!(reviewed_by, vec![1]);

    let with_field = store
        .owners_matching(OwnerFilter::has_field(entity_type.clone(), "email"))
        .await
        .unwrap();
    assert_eq!(with_field, vec![1, 2]);
}

#[tokio::test]
async fn test_dynamic_scope_through_the_store() {
    let Some(store) = test_store().await else { return };
    let owner = OwnerRef::new(unique_type("documents"), 1);
    let reviews = OwnerReviews::new(&store, owner);

    reviews.create(new_review(Status::Rejected)).await.unwrap();
    reviews.create(new_review(Status::Pending)).await.unwrap();

    let rejected = reviews.scoped("scope_rejected").await.unwrap();
    assert_eq!(rejected.len(), 1);
    assert_eq!(rejected[0].status, Status::Rejected);

    let err = reviews.scoped("scope_archived").await.unwrap_err();
    assert!(err.is_unknown_method());
}
