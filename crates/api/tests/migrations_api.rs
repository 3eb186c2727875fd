//! Integration tests for the migration endpoints.
//!
//! Exercises submission validation, run listing, and the association ledger
//! endpoints through the full router. Submissions that fail validation are
//! rejected before the remote instance is contacted, so these tests never
//! touch the network.

mod common;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::{body_json, get, post_json};
use sqlx::PgPool;

use relay_api::error::AppError;
use relay_db::models::migration::{CreateMigration, Migration};
use relay_db::repositories::{MigrationAssociationRepo, MigrationRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_org(pool: &PgPool) -> i64 {
    sqlx::query_scalar::<_, i64>("INSERT INTO orgs (uuid, name) VALUES ($1, 'Test Org') RETURNING id")
        .bind(uuid::Uuid::new_v4())
        .fetch_one(pool)
        .await
        .unwrap()
}

async fn seed_migration(pool: &PgPool, org_id: i64) -> Migration {
    MigrationRepo::create(
        pool,
        &CreateMigration {
            org_id,
            initiated_by: None,
            api_host: "https://source.example.com".to_string(),
            api_token: "Token e674fa1230ee".to_string(),
            channels: serde_json::json!({}),
        },
    )
    .await
    .unwrap()
}

// ---------------------------------------------------------------------------
// Test: fetching an unknown migration returns 404
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_migration_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/migrations/999999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Migration with id 999999 not found");
}

// ---------------------------------------------------------------------------
// Test: submission with a blank host is rejected with 400
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn submission_rejects_blank_host(pool: PgPool) {
    let org_id = seed_org(&pool).await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/migrations",
        serde_json::json!({
            "org_id": org_id,
            "api_host": "   ",
            "api_token": "e674fa1230ee",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Test: submission with a malformed channel map is rejected with 400
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn submission_rejects_malformed_channel_map(pool: PgPool) {
    let org_id = seed_org(&pool).await;
    let app = common::build_test_app(pool);

    // Channels must be an object, not an array.
    let response = post_json(
        app,
        "/api/v1/migrations",
        serde_json::json!({
            "org_id": org_id,
            "api_host": "source.example.com",
            "api_token": "e674fa1230ee",
            "channels": ["not", "a", "map"],
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Test: listing and fetching runs never expose the API token
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn responses_omit_api_token(pool: PgPool) {
    let org_id = seed_org(&pool).await;
    let migration = seed_migration(&pool, org_id).await;
    let app = common::build_test_app(pool);

    let response = get(app.clone(), &format!("/api/v1/migrations?org_id={org_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let listed = &json["data"][0];
    assert_eq!(listed["api_host"], "https://source.example.com");
    assert!(listed.get("api_token").is_none());

    let response = get(app, &format!("/api/v1/migrations/{}", migration.id)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["data"].get("api_token").is_none());
}

// ---------------------------------------------------------------------------
// Test: association listing filters by reference kind
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn association_listing_filters_by_reference(pool: PgPool) {
    let org_id = seed_org(&pool).await;
    let migration = seed_migration(&pool, org_id).await;

    MigrationAssociationRepo::record(&pool, migration.id, "contact", "4242", "17")
        .await
        .unwrap();
    MigrationAssociationRepo::record(&pool, migration.id, "flow", "7", "3")
        .await
        .unwrap();

    let app = common::build_test_app(pool);

    let response = get(
        app.clone(),
        &format!("/api/v1/migrations/{}/associations", migration.id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);

    let response = get(
        app,
        &format!(
            "/api/v1/migrations/{}/associations?reference=contact",
            migration.id
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["source_value"], "4242");
}

// ---------------------------------------------------------------------------
// Test: an unknown reference kind is a 400, not an empty list
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn association_listing_rejects_unknown_reference(pool: PgPool) {
    let org_id = seed_org(&pool).await;
    let migration = seed_migration(&pool, org_id).await;
    let app = common::build_test_app(pool);

    let response = get(
        app,
        &format!(
            "/api/v1/migrations/{}/associations?reference=bogus",
            migration.id
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "Unknown reference kind: bogus");
}

// ---------------------------------------------------------------------------
// Test: a duplicate ledger write surfaces as 409 CONFLICT
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_ledger_write_maps_to_conflict(pool: PgPool) {
    let org_id = seed_org(&pool).await;
    let migration = seed_migration(&pool, org_id).await;

    MigrationAssociationRepo::record(&pool, migration.id, "contact", "4242", "17")
        .await
        .unwrap();
    let err = MigrationAssociationRepo::record(&pool, migration.id, "contact", "4242", "99")
        .await
        .unwrap_err();

    let response = AppError::Database(err).into_response();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
}
