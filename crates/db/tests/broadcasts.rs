//! Integration tests for broadcast storage.

use sqlx::PgPool;
use uuid::Uuid;

use relay_db::models::broadcast::CreateBroadcast;
use relay_db::models::contact::CreateContact;
use relay_db::repositories::{BroadcastRepo, ContactRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_org(pool: &PgPool) -> i64 {
    sqlx::query_scalar::<_, i64>("INSERT INTO orgs (uuid, name) VALUES ($1, 'Test Org') RETURNING id")
        .bind(Uuid::new_v4())
        .fetch_one(pool)
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Test: imported broadcasts are stored as sent history
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn broadcast_stored_as_sent(pool: PgPool) {
    let org_id = seed_org(&pool).await;

    let sent_on = chrono::Utc::now() - chrono::Duration::days(30);
    let broadcast = BroadcastRepo::create(
        &pool,
        &CreateBroadcast {
            org_id,
            text: "Clinic is open tomorrow".to_string(),
            status: "S".to_string(),
            recipient_count: 2,
            created_by: None,
            created_on: Some(sent_on),
        },
    )
    .await
    .unwrap();

    assert_eq!(broadcast.status, "S");
    assert_eq!(broadcast.recipient_count, 2);
    // Source timestamps are preserved, not replaced with now(). Postgres
    // keeps microsecond precision, so compare at that resolution.
    assert_eq!(
        broadcast.created_on.timestamp_micros(),
        sent_on.timestamp_micros()
    );
}

// ---------------------------------------------------------------------------
// Test: attaching the same recipient twice is a no-op
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn repeated_recipient_attach_is_noop(pool: PgPool) {
    let org_id = seed_org(&pool).await;
    let contact = ContactRepo::create(
        &pool,
        &CreateContact {
            org_id,
            uuid: Uuid::new_v4(),
            name: Some("Eric".to_string()),
            language: None,
            is_blocked: false,
            is_stopped: false,
            created_by: None,
            created_on: None,
            modified_on: None,
        },
    )
    .await
    .unwrap();

    let broadcast = BroadcastRepo::create(
        &pool,
        &CreateBroadcast {
            org_id,
            text: "Hello".to_string(),
            status: "S".to_string(),
            recipient_count: 1,
            created_by: None,
            created_on: None,
        },
    )
    .await
    .unwrap();

    BroadcastRepo::add_recipient(&pool, broadcast.id, contact.id)
        .await
        .unwrap();
    BroadcastRepo::add_recipient(&pool, broadcast.id, contact.id)
        .await
        .unwrap();

    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM broadcast_recipients WHERE broadcast_id = $1",
    )
    .bind(broadcast.id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(count, 1);
}
