//! Integration tests for contact URN identity handling.

use sqlx::PgPool;
use uuid::Uuid;

use relay_db::models::contact::{Contact, CreateContact};
use relay_db::repositories::{ContactRepo, ContactUrnRepo};

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

async fn seed_contact(pool: &PgPool, org_id: i64, name: &str) -> Contact {
    ContactRepo::create(
        pool,
        &CreateContact {
            org_id,
            uuid: Uuid::new_v4(),
            name: Some(name.to_string()),
            language: None,
            is_blocked: false,
            is_stopped: false,
            created_by: None,
            created_on: None,
            modified_on: None,
        },
    )
    .await
    .unwrap()
}

// ---------------------------------------------------------------------------
// Test: identity lookup is scoped to the org
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn identity_lookup_is_org_scoped(pool: PgPool) {
    let org_a = seed_org(&pool).await;
    let org_b = seed_org(&pool).await;
    let owner = seed_contact(&pool, org_a, "Eric").await;

    ContactUrnRepo::create(&pool, org_a, owner.id, "tel", "+250788123123", None)
        .await
        .unwrap();

    let found = ContactUrnRepo::find_by_identity(&pool, org_a, "tel", "+250788123123")
        .await
        .unwrap();
    assert!(found.is_some());

    let other_org = ContactUrnRepo::find_by_identity(&pool, org_b, "tel", "+250788123123")
        .await
        .unwrap();
    assert!(other_org.is_none());
}

// ---------------------------------------------------------------------------
// Test: a URN follows reassignment to a new owner
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn urn_follows_reassignment(pool: PgPool) {
    let org_id = seed_org(&pool).await;
    let previous_owner = seed_contact(&pool, org_id, "Eric").await;
    let new_owner = seed_contact(&pool, org_id, "Maria").await;

    let urn = ContactUrnRepo::create(
        &pool,
        org_id,
        previous_owner.id,
        "tel",
        "+250788123123",
        None,
    )
    .await
    .unwrap();
    assert_eq!(urn.contact_id, Some(previous_owner.id));

    let reassigned = ContactUrnRepo::assign_contact(&pool, urn.id, new_owner.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reassigned.id, urn.id);
    assert_eq!(reassigned.contact_id, Some(new_owner.id));

    // The identity still resolves to a single row, now held by the new owner.
    let found = ContactUrnRepo::find_by_identity(&pool, org_id, "tel", "+250788123123")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.contact_id, Some(new_owner.id));
}
