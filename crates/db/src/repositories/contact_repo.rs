//! Repository for the `contacts` table.

use sqlx::PgPool;
use uuid::Uuid;

use relay_core::types::DbId;

use crate::models::contact::{Contact, CreateContact};

/// Column list for contacts queries.
const COLUMNS: &str = "id, org_id, uuid, name, language, is_blocked, is_stopped, \
    created_by, created_on, modified_on";

/// Provides CRUD operations for contacts.
pub struct ContactRepo;

impl ContactRepo {
    /// Create a new contact, returning the created row. Source timestamps
    /// are preserved when present.
    pub async fn create(pool: &PgPool, input: &CreateContact) -> Result<Contact, sqlx::Error> {
        let query = format!(
            "INSERT INTO contacts
                (org_id, uuid, name, language, is_blocked, is_stopped, created_by,
                 created_on, modified_on)
             VALUES ($1, $2, $3, $4, $5, $6, $7,
                 COALESCE($8, now()), COALESCE($9, now()))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contact>(&query)
            .bind(input.org_id)
            .bind(input.uuid)
            .bind(&input.name)
            .bind(&input.language)
            .bind(input.is_blocked)
            .bind(input.is_stopped)
            .bind(input.created_by)
            .bind(input.created_on)
            .bind(input.modified_on)
            .fetch_one(pool)
            .await
    }

    /// Find a contact by org and UUID.
    pub async fn find_by_uuid(
        pool: &PgPool,
        org_id: DbId,
        uuid: Uuid,
    ) -> Result<Option<Contact>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contacts WHERE org_id = $1 AND uuid = $2");
        sqlx::query_as::<_, Contact>(&query)
            .bind(org_id)
            .bind(uuid)
            .fetch_optional(pool)
            .await
    }
}
