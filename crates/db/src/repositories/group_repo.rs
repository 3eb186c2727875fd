//! Repository for the `contact_groups` and `group_memberships` tables.

use sqlx::PgPool;
use uuid::Uuid;

use relay_core::types::DbId;

use crate::models::group::{ContactGroup, CreateContactGroup};

/// Column list for contact_groups queries.
const COLUMNS: &str = "id, org_id, uuid, name, query, created_by, created_on";

/// Provides CRUD operations for contact groups and their memberships.
pub struct ContactGroupRepo;

impl ContactGroupRepo {
    /// Create a new group, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateContactGroup,
    ) -> Result<ContactGroup, sqlx::Error> {
        let query = format!(
            "INSERT INTO contact_groups (org_id, uuid, name, query, created_by)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContactGroup>(&query)
            .bind(input.org_id)
            .bind(input.uuid)
            .bind(&input.name)
            .bind(&input.query)
            .bind(input.created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a group by org and UUID.
    pub async fn find_by_uuid(
        pool: &PgPool,
        org_id: DbId,
        uuid: Uuid,
    ) -> Result<Option<ContactGroup>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contact_groups WHERE org_id = $1 AND uuid = $2");
        sqlx::query_as::<_, ContactGroup>(&query)
            .bind(org_id)
            .bind(uuid)
            .fetch_optional(pool)
            .await
    }

    /// Add a contact to a group; a no-op when the membership already exists.
    pub async fn add_member(
        pool: &PgPool,
        group_id: DbId,
        contact_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO group_memberships (group_id, contact_id)
             VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_group_memberships_pair DO NOTHING",
        )
        .bind(group_id)
        .bind(contact_id)
        .execute(pool)
        .await?;
        Ok(())
    }
}
