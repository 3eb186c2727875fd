//! Repository for the `contact_urns` table.

use sqlx::PgPool;

use relay_core::types::DbId;

use crate::models::contact::ContactUrn;

/// Column list for contact_urns queries.
const COLUMNS: &str = "id, org_id, contact_id, scheme, path, display";

/// Provides lookup and attach operations for contact URNs.
pub struct ContactUrnRepo;

impl ContactUrnRepo {
    /// Find a URN by its org-scoped identity (scheme + path).
    pub async fn find_by_identity(
        pool: &PgPool,
        org_id: DbId,
        scheme: &str,
        path: &str,
    ) -> Result<Option<ContactUrn>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM contact_urns
             WHERE org_id = $1 AND scheme = $2 AND path = $3"
        );
        sqlx::query_as::<_, ContactUrn>(&query)
            .bind(org_id)
            .bind(scheme)
            .bind(path)
            .fetch_optional(pool)
            .await
    }

    /// Create a URN attached to a contact, returning the created row.
    pub async fn create(
        pool: &PgPool,
        org_id: DbId,
        contact_id: DbId,
        scheme: &str,
        path: &str,
        display: Option<&str>,
    ) -> Result<ContactUrn, sqlx::Error> {
        let query = format!(
            "INSERT INTO contact_urns (org_id, contact_id, scheme, path, display)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContactUrn>(&query)
            .bind(org_id)
            .bind(contact_id)
            .bind(scheme)
            .bind(path)
            .bind(display)
            .fetch_one(pool)
            .await
    }

    /// Point an existing (possibly orphaned) URN at a contact.
    pub async fn assign_contact(
        pool: &PgPool,
        id: DbId,
        contact_id: DbId,
    ) -> Result<Option<ContactUrn>, sqlx::Error> {
        let query = format!(
            "UPDATE contact_urns SET contact_id = $2
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContactUrn>(&query)
            .bind(id)
            .bind(contact_id)
            .fetch_optional(pool)
            .await
    }
}
