//! Repository for the `contact_field_values` table.

use sqlx::PgPool;

use relay_core::types::{DbId, Timestamp};

use crate::models::contact::ContactFieldValue;

/// Column list for contact_field_values queries.
const COLUMNS: &str = "id, org_id, contact_id, key, string_value, decimal_value, \
    datetime_value, media_value";

/// Provides upsert access to per-contact custom field values.
pub struct ContactFieldValueRepo;

impl ContactFieldValueRepo {
    /// Insert or overwrite the value for one contact field key.
    #[allow(clippy::too_many_arguments)]
    pub async fn upsert(
        pool: &PgPool,
        org_id: DbId,
        contact_id: DbId,
        key: &str,
        string_value: Option<&str>,
        decimal_value: Option<f64>,
        datetime_value: Option<Timestamp>,
        media_value: Option<&str>,
    ) -> Result<ContactFieldValue, sqlx::Error> {
        let query = format!(
            "INSERT INTO contact_field_values
                (org_id, contact_id, key, string_value, decimal_value,
                 datetime_value, media_value)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             ON CONFLICT ON CONSTRAINT uq_contact_field_values_key DO UPDATE SET
                string_value = EXCLUDED.string_value,
                decimal_value = EXCLUDED.decimal_value,
                datetime_value = EXCLUDED.datetime_value,
                media_value = EXCLUDED.media_value
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContactFieldValue>(&query)
            .bind(org_id)
            .bind(contact_id)
            .bind(key)
            .bind(string_value)
            .bind(decimal_value)
            .bind(datetime_value)
            .bind(media_value)
            .fetch_one(pool)
            .await
    }
}
