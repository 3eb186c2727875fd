//! Repository for the `msgs` table.

use sqlx::PgPool;

use crate::models::msg::{CreateMsg, Msg};

/// Column list for msgs queries.
const COLUMNS: &str = "id, org_id, broadcast_id, contact_id, contact_urn_id, channel_id, \
    direction, msg_type, status, visibility, text, attachments, created_on, \
    modified_on, sent_on";

/// Provides CRUD operations for messages.
pub struct MsgRepo;

impl MsgRepo {
    /// Create a message, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateMsg) -> Result<Msg, sqlx::Error> {
        let query = format!(
            "INSERT INTO msgs
                (org_id, broadcast_id, contact_id, contact_urn_id, channel_id,
                 direction, msg_type, status, visibility, text, attachments,
                 created_on, modified_on, sent_on)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11,
                 COALESCE($12, now()), COALESCE($13, now()), $14)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Msg>(&query)
            .bind(input.org_id)
            .bind(input.broadcast_id)
            .bind(input.contact_id)
            .bind(input.contact_urn_id)
            .bind(input.channel_id)
            .bind(&input.direction)
            .bind(&input.msg_type)
            .bind(&input.status)
            .bind(&input.visibility)
            .bind(&input.text)
            .bind(&input.attachments)
            .bind(input.created_on)
            .bind(input.modified_on)
            .bind(input.sent_on)
            .fetch_one(pool)
            .await
    }
}
