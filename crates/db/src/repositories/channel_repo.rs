//! Repository for the `channels` table.

use sqlx::PgPool;
use uuid::Uuid;

use relay_core::types::DbId;

use crate::models::channel::Channel;

/// Column list for channels queries.
const COLUMNS: &str = "id, org_id, uuid, name, created_on";

/// Read-only access to tenant channels.
pub struct ChannelRepo;

impl ChannelRepo {
    /// Find a channel by org and UUID.
    pub async fn find_by_uuid(
        pool: &PgPool,
        org_id: DbId,
        uuid: Uuid,
    ) -> Result<Option<Channel>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM channels WHERE org_id = $1 AND uuid = $2");
        sqlx::query_as::<_, Channel>(&query)
            .bind(org_id)
            .bind(uuid)
            .fetch_optional(pool)
            .await
    }
}
