//! Handlers for migration runs and their association ledger.
//!
//! Provides endpoints for submitting a migration against a remote instance,
//! listing and inspecting runs, and querying the ledger that maps remote
//! identifiers to local ones.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use serde::Deserialize;

use relay_core::error::CoreError;
use relay_core::reference::Reference;
use relay_core::submission::{normalize_api_host, normalize_api_token, validate_channel_map};
use relay_core::types::DbId;
use relay_db::models::migration::{CreateMigration, Migration};
use relay_db::repositories::{MigrationAssociationRepo, MigrationRepo};
use relay_remote::RemoteClient;

use crate::background;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request and query parameter structs
// ---------------------------------------------------------------------------

/// Request body for submitting a migration.
#[derive(Debug, Deserialize)]
pub struct SubmitMigrationRequest {
    pub org_id: DbId,
    pub initiated_by: Option<DbId>,
    pub api_host: String,
    pub api_token: String,
    /// Source-channel-UUID to local-channel-UUID map. Null or absent means
    /// no channels are mapped.
    pub channels: Option<serde_json::Value>,
}

/// Query parameters for listing migration runs.
#[derive(Debug, Deserialize)]
pub struct ListMigrationsParams {
    pub org_id: DbId,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query parameters for listing ledger entries.
#[derive(Debug, Deserialize)]
pub struct ListAssociationsParams {
    pub reference: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Verify that a migration run exists, returning the full row.
async fn ensure_migration_exists(pool: &sqlx::PgPool, id: DbId) -> AppResult<Migration> {
    MigrationRepo::find_by_id(pool, id).await?.ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "Migration",
            id,
        })
    })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /migrations
///
/// Submit a migration run. Credentials are normalized and probed against the
/// remote instance before the row is created; a failed probe means no row
/// and no background work. On success the import runs in a spawned task and
/// the new row is returned immediately.
pub async fn submit_migration(
    State(state): State<AppState>,
    Json(body): Json<SubmitMigrationRequest>,
) -> AppResult<impl IntoResponse> {
    let api_host = normalize_api_host(&body.api_host).map_err(CoreError::Validation)?;
    let api_token = normalize_api_token(&body.api_token).map_err(CoreError::Validation)?;

    let channels = body.channels.unwrap_or_else(|| serde_json::json!({}));
    validate_channel_map(&channels).map_err(CoreError::Validation)?;

    let client = RemoteClient::new(api_host.clone(), api_token.clone());
    client.check_reachable().await?;

    let migration = MigrationRepo::create(
        &state.pool,
        &CreateMigration {
            org_id: body.org_id,
            initiated_by: body.initiated_by,
            api_host,
            api_token,
            channels,
        },
    )
    .await?;

    tracing::info!(
        migration_id = migration.id,
        org_id = migration.org_id,
        api_host = %migration.api_host,
        "Migration submitted"
    );

    background::migration_runner::spawn(state.pool.clone(), migration.id);

    Ok((
        StatusCode::CREATED,
        Json(DataResponse { data: migration }),
    ))
}

/// GET /migrations?org_id={id}&limit&offset
///
/// List migration runs for an org, newest first.
pub async fn list_migrations(
    State(state): State<AppState>,
    Query(params): Query<ListMigrationsParams>,
) -> AppResult<impl IntoResponse> {
    let migrations =
        MigrationRepo::list_by_org(&state.pool, params.org_id, params.limit, params.offset)
            .await?;
    Ok(Json(DataResponse { data: migrations }))
}

/// GET /migrations/{id}
///
/// Fetch a single migration run.
pub async fn get_migration(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let migration = ensure_migration_exists(&state.pool, id).await?;
    Ok(Json(DataResponse { data: migration }))
}

/// GET /migrations/{id}/associations?reference&limit&offset
///
/// List ledger entries for a migration, optionally filtered by reference
/// kind. An unknown reference kind is a 400, not an empty list.
pub async fn list_associations(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<ListAssociationsParams>,
) -> AppResult<impl IntoResponse> {
    ensure_migration_exists(&state.pool, id).await?;

    let reference = match params.reference.as_deref() {
        Some(value) => Some(
            Reference::parse(value)
                .ok_or_else(|| AppError::BadRequest(format!("Unknown reference kind: {value}")))?,
        ),
        None => None,
    };

    let associations = MigrationAssociationRepo::list_by_migration(
        &state.pool,
        id,
        reference.map(|r| r.as_str()),
        params.limit,
        params.offset,
    )
    .await?;
    Ok(Json(DataResponse { data: associations }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn submit_request_optional_fields_default_to_none() {
        let body: SubmitMigrationRequest = serde_json::from_str(
            r#"{"org_id": 1, "api_host": "app.example.com", "api_token": "abc"}"#,
        )
        .unwrap();
        assert_eq!(body.org_id, 1);
        assert_matches!(body.initiated_by, None);
        assert_matches!(body.channels, None);
    }

    #[test]
    fn association_params_accept_reference_filter() {
        let params: ListAssociationsParams =
            serde_json::from_str(r#"{"reference": "contact"}"#).unwrap();
        assert_eq!(params.reference.as_deref(), Some("contact"));
        assert_matches!(Reference::parse("contact"), Some(Reference::Contact));
        assert_matches!(Reference::parse("bogus"), None);
    }
}
