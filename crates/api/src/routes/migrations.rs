//! Route definitions for the `/migrations` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::migrations;
use crate::state::AppState;

/// Routes mounted at `/migrations`.
///
/// ```text
/// GET    /                    -> list_migrations   (?org_id, ?limit, ?offset)
/// POST   /                    -> submit_migration
/// GET    /{id}                -> get_migration
/// GET    /{id}/associations   -> list_associations (?reference, ?limit, ?offset)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(migrations::list_migrations).post(migrations::submit_migration),
        )
        .route("/{id}", get(migrations::get_migration))
        .route("/{id}/associations", get(migrations::list_associations))
}
