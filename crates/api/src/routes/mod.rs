pub mod health;
pub mod migrations;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /migrations                       list, submit
/// /migrations/{id}                  get
/// /migrations/{id}/associations     list ledger entries
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/migrations", migrations::router())
}
