use axum::routing::get;
use axum::Router;

use crate::handlers::schema;
use crate::state::AppState;

/// Schema introspection routes mounted at `/schemas`.
///
/// ```text
/// GET    /          -> list_schemas
/// GET    /{name}    -> describe_schema
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(schema::list_schemas))
        .route("/{name}", get(schema::describe_schema))
}
