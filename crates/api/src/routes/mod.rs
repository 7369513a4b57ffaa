pub mod health;
pub mod person;
pub mod schema;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the application route tree.
///
/// ```text
/// /                                  GET  greeting
///
/// /person/new                        POST validate and echo a person
/// /person/detail                     GET  {name: age} from query params
/// /person/detail/{person_id}         GET  existence check
/// /person/{person_id}                PUT  merge person and location
///
/// /schemas                           GET  schema names
/// /schemas/{name}                    GET  schema description
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::home::home))
        .nest("/person", person::router())
        .nest("/schemas", schema::router())
}
