use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::person;
use crate::state::AppState;

/// Person routes mounted at `/person`.
///
/// ```text
/// POST   /new                  -> create_person
/// GET    /detail               -> show_person
/// GET    /detail/{person_id}   -> show_person_by_id
/// PUT    /{person_id}          -> update_person
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/new", post(person::create_person))
        .route("/detail", get(person::show_person))
        .route("/detail/{person_id}", get(person::show_person_by_id))
        .route("/{person_id}", put(person::update_person))
}
