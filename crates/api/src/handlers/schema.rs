//! Read-only introspection of the request schemas.

use axum::extract::{Path, State};
use axum::Json;
use roster_core::error::CoreError;
use roster_core::person::Person;
use serde_json::{json, Value};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /schemas
///
/// Names of every schema that can be described.
pub async fn list_schemas(State(state): State<AppState>) -> Json<DataResponse<Vec<String>>> {
    let names = state
        .schemas
        .all()
        .into_iter()
        .map(|schema| schema.name().to_string())
        .collect();
    Json(DataResponse { data: names })
}

/// GET /schemas/{name}
///
/// Field constraints and documentation metadata for one schema. The person
/// schema also carries an example payload.
pub async fn describe_schema(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<DataResponse<Value>>> {
    let schema = state.schemas.get(&name).ok_or(CoreError::NotFound {
        entity: "Schema",
        name: name.clone(),
    })?;

    let mut doc = schema.describe();
    if schema.name() == state.schemas.person.name() {
        doc["example"] = json!(Person::example());
    }
    Ok(Json(DataResponse { data: doc }))
}
