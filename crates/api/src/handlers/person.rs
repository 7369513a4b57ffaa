//! Handlers for the `/person` resource.
//!
//! Nothing is stored: each handler validates its input against the shared
//! schemas and echoes or merges the result.

use std::collections::HashMap;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use roster_core::error::CoreError;
use roster_core::person::{self, Location, Person};
use roster_core::validation::evaluator::{validate, validate_embedded};
use roster_core::validation::record::{merge, FieldValue};
use serde_json::{Map, Value};

use crate::error::AppResult;
use crate::extract;
use crate::state::AppState;

/// Key used in the detail response when no `name` was supplied.
const ABSENT_NAME_KEY: &str = "null";

/// POST /person/new
///
/// Validate a person body and echo it back.
pub async fn create_person(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<Person>> {
    let input = extract::json_object(body)?;
    let record = validate(&state.schemas.person, &input).map_err(CoreError::Validation)?;
    let person = Person::from_record(&record)?;
    tracing::debug!(first_name = %person.first_name, age = person.age, "Person accepted");
    Ok(Json(person))
}

/// GET /person/detail?name=&age=
///
/// Returns `{name: age}`. `age` is passed through as a raw string.
pub async fn show_person(
    State(state): State<AppState>,
    params: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> AppResult<Json<Map<String, Value>>> {
    let input = extract::query_input(params)?;
    let record =
        validate(&state.schemas.detail_query, &input).map_err(CoreError::Validation)?;

    let name = record
        .get("name")
        .and_then(FieldValue::as_str)
        .unwrap_or(ABSENT_NAME_KEY);
    let age = record
        .get("age")
        .map(FieldValue::to_json)
        .ok_or_else(|| CoreError::Internal("detail query record is missing `age`".into()))?;

    let mut detail = Map::new();
    detail.insert(name.to_string(), age);
    Ok(Json(detail))
}

/// GET /person/detail/{person_id}
pub async fn show_person_by_id(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<Map<String, Value>>> {
    let input = extract::path_input("person_id", raw_id);
    let record = validate(&state.schemas.id_path, &input).map_err(CoreError::Validation)?;
    let person_id = person::person_id(&record)?;

    let mut detail = Map::new();
    detail.insert(person_id.to_string(), Value::from("It exists!"));
    Ok(Json(detail))
}

/// PUT /person/{person_id}
///
/// Body: `{"person": {...}, "location": {...}}`. Returns the union of both
/// records; location fields win on a key collision. Path and body errors
/// are reported together.
pub async fn update_person(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<Map<String, Value>>> {
    let body = extract::json_object(body)?;
    let path = extract::path_input("person_id", raw_id);
    let schemas = &state.schemas;

    let mut violations = Vec::new();
    let id_record = validate(&schemas.id_path, &path)
        .map_err(|errs| violations.extend(errs))
        .ok();
    let person_record = validate_embedded(&schemas.person, "person", &body)
        .map_err(|errs| violations.extend(errs))
        .ok();
    let location_record = validate_embedded(&schemas.location, "location", &body)
        .map_err(|errs| violations.extend(errs))
        .ok();

    let (Some(id_record), Some(person_record), Some(location_record)) =
        (id_record, person_record, location_record)
    else {
        return Err(CoreError::Validation(violations).into());
    };

    let person_id = person::person_id(&id_record)?;
    let person = Person::from_record(&person_record)?;
    let location = Location::from_record(&location_record)?;
    tracing::debug!(
        person_id,
        first_name = %person.first_name,
        city = %location.city,
        "Merging person and location"
    );

    Ok(Json(merge(&person_record, &location_record)))
}
