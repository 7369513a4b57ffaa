//! Conversion of raw request parts into validator input.
//!
//! Handlers extract path, query and body data as untyped values and let the
//! schema evaluator decide what is valid, so that every field error ends up
//! in one 422 response instead of an extractor rejection.

use std::collections::HashMap;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::Query;
use axum::Json;
use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};

/// Unwrap a JSON body that must be an object.
pub fn json_object(body: Result<Json<Value>, JsonRejection>) -> AppResult<Map<String, Value>> {
    match body {
        Ok(Json(Value::Object(map))) => Ok(map),
        Ok(Json(_)) => Err(AppError::BadRequest(
            "Request body must be a JSON object".into(),
        )),
        Err(rejection) => Err(AppError::BadRequest(rejection.body_text())),
    }
}

/// Query parameters as string values. A repeated key keeps its last value.
pub fn query_input(
    params: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> AppResult<Map<String, Value>> {
    let Query(params) = params.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    Ok(params
        .into_iter()
        .map(|(key, value)| (key, Value::String(value)))
        .collect())
}

/// A single path segment under the parameter name it is bound to.
pub fn path_input(name: &str, raw: String) -> Map<String, Value> {
    let mut input = Map::new();
    input.insert(name.to_string(), Value::String(raw));
    input
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    #[test]
    fn object_body_is_accepted() {
        let map = json_object(Ok(Json(json!({"a": 1})))).unwrap();
        assert_eq!(map["a"], 1);
    }

    #[test]
    fn non_object_body_is_bad_request() {
        assert_matches!(json_object(Ok(Json(json!([1, 2])))), Err(AppError::BadRequest(_)));
    }

    #[test]
    fn query_values_become_strings() {
        let params = HashMap::from([("age".to_string(), "30".to_string())]);
        let map = query_input(Ok(Query(params))).unwrap();
        assert_eq!(map["age"], "30");
    }

    #[test]
    fn path_segment_is_keyed_by_name() {
        let map = path_input("person_id", "42".into());
        assert_eq!(map["person_id"], "42");
        assert_eq!(map.len(), 1);
    }
}
