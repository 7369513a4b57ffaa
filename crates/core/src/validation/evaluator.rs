//! Schema evaluator -- pure logic, no I/O.

use serde_json::{Map, Value};
use validator::{ValidateLength, ValidateRange};

use super::record::{FieldValue, ValidatedRecord};
use super::rules::{FieldConstraint, FieldViolation, ParamSource, Schema, ViolationKind};

/// Evaluate every field of `schema` against `input`.
///
/// All fields are checked; violations are accumulated in schema order rather
/// than stopping at the first failure. Input keys the schema does not name
/// are ignored. A key holding JSON `null` counts as absent.
pub fn validate(
    schema: &Schema,
    input: &Map<String, Value>,
) -> Result<ValidatedRecord, Vec<FieldViolation>> {
    let mut fields = Vec::with_capacity(schema.fields().len());
    let mut violations = Vec::new();

    for rule in schema.fields() {
        let raw = input.get(&rule.name).filter(|v| !v.is_null());
        match evaluate_field(&rule.constraint, raw) {
            Ok(value) => fields.push((rule.name.clone(), value)),
            Err(rejection) => violations.push(FieldViolation {
                location: schema.source(),
                field: rule.name.clone(),
                error_kind: rejection.kind,
                message: rejection.message,
            }),
        }
    }

    if violations.is_empty() {
        Ok(ValidatedRecord::from_fields(fields))
    } else {
        Err(violations)
    }
}

/// Validate the object stored under `key` in a request body.
///
/// Used when one body carries several records, e.g.
/// `{"person": {...}, "location": {...}}`. Violations are reported against
/// `key.<field>`; a missing or non-object value is a single violation on
/// `key` itself.
pub fn validate_embedded(
    schema: &Schema,
    key: &str,
    body: &Map<String, Value>,
) -> Result<ValidatedRecord, Vec<FieldViolation>> {
    let embedded_violation = |error_kind, message: &str| FieldViolation {
        location: ParamSource::Body,
        field: key.to_string(),
        error_kind,
        message: message.to_string(),
    };

    match body.get(key) {
        None | Some(Value::Null) => Err(vec![embedded_violation(
            ViolationKind::MissingField,
            "field required",
        )]),
        Some(Value::Object(inner)) => validate(schema, inner)
            .map_err(|violations| violations.into_iter().map(|v| v.nested(key)).collect()),
        Some(_) => Err(vec![embedded_violation(
            ViolationKind::TypeMismatch,
            "value is not a valid dict",
        )]),
    }
}

struct Rejection {
    kind: ViolationKind,
    message: String,
}

impl Rejection {
    fn new(kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

fn evaluate_field(
    constraint: &FieldConstraint,
    raw: Option<&Value>,
) -> Result<FieldValue, Rejection> {
    match (constraint, raw) {
        (FieldConstraint::RequiredString { .. } | FieldConstraint::RequiredInt { .. }, None) => {
            Err(Rejection::new(ViolationKind::MissingField, "field required"))
        }
        (
            FieldConstraint::OptionalString { .. }
            | FieldConstraint::OptionalEnum { .. }
            | FieldConstraint::OptionalBool,
            None,
        ) => Ok(FieldValue::Absent),
        (
            FieldConstraint::RequiredString { min_len, max_len }
            | FieldConstraint::OptionalString { min_len, max_len },
            Some(value),
        ) => evaluate_string(value, *min_len, *max_len),
        (FieldConstraint::RequiredInt { gt, le }, Some(value)) => evaluate_int(value, *gt, *le),
        (FieldConstraint::OptionalEnum { allowed }, Some(value)) => evaluate_enum(value, allowed),
        (FieldConstraint::OptionalBool, Some(value)) => evaluate_bool(value),
    }
}

fn evaluate_string(
    value: &Value,
    min_len: Option<u64>,
    max_len: Option<u64>,
) -> Result<FieldValue, Rejection> {
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => {
            return Err(Rejection::new(
                ViolationKind::TypeMismatch,
                "value is not a valid string",
            ))
        }
    };

    if text.validate_length(min_len, max_len, None) {
        return Ok(FieldValue::Str(text));
    }

    let length = text.chars().count() as u64;
    let message = match (min_len, max_len) {
        (Some(min), _) if length < min => {
            format!("ensure this value has at least {min} characters")
        }
        (_, Some(max)) => format!("ensure this value has at most {max} characters"),
        _ => "string length out of range".to_string(),
    };
    Err(Rejection::new(ViolationKind::LengthOutOfRange, message))
}

fn evaluate_int(value: &Value, gt: Option<i64>, le: Option<i64>) -> Result<FieldValue, Rejection> {
    let n = coerce_int(value).ok_or_else(|| {
        Rejection::new(ViolationKind::TypeMismatch, "value is not a valid integer")
    })?;

    if n.validate_range(None, le, gt, None) {
        return Ok(FieldValue::Int(n));
    }

    let message = match (gt, le) {
        (Some(gt), _) if n <= gt => format!("ensure this value is greater than {gt}"),
        (_, Some(le)) => format!("ensure this value is less than or equal to {le}"),
        _ => "value out of range".to_string(),
    };
    Err(Rejection::new(ViolationKind::RangeViolation, message))
}

/// Integers, floats with no fractional part, and numeric strings.
fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            let f = n.as_f64()?;
            let in_range = f >= i64::MIN as f64 && f <= i64::MAX as f64;
            (f.fract() == 0.0 && in_range).then_some(f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn evaluate_enum(value: &Value, allowed: &[&str]) -> Result<FieldValue, Rejection> {
    match value {
        Value::String(s) if allowed.contains(&s.as_str()) => Ok(FieldValue::Enum(s.clone())),
        _ => {
            let permitted = allowed
                .iter()
                .map(|v| format!("'{v}'"))
                .collect::<Vec<_>>()
                .join(", ");
            Err(Rejection::new(
                ViolationKind::InvalidEnumValue,
                format!("value is not a valid enumeration member; permitted: {permitted}"),
            ))
        }
    }
}

fn evaluate_bool(value: &Value) -> Result<FieldValue, Rejection> {
    coerce_bool(value).map(FieldValue::Bool).ok_or_else(|| {
        Rejection::new(
            ViolationKind::TypeMismatch,
            "value could not be parsed to a boolean",
        )
    })
}

fn coerce_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_i64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" | "t" | "y" => Some(true),
            "false" | "0" | "no" | "off" | "f" | "n" => Some(false),
            _ => None,
        },
        _ => None,
    }
}
