//! Schema, constraint and violation types.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Where a validated value came from in the HTTP request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ParamSource {
    Body,
    Query,
    Path,
}

/// The constraint attached to a single schema field.
///
/// Length bounds are inclusive and counted in characters. For integers, `gt`
/// is a strict lower bound and `le` an inclusive upper bound. A `None` bound
/// is unconstrained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldConstraint {
    RequiredString {
        min_len: Option<u64>,
        max_len: Option<u64>,
    },
    OptionalString {
        min_len: Option<u64>,
        max_len: Option<u64>,
    },
    RequiredInt {
        gt: Option<i64>,
        le: Option<i64>,
    },
    OptionalEnum {
        allowed: &'static [&'static str],
    },
    OptionalBool,
}

impl FieldConstraint {
    /// Whether a missing value is reported as a violation.
    pub fn is_required(&self) -> bool {
        matches!(
            self,
            FieldConstraint::RequiredString { .. } | FieldConstraint::RequiredInt { .. }
        )
    }

    fn kind(&self) -> &'static str {
        match self {
            FieldConstraint::RequiredString { .. } | FieldConstraint::OptionalString { .. } => {
                "string"
            }
            FieldConstraint::RequiredInt { .. } => "integer",
            FieldConstraint::OptionalEnum { .. } => "enum",
            FieldConstraint::OptionalBool => "boolean",
        }
    }
}

/// A named field with its constraint and optional documentation metadata.
///
/// `title` and `description` are presentation only; the evaluator ignores them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRule {
    pub name: String,
    pub constraint: FieldConstraint,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl FieldRule {
    pub fn new(name: impl Into<String>, constraint: FieldConstraint) -> Self {
        Self {
            name: name.into(),
            constraint,
            title: None,
            description: None,
        }
    }

    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    fn describe(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("name".into(), json!(self.name));
        obj.insert("kind".into(), json!(self.constraint.kind()));
        obj.insert("required".into(), json!(self.constraint.is_required()));

        match &self.constraint {
            FieldConstraint::RequiredString { min_len, max_len }
            | FieldConstraint::OptionalString { min_len, max_len } => {
                if let Some(min) = min_len {
                    obj.insert("min_length".into(), json!(min));
                }
                if let Some(max) = max_len {
                    obj.insert("max_length".into(), json!(max));
                }
            }
            FieldConstraint::RequiredInt { gt, le } => {
                if let Some(gt) = gt {
                    obj.insert("gt".into(), json!(gt));
                }
                if let Some(le) = le {
                    obj.insert("le".into(), json!(le));
                }
            }
            FieldConstraint::OptionalEnum { allowed } => {
                obj.insert("allowed".into(), json!(allowed));
            }
            FieldConstraint::OptionalBool => {}
        }

        if let Some(title) = &self.title {
            obj.insert("title".into(), json!(title));
        }
        if let Some(description) = &self.description {
            obj.insert("description".into(), json!(description));
        }
        Value::Object(obj)
    }
}

/// An ordered set of field rules, evaluated in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    name: String,
    source: ParamSource,
    fields: Vec<FieldRule>,
}

impl Schema {
    pub fn new(name: impl Into<String>, source: ParamSource) -> Self {
        Self {
            name: name.into(),
            source,
            fields: Vec::new(),
        }
    }

    /// Append a field. Declaration order is evaluation and reporting order.
    pub fn field(mut self, rule: FieldRule) -> Self {
        self.fields.push(rule);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> ParamSource {
        self.source
    }

    pub fn fields(&self) -> &[FieldRule] {
        &self.fields
    }

    /// Render the schema as a JSON document for API consumers.
    pub fn describe(&self) -> Value {
        json!({
            "name": self.name,
            "source": self.source,
            "fields": self.fields.iter().map(FieldRule::describe).collect::<Vec<_>>(),
        })
    }
}

/// Category of a field-level validation failure.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    MissingField,
    TypeMismatch,
    LengthOutOfRange,
    RangeViolation,
    InvalidEnumValue,
}

/// A single field-level violation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldViolation {
    pub location: ParamSource,
    pub field: String,
    pub error_kind: ViolationKind,
    pub message: String,
}

impl FieldViolation {
    /// Qualify the field name with the embedding key, e.g. `person.age`.
    pub fn nested(mut self, prefix: &str) -> Self {
        self.field = format!("{prefix}.{}", self.field);
        self
    }
}
