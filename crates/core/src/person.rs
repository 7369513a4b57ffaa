//! Person and Location records and the schemas that validate them.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::PersonId;
use crate::validation::record::{FieldValue, ValidatedRecord};
use crate::validation::rules::{FieldConstraint, FieldRule, ParamSource, Schema};

/// Upper bound on names, inclusive.
pub const NAME_MAX_LEN: u64 = 50;
/// Oldest accepted age, inclusive.
pub const AGE_MAX: i64 = 115;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HairColor {
    White,
    Brown,
    Black,
    Blonde,
    Red,
}

impl HairColor {
    /// Wire names of every variant, in declaration order.
    pub const ALL: &'static [&'static str] = &["white", "brown", "black", "blonde", "red"];

    pub fn as_str(self) -> &'static str {
        match self {
            HairColor::White => "white",
            HairColor::Brown => "brown",
            HairColor::Black => "black",
            HairColor::Blonde => "blonde",
            HairColor::Red => "red",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "white" => Some(HairColor::White),
            "brown" => Some(HairColor::Brown),
            "black" => Some(HairColor::Black),
            "blonde" => Some(HairColor::Blonde),
            "red" => Some(HairColor::Red),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Person {
    pub first_name: String,
    pub last_name: String,
    pub age: i64,
    pub hair_color: Option<HairColor>,
    pub is_married: Option<bool>,
}

impl Person {
    /// Build a person from a record validated against [`person_schema`].
    pub fn from_record(record: &ValidatedRecord) -> Result<Self, CoreError> {
        let hair_color = match optional(record, "hair_color")? {
            None => None,
            Some(value) => {
                let raw = value.as_str().ok_or_else(|| mismatch("hair_color"))?;
                Some(HairColor::parse(raw).ok_or_else(|| mismatch("hair_color"))?)
            }
        };
        let is_married = match optional(record, "is_married")? {
            None => None,
            Some(value) => Some(value.as_bool().ok_or_else(|| mismatch("is_married"))?),
        };

        Ok(Self {
            first_name: string_field(record, "first_name")?,
            last_name: string_field(record, "last_name")?,
            age: int_field(record, "age")?,
            hair_color,
            is_married,
        })
    }

    /// The sample payload shown in the API documentation.
    pub fn example() -> Self {
        Self {
            first_name: "Federico".into(),
            last_name: "Rosero".into(),
            age: 18,
            hair_color: Some(HairColor::Black),
            is_married: Some(false),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Location {
    pub city: String,
    pub state: String,
    pub country: String,
}

impl Location {
    /// Build a location from a record validated against [`location_schema`].
    pub fn from_record(record: &ValidatedRecord) -> Result<Self, CoreError> {
        Ok(Self {
            city: string_field(record, "city")?,
            state: string_field(record, "state")?,
            country: string_field(record, "country")?,
        })
    }
}

fn mismatch(field: &str) -> CoreError {
    CoreError::Internal(format!("validated record has an unexpected value for `{field}`"))
}

fn field<'a>(record: &'a ValidatedRecord, name: &str) -> Result<&'a FieldValue, CoreError> {
    record
        .get(name)
        .ok_or_else(|| CoreError::Internal(format!("validated record is missing `{name}`")))
}

fn optional<'a>(
    record: &'a ValidatedRecord,
    name: &str,
) -> Result<Option<&'a FieldValue>, CoreError> {
    let value = field(record, name)?;
    Ok((!value.is_absent()).then_some(value))
}

fn string_field(record: &ValidatedRecord, name: &str) -> Result<String, CoreError> {
    field(record, name)?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| mismatch(name))
}

fn int_field(record: &ValidatedRecord, name: &str) -> Result<i64, CoreError> {
    field(record, name)?.as_int().ok_or_else(|| mismatch(name))
}

fn required_name(name: &str) -> FieldRule {
    FieldRule::new(
        name,
        FieldConstraint::RequiredString {
            min_len: Some(1),
            max_len: Some(NAME_MAX_LEN),
        },
    )
}

fn required_text(name: &str) -> FieldRule {
    FieldRule::new(
        name,
        FieldConstraint::RequiredString {
            min_len: None,
            max_len: None,
        },
    )
}

/// Request body schema for a [`Person`].
pub fn person_schema() -> Schema {
    Schema::new("person", ParamSource::Body)
        .field(required_name("first_name"))
        .field(required_name("last_name"))
        .field(FieldRule::new(
            "age",
            FieldConstraint::RequiredInt {
                gt: Some(0),
                le: Some(AGE_MAX),
            },
        ))
        .field(FieldRule::new(
            "hair_color",
            FieldConstraint::OptionalEnum {
                allowed: HairColor::ALL,
            },
        ))
        .field(FieldRule::new("is_married", FieldConstraint::OptionalBool))
}

/// Request body schema for a [`Location`]. Lengths are unconstrained.
pub fn location_schema() -> Schema {
    Schema::new("location", ParamSource::Body)
        .field(required_text("city"))
        .field(required_text("state"))
        .field(required_text("country"))
}

/// Query parameters of the person detail lookup.
///
/// `age` is deliberately a free-form string, not an integer.
pub fn person_detail_query_schema() -> Schema {
    Schema::new("person_detail_query", ParamSource::Query)
        .field(
            FieldRule::new(
                "name",
                FieldConstraint::OptionalString {
                    min_len: Some(1),
                    max_len: Some(NAME_MAX_LEN),
                },
            )
            .titled("Person Name")
            .described("This is person name. It's between 1 and 50 characters"),
        )
        .field(
            required_text("age")
                .titled("Person Age")
                .described("This is the person age. It's required"),
        )
}

/// The `{person_id}` path parameter.
pub fn person_id_path_schema() -> Schema {
    Schema::new("person_id_path", ParamSource::Path).field(
        FieldRule::new(
            "person_id",
            FieldConstraint::RequiredInt {
                gt: Some(0),
                le: None,
            },
        )
        .titled("Person Id")
        .described("This is the person id, It's required"),
    )
}

/// Extract the person id from a record validated against
/// [`person_id_path_schema`].
pub fn person_id(record: &ValidatedRecord) -> Result<PersonId, CoreError> {
    int_field(record, "person_id")
}

/// Every schema the API validates against, built once at startup.
#[derive(Debug, Clone)]
pub struct PersonSchemas {
    pub person: Schema,
    pub location: Schema,
    pub detail_query: Schema,
    pub id_path: Schema,
}

impl PersonSchemas {
    pub fn new() -> Self {
        Self {
            person: person_schema(),
            location: location_schema(),
            detail_query: person_detail_query_schema(),
            id_path: person_id_path_schema(),
        }
    }

    pub fn all(&self) -> [&Schema; 4] {
        [
            &self.person,
            &self.location,
            &self.detail_query,
            &self.id_path,
        ]
    }

    /// Look up a schema by its name.
    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.all().into_iter().find(|schema| schema.name() == name)
    }
}

impl Default for PersonSchemas {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::evaluator::validate;
    use crate::validation::record::merge;
    use crate::validation::rules::{FieldViolation, ViolationKind};
    use assert_matches::assert_matches;
    use serde_json::{json, Map, Value};

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn valid_person() -> Value {
        json!({
            "first_name": "Federico",
            "last_name": "Rosero",
            "age": 18,
            "hair_color": "black",
            "is_married": false
        })
    }

    fn person_with(field: &str, value: Value) -> Map<String, Value> {
        let mut input = object(valid_person());
        input.insert(field.to_string(), value);
        input
    }

    fn violation_on<'a>(violations: &'a [FieldViolation], field: &str) -> &'a FieldViolation {
        violations
            .iter()
            .find(|v| v.field == field)
            .unwrap_or_else(|| panic!("no violation on {field}: {violations:?}"))
    }

    #[test]
    fn valid_person_echoes_input() {
        let schema = person_schema();
        for color in HairColor::ALL {
            for married in [true, false] {
                let input = object(json!({
                    "first_name": "A",
                    "last_name": "x".repeat(50),
                    "age": 115,
                    "hair_color": color,
                    "is_married": married
                }));
                let record = validate(&schema, &input).unwrap();
                let person = Person::from_record(&record).unwrap();
                assert_eq!(Value::Object(input), serde_json::to_value(&person).unwrap());
            }
        }
    }

    #[test]
    fn age_outside_range_is_range_violation() {
        let schema = person_schema();
        for age in [0, 116, -1] {
            let violations = validate(&schema, &person_with("age", json!(age))).unwrap_err();
            assert_eq!(
                violation_on(&violations, "age").error_kind,
                ViolationKind::RangeViolation,
                "age = {age}"
            );
        }
    }

    #[test]
    fn first_name_length_bounds() {
        let schema = person_schema();
        for name in [String::new(), "a".repeat(51)] {
            let violations =
                validate(&schema, &person_with("first_name", json!(name))).unwrap_err();
            assert_eq!(
                violation_on(&violations, "first_name").error_kind,
                ViolationKind::LengthOutOfRange
            );
        }
    }

    #[test]
    fn unknown_hair_color_is_invalid_enum_value() {
        let violations =
            validate(&person_schema(), &person_with("hair_color", json!("purple"))).unwrap_err();
        assert_eq!(
            violation_on(&violations, "hair_color").error_kind,
            ViolationKind::InvalidEnumValue
        );
    }

    #[test]
    fn absent_hair_color_resolves_to_none() {
        let mut input = object(valid_person());
        input.remove("hair_color");
        let record = validate(&person_schema(), &input).unwrap();
        assert!(record.get("hair_color").unwrap().is_absent());
        let person = Person::from_record(&record).unwrap();
        assert_eq!(person.hair_color, None);
    }

    #[test]
    fn serialized_person_record_revalidates_identically() {
        let schema = person_schema();
        let record = validate(&schema, &object(valid_person())).unwrap();
        let again = validate(&schema, &record.to_json_map()).unwrap();
        assert_eq!(record, again);
    }

    #[test]
    fn location_and_person_merge_into_eight_keys() {
        let location = validate(
            &location_schema(),
            &object(json!({"city": "X", "state": "Y", "country": "Z"})),
        )
        .unwrap();
        let person = validate(&person_schema(), &object(valid_person())).unwrap();

        let merged = merge(&location, &person);
        assert_eq!(merged.len(), 8);
        for key in [
            "city",
            "state",
            "country",
            "first_name",
            "last_name",
            "age",
            "hair_color",
            "is_married",
        ] {
            assert!(merged.contains_key(key), "missing {key}");
        }
        assert_eq!(merged["city"], "X");
        assert_eq!(merged["age"], 18);
    }

    #[test]
    fn person_id_path_rejects_non_positive_and_non_integer() {
        let schema = person_id_path_schema();
        for (raw, kind) in [
            ("0", ViolationKind::RangeViolation),
            ("-5", ViolationKind::RangeViolation),
            ("abc", ViolationKind::TypeMismatch),
        ] {
            let input = object(json!({ "person_id": raw }));
            let violations = validate(&schema, &input).unwrap_err();
            assert_eq!(violations[0].error_kind, kind, "person_id = {raw}");
            assert_eq!(violations[0].location, ParamSource::Path);
        }

        let record = validate(&schema, &object(json!({"person_id": "5"}))).unwrap();
        assert_eq!(person_id(&record).unwrap(), 5);
    }

    #[test]
    fn detail_query_keeps_age_as_string() {
        let record = validate(
            &person_detail_query_schema(),
            &object(json!({"age": "twenty"})),
        )
        .unwrap();
        assert_eq!(record.get("age").and_then(FieldValue::as_str), Some("twenty"));
        assert!(record.get("name").unwrap().is_absent());
    }

    #[test]
    fn from_record_rejects_foreign_record() {
        let location = validate(
            &location_schema(),
            &object(json!({"city": "X", "state": "Y", "country": "Z"})),
        )
        .unwrap();
        assert_matches!(Person::from_record(&location), Err(CoreError::Internal(_)));
    }

    #[test]
    fn hair_color_names_round_trip() {
        for name in HairColor::ALL {
            assert_eq!(HairColor::parse(name).map(HairColor::as_str), Some(*name));
        }
        assert_eq!(HairColor::parse("purple"), None);
    }

    #[test]
    fn registry_finds_schemas_by_name() {
        let schemas = PersonSchemas::new();
        assert_eq!(schemas.get("person").map(Schema::name), Some("person"));
        assert_eq!(
            schemas.get("person_id_path").map(Schema::name),
            Some("person_id_path")
        );
        assert!(schemas.get("nope").is_none());
        assert_eq!(schemas.all().len(), 4);
    }

    #[test]
    fn example_validates() {
        let example = serde_json::to_value(Person::example()).unwrap();
        assert!(validate(&person_schema(), &object(example)).is_ok());
    }
}
