use crate::validation::rules::FieldViolation;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {} field error(s)", .0.len())]
    Validation(Vec<FieldViolation>),

    #[error("Entity not found: {entity} named {name}")]
    NotFound { entity: &'static str, name: String },

    #[error("Internal error: {0}")]
    Internal(String),
}
