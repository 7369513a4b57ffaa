//! Declarative field validation.
//!
//! Provides schema and constraint types, a pure-logic evaluator, and the
//! validated record type produced by a successful evaluation.

pub mod evaluator;
pub mod record;
pub mod rules;
