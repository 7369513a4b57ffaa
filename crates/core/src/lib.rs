//! Domain types and pure validation logic for the roster API.
//!
//! Nothing in this crate performs I/O: schemas are built once, inputs are
//! validated into records, and records are merged or converted into typed
//! [`person::Person`] / [`person::Location`] values.

pub mod error;
pub mod person;
pub mod types;
pub mod validation;
