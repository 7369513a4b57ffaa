//! Shared response envelope types for API handlers.
//!
//! Introspection endpoints wrap their payload in a `{ "data": ... }`
//! envelope. The person endpoints return bare objects so that a validated
//! payload is echoed back exactly.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
