use std::sync::Arc;

use roster_core::person::PersonSchemas;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Request schemas, built once at startup and never mutated.
    pub schemas: Arc<PersonSchemas>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config: Arc::new(config),
            schemas: Arc::new(PersonSchemas::new()),
        }
    }
}
