//! Domain error types for server operations.
//!
//! Each error converts into a user-safe `ServerFnError` that carries no
//! internal details.

use leptos::server_fn::error::ServerFnError;
use std::fmt;

/// Server configuration errors surfaced through server functions.
#[derive(Debug)]
pub enum ConfigError {
    /// A configured value was not provided to the request.
    Missing { name: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { name } => write!(f, "{name} is not configured"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl ConfigError {
    /// Convert to a user-safe ServerFnError.
    pub fn into_server_error(self) -> ServerFnError {
        match &self {
            ConfigError::Missing { .. } => ServerFnError::new("Server misconfigured"),
        }
    }
}
