//! Error types for Sigil

use thiserror::Error;

/// Result type for Sigil operations
pub type Result<T> = std::result::Result<T, SigilError>;

/// Sigil error types
#[derive(Error, Debug)]
pub enum SigilError {
    #[error("Service error: {0}")]
    Service(String),

    #[error("Service not found: {0}")]
    ServiceNotFound(String),

    #[error("Component not found: {0}")]
    ComponentNotFound(String),

    #[error("Dispatch error: {0}")]
    Dispatch(String),

    #[error("Invalid plan: {0}")]
    InvalidPlan(String),

    #[error("Lock error: {0}")]
    Lock(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}
