// --- File: crates/consultify_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type for Consultify wiring code.
///
/// Domain crates define their own specific error enums; this one covers the
/// cross-cutting failures (configuration, IO, external collaborators) that do
/// not belong to any single domain operation.
#[derive(Error, Debug)]
pub enum ConsultifyError {
    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during authentication or authorization
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Error occurred during validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error occurred due to a resource not being found
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// Error occurred due to a conflict (e.g., resource already claimed)
    #[error("Conflict: {0}")]
    ConflictError(String),

    /// Error occurred during a storage operation
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Error occurred during an external service call
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
///
/// Implemented by error types that cross the HTTP boundary so handlers map
/// them uniformly.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for ConsultifyError {
    fn status_code(&self) -> u16 {
        match self {
            ConsultifyError::ConfigError(_) => 500,
            ConsultifyError::AuthError(_) => 401,
            ConsultifyError::ValidationError(_) => 400,
            ConsultifyError::NotFoundError(_) => 404,
            ConsultifyError::ConflictError(_) => 409,
            ConsultifyError::StorageError(_) => 500,
            ConsultifyError::ExternalServiceError { .. } => 502,
            ConsultifyError::InternalError(_) => 500,
        }
    }
}

impl From<std::io::Error> for ConsultifyError {
    fn from(err: std::io::Error) -> Self {
        ConsultifyError::InternalError(err.to_string())
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> ConsultifyError {
    ConsultifyError::ConfigError(message.to_string())
}
