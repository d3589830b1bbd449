// --- File: crates/consultify_common/src/lib.rs ---

// Declare modules within this crate
pub mod error; // Error handling
pub mod logging; // Logging utilities
pub mod services; // Service abstractions

// Re-export error types and utilities for easier access
pub use error::{config_error, ConsultifyError, HttpStatusCode};

// Re-export service abstractions for easier access
pub use services::{
    AuthSubject, BoxFuture, BoxedError, Clock, EventKind, IdentityProvider, ManualClock,
    NotificationEvent, NotificationSink, ServiceFactory, SystemClock,
};
