// --- File: crates/consultify_common/src/services.rs ---
//! Service abstractions for external collaborators.
//!
//! This module defines the traits the scheduling core consumes: the clock,
//! the identity provider that validates inbound credentials, and the
//! notification sink that carries lifecycle events to users and operators.
//! Keeping them as traits decouples the core from any live connection and
//! lets tests inject deterministic implementations.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// A wrapper error type that implements std::error::Error for Box<dyn std::error::Error + Send + Sync>
#[derive(Debug)]
pub struct BoxedError(pub Box<dyn StdError + Send + Sync>);

impl fmt::Display for BoxedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StdError for BoxedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

impl From<Box<dyn StdError + Send + Sync>> for BoxedError {
    fn from(err: Box<dyn StdError + Send + Sync>) -> Self {
        BoxedError(err)
    }
}

/// Source of the current instant.
///
/// Injected everywhere "now" matters so lifecycle rules (past-slot
/// rejection, reminder windows, purge cutoffs) are deterministic in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock implementation used in production.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to. Test and simulation use.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap() = now;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// An authenticated caller, as established by the identity collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSubject {
    /// Opaque stable identifier of the caller.
    pub subject: String,
    /// Whether the caller may use the administrative surface.
    pub admin: bool,
}

/// A trait for credential validation.
///
/// The core never parses credentials itself; it hands the raw bearer token
/// to this collaborator and receives the subject and privilege flag back.
/// `Ok(None)` means the credential is unknown or expired.
pub trait IdentityProvider: Send + Sync {
    fn validate(&self, credential: &str) -> BoxFuture<'_, Option<AuthSubject>, BoxedError>;
}

/// Kind of lifecycle event published to the notification sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Booked,
    Confirmed,
    Cancelled,
    Reminder,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Booked => write!(f, "booked"),
            EventKind::Confirmed => write!(f, "confirmed"),
            EventKind::Cancelled => write!(f, "cancelled"),
            EventKind::Reminder => write!(f, "reminder"),
        }
    }
}

/// A rendered lifecycle event, ready for delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationEvent {
    pub kind: EventKind,
    /// Human-readable message body; rendering is the publisher's concern.
    pub message: String,
    /// Opaque recipient id for direct delivery; `None` means operator channel.
    pub recipient: Option<String>,
}

/// A trait for notification delivery.
///
/// Fire-and-forget from the core's perspective: publish failures are logged
/// by the caller and never roll back a completed state change.
pub trait NotificationSink: Send + Sync {
    /// Error type returned by the sink.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Deliver one event.
    fn publish(&self, event: NotificationEvent) -> BoxFuture<'_, (), Self::Error>;
}

/// A factory for creating service instances.
///
/// The backend implements this to hand the scheduling core its
/// collaborators without the core knowing which concrete ones are wired.
pub trait ServiceFactory: Send + Sync {
    /// Get the notification sink instance.
    fn notification_sink(&self) -> Arc<dyn NotificationSink<Error = BoxedError>>;

    /// Get the identity provider instance.
    fn identity_provider(&self) -> Arc<dyn IdentityProvider>;
}
