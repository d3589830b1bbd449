// --- File: crates/consultify_notify/src/lib.rs ---

pub mod service;

pub use service::{NotifyError, TracingNotifier, WebhookNotifier};
