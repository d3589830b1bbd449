// --- File: crates/consultify_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- Scheduling Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SchedulingConfig {
    /// How far ahead of an appointment the reminder sweep looks, in minutes.
    #[serde(default = "default_reminder_lead_minutes")]
    pub reminder_lead_minutes: i64,
    /// Offset between occurrences of a recurring slot, in days.
    #[serde(default = "default_recurrence_interval_days")]
    pub recurrence_interval_days: i64,
}

fn default_reminder_lead_minutes() -> i64 {
    120
}

fn default_recurrence_interval_days() -> i64 {
    7
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            reminder_lead_minutes: default_reminder_lead_minutes(),
            recurrence_interval_days: default_recurrence_interval_days(),
        }
    }
}

// --- Notification Config ---
// Holds the outbound webhook target. The URL usually carries a secret path
// segment, so prefer loading it via CONSULTIFY__NOTIFY__WEBHOOK_URL.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct NotifyConfig {
    pub webhook_url: Option<String>,
}

// --- Auth Config ---
/// One entry of the static API token table consumed by the backend's
/// identity provider. Token issuance itself lives outside this service.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiToken {
    pub token: String,
    pub subject: String,
    #[serde(default)]
    pub admin: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AuthConfig {
    #[serde(default)]
    pub tokens: Vec<ApiToken>,
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_notify: bool,

    // --- Feature Configurations ---
    #[serde(default)]
    pub scheduling: SchedulingConfig,
    #[serde(default)]
    pub notify: Option<NotifyConfig>,
    #[serde(default)]
    pub auth: Option<AuthConfig>,
}
