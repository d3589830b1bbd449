// --- File: crates/consultify_config/src/lib.rs ---

pub mod models;

pub use models::{ApiToken, AppConfig, AuthConfig, NotifyConfig, SchedulingConfig, ServerConfig};

use config::{Config, ConfigError, Environment, File};
use std::sync::Once;

static DOTENV: Once = Once::new();

/// Loads `.env` exactly once per process. Safe to call from every entry
/// point that might run before `load_config`.
pub fn ensure_dotenv_loaded() {
    DOTENV.call_once(|| {
        let _ = dotenv::dotenv();
    });
}

/// Loads the application configuration.
///
/// Layering, lowest precedence first: `config/default.*`, then
/// `config/{RUN_MODE}.*` (RUN_MODE defaults to `development`), then
/// `CONSULTIFY__*` environment variables (`__` separates nesting, e.g.
/// `CONSULTIFY__SERVER__PORT=8086`).
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();
    let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

    let config = Config::builder()
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 8086)?
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{run_mode}")).required(false))
        .add_source(Environment::with_prefix("CONSULTIFY").separator("__"))
        .build()?;

    config.try_deserialize()
}
