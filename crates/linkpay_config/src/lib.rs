use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;

pub mod models;
pub use models::*;

/// Loads the application configuration.
///
/// Sources, in order of precedence (later wins):
/// 1. `config/default` (yaml/toml/json, optional)
/// 2. `config/{RUN_ENV}` (optional)
/// 3. Environment variables with the `LINKPAY` prefix and `__` separator,
///    e.g. `LINKPAY_SERVER__PORT=8000`, `LINKPAY_PLAID__CLIENT_ID=...`.
///
/// API secrets (PLAID_SECRET, STRIPE_SECRET_KEY) are deliberately not part of
/// the config tree; gateway code reads them from the environment at call time,
/// so a missing secret fails at first use rather than at startup.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());

    let builder = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{}", run_env)).required(false))
        .add_source(Environment::with_prefix("LINKPAY").separator("__"));

    builder.build()?.try_deserialize()
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment exactly once.
///
/// The path defaults to ".env" and can be overridden with the DOTENV_OVERRIDE
/// environment variable. A missing file is not an error.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path = env::var("DOTENV_OVERRIDE").unwrap_or_else(|_| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}
