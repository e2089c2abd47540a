use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let non_empty_path = |var: &str| -> Result<Option<PathBuf>, ConfigError> {
        match lookup(var) {
            Ok(raw) if raw.trim().is_empty() => Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "path must not be empty".to_string(),
            }),
            Ok(raw) => Ok(Some(PathBuf::from(raw))),
            Err(_) => Ok(None),
        }
    };

    let env = parse_environment(&or_default("PROMOTORIA_ENV", "development"))?;
    let bind_addr = parse_addr("PROMOTORIA_BIND_ADDR", "0.0.0.0:5005")?;
    let log_level = or_default("PROMOTORIA_LOG_LEVEL", "info");

    let data_root = non_empty_path("PROMOTORIA_DATA_ROOT")?.unwrap_or_else(|| PathBuf::from("."));
    let themes_path =
        non_empty_path("PROMOTORIA_THEMES_PATH")?.unwrap_or_else(|| data_root.join("themes"));
    let settings_path = non_empty_path("PROMOTORIA_SETTINGS_PATH")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        data_root,
        themes_path,
        settings_path,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "PROMOTORIA_ENV".to_string(),
            reason: format!("expected development, test or production, got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
