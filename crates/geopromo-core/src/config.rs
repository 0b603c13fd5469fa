use crate::app_config::{AppConfig, Environment, ExpiryPolicy};
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
/// Decoupled from the process environment so tests can drive it from a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let env = parse_environment(&or_default("GEOPROMO_ENV", "development"))?;
    let log_level = or_default("GEOPROMO_LOG_LEVEL", "info");
    let catalog_path = PathBuf::from(or_default(
        "GEOPROMO_CATALOG_PATH",
        "./config/catalog.yaml",
    ));
    let offer_expiry_policy =
        parse_expiry_policy(&or_default("GEOPROMO_OFFER_EXPIRY_POLICY", "ignore"))?;

    Ok(AppConfig {
        env,
        log_level,
        catalog_path,
        offer_expiry_policy,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "GEOPROMO_ENV".to_string(),
            reason: format!("expected development, test, or production; got '{other}'"),
        }),
    }
}

fn parse_expiry_policy(s: &str) -> Result<ExpiryPolicy, ConfigError> {
    match s {
        "ignore" => Ok(ExpiryPolicy::Ignore),
        "exclude-expired" => Ok(ExpiryPolicy::ExcludeExpired),
        other => Err(ConfigError::InvalidEnvVar {
            var: "GEOPROMO_OFFER_EXPIRY_POLICY".to_string(),
            reason: format!("expected ignore or exclude-expired; got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
