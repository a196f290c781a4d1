use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
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
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Parsing and validation are decoupled from the process environment so tests
/// can drive them with a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_metres = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let value = or_default(var, default)
            .parse::<f64>()
            .map_err(|e| invalid(var, e.to_string()))?;
        if value.is_nan() {
            return Err(invalid(var, "distance must be a number".to_string()));
        }
        Ok(value)
    };

    let data_api_url = require("SPOTLIGHT_DATA_API_URL")?;
    let data_api_key = require("SPOTLIGHT_DATA_API_KEY")?;
    let events_table = or_default("SPOTLIGHT_EVENTS_TABLE", "events");

    let env = parse_environment(&or_default("SPOTLIGHT_ENV", "development"))?;

    let bind_addr = parse_addr("SPOTLIGHT_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("SPOTLIGHT_LOG_LEVEL", "info");

    let cluster_radius_m = parse_metres("SPOTLIGHT_CLUSTER_RADIUS_M", "1000")?;
    let cache_ttl_secs = parse_u64("SPOTLIGHT_CACHE_TTL_SECS", "300")?;
    let nearest_threshold_m = parse_metres("SPOTLIGHT_NEAREST_THRESHOLD_M", "500")?;

    let request_timeout_secs = parse_u64("SPOTLIGHT_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("SPOTLIGHT_USER_AGENT", "spotlight/0.1 (event-clustering)");

    Ok(AppConfig {
        data_api_url,
        data_api_key,
        events_table,
        env,
        bind_addr,
        log_level,
        cluster_radius_m,
        cache_ttl_secs,
        nearest_threshold_m,
        request_timeout_secs,
        user_agent,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SPOTLIGHT_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
