use crate::app_config::{AppConfig, Environment};
use crate::dates::{CenturyPolicy, DateNormalizer};
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
/// Every variable has a default, so an empty environment yields a usable
/// configuration pointing at the bundled sample exports.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_i32 = |var: &str, default: &str| -> Result<i32, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<i32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("TKDASH_ENV", "development"))?;
    let log_level = or_default("TKDASH_LOG_LEVEL", "info");
    let overview_source = or_default("TKDASH_OVERVIEW_SOURCE", "./data/Overview.csv");
    let content_source = or_default("TKDASH_CONTENT_SOURCE", "./data/Content.csv");
    let tag_presets_path = PathBuf::from(or_default(
        "TKDASH_TAG_PRESETS_PATH",
        "./config/tag_presets.yaml",
    ));

    let century_base = parse_i32("TKDASH_CENTURY_BASE", "2000")?;
    let century = CenturyPolicy::new(century_base).ok_or_else(|| {
        invalid(
            "TKDASH_CENTURY_BASE",
            format!(
                "{century_base} is not a multiple of 100 between 0 and {}",
                CenturyPolicy::MAX_BASE
            ),
        )
    })?;

    let fetch_timeout_secs = parse_u64("TKDASH_FETCH_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("TKDASH_USER_AGENT", "tkdash/0.1 (analytics-dashboard)");

    let dates = DateNormalizer::new(century);
    let parse_date = |var: &str, default: &str| {
        let raw = or_default(var, default);
        dates.normalize(&raw).map_err(|e| invalid(var, e.to_string()))
    };
    let default_start = parse_date("TKDASH_DEFAULT_START", "2024-02-01")?;
    let default_end = parse_date("TKDASH_DEFAULT_END", "2024-02-28")?;

    let default_min_views = parse_u64("TKDASH_DEFAULT_MIN_VIEWS", "0")?;
    let default_max_views = parse_u64("TKDASH_DEFAULT_MAX_VIEWS", "200000")?;

    Ok(AppConfig {
        env,
        log_level,
        overview_source,
        content_source,
        tag_presets_path,
        century,
        fetch_timeout_secs,
        user_agent,
        default_start,
        default_end,
        default_min_views,
        default_max_views,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s.trim() {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "TKDASH_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
