use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load run configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an unparsable value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load run configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an unparsable value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build run configuration using the provided env-var lookup function.
///
/// Every variable is optional; the lookup indirection keeps the parsing
/// testable with a plain `HashMap`.
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

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_flag = |var: &str, default: &str| -> Result<bool, ConfigError> {
        let raw = or_default(var, default);
        parse_bool(&raw).ok_or_else(|| invalid(var, format!("expected a boolean, got '{raw}'")))
    };

    let env = parse_environment(&or_default("BRANDLENS_ENV", "development"));
    let log_level = or_default("BRANDLENS_LOG_LEVEL", "info");
    let targets_path = PathBuf::from(or_default(
        "BRANDLENS_TARGETS_PATH",
        "./config/targets.yaml",
    ));

    let require_mention = parse_flag("BRANDLENS_REQUIRE_MENTION", "true")?;
    let excerpt_radius = parse_usize("BRANDLENS_EXCERPT_RADIUS", "75")?;
    let top_domains = parse_usize("BRANDLENS_TOP_DOMAINS", "5")?;
    let exclude_neutral_terms = parse_flag("BRANDLENS_EXCLUDE_NEUTRAL_TERMS", "false")?;

    let fetch_timeout_secs = parse_u64("BRANDLENS_FETCH_TIMEOUT_SECS", "30")?;
    let fetch_user_agent = or_default(
        "BRANDLENS_FETCH_USER_AGENT",
        "brandlens/0.1 (brand-context-analysis)",
    );
    let fetch_delay_ms = parse_u64("BRANDLENS_FETCH_DELAY_MS", "1000")?;
    let fetch_max_retries = parse_u32("BRANDLENS_FETCH_MAX_RETRIES", "3")?;
    let fetch_backoff_base_ms = parse_u64("BRANDLENS_FETCH_BACKOFF_BASE_MS", "500")?;

    Ok(AppConfig {
        env,
        log_level,
        targets_path,
        require_mention,
        excerpt_radius,
        top_domains,
        exclude_neutral_terms,
        fetch_timeout_secs,
        fetch_user_agent,
        fetch_delay_ms,
        fetch_max_retries,
        fetch_backoff_base_ms,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
