use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value fails to parse. Every variable has a
/// default, so an empty environment always succeeds.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a value fails to parse.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let catalog_base_url = or_default(
        "STOREMAP_CATALOG_BASE_URL",
        "https://itunes.apple.com/search",
    );
    let result_limit = parse_u32("STOREMAP_RESULT_LIMIT", "200")?;
    let http_timeout_secs = parse_u64("STOREMAP_HTTP_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("STOREMAP_USER_AGENT", "storemap/0.1 (catalog-search)");
    let log_level = or_default("STOREMAP_LOG_LEVEL", "info");
    let default_span_meters = parse_f64("STOREMAP_DEFAULT_SPAN_METERS", "1000")?;
    let fit_margin = parse_f64("STOREMAP_FIT_MARGIN", "1.1")?;

    Ok(AppConfig {
        catalog_base_url,
        result_limit,
        http_timeout_secs,
        user_agent,
        log_level,
        default_span_meters,
        fit_margin,
    })
}
