use crate::log_info;
use crate::shared::errors::AppError;
use std::env;
use std::time::Duration;

pub const BACKEND_URL_VAR: &str = "TIPDESK_BACKEND_URL";
pub const BACKEND_KEY_VAR: &str = "TIPDESK_BACKEND_KEY";
pub const PREDICTIONS_TABLE_VAR: &str = "TIPDESK_PREDICTIONS_TABLE";
pub const MATCHES_TABLE_VAR: &str = "TIPDESK_MATCHES_TABLE";
pub const TIMEOUT_VAR: &str = "TIPDESK_TIMEOUT_SECS";

/// Connection settings for the hosted backend that owns prediction storage
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub base_url: String,
    pub api_key: String,
    pub predictions_table: String,
    pub matches_table: String,
    pub timeout: Duration,
}

impl BackendConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            predictions_table: "predictions".to_string(),
            matches_table: "prediction_matches".to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Read configuration from process environment (call `dotenvy::dotenv()` first)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(BACKEND_URL_VAR)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| {
                AppError::ConfigError(format!("{} environment variable not found", BACKEND_URL_VAR))
            })?;

        if !base_url.starts_with("https://") && !base_url.starts_with("http://") {
            return Err(AppError::ConfigError(format!(
                "{} must start with http:// or https://",
                BACKEND_URL_VAR
            )));
        }

        let api_key = lookup(BACKEND_KEY_VAR)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| {
                AppError::ConfigError(format!("{} environment variable not found", BACKEND_KEY_VAR))
            })?;

        let mut config = Self::new(base_url, api_key);

        if let Some(table) = lookup(PREDICTIONS_TABLE_VAR).filter(|v| !v.trim().is_empty()) {
            config.predictions_table = table;
        }
        if let Some(table) = lookup(MATCHES_TABLE_VAR).filter(|v| !v.trim().is_empty()) {
            config.matches_table = table;
        }
        if let Some(raw) = lookup(TIMEOUT_VAR) {
            let secs = raw.trim().parse::<u64>().map_err(|_| {
                AppError::ConfigError(format!("{} must be a whole number of seconds", TIMEOUT_VAR))
            })?;
            config.timeout = Duration::from_secs(secs.max(1));
        }

        // Log target host without exposing the key
        log_info!("Backend configured at {}", config.base_url);

        Ok(config)
    }

    /// REST endpoint for a table, e.g. `https://host/rest/v1/predictions`
    pub fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_applied() {
        let config = BackendConfig::from_lookup(lookup_from(&[
            (BACKEND_URL_VAR, "https://example.backend.io/"),
            (BACKEND_KEY_VAR, "anon-key"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "https://example.backend.io");
        assert_eq!(config.predictions_table, "predictions");
        assert_eq!(config.matches_table, "prediction_matches");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(
            config.table_url(&config.matches_table),
            "https://example.backend.io/rest/v1/prediction_matches"
        );
    }

    #[test]
    fn test_overrides() {
        let config = BackendConfig::from_lookup(lookup_from(&[
            (BACKEND_URL_VAR, "http://localhost:54321"),
            (BACKEND_KEY_VAR, "service-key"),
            (PREDICTIONS_TABLE_VAR, "tips"),
            (MATCHES_TABLE_VAR, "tip_matches"),
            (TIMEOUT_VAR, "5"),
        ]))
        .unwrap();

        assert_eq!(config.predictions_table, "tips");
        assert_eq!(config.matches_table, "tip_matches");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_missing_url_is_config_error() {
        let result = BackendConfig::from_lookup(lookup_from(&[(BACKEND_KEY_VAR, "k")]));
        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }

    #[test]
    fn test_missing_key_is_config_error() {
        let result =
            BackendConfig::from_lookup(lookup_from(&[(BACKEND_URL_VAR, "https://h.io")]));
        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }

    #[test]
    fn test_rejects_non_http_url() {
        let result = BackendConfig::from_lookup(lookup_from(&[
            (BACKEND_URL_VAR, "postgres://db"),
            (BACKEND_KEY_VAR, "k"),
        ]));
        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }

    #[test]
    fn test_bad_timeout() {
        let result = BackendConfig::from_lookup(lookup_from(&[
            (BACKEND_URL_VAR, "https://h.io"),
            (BACKEND_KEY_VAR, "k"),
            (TIMEOUT_VAR, "soon"),
        ]));
        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }
}
