use serde::Deserialize;
use std::env;
use std::str::FromStr;
use std::time::Duration;

// Главная структура конфигурации - контейнер для всех настроек
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub api: ApiConfig,
    pub circuit_breaker: CircuitBreakerConfig,
    pub features: FeatureFlags,
}

// Настройки приложения
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub environment: String,
    pub rust_log: String,
}

/// Where the backend lives and how requests to it are made.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    /// Sent as a bearer token when present.
    pub token: Option<String>,
    /// Name of the suggestion resource; some backends call it `votes`.
    pub suggestions_resource: String,
    pub request_timeout_seconds: u64,
}

// Настройки Circuit Breaker
#[derive(Debug, Clone, Deserialize)]
pub struct CircuitBreakerConfig {
    pub failure_threshold: u32,
    pub timeout_seconds: u64,
}

// Feature flags для включения/выключения функциональности
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureFlags {
    pub enable_circuit_breaker: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got {value:?}")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            app: AppConfig {
                environment: "development".to_string(),
                rust_log: "screening_estore=info".to_string(),
            },
            api: ApiConfig {
                base_url: "http://127.0.0.1:8080".to_string(),
                token: None,
                suggestions_resource: "suggestions".to_string(),
                request_timeout_seconds: 30,
            },
            circuit_breaker: CircuitBreakerConfig {
                failure_threshold: 5,
                timeout_seconds: 60,
            },
            features: FeatureFlags {
                enable_circuit_breaker: true,
            },
        }
    }
}

impl Config {
    /// Reads the process environment; unset variables fall back to [`Config::default`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`Config::from_env`] but with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        Ok(Config {
            app: AppConfig {
                environment: lookup("ENVIRONMENT").unwrap_or(defaults.app.environment),
                rust_log: lookup("RUST_LOG").unwrap_or(defaults.app.rust_log),
            },
            api: ApiConfig {
                base_url: lookup("ESTORE_API_URL")
                    .map(|url| url.trim_end_matches('/').to_string())
                    .unwrap_or(defaults.api.base_url),
                token: lookup("ESTORE_API_TOKEN").filter(|token| !token.is_empty()),
                suggestions_resource: lookup("ESTORE_SUGGESTIONS_RESOURCE")
                    .map(|name| name.trim_matches('/').to_string())
                    .unwrap_or(defaults.api.suggestions_resource),
                request_timeout_seconds: parse_or(
                    &lookup,
                    "ESTORE_REQUEST_TIMEOUT_SECONDS",
                    "a number of seconds",
                    defaults.api.request_timeout_seconds,
                )?,
            },
            circuit_breaker: CircuitBreakerConfig {
                failure_threshold: parse_or(
                    &lookup,
                    "CIRCUIT_BREAKER_FAILURE_THRESHOLD",
                    "a valid number",
                    defaults.circuit_breaker.failure_threshold,
                )?,
                timeout_seconds: parse_or(
                    &lookup,
                    "CIRCUIT_BREAKER_TIMEOUT_SECONDS",
                    "a valid number",
                    defaults.circuit_breaker.timeout_seconds,
                )?,
            },
            features: FeatureFlags {
                enable_circuit_breaker: parse_or(
                    &lookup,
                    "ENABLE_CIRCUIT_BREAKER",
                    "true or false",
                    defaults.features.enable_circuit_breaker,
                )?,
            },
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, expected: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, expected, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.api.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.api.suggestions_resource, "suggestions");
        assert!(config.api.token.is_none());
        assert_eq!(config.circuit_breaker.failure_threshold, 5);
        assert!(config.features.enable_circuit_breaker);
    }

    #[test]
    fn overrides_are_normalized() {
        let config = Config::from_lookup(lookup_from(&[
            ("ESTORE_API_URL", "http://backend:9000/"),
            ("ESTORE_SUGGESTIONS_RESOURCE", "/votes/"),
            ("ESTORE_API_TOKEN", ""),
            ("ENABLE_CIRCUIT_BREAKER", "false"),
        ]))
        .unwrap();
        assert_eq!(config.api.base_url, "http://backend:9000");
        assert_eq!(config.api.suggestions_resource, "votes");
        assert!(config.api.token.is_none());
        assert!(!config.features.enable_circuit_breaker);
    }

    #[test]
    fn bad_number_is_reported_not_panicked() {
        let err = Config::from_lookup(lookup_from(&[("CIRCUIT_BREAKER_TIMEOUT_SECONDS", "soon")]))
            .unwrap_err();
        assert!(err.to_string().contains("CIRCUIT_BREAKER_TIMEOUT_SECONDS"));
    }
}
