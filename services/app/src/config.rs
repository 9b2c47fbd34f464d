//! services/app/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use informes_core::Locale;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Which implementation backs the identity and document-store ports.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Backend {
    Firebase(FirebaseSettings),
    /// Process-local fakes with one seeded account. Useful offline.
    Memory { demo_email: String, demo_password: String },
}

#[derive(Clone, PartialEq, Eq)]
pub struct FirebaseSettings {
    pub api_key: String,
    pub project_id: String,
    pub auth_url: String,
    pub firestore_url: String,
}

impl std::fmt::Debug for FirebaseSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirebaseSettings")
            .field("api_key", &"<redacted>")
            .field("project_id", &self.project_id)
            .field("auth_url", &self.auth_url)
            .field("firestore_url", &self.firestore_url)
            .finish()
    }
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub backend: Backend,
    pub locale: Locale,
    pub log_level: Level,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| ConfigError::MissingVar(key.to_string()))
        };

        // --- Load Backend Settings ---
        let backend_name = var_or("APP_BACKEND", "memory");
        let backend = match backend_name.to_lowercase().as_str() {
            "firebase" => Backend::Firebase(FirebaseSettings {
                api_key: required("FIREBASE_API_KEY")?,
                project_id: required("FIREBASE_PROJECT_ID")?,
                auth_url: trim_url(var_or(
                    "FIREBASE_AUTH_URL",
                    "https://identitytoolkit.googleapis.com",
                )),
                firestore_url: trim_url(var_or(
                    "FIRESTORE_URL",
                    "https://firestore.googleapis.com",
                )),
            }),
            "memory" => Backend::Memory {
                demo_email: var_or("DEMO_EMAIL", "demo@informes.test"),
                demo_password: var_or("DEMO_PASSWORD", "demo1234"),
            },
            other => {
                return Err(ConfigError::InvalidValue(
                    "APP_BACKEND".to_string(),
                    format!("'{}' is not one of: firebase, memory", other),
                ))
            }
        };

        // --- Load Presentation and Logging Settings ---
        let locale_str = var_or("APP_LOCALE", "es");
        let locale = locale_str
            .parse::<Locale>()
            .map_err(|e| ConfigError::InvalidValue("APP_LOCALE".to_string(), e))?;

        let log_level_str = var_or("RUST_LOG", "INFO");
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        Ok(Self {
            backend,
            locale,
            log_level,
        })
    }
}

fn trim_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_to_memory_backend_in_spanish() {
        let config = load(&[]).unwrap();
        assert_eq!(config.locale, Locale::Es);
        assert_eq!(config.log_level, Level::INFO);
        assert!(matches!(config.backend, Backend::Memory { .. }));
    }

    #[test]
    fn firebase_backend_requires_credentials() {
        let err = load(&[("APP_BACKEND", "firebase"), ("FIREBASE_API_KEY", "k")]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar(var) if var == "FIREBASE_PROJECT_ID"));
    }

    #[test]
    fn firebase_urls_lose_trailing_slashes() {
        let config = load(&[
            ("APP_BACKEND", "Firebase"),
            ("FIREBASE_API_KEY", "k"),
            ("FIREBASE_PROJECT_ID", "clase7"),
            ("FIRESTORE_URL", "http://localhost:8080/"),
        ])
        .unwrap();
        match config.backend {
            Backend::Firebase(settings) => {
                assert_eq!(settings.firestore_url, "http://localhost:8080");
                assert_eq!(settings.auth_url, "https://identitytoolkit.googleapis.com");
                assert!(!format!("{:?}", settings).contains("\"k\""));
            }
            other => panic!("unexpected backend {:?}", other),
        }
    }

    #[test]
    fn rejects_unknown_values() {
        assert!(matches!(
            load(&[("APP_BACKEND", "sqlite")]),
            Err(ConfigError::InvalidValue(var, _)) if var == "APP_BACKEND"
        ));
        assert!(matches!(
            load(&[("APP_LOCALE", "fr")]),
            Err(ConfigError::InvalidValue(var, _)) if var == "APP_LOCALE"
        ));
        assert!(matches!(
            load(&[("RUST_LOG", "chatty")]),
            Err(ConfigError::InvalidValue(var, _)) if var == "RUST_LOG"
        ));
    }
}
