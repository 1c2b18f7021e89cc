//! Process configuration for the completion providers.
//!
//! Credentials are read once at startup into an immutable [`Config`] that is
//! passed explicitly to the provider clients and the router.

use std::env;
use std::fmt;
use std::time::Duration;

use tracing::warn;

use crate::error::ConfigError;

/// Required credential for the primary (Gemini) provider.
pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";
/// Required credential for the secondary (Groq) provider.
pub const GROQ_API_KEY_VAR: &str = "GROQ_API_KEY";

const GEMINI_MODEL_VAR: &str = "PRICEWISE_GEMINI_MODEL";
const GROQ_MODEL_VAR: &str = "PRICEWISE_GROQ_MODEL";
const GEMINI_BASE_URL_VAR: &str = "PRICEWISE_GEMINI_BASE_URL";
const GROQ_BASE_URL_VAR: &str = "PRICEWISE_GROQ_BASE_URL";
const PRIMARY_TIMEOUT_VAR: &str = "PRICEWISE_PRIMARY_TIMEOUT";
const SECONDARY_TIMEOUT_VAR: &str = "PRICEWISE_SECONDARY_TIMEOUT";

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.1-8b-instant";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com";

/// Default bound on the secondary provider call.
pub const DEFAULT_SECONDARY_TIMEOUT_SECS: u64 = 30;

/// Connection settings for one completion provider.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Immutable process-wide configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub gemini: ProviderConfig,
    pub groq: ProviderConfig,
    /// `None` leaves the primary call bounded only by the provider itself.
    pub primary_timeout: Option<Duration>,
    pub secondary_timeout: Duration,
}

impl Config {
    /// Build a configuration with default models, endpoints and timeouts.
    pub fn new(gemini_api_key: impl Into<String>, groq_api_key: impl Into<String>) -> Self {
        Self {
            gemini: ProviderConfig {
                api_key: gemini_api_key.into(),
                model: DEFAULT_GEMINI_MODEL.to_string(),
                base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            },
            groq: ProviderConfig {
                api_key: groq_api_key.into(),
                model: DEFAULT_GROQ_MODEL.to_string(),
                base_url: DEFAULT_GROQ_BASE_URL.to_string(),
            },
            primary_timeout: None,
            secondary_timeout: Duration::from_secs(DEFAULT_SECONDARY_TIMEOUT_SECS),
        }
    }

    /// Load configuration from the process environment.
    ///
    /// Both API keys are required; an unset or empty key is a
    /// [`ConfigError::MissingCredential`]. Everything else is optional.
    pub fn from_env() -> Result<Self, ConfigError> {
        let gemini_key = required_var(GEMINI_API_KEY_VAR)?;
        let groq_key = required_var(GROQ_API_KEY_VAR)?;

        let mut config = Config::new(gemini_key, groq_key);

        if let Some(model) = optional_var(GEMINI_MODEL_VAR) {
            config.gemini.model = model;
        }
        if let Some(model) = optional_var(GROQ_MODEL_VAR) {
            config.groq.model = model;
        }
        if let Some(url) = optional_var(GEMINI_BASE_URL_VAR) {
            config.gemini.base_url = validate_base_url(GEMINI_BASE_URL_VAR, url)?;
        }
        if let Some(url) = optional_var(GROQ_BASE_URL_VAR) {
            config.groq.base_url = validate_base_url(GROQ_BASE_URL_VAR, url)?;
        }

        config.primary_timeout = timeout_var(PRIMARY_TIMEOUT_VAR);
        config.secondary_timeout = timeout_var(SECONDARY_TIMEOUT_VAR)
            .unwrap_or(Duration::from_secs(DEFAULT_SECONDARY_TIMEOUT_SECS));

        Ok(config)
    }

    pub fn with_primary_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.primary_timeout = timeout;
        self
    }

    pub fn with_secondary_timeout(mut self, timeout: Duration) -> Self {
        self.secondary_timeout = timeout;
        self
    }

    pub fn with_gemini_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.gemini.base_url = base_url.into();
        self
    }

    pub fn with_groq_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.groq.base_url = base_url.into();
        self
    }
}

fn required_var(name: &'static str) -> Result<String, ConfigError> {
    optional_var(name).ok_or(ConfigError::MissingCredential(name))
}

fn optional_var(name: &str) -> Option<String> {
    match env::var(name) {
        Ok(v) if !v.trim().is_empty() => Some(v.trim().to_string()),
        _ => None,
    }
}

fn validate_base_url(var: &'static str, value: String) -> Result<String, ConfigError> {
    match reqwest::Url::parse(&value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {
            Ok(value.trim_end_matches('/').to_string())
        }
        _ => Err(ConfigError::InvalidBaseUrl { var, value }),
    }
}

/// Read a timeout in whole seconds.
///
/// Unset, empty, zero or non-numeric values yield `None`; the invalid ones
/// log a warning.
fn timeout_var(name: &str) -> Option<Duration> {
    let raw = optional_var(name)?;
    match raw.parse::<u64>() {
        Ok(0) | Err(_) => {
            warn!("Invalid {} value '{}', ignoring", name, raw);
            None
        }
        Ok(secs) => Some(Duration::from_secs(secs)),
    }
}
