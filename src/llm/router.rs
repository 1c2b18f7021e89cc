//! Primary/secondary provider orchestration.
//!
//! One attempt per provider per request: the secondary provider is only tried
//! after the primary has fully failed, and a secondary failure is terminal.

use std::fmt;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::ProviderError;

use super::gemini::GeminiProvider;
use super::groq::GroqProvider;
use super::provider::{CompletionOptions, CompletionProvider};

/// System instruction sent to the secondary provider.
pub const SECONDARY_SYSTEM_PROMPT: &str = "You are a pricing assistant.";
/// Sampling temperature for the secondary provider.
pub const SECONDARY_TEMPERATURE: f64 = 0.3;

/// Which slot produced a completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Primary,
    Secondary,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Primary => "primary",
            Tier::Secondary => "secondary",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A provider error tagged with the provider that raised it.
#[derive(Debug)]
pub struct ProviderFailure {
    pub provider: &'static str,
    pub error: ProviderError,
}

impl ProviderFailure {
    pub fn summary(&self) -> String {
        let reason = match &self.error {
            ProviderError::Request(_) => "request failed".to_string(),
            ProviderError::Status { status, .. } => format!("HTTP {}", status),
            ProviderError::Timeout(limit) => format!("timed out after {:?}", limit),
            ProviderError::EmptyCompletion => "empty completion".to_string(),
            ProviderError::MalformedResponse(_) => "malformed response".to_string(),
        };
        format!("{} {}", self.provider, reason)
    }

    pub fn detail(&self) -> String {
        format!("{}: {}", self.provider, self.error)
    }
}

impl fmt::Display for ProviderFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

/// Raw text returned by one of the providers.
#[derive(Debug)]
pub struct RawCompletion {
    pub text: String,
    pub tier: Tier,
    pub provider: &'static str,
    /// Set when the secondary answered because the primary failed.
    pub primary_error: Option<ProviderFailure>,
}

/// Orchestration error.
#[derive(Debug)]
pub enum CompletionError {
    BothProvidersFailed {
        primary: ProviderFailure,
        secondary: ProviderFailure,
    },
}

impl CompletionError {
    pub fn summary(&self) -> String {
        match self {
            CompletionError::BothProvidersFailed { primary, secondary } => format!(
                "Both completion providers failed. {}. {}.",
                primary.summary(),
                secondary.summary()
            ),
        }
    }

    pub fn detailed(&self) -> String {
        match self {
            CompletionError::BothProvidersFailed { primary, secondary } => format!(
                "Both completion providers failed. {}. {}.",
                primary.detail(),
                secondary.detail()
            ),
        }
    }
}

impl fmt::Display for CompletionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

impl std::error::Error for CompletionError {}

/// Two-tier completion router.
pub struct CompletionRouter {
    primary: Box<dyn CompletionProvider>,
    secondary: Box<dyn CompletionProvider>,
    primary_timeout: Option<Duration>,
    secondary_timeout: Option<Duration>,
}

impl CompletionRouter {
    /// Router with no bound on the primary call and the default bound on
    /// the secondary call.
    pub fn new(primary: Box<dyn CompletionProvider>, secondary: Box<dyn CompletionProvider>) -> Self {
        Self {
            primary,
            secondary,
            primary_timeout: None,
            secondary_timeout: Some(Duration::from_secs(
                crate::config::DEFAULT_SECONDARY_TIMEOUT_SECS,
            )),
        }
    }

    /// Gemini as primary, Groq as secondary, timeouts from the config.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Box::new(GeminiProvider::new(config.gemini.clone())),
            Box::new(GroqProvider::new(config.groq.clone())),
        )
        .with_primary_timeout(config.primary_timeout)
        .with_secondary_timeout(Some(config.secondary_timeout))
    }

    pub fn with_primary_timeout(mut self, limit: Option<Duration>) -> Self {
        self.primary_timeout = limit;
        self
    }

    pub fn with_secondary_timeout(mut self, limit: Option<Duration>) -> Self {
        self.secondary_timeout = limit;
        self
    }

    pub fn primary_name(&self) -> &'static str {
        self.primary.name()
    }

    pub fn secondary_name(&self) -> &'static str {
        self.secondary.name()
    }

    /// Get a completion, falling back to the secondary provider once.
    pub async fn complete(&self, prompt: &str) -> Result<RawCompletion, CompletionError> {
        let primary_options = CompletionOptions::default();
        let primary_error =
            match call_provider(&*self.primary, prompt, &primary_options, self.primary_timeout).await {
                Ok(text) => {
                    info!("{} returned a completion", self.primary.name());
                    return Ok(RawCompletion {
                        text,
                        tier: Tier::Primary,
                        provider: self.primary.name(),
                        primary_error: None,
                    });
                }
                Err(error) => ProviderFailure {
                    provider: self.primary.name(),
                    error,
                },
            };

        warn!(
            "Primary provider failed: {}. Falling back to {}.",
            primary_error.detail(),
            self.secondary.name()
        );

        let secondary_options = CompletionOptions::default()
            .with_system(SECONDARY_SYSTEM_PROMPT)
            .with_temperature(SECONDARY_TEMPERATURE);

        match call_provider(&*self.secondary, prompt, &secondary_options, self.secondary_timeout)
            .await
        {
            Ok(text) => Ok(RawCompletion {
                text,
                tier: Tier::Secondary,
                provider: self.secondary.name(),
                primary_error: Some(primary_error),
            }),
            Err(error) => {
                let secondary = ProviderFailure {
                    provider: self.secondary.name(),
                    error,
                };
                warn!("Secondary provider failed: {}", secondary.detail());
                Err(CompletionError::BothProvidersFailed {
                    primary: primary_error,
                    secondary,
                })
            }
        }
    }
}

/// One provider attempt, optionally bounded. Whitespace-only text counts
/// as a failure.
async fn call_provider(
    provider: &dyn CompletionProvider,
    prompt: &str,
    options: &CompletionOptions,
    limit: Option<Duration>,
) -> Result<String, ProviderError> {
    let call = provider.complete(prompt, options);
    let text = match limit {
        Some(limit) => timeout(limit, call)
            .await
            .map_err(|_| ProviderError::Timeout(limit))??,
        None => call.await?,
    };

    if text.trim().is_empty() {
        return Err(ProviderError::EmptyCompletion);
    }
    Ok(text)
}
