//! The completion-provider capability.

use async_trait::async_trait;

use crate::error::ProviderError;

/// Per-call options. Providers ignore what they do not support.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompletionOptions {
    /// System instruction sent ahead of the prompt.
    pub system: Option<String>,
    pub temperature: Option<f64>,
}

impl CompletionOptions {
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Something that turns a prompt into a text completion, or fails.
///
/// This abstraction lets the router be tested without network access.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Short provider name used in logs and messages.
    fn name(&self) -> &'static str;

    /// Send one prompt and return the completion text verbatim.
    async fn complete(
        &self,
        prompt: &str,
        options: &CompletionOptions,
    ) -> Result<String, ProviderError>;
}

/// Truncate a response body for error messages, respecting char boundaries.
pub(crate) fn truncate_body(body: &str, max_chars: usize) -> String {
    let mut truncated: String = body.chars().take(max_chars).collect();
    if body.chars().count() > max_chars {
        truncated.push_str("...");
    }
    truncated
}
