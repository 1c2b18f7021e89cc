//! Groq OpenAI-compatible chat completions client (secondary provider).

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::config::ProviderConfig;
use crate::error::ProviderError;

use super::provider::{CompletionOptions, CompletionProvider, truncate_body};

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

/// Groq HTTP client.
pub struct GroqProvider {
    config: ProviderConfig,
    client: reqwest::Client,
}

impl GroqProvider {
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/openai/v1/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl CompletionProvider for GroqProvider {
    fn name(&self) -> &'static str {
        "Groq"
    }

    async fn complete(
        &self,
        prompt: &str,
        options: &CompletionOptions,
    ) -> Result<String, ProviderError> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &options.system {
            messages.push(json!({ "role": "system", "content": system }));
        }
        messages.push(json!({ "role": "user", "content": prompt }));

        let mut body = json!({
            "model": self.config.model,
            "messages": messages,
        });
        if let Some(temperature) = options.temperature {
            body["temperature"] = json!(temperature);
        }

        debug!("Groq request to model {}", self.config.model);

        let res = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(ProviderError::Request)?;

        let status = res.status();
        let text = res.text().await.map_err(ProviderError::Request)?;
        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body: truncate_body(&text, 500),
            });
        }

        parse_chat_response(&text)
    }
}

fn parse_chat_response(body: &str) -> Result<String, ProviderError> {
    let parsed: ChatResponse = serde_json::from_str(body)
        .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

    let content = parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .unwrap_or_default();

    if content.trim().is_empty() {
        return Err(ProviderError::EmptyCompletion);
    }
    Ok(content)
}
