//! Gemini `generateContent` client (primary provider).

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::config::ProviderConfig;
use crate::error::ProviderError;

use super::provider::{CompletionOptions, CompletionProvider, truncate_body};

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default, rename = "promptFeedback")]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PromptFeedback {
    #[serde(rename = "blockReason")]
    block_reason: Option<String>,
}

/// Gemini REST client.
pub struct GeminiProvider {
    config: ProviderConfig,
    client: reqwest::Client,
}

impl GeminiProvider {
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[async_trait]
impl CompletionProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "Gemini"
    }

    async fn complete(
        &self,
        prompt: &str,
        options: &CompletionOptions,
    ) -> Result<String, ProviderError> {
        let mut body = json!({
            "contents": [
                { "role": "user", "parts": [{ "text": prompt }] }
            ]
        });
        if let Some(system) = &options.system {
            body["systemInstruction"] = json!({ "parts": [{ "text": system }] });
        }
        if let Some(temperature) = options.temperature {
            body["generationConfig"] = json!({ "temperature": temperature });
        }

        debug!("Gemini request to model {}", self.config.model);

        let res = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, &self.config.api_key)
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

        parse_generate_content(&text)
    }
}

/// Join the text parts of the first candidate.
fn parse_generate_content(body: &str) -> Result<String, ProviderError> {
    let parsed: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

    let Some(candidate) = parsed.candidates.into_iter().next() else {
        let reason = parsed
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .unwrap_or_else(|| "none given".to_string());
        return Err(ProviderError::MalformedResponse(format!(
            "no candidates returned (block reason: {})",
            reason
        )));
    };

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(ProviderError::EmptyCompletion);
    }
    Ok(text)
}
