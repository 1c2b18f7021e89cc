//! Completion providers, fallback routing and JSON extraction.

pub mod gemini;
pub mod groq;
pub mod json;
pub mod provider;
pub mod router;

pub use gemini::GeminiProvider;
pub use groq::GroqProvider;
pub use json::{JsonExtraction, extract_json_object};
pub use provider::{CompletionOptions, CompletionProvider};
pub use router::{CompletionError, CompletionRouter, ProviderFailure, RawCompletion, Tier};
