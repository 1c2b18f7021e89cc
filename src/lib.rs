//! pricewise - A CLI tool that suggests fair resale prices for second-hand items.
//!
//! # Overview
//!
//! pricewise builds a pricing prompt from typed product attributes, asks a
//! primary completion provider (Gemini) for a price range with reasoning,
//! falls back once to a secondary provider (Groq) on failure, and recovers a
//! structured [`PriceSuggestion`] from the free-form reply. The suggested
//! range is parsed into a numeric [`PriceInterval`] and compared with the
//! seller's asking price.

pub mod config;
pub mod error;
pub mod llm;
pub mod pricing;

// Re-export commonly used types
pub use config::Config;
pub use error::{ConfigError, ProviderError, QueryError};
pub use llm::{CompletionError, CompletionProvider, CompletionRouter, RawCompletion, Tier};
pub use pricing::{
    Category, Condition, PriceInterval, PriceReport, PriceSuggestion, ProductQuery, Reasoning,
    ReasoningKey, Verdict, suggest_price,
};
