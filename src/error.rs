//! Error types for pricewise modules using thiserror.

use std::time::Duration;

use thiserror::Error;

/// Errors from loading process configuration.
///
/// These are fatal: no request can be served without both credentials.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing credential: set {0} in the environment or in a .env file")]
    MissingCredential(&'static str),

    #[error("Invalid base URL in {var}: '{value}'")]
    InvalidBaseUrl { var: &'static str, value: String },
}

/// Errors from a single completion provider call.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Request to completion provider failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("Completion provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Completion provider timed out after {0:?}")]
    Timeout(Duration),

    #[error("Completion provider returned an empty completion")]
    EmptyCompletion,

    #[error("Completion provider returned a malformed response: {0}")]
    MalformedResponse(String),
}

/// Validation errors for a product query. The request never reaches a provider.
#[derive(Error, Debug, PartialEq)]
pub enum QueryError {
    #[error("Product title is required")]
    MissingTitle,

    #[error("Brand is required and could not be inferred from the title")]
    MissingBrand,

    #[error("Unknown category '{0}'. Expected one of: {1}")]
    UnknownCategory(String, String),

    #[error("Unknown condition '{0}'. Expected one of: {1}")]
    UnknownCondition(String, String),

    #[error("Asking price must be a non-negative number, got {0}")]
    InvalidAskingPrice(f64),
}
