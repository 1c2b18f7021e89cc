//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use pricewise::ProviderError;
use pricewise::llm::{CompletionOptions, CompletionProvider};

/// Get the path to test fixtures directory.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Get the path to a completion text fixture.
pub fn completion_fixture(name: &str) -> PathBuf {
    fixtures_dir().join("completions").join(name)
}

/// Get the path to a provider HTTP body fixture.
pub fn provider_fixture(name: &str) -> PathBuf {
    fixtures_dir().join("providers").join(name)
}

/// Read a fixture file as a string.
pub fn read_fixture(path: PathBuf) -> String {
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {:?}: {}", path, e))
}

/// A provider that returns a fixed completion (or fails) and records calls.
pub struct ScriptedProvider {
    name: &'static str,
    reply: Option<String>,
    calls: Arc<AtomicUsize>,
    seen: Arc<Mutex<Vec<(String, CompletionOptions)>>>,
}

impl ScriptedProvider {
    /// Provider that always answers with `text`.
    pub fn answering(name: &'static str, text: &str) -> Self {
        Self {
            name,
            reply: Some(text.to_string()),
            calls: Arc::new(AtomicUsize::new(0)),
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Provider that always fails with HTTP 503.
    pub fn failing(name: &'static str) -> Self {
        Self {
            name,
            reply: None,
            calls: Arc::new(AtomicUsize::new(0)),
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Shared call counter, readable after the provider is boxed.
    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }

    /// Shared log of (prompt, options) pairs received.
    pub fn seen(&self) -> Arc<Mutex<Vec<(String, CompletionOptions)>>> {
        Arc::clone(&self.seen)
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn complete(
        &self,
        prompt: &str,
        options: &CompletionOptions,
    ) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen
            .lock()
            .expect("seen lock poisoned")
            .push((prompt.to_string(), options.clone()));

        match &self.reply {
            Some(text) => Ok(text.clone()),
            None => Err(ProviderError::Status {
                status: 503,
                body: "service unavailable".to_string(),
            }),
        }
    }
}

/// Read a call counter.
pub fn count(calls: &Arc<AtomicUsize>) -> usize {
    calls.load(Ordering::SeqCst)
}
