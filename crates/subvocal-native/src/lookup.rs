//! External definition lookup collaborator
//!
//! Resolves a word to a natural-language definition over HTTP. The core
//! contract is deliberately thin: no auth, no retry, no timeout. Every
//! failure mode surfaces as a [`LookupError`]; the decoder converts that
//! to the not-found placeholder so a missing definition never blocks the
//! rest of the pipeline.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

/// Default dictionary endpoint; the word is appended as a path segment.
const DEFAULT_ENDPOINT: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";

/// Errors contacting the definition service.
///
/// Recovered at the decoder boundary, never surfaced to callers of
/// `process_and_predict`.
#[derive(Error, Debug)]
pub enum LookupError {
    /// Transport-level failure (DNS, connect, TLS, read).
    #[error("definition request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Service answered with a non-success status code.
    #[error("definition service returned HTTP {status}")]
    Status {
        /// The HTTP status code received
        status: u16,
    },

    /// Response body did not contain the expected definition fields.
    #[error("definition payload missing expected fields for {word:?}")]
    MalformedPayload {
        /// The word that was looked up
        word: String,
    },
}

/// Collaborator that resolves a word to a definition string.
#[async_trait]
pub trait DefinitionLookup: Send + Sync {
    /// Fetch the definition for a word.
    async fn definition(&self, word: &str) -> Result<String, LookupError>;
}

/// HTTP client for a dictionaryapi.dev-shaped endpoint.
///
/// The payload walk mirrors the service's shape: first entry → first
/// meaning → first definition → `definition` string.
#[derive(Clone, Debug)]
pub struct DictionaryApiClient {
    client: Client,
    endpoint: String,
}

impl DictionaryApiClient {
    /// Create a client against the default public endpoint.
    #[must_use]
    pub fn new() -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT)
    }

    /// Create a client against a custom base endpoint (used by tests).
    #[must_use]
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    fn extract_definition(payload: &Value, word: &str) -> Result<String, LookupError> {
        payload
            .get(0)
            .and_then(|entry| entry.get("meanings"))
            .and_then(|meanings| meanings.get(0))
            .and_then(|meaning| meaning.get("definitions"))
            .and_then(|definitions| definitions.get(0))
            .and_then(|definition| definition.get("definition"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| LookupError::MalformedPayload {
                word: word.to_string(),
            })
    }
}

impl Default for DictionaryApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DefinitionLookup for DictionaryApiClient {
    async fn definition(&self, word: &str) -> Result<String, LookupError> {
        let url = format!("{}/{}", self.endpoint, word);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status {
                status: status.as_u16(),
            });
        }

        let payload: Value = response.json().await?;
        Self::extract_definition(&payload, word)
    }
}

// ============================================================================
// Tests
// ============================================================================
