//! Intent resolution: turning a free-text question into an operation call.
//!
//! The resolver only proposes `(operation, arguments)`; validation and
//! execution belong to [`crate::intent::Dispatcher`].

mod openai;
mod tools;

pub use openai::OpenAiResolver;
pub use tools::{tool_definitions, SYSTEM_PROMPT};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Errors that can occur while resolving a question.
#[derive(Debug, thiserror::Error)]
pub enum ResolverError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Not configured")]
    NotConfigured,
}

/// An operation call proposed by the model, not yet validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedIntent {
    pub operation: String,
    pub arguments: Value,
}

impl ResolvedIntent {
    pub fn new(operation: impl Into<String>, arguments: Value) -> Self {
        Self {
            operation: operation.into(),
            arguments,
        }
    }
}

/// Trait for question-to-intent translators.
#[async_trait]
pub trait IntentResolver: Send + Sync {
    /// Name of this resolver for logging.
    fn name(&self) -> &str;

    /// Resolve a question. `Ok(None)` means the question maps to no
    /// operation.
    async fn resolve(&self, message: &str) -> Result<Option<ResolvedIntent>, ResolverError>;
}
