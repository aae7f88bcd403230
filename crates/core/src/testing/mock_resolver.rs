//! Mock intent resolver for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::resolver::{IntentResolver, ResolvedIntent, ResolverError};

/// What the mock returns on the next call.
#[derive(Debug, Clone)]
enum Scripted {
    Intent(ResolvedIntent),
    NoToolCall,
    Error(String),
}

/// Mock implementation of the IntentResolver trait.
///
/// Returns a scripted answer and records every question it was asked.
///
/// # Example
///
/// ```rust,ignore
/// use ticketdesk_core::testing::MockResolver;
///
/// let resolver = MockResolver::new();
/// resolver
///     .set_intent("count_tickets", json!({ "filters": { "status": "open" } }))
///     .await;
///
/// let intent = resolver.resolve("how many open tickets?").await?;
/// assert_eq!(resolver.recorded_messages().await.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MockResolver {
    next: Arc<RwLock<Scripted>>,
    messages: Arc<RwLock<Vec<String>>>,
}

impl Default for MockResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl MockResolver {
    /// Create a mock that makes no tool call until scripted.
    pub fn new() -> Self {
        Self {
            next: Arc::new(RwLock::new(Scripted::NoToolCall)),
            messages: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Create a mock that always resolves to the given intent.
    pub fn with_intent(operation: &str, arguments: serde_json::Value) -> Self {
        Self {
            next: Arc::new(RwLock::new(Scripted::Intent(ResolvedIntent::new(
                operation, arguments,
            )))),
            messages: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn set_intent(&self, operation: &str, arguments: serde_json::Value) {
        *self.next.write().await = Scripted::Intent(ResolvedIntent::new(operation, arguments));
    }

    pub async fn set_no_tool_call(&self) {
        *self.next.write().await = Scripted::NoToolCall;
    }

    /// Make subsequent calls fail with an API error.
    pub async fn set_error(&self, message: impl Into<String>) {
        *self.next.write().await = Scripted::Error(message.into());
    }

    pub async fn recorded_messages(&self) -> Vec<String> {
        self.messages.read().await.clone()
    }
}

#[async_trait]
impl IntentResolver for MockResolver {
    fn name(&self) -> &str {
        "mock"
    }

    async fn resolve(&self, message: &str) -> Result<Option<ResolvedIntent>, ResolverError> {
        self.messages.write().await.push(message.to_string());

        match &*self.next.read().await {
            Scripted::Intent(intent) => Ok(Some(intent.clone())),
            Scripted::NoToolCall => Ok(None),
            Scripted::Error(message) => Err(ResolverError::Api {
                status: 500,
                message: message.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio_test::{assert_err, assert_ok};

    #[tokio::test]
    async fn test_scripted_answers() {
        let resolver = MockResolver::new();
        assert!(assert_ok!(resolver.resolve("hello").await).is_none());

        resolver.set_intent("count_tickets", json!({})).await;
        let intent = assert_ok!(resolver.resolve("how many?").await).unwrap();
        assert_eq!(intent.operation, "count_tickets");

        resolver.set_error("boom").await;
        let err = assert_err!(resolver.resolve("again").await);
        assert!(matches!(err, ResolverError::Api { status: 500, .. }));

        assert_eq!(
            resolver.recorded_messages().await,
            vec!["hello", "how many?", "again"]
        );
    }
}
