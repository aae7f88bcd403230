//! OpenAI-compatible chat completions resolver.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use super::tools::{tool_definitions, SYSTEM_PROMPT};
use super::{IntentResolver, ResolvedIntent, ResolverError};
use crate::config::ResolverConfig;

/// Resolves questions through the `/v1/chat/completions` tool-calling API.
pub struct OpenAiResolver {
    client: reqwest::Client,
    api_key: String,
    model: String,
    api_base: String,
    timeout: Duration,
}

impl OpenAiResolver {
    /// Build a resolver from configuration. Requires an API key.
    pub fn new(config: &ResolverConfig) -> Result<Self, ResolverError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or(ResolverError::NotConfigured)?;
        let timeout = Duration::from_secs(u64::from(config.timeout_secs));

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ResolverError::Http(e.to_string()))?;

        Ok(Self {
            client,
            api_key,
            model: config.model.clone(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    tools: Value,
    tool_choice: &'static str,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    tool_calls: Option<Vec<ToolCall>>,
}

#[derive(Debug, Deserialize)]
struct ToolCall {
    function: FunctionCall,
}

#[derive(Debug, Deserialize)]
struct FunctionCall {
    name: String,
    #[serde(default)]
    arguments: String,
}

#[derive(Debug, Deserialize)]
struct OpenAiError {
    error: OpenAiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorDetail {
    message: String,
}

/// Take the first tool call of the first choice, if any.
fn first_intent(response: ChatResponse) -> Result<Option<ResolvedIntent>, ResolverError> {
    let Some(call) = response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.tool_calls)
        .and_then(|calls| calls.into_iter().next())
    else {
        return Ok(None);
    };

    let raw = call.function.arguments.trim();
    let arguments = if raw.is_empty() {
        Value::Object(Default::default())
    } else {
        serde_json::from_str(raw).map_err(|e| ResolverError::Json(format!("{}: {}", e, raw)))?
    };

    Ok(Some(ResolvedIntent {
        operation: call.function.name,
        arguments,
    }))
}

#[async_trait]
impl IntentResolver for OpenAiResolver {
    fn name(&self) -> &str {
        "openai"
    }

    async fn resolve(&self, message: &str) -> Result<Option<ResolvedIntent>, ResolverError> {
        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: message,
                },
            ],
            tools: tool_definitions(),
            tool_choice: "auto",
            temperature: 0.0,
        };

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.api_base))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ResolverError::Timeout(self.timeout)
                } else {
                    ResolverError::Http(e.to_string())
                }
            })?;

        let status = response.status().as_u16();

        if status != 200 {
            let error_text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<OpenAiError>(&error_text)
                .map(|e| e.error.message)
                .unwrap_or(error_text);
            return Err(ResolverError::Api { status, message });
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| ResolverError::Json(e.to_string()))?;

        let intent = first_intent(chat_response)?;
        debug!(
            model = %self.model,
            operation = intent.as_ref().map(|i| i.operation.as_str()),
            "Resolved question"
        );
        Ok(intent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> ChatResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_new_requires_api_key() {
        let config = ResolverConfig::default();
        assert!(matches!(
            OpenAiResolver::new(&config),
            Err(ResolverError::NotConfigured)
        ));

        let config = ResolverConfig {
            api_key: Some(String::new()),
            ..Default::default()
        };
        assert!(OpenAiResolver::new(&config).is_err());
    }

    #[test]
    fn test_new_trims_api_base() {
        let config = ResolverConfig {
            api_key: Some("sk-test".to_string()),
            api_base: "http://localhost:11434/".to_string(),
            ..Default::default()
        };
        let resolver = OpenAiResolver::new(&config).unwrap();
        assert_eq!(resolver.api_base, "http://localhost:11434");
        assert_eq!(resolver.model(), "gpt-4o-mini");
        assert_eq!(resolver.name(), "openai");
    }

    #[test]
    fn test_request_serialization() {
        let request = ChatRequest {
            model: "gpt-4o-mini",
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: "How many open tickets?",
                },
            ],
            tools: tool_definitions(),
            tool_choice: "auto",
            temperature: 0.0,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["tool_choice"], "auto");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["messages"][1]["content"], "How many open tickets?");
        assert_eq!(json["tools"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_first_intent_parses_arguments() {
        let response = parse(json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": {
                            "name": "count_tickets",
                            "arguments": "{\"filters\": {\"status\": \"open\"}}"
                        }
                    }]
                }
            }]
        }));

        let intent = first_intent(response).unwrap().unwrap();
        assert_eq!(intent.operation, "count_tickets");
        assert_eq!(intent.arguments, json!({ "filters": { "status": "open" } }));
    }

    #[test]
    fn test_first_intent_empty_arguments() {
        let response = parse(json!({
            "choices": [{
                "message": {
                    "tool_calls": [{ "function": { "name": "filter_tickets", "arguments": "" } }]
                }
            }]
        }));
        let intent = first_intent(response).unwrap().unwrap();
        assert_eq!(intent.arguments, json!({}));
    }

    #[test]
    fn test_first_intent_no_tool_call() {
        let response = parse(json!({
            "choices": [{ "message": { "content": "Hello!", "tool_calls": null } }]
        }));
        assert!(first_intent(response).unwrap().is_none());

        let response = parse(json!({ "choices": [] }));
        assert!(first_intent(response).unwrap().is_none());
    }

    #[test]
    fn test_first_intent_bad_json_arguments() {
        let response = parse(json!({
            "choices": [{
                "message": {
                    "tool_calls": [{ "function": { "name": "count_tickets", "arguments": "{oops" } }]
                }
            }]
        }));
        assert!(matches!(first_intent(response), Err(ResolverError::Json(_))));
    }
}
