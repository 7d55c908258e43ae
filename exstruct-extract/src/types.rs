//! Wire types for the chat completions API.
//!
//! Only the fields the extraction pipeline reads are modeled; unknown
//! response fields are ignored during deserialization.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Request Types
// ============================================================================

/// Chat completion request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    /// Model to use.
    pub model: String,
    /// Messages in the conversation.
    pub messages: Vec<ChatMessage>,
    /// Structured output format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

impl ChatCompletionRequest {
    /// Create a request with the given model and messages.
    #[must_use]
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            messages,
            response_format: None,
        }
    }

    /// Set the response format.
    #[must_use]
    pub fn with_response_format(mut self, format: ResponseFormat) -> Self {
        self.response_format = Some(format);
        self
    }
}

/// A single chat message.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    /// Message role (system, user).
    pub role: String,
    /// Message text.
    pub content: String,
}

impl ChatMessage {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Response format selector.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseFormat {
    /// Format type (json_schema for structured output).
    #[serde(rename = "type")]
    pub format_type: String,
    /// JSON schema for structured output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_schema: Option<JsonSchemaFormat>,
}

impl ResponseFormat {
    /// Strict JSON schema format.
    pub fn json_schema(name: impl Into<String>, schema: Value, strict: bool) -> Self {
        Self {
            format_type: "json_schema".to_string(),
            json_schema: Some(JsonSchemaFormat {
                name: name.into(),
                strict: Some(strict),
                schema,
            }),
        }
    }
}

/// JSON schema payload inside a response format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSchemaFormat {
    /// Schema name reported to the provider.
    pub name: String,
    /// Whether to enforce strict conformance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,
    /// The JSON schema.
    pub schema: Value,
}

// ============================================================================
// Response Types
// ============================================================================

/// Chat completion response.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    /// Model that served the request.
    pub model: String,
    /// Response choices.
    pub choices: Vec<ChatChoice>,
    /// Token usage.
    pub usage: Option<UsagePayload>,
}

/// A response choice.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    /// The generated message.
    pub message: ResponseMessage,
    /// Reason generation stopped.
    pub finish_reason: Option<String>,
}

/// Message body of a response choice.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    /// Generated text content.
    pub content: Option<String>,
    /// Refusal text when the model declines to answer.
    pub refusal: Option<String>,
}

/// Token usage reported by the provider.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct UsagePayload {
    /// Prompt tokens.
    pub prompt_tokens: u64,
    /// Completion tokens.
    pub completion_tokens: u64,
    /// Total tokens.
    pub total_tokens: u64,
}

// ============================================================================
// Error Types
// ============================================================================

/// Error envelope returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorPayload {
    /// Error details.
    pub error: ApiErrorBody,
}

/// Error body inside an error envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    /// Error message.
    pub message: String,
    /// Error type tag.
    #[serde(rename = "type")]
    pub error_type: Option<String>,
    /// Error code.
    pub code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_serialization() {
        let request = ChatCompletionRequest::new(
            "gpt-4o-2024-08-06",
            vec![
                ChatMessage::system("Extract the fields."),
                ChatMessage::user("some text"),
            ],
        )
        .with_response_format(ResponseFormat::json_schema(
            "recipe",
            json!({"type": "object", "properties": {}}),
            true,
        ));

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["model"], "gpt-4o-2024-08-06");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["response_format"]["type"], "json_schema");
        assert_eq!(body["response_format"]["json_schema"]["name"], "recipe");
        assert_eq!(body["response_format"]["json_schema"]["strict"], true);
    }

    #[test]
    fn test_request_omits_absent_format() {
        let request = ChatCompletionRequest::new("gpt-4o", vec![ChatMessage::user("hi")]);
        let body = serde_json::to_value(&request).unwrap();
        assert!(body.get("response_format").is_none());
    }

    #[test]
    fn test_response_deserialization() {
        let body = json!({
            "id": "chatcmpl-abc123",
            "object": "chat.completion",
            "created": 1722902400,
            "model": "gpt-4o-2024-08-06",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "{\"title\": \"x\"}"},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 20, "completion_tokens": 10, "total_tokens": 30}
        });

        let response: ChatCompletionResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.model, "gpt-4o-2024-08-06");
        assert_eq!(
            response.choices[0].message.content.as_deref(),
            Some("{\"title\": \"x\"}")
        );
        let usage = response.usage.unwrap();
        assert_eq!(usage.total_tokens, 30);
    }

    #[test]
    fn test_error_payload_parse() {
        let body = json!({
            "error": {
                "message": "Rate limit reached",
                "type": "rate_limit_error",
                "code": "rate_limit_exceeded"
            }
        });
        let payload: ApiErrorPayload = serde_json::from_value(body).unwrap();
        assert_eq!(payload.error.message, "Rate limit reached");
        assert_eq!(payload.error.code.as_deref(), Some("rate_limit_exceeded"));
    }
}
