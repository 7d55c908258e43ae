//! The uniform extraction outcome type.

use serde::Serialize;
use serde_json::Value;

/// Outcome of a single extraction call.
///
/// Exactly one of `data` or `error` is present: a successful result carries
/// the extracted payload and never an error message, a failed result carries
/// an error message and never a payload. The only ways to build one are
/// [`ExtractionResult::ok`] and [`ExtractionResult::error`], which keeps the
/// invariant by construction. Results are immutable once built.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionResult {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    model_used: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tokens_used: Option<u64>,
}

impl ExtractionResult {
    /// Create a successful result carrying the extracted data.
    #[must_use]
    pub fn ok(data: Value, model_used: impl Into<String>, tokens_used: Option<u64>) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            model_used: Some(model_used.into()),
            tokens_used,
        }
    }

    /// Create a failed result carrying a human-readable error message.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            model_used: None,
            tokens_used: None,
        }
    }

    /// Whether the extraction succeeded.
    #[must_use]
    pub fn success(&self) -> bool {
        self.success
    }

    /// The extracted payload, present exactly when `success()` is true.
    #[must_use]
    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    /// The failure message, present exactly when `success()` is false.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The model that produced the result, when reported.
    #[must_use]
    pub fn model_used(&self) -> Option<&str> {
        self.model_used.as_deref()
    }

    /// Total tokens consumed, when reported.
    #[must_use]
    pub fn tokens_used(&self) -> Option<u64> {
        self.tokens_used
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ok_result_exclusivity() {
        let result = ExtractionResult::ok(json!({"title": "Engineer"}), "gpt-4o", Some(120));
        assert!(result.success());
        assert!(result.data().is_some());
        assert!(result.error_message().is_none());
        assert_eq!(result.model_used(), Some("gpt-4o"));
        assert_eq!(result.tokens_used(), Some(120));
    }

    #[test]
    fn test_error_result_exclusivity() {
        let result = ExtractionResult::error("Empty response from LLM");
        assert!(!result.success());
        assert!(result.data().is_none());
        assert_eq!(result.error_message(), Some("Empty response from LLM"));
        assert!(result.model_used().is_none());
        assert!(result.tokens_used().is_none());
    }

    #[test]
    fn test_serialization_skips_absent_fields() {
        let result = ExtractionResult::error("boom");
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["success"], json!(false));
        assert_eq!(value["error"], json!("boom"));
        assert!(value.get("data").is_none());
        assert!(value.get("model_used").is_none());
        assert!(value.get("tokens_used").is_none());

        let result = ExtractionResult::ok(json!({"a": 1}), "gpt-4o", Some(7));
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["success"], json!(true));
        assert_eq!(value["data"], json!({"a": 1}));
        assert_eq!(value["tokens_used"], json!(7));
        assert!(value.get("error").is_none());
    }
}
