//! Email message extraction template.

use serde::{Deserialize, Serialize};

use crate::builder::SchemaBuilder;
use crate::schema::TypedSchema;

const PROMPT: &str = "Extract structured information from the following email message.
Focus on identifying:
- Subject, sender, and recipients
- The main intent and a brief summary
- Action items and any deadlines mentioned
- Overall sentiment and urgency

If information is not explicitly mentioned, leave the field empty or null.";

/// Structured fields of an email message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Email {
    /// Email subject line.
    pub subject: String,
    /// Sender name or address.
    pub sender: Option<String>,
    /// Recipient names or addresses.
    #[serde(default)]
    pub recipients: Vec<String>,
    /// Date the email was sent.
    pub date: Option<String>,
    /// Brief summary of the email content.
    pub summary: String,
    /// Main intent: request, information, complaint, follow-up, etc.
    pub intent: Option<String>,
    /// Action items requested or promised.
    #[serde(default)]
    pub action_items: Vec<String>,
    /// Deadlines mentioned in the email.
    #[serde(default)]
    pub deadlines: Vec<String>,
    /// Overall sentiment: positive, negative, or neutral.
    pub sentiment: Option<String>,
    /// Whether the email is marked or phrased as urgent.
    pub is_urgent: Option<bool>,
}

/// The `email` template.
#[must_use]
pub fn schema() -> TypedSchema<Email> {
    TypedSchema::new(
        "email",
        "Extract structured information from email messages.",
        PROMPT,
        SchemaBuilder::new()
            .string("subject", "Email subject line", true)
            .nullable_string("sender", "Sender name or address")
            .string_array("recipients", "Recipient names or addresses", false)
            .nullable_string("date", "Date the email was sent")
            .string("summary", "Brief summary of the email content", true)
            .nullable_string(
                "intent",
                "Main intent: request, information, complaint, follow-up, etc.",
            )
            .string_array("action_items", "Action items requested or promised", false)
            .string_array("deadlines", "Deadlines mentioned in the email", false)
            .nullable_string("sentiment", "Overall sentiment: positive, negative, or neutral")
            .nullable_boolean("is_urgent", "Whether the email is marked or phrased as urgent")
            .build(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ExtractionSchema;
    use serde_json::json;

    #[test]
    fn test_schema_shape() {
        let schema = schema();
        assert_eq!(schema.name(), "email");
        let mapping = schema.schema_mapping();
        assert_eq!(mapping["required"], json!(["subject", "summary"]));
    }

    #[test]
    fn test_validate() {
        let schema = schema();
        let validated = schema
            .validate(&json!({
                "subject": "Q3 planning",
                "summary": "Scheduling the Q3 planning meeting.",
                "recipients": ["team@example.com"],
                "is_urgent": false
            }))
            .unwrap();
        assert_eq!(validated["subject"], "Q3 planning");
        assert_eq!(validated["action_items"], json!([]));
    }
}
