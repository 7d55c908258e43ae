//! Product review extraction template.

use serde::{Deserialize, Serialize};

use crate::builder::SchemaBuilder;
use crate::schema::TypedSchema;

const PROMPT: &str = "Extract structured information from the following product review.
Focus on identifying:
- Product name, brand, and overall rating/sentiment
- Reviewer information if available
- Key positive and negative points (pros and cons)
- Specific aspects like quality, value, ease of use
- Recommendations and comparisons
- Duration of use and verification status

If information is not explicitly mentioned, leave the field empty or null.
For lists, extract all relevant items mentioned.";

/// Structured fields of a product review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    /// Name of the product being reviewed.
    pub product_name: String,
    /// Brand of the product.
    pub brand: Option<String>,
    /// Rating given (1-5 stars or similar scale).
    pub rating: Option<f64>,
    /// Overall sentiment: positive, negative, or neutral.
    pub overall_sentiment: String,
    /// Name of the reviewer if mentioned.
    pub reviewer_name: Option<String>,
    /// Whether the purchase was verified.
    pub purchase_verified: Option<bool>,
    /// Title of the review.
    pub title: Option<String>,
    /// Brief summary of the review.
    pub summary: Option<String>,
    /// Positive aspects mentioned in the review.
    #[serde(default)]
    pub pros: Vec<String>,
    /// Negative aspects mentioned in the review.
    #[serde(default)]
    pub cons: Vec<String>,
    /// Comments about value for money.
    pub value_for_money: Option<String>,
    /// Comments about product quality.
    pub quality: Option<String>,
    /// Comments about ease of use.
    pub ease_of_use: Option<String>,
    /// Comments about customer service experience.
    pub customer_service: Option<String>,
    /// Whether the reviewer would recommend the product.
    pub would_recommend: Option<bool>,
    /// Who or what situations this product is recommended for.
    #[serde(default)]
    pub recommend_for: Vec<String>,
    /// How long the reviewer has used the product.
    pub usage_duration: Option<String>,
    /// Other products mentioned for comparison.
    #[serde(default)]
    pub comparison_products: Vec<String>,
}

/// The `review` template.
#[must_use]
pub fn schema() -> TypedSchema<Review> {
    TypedSchema::new(
        "review",
        "Extract structured information from product reviews.",
        PROMPT,
        SchemaBuilder::new()
            .string("product_name", "Name of the product being reviewed", true)
            .nullable_string("brand", "Brand of the product")
            .nullable_number("rating", "Rating given (1-5 stars or similar scale)")
            .enum_values(
                "overall_sentiment",
                "Overall sentiment of the review",
                &["positive", "negative", "neutral"],
                true,
            )
            .nullable_string("reviewer_name", "Name of the reviewer if mentioned")
            .nullable_boolean("purchase_verified", "Whether the purchase was verified")
            .nullable_string("title", "Title of the review")
            .nullable_string("summary", "Brief summary of the review")
            .string_array("pros", "Positive aspects mentioned in the review", false)
            .string_array("cons", "Negative aspects mentioned in the review", false)
            .nullable_string("value_for_money", "Comments about value for money")
            .nullable_string("quality", "Comments about product quality")
            .nullable_string("ease_of_use", "Comments about ease of use")
            .nullable_string(
                "customer_service",
                "Comments about customer service experience",
            )
            .nullable_boolean(
                "would_recommend",
                "Whether the reviewer would recommend the product",
            )
            .string_array(
                "recommend_for",
                "Who or what situations this product is recommended for",
                false,
            )
            .nullable_string(
                "usage_duration",
                "How long the reviewer has used the product",
            )
            .string_array(
                "comparison_products",
                "Other products mentioned for comparison",
                false,
            )
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
        assert_eq!(schema.name(), "review");
        let mapping = schema.schema_mapping();
        assert_eq!(
            mapping["required"],
            json!(["product_name", "overall_sentiment"])
        );
        assert_eq!(
            mapping["properties"]["overall_sentiment"]["enum"],
            json!(["positive", "negative", "neutral"])
        );
    }

    #[test]
    fn test_validate() {
        let schema = schema();
        let validated = schema
            .validate(&json!({
                "product_name": "Widget",
                "overall_sentiment": "positive",
                "rating": 4.5,
                "pros": ["sturdy"],
                "cons": []
            }))
            .unwrap();
        assert_eq!(validated["rating"], json!(4.5));
        assert_eq!(validated["recommend_for"], json!([]));

        let err = schema.validate(&json!({"product_name": "Widget"})).unwrap_err();
        assert!(err.to_string().contains("overall_sentiment"));
    }
}
