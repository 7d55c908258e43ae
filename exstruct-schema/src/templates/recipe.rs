//! Recipe extraction template.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::builder::SchemaBuilder;
use crate::schema::TypedSchema;

const PROMPT: &str = "Extract structured information from the following recipe text.
Focus on identifying:
- Recipe name and description
- Timing information (prep, cook, total time)
- Complete ingredients list with quantities and units
- Step-by-step instructions
- Difficulty level and serving information
- Any dietary tags or restrictions

For ingredients, try to separate quantity, unit, and ingredient name.
If information is not available, leave fields empty.";

/// Single ingredient with quantity and unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ingredient {
    /// Ingredient name.
    pub name: String,
    /// Amount needed.
    pub quantity: Option<String>,
    /// Unit of measurement.
    pub unit: Option<String>,
    /// Additional notes.
    pub notes: Option<String>,
}

/// Structured fields of a recipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    /// Recipe name or title.
    pub name: String,
    /// Brief description of the dish.
    pub description: Option<String>,
    /// Cuisine type (Italian, Asian, etc.).
    pub cuisine: Option<String>,
    /// Difficulty level (easy, medium, hard).
    pub difficulty: Option<String>,
    /// Preparation time.
    pub prep_time: Option<String>,
    /// Cooking time.
    pub cook_time: Option<String>,
    /// Total time required.
    pub total_time: Option<String>,
    /// Number of servings.
    pub servings: Option<u32>,
    /// List of ingredients with quantities.
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    /// Step-by-step cooking instructions.
    #[serde(default)]
    pub instructions: Vec<String>,
    /// Recipe tags (vegetarian, gluten-free, etc.).
    #[serde(default)]
    pub tags: Vec<String>,
    /// Nutritional information if available.
    pub nutrition: Option<Value>,
}

/// The `recipe` template.
#[must_use]
pub fn schema() -> TypedSchema<Recipe> {
    let ingredient = SchemaBuilder::new()
        .string("name", "Ingredient name", true)
        .nullable_string("quantity", "Amount needed")
        .nullable_string("unit", "Unit of measurement")
        .nullable_string("notes", "Additional notes")
        .build();

    TypedSchema::new(
        "recipe",
        "Extract structured information from recipes.",
        PROMPT,
        SchemaBuilder::new()
            .string("name", "Recipe name or title", true)
            .nullable_string("description", "Brief description of the dish")
            .nullable_string("cuisine", "Cuisine type (Italian, Asian, etc.)")
            .nullable_string("difficulty", "Difficulty level (easy, medium, hard)")
            .nullable_string("prep_time", "Preparation time")
            .nullable_string("cook_time", "Cooking time")
            .nullable_string("total_time", "Total time required")
            .nullable_integer("servings", "Number of servings")
            .array(
                "ingredients",
                "List of ingredients with quantities",
                ingredient,
                false,
            )
            .string_array("instructions", "Step-by-step cooking instructions", false)
            .string_array("tags", "Recipe tags (vegetarian, gluten-free, etc.)", false)
            .nullable(
                "nutrition",
                "Nutritional information if available",
                serde_json::json!({"type": "object"}),
            )
            .build(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ExtractionSchema;
    use crate::strict::to_strict_schema;
    use serde_json::json;

    #[test]
    fn test_schema_shape() {
        let schema = schema();
        assert_eq!(schema.name(), "recipe");
        let mapping = schema.schema_mapping();
        assert_eq!(mapping["required"], json!(["name"]));
        assert_eq!(
            mapping["properties"]["ingredients"]["items"]["properties"]["name"]["type"],
            "string"
        );
    }

    #[test]
    fn test_nested_objects_closed_by_normalization() {
        let strict = to_strict_schema(&schema().schema_mapping());
        assert_eq!(strict["additionalProperties"], json!(false));
        assert_eq!(
            strict["properties"]["ingredients"]["items"]["additionalProperties"],
            json!(false)
        );
        assert_eq!(
            strict["properties"]["nutrition"]["anyOf"][0]["additionalProperties"],
            json!(false)
        );
    }

    #[test]
    fn test_validate_with_ingredients() {
        let schema = schema();
        let validated = schema
            .validate(&json!({
                "name": "Pasta",
                "servings": 4,
                "ingredients": [
                    {"name": "spaghetti", "quantity": "200", "unit": "g", "notes": null}
                ],
                "instructions": ["Boil water", "Cook pasta"]
            }))
            .unwrap();
        assert_eq!(validated["ingredients"][0]["name"], "spaghetti");
        assert_eq!(validated["tags"], json!([]));
    }

    #[test]
    fn test_validate_rejects_bad_ingredient() {
        let schema = schema();
        let err = schema
            .validate(&json!({
                "name": "Pasta",
                "ingredients": [{"quantity": "200"}]
            }))
            .unwrap_err();
        assert!(err.to_string().contains("name"));
    }
}
