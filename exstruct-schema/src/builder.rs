//! Fluent JSON schema construction.
//!
//! This module provides the `SchemaBuilder` API for assembling object
//! schemas by hand, used by the built-in templates.

use indexmap::IndexMap;
use serde_json::Value;

/// Fluent builder for object schemas.
///
/// Property declaration order is preserved while building. Optional fields
/// are expressed as `anyOf [T, null]` so strict mode can still emit them as
/// explicit nulls.
///
/// # Example
///
/// ```rust
/// use exstruct_schema::SchemaBuilder;
///
/// let schema = SchemaBuilder::new()
///     .string("name", "The user's name", true)
///     .nullable_integer("age", "The user's age")
///     .enum_values("status", "Account status", &["active", "inactive"], true)
///     .description("User information")
///     .build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    properties: IndexMap<String, Value>,
    required: Vec<String>,
    description: Option<String>,
}

impl SchemaBuilder {
    /// Create a new empty schema builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a string property.
    #[must_use]
    pub fn string(mut self, name: &str, desc: &str, required: bool) -> Self {
        self.properties.insert(
            name.to_string(),
            serde_json::json!({
                "type": "string",
                "description": desc
            }),
        );
        if required {
            self.required.push(name.to_string());
        }
        self
    }

    /// Add an integer property.
    #[must_use]
    pub fn integer(mut self, name: &str, desc: &str, required: bool) -> Self {
        self.properties.insert(
            name.to_string(),
            serde_json::json!({
                "type": "integer",
                "description": desc
            }),
        );
        if required {
            self.required.push(name.to_string());
        }
        self
    }

    /// Add a number (float) property.
    #[must_use]
    pub fn number(mut self, name: &str, desc: &str, required: bool) -> Self {
        self.properties.insert(
            name.to_string(),
            serde_json::json!({
                "type": "number",
                "description": desc
            }),
        );
        if required {
            self.required.push(name.to_string());
        }
        self
    }

    /// Add a boolean property.
    #[must_use]
    pub fn boolean(mut self, name: &str, desc: &str, required: bool) -> Self {
        self.properties.insert(
            name.to_string(),
            serde_json::json!({
                "type": "boolean",
                "description": desc
            }),
        );
        if required {
            self.required.push(name.to_string());
        }
        self
    }

    /// Add an array property with the given item schema.
    #[must_use]
    pub fn array(mut self, name: &str, desc: &str, items: Value, required: bool) -> Self {
        self.properties.insert(
            name.to_string(),
            serde_json::json!({
                "type": "array",
                "description": desc,
                "items": items
            }),
        );
        if required {
            self.required.push(name.to_string());
        }
        self
    }

    /// Add a string array property.
    #[must_use]
    pub fn string_array(self, name: &str, desc: &str, required: bool) -> Self {
        self.array(name, desc, serde_json::json!({"type": "string"}), required)
    }

    /// Add a nested object property.
    #[must_use]
    pub fn object(mut self, name: &str, desc: &str, schema: Value, required: bool) -> Self {
        let mut obj = schema;
        if let Some(map) = obj.as_object_mut() {
            map.insert("description".to_string(), Value::String(desc.to_string()));
        }
        self.properties.insert(name.to_string(), obj);
        if required {
            self.required.push(name.to_string());
        }
        self
    }

    /// Add an enum property (string values).
    #[must_use]
    pub fn enum_values(mut self, name: &str, desc: &str, values: &[&str], required: bool) -> Self {
        self.properties.insert(
            name.to_string(),
            serde_json::json!({
                "type": "string",
                "description": desc,
                "enum": values
            }),
        );
        if required {
            self.required.push(name.to_string());
        }
        self
    }

    /// Add an optional property as `anyOf [schema, null]`.
    #[must_use]
    pub fn nullable(mut self, name: &str, desc: &str, schema: Value) -> Self {
        self.properties.insert(
            name.to_string(),
            serde_json::json!({
                "anyOf": [schema, {"type": "null"}],
                "description": desc
            }),
        );
        self
    }

    /// Add an optional string property.
    #[must_use]
    pub fn nullable_string(self, name: &str, desc: &str) -> Self {
        self.nullable(name, desc, serde_json::json!({"type": "string"}))
    }

    /// Add an optional integer property.
    #[must_use]
    pub fn nullable_integer(self, name: &str, desc: &str) -> Self {
        self.nullable(name, desc, serde_json::json!({"type": "integer"}))
    }

    /// Add an optional number property.
    #[must_use]
    pub fn nullable_number(self, name: &str, desc: &str) -> Self {
        self.nullable(name, desc, serde_json::json!({"type": "number"}))
    }

    /// Add an optional boolean property.
    #[must_use]
    pub fn nullable_boolean(self, name: &str, desc: &str) -> Self {
        self.nullable(name, desc, serde_json::json!({"type": "boolean"}))
    }

    /// Add a raw JSON property.
    #[must_use]
    pub fn raw(mut self, name: &str, schema: Value, required: bool) -> Self {
        self.properties.insert(name.to_string(), schema);
        if required {
            self.required.push(name.to_string());
        }
        self
    }

    /// Set the schema description.
    #[must_use]
    pub fn description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    /// Build the object schema.
    #[must_use]
    pub fn build(self) -> Value {
        let mut properties = serde_json::Map::new();
        for (name, prop) in self.properties {
            properties.insert(name, prop);
        }

        let mut schema = serde_json::json!({
            "type": "object",
            "properties": properties
        });
        if !self.required.is_empty() {
            schema["required"] = serde_json::json!(self.required);
        }
        if let Some(desc) = self.description {
            schema["description"] = Value::String(desc);
        }
        schema
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_basic() {
        let schema = SchemaBuilder::new()
            .string("name", "The name", true)
            .integer("age", "The age", false)
            .description("A person")
            .build();

        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["name"]["type"], "string");
        assert_eq!(schema["properties"]["age"]["description"], "The age");
        assert_eq!(schema["required"], json!(["name"]));
        assert_eq!(schema["description"], "A person");
    }

    #[test]
    fn test_builder_all_types() {
        let schema = SchemaBuilder::new()
            .string("s", "string", true)
            .integer("i", "integer", true)
            .number("n", "number", true)
            .boolean("b", "boolean", true)
            .string_array("arr", "array", true)
            .enum_values("e", "enum", &["a", "b"], true)
            .build();

        let properties = schema["properties"].as_object().unwrap();
        assert_eq!(properties.len(), 6);
        assert_eq!(schema["required"].as_array().unwrap().len(), 6);
        assert_eq!(schema["properties"]["e"]["enum"], json!(["a", "b"]));
    }

    #[test]
    fn test_builder_nullable() {
        let schema = SchemaBuilder::new()
            .nullable_string("maybe", "An optional value")
            .build();

        let prop = &schema["properties"]["maybe"];
        assert_eq!(prop["anyOf"][0], json!({"type": "string"}));
        assert_eq!(prop["anyOf"][1], json!({"type": "null"}));
        assert_eq!(prop["description"], "An optional value");
        assert!(schema.get("required").is_none());
    }

    #[test]
    fn test_builder_nested_object() {
        let inner = SchemaBuilder::new()
            .string("street", "Street name", true)
            .string("city", "City name", true)
            .build();

        let schema = SchemaBuilder::new()
            .string("name", "Name", true)
            .object("address", "Address", inner, true)
            .build();

        assert_eq!(schema["properties"]["address"]["type"], "object");
        assert_eq!(schema["properties"]["address"]["description"], "Address");
        assert_eq!(
            schema["properties"]["address"]["properties"]["street"]["type"],
            "string"
        );
    }

    #[test]
    fn test_builder_array_of_objects() {
        let item = SchemaBuilder::new()
            .string("name", "Ingredient name", true)
            .nullable_string("quantity", "Amount needed")
            .build();

        let schema = SchemaBuilder::new()
            .array("ingredients", "List of ingredients", item, false)
            .build();

        let items = &schema["properties"]["ingredients"]["items"];
        assert_eq!(items["type"], "object");
        assert_eq!(items["properties"]["name"]["type"], "string");
    }
}
