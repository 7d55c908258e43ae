//! Schemas loaded from YAML documents at runtime.
//!
//! A schema document carries a name, description, extraction prompt, and a
//! JSON-Schema-shaped mapping. Loaded schemas validate responses with a
//! structural walk of that mapping instead of deserializing into a Rust
//! type.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use exstruct_core::{ExtractError, Result};

use crate::schema::ExtractionSchema;

/// A deserialized schema document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaDocument {
    /// Schema name, used as the wire-level schema identifier.
    pub name: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Default extraction prompt.
    pub prompt: String,
    /// JSON-Schema-shaped mapping describing the expected output.
    pub schema: Value,
}

/// A schema defined by an external document rather than a Rust type.
#[derive(Debug, Clone)]
pub struct LoadedSchema {
    document: SchemaDocument,
}

impl LoadedSchema {
    /// Build a loaded schema from a document, checking its structure.
    pub fn new(document: SchemaDocument) -> Result<Self> {
        if document.name.trim().is_empty() {
            return Err(ExtractError::configuration(
                "schema document has an empty name",
            ));
        }
        if document.prompt.trim().is_empty() {
            return Err(ExtractError::configuration(format!(
                "schema document `{}` has an empty prompt",
                document.name
            )));
        }
        if !document.schema.is_object() {
            return Err(ExtractError::configuration(format!(
                "schema document `{}` must carry a mapping under `schema`",
                document.name
            )));
        }
        Ok(Self { document })
    }

    /// Parse a loaded schema from YAML text.
    pub fn from_yaml(text: &str) -> Result<Self> {
        let document: SchemaDocument = serde_yaml::from_str(text)
            .map_err(|err| ExtractError::configuration(format!("invalid schema document: {err}")))?;
        Self::new(document)
    }

    /// Read and parse a loaded schema from a file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml(&text)
    }

    /// The underlying document.
    #[must_use]
    pub fn document(&self) -> &SchemaDocument {
        &self.document
    }
}

impl ExtractionSchema for LoadedSchema {
    fn name(&self) -> &str {
        &self.document.name
    }

    fn description(&self) -> &str {
        &self.document.description
    }

    fn extraction_prompt(&self) -> &str {
        &self.document.prompt
    }

    fn schema_mapping(&self) -> Value {
        self.document.schema.clone()
    }

    fn validate(&self, raw: &Value) -> Result<Value> {
        check_value(&self.document.schema, raw, "$")
            .map_err(ExtractError::validation)?;
        Ok(raw.clone())
    }
}

/// Structurally check a value against a schema mapping.
///
/// Covers the keywords the schema documents use: `type` (string or list),
/// `enum`, `required`, `properties`, `items`, and `anyOf`. Unknown keywords
/// and properties missing from the schema are accepted.
fn check_value(schema: &Value, value: &Value, path: &str) -> std::result::Result<(), String> {
    let Some(map) = schema.as_object() else {
        return Ok(());
    };

    if let Some(branches) = map.get("anyOf").and_then(Value::as_array) {
        if branches
            .iter()
            .any(|branch| check_value(branch, value, path).is_ok())
        {
            return Ok(());
        }
        return Err(format!("`{path}` does not match any allowed variant"));
    }

    match map.get("type") {
        Some(Value::String(type_name)) => check_type(type_name, value, path)?,
        Some(Value::Array(type_names)) => {
            let matches_one = type_names
                .iter()
                .filter_map(Value::as_str)
                .any(|name| check_type(name, value, path).is_ok());
            if !matches_one {
                return Err(format!("`{path}` does not match any allowed type"));
            }
        }
        _ => {}
    }

    if let Some(allowed) = map.get("enum").and_then(Value::as_array) {
        if !allowed.contains(value) {
            return Err(format!("`{path}` is not one of the allowed values"));
        }
    }

    if let Some(object) = value.as_object() {
        if let Some(required) = map.get("required").and_then(Value::as_array) {
            for field in required.iter().filter_map(Value::as_str) {
                if !object.contains_key(field) {
                    return Err(format!("missing required field `{path}.{field}`"));
                }
            }
        }
        if let Some(properties) = map.get("properties").and_then(Value::as_object) {
            for (key, nested_schema) in properties {
                if let Some(nested_value) = object.get(key) {
                    check_value(nested_schema, nested_value, &format!("{path}.{key}"))?;
                }
            }
        }
    }

    if let (Some(items), Some(elements)) = (map.get("items"), value.as_array()) {
        for (index, element) in elements.iter().enumerate() {
            check_value(items, element, &format!("{path}[{index}]"))?;
        }
    }

    Ok(())
}

fn check_type(type_name: &str, value: &Value, path: &str) -> std::result::Result<(), String> {
    let matches = match type_name {
        "object" => value.is_object(),
        "array" => value.is_array(),
        "string" => value.is_string(),
        "integer" => value.as_i64().is_some() || value.as_u64().is_some(),
        "number" => value.is_number(),
        "boolean" => value.is_boolean(),
        "null" => value.is_null(),
        // Unknown type tags are accepted.
        _ => true,
    };
    if matches {
        Ok(())
    } else {
        Err(format!("`{path}`: expected {type_name}"))
    }
}

/// Load a named schema from a directory.
///
/// Resolves `<name>.yaml`, then `<name>.yml`. A missing document fails with
/// [`ExtractError::SchemaNotFound`].
pub fn load_schema(dir: &Path, name: &str) -> Result<LoadedSchema> {
    for extension in ["yaml", "yml"] {
        let path = dir.join(format!("{name}.{extension}"));
        if path.is_file() {
            return LoadedSchema::from_path(&path);
        }
    }
    Err(ExtractError::schema_not_found(name))
}

/// List the schema documents in a directory as (name, description) pairs.
///
/// Documents that fail to parse are skipped with a warning.
pub fn list_schemas(dir: &Path) -> Result<Vec<(String, String)>> {
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            matches!(
                path.extension().and_then(|ext| ext.to_str()),
                Some("yaml") | Some("yml")
            )
        })
        .collect();
    entries.sort();

    let mut schemas = Vec::new();
    for path in entries {
        match LoadedSchema::from_path(&path) {
            Ok(schema) => schemas.push((
                schema.name().to_string(),
                schema.description().to_string(),
            )),
            Err(err) => warn!(path = %path.display(), error = %err, "skipping unreadable schema document"),
        }
    }
    Ok(schemas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const RECIPE_DOC: &str = r#"
name: quick_recipe
description: Minimal recipe extraction
prompt: Extract the recipe from the text.
schema:
  type: object
  required: [name]
  properties:
    name:
      type: string
    servings:
      type: integer
    tags:
      type: array
      items:
        type: string
"#;

    #[test]
    fn test_from_yaml() {
        let schema = LoadedSchema::from_yaml(RECIPE_DOC).unwrap();
        assert_eq!(schema.name(), "quick_recipe");
        assert_eq!(schema.description(), "Minimal recipe extraction");
        assert!(schema.extraction_prompt().starts_with("Extract"));
        assert_eq!(schema.schema_mapping()["type"], "object");
    }

    #[test]
    fn test_from_yaml_rejects_bad_documents() {
        assert!(LoadedSchema::from_yaml("not: [valid").is_err());

        let missing_prompt = "name: x\nprompt: \"\"\nschema:\n  type: object\n";
        assert!(LoadedSchema::from_yaml(missing_prompt).is_err());

        let scalar_schema = "name: x\nprompt: p\nschema: 42\n";
        assert!(LoadedSchema::from_yaml(scalar_schema).is_err());
    }

    #[test]
    fn test_validate_ok() {
        let schema = LoadedSchema::from_yaml(RECIPE_DOC).unwrap();
        let value = json!({"name": "Pasta", "servings": 4, "tags": ["quick"]});
        assert_eq!(schema.validate(&value).unwrap(), value);
    }

    #[test]
    fn test_validate_missing_required() {
        let schema = LoadedSchema::from_yaml(RECIPE_DOC).unwrap();
        let err = schema.validate(&json!({"servings": 4})).unwrap_err();
        assert!(err.to_string().contains("missing required field `$.name`"));
    }

    #[test]
    fn test_validate_wrong_types() {
        let schema = LoadedSchema::from_yaml(RECIPE_DOC).unwrap();

        let err = schema
            .validate(&json!({"name": "Pasta", "servings": "four"}))
            .unwrap_err();
        assert!(err.to_string().contains("expected integer"));

        let err = schema
            .validate(&json!({"name": "Pasta", "tags": [1, 2]}))
            .unwrap_err();
        assert!(err.to_string().contains("$.tags[0]"));
    }

    #[test]
    fn test_validate_any_of() {
        let document = SchemaDocument {
            name: "maybe".to_string(),
            description: String::new(),
            prompt: "p".to_string(),
            schema: json!({
                "type": "object",
                "properties": {
                    "rating": {"anyOf": [{"type": "number"}, {"type": "null"}]}
                }
            }),
        };
        let schema = LoadedSchema::new(document).unwrap();

        assert!(schema.validate(&json!({"rating": 4.5})).is_ok());
        assert!(schema.validate(&json!({"rating": null})).is_ok());
        let err = schema.validate(&json!({"rating": "high"})).unwrap_err();
        assert!(err.to_string().contains("does not match any allowed variant"));
    }

    #[test]
    fn test_load_schema_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("quick_recipe.yaml"), RECIPE_DOC).unwrap();

        let schema = load_schema(dir.path(), "quick_recipe").unwrap();
        assert_eq!(schema.name(), "quick_recipe");

        let err = load_schema(dir.path(), "absent").unwrap_err();
        assert!(matches!(err, ExtractError::SchemaNotFound(_)));
        assert!(err.to_string().contains("absent"));
    }

    #[test]
    fn test_list_schemas() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("quick_recipe.yaml"), RECIPE_DOC).unwrap();
        std::fs::write(dir.path().join("broken.yaml"), "not: [valid").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let schemas = list_schemas(dir.path()).unwrap();
        assert_eq!(
            schemas,
            vec![(
                "quick_recipe".to_string(),
                "Minimal recipe extraction".to_string()
            )]
        );
    }
}
