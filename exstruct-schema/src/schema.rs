//! The extraction schema contract and its typed implementation.
//!
//! This module provides the [`ExtractionSchema`] trait shared by compiled and
//! loaded schemas, plus [`TypedSchema`] for schemas whose shape is fixed at
//! build time and validated through serde deserialization.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use exstruct_core::{ExtractError, Result};

/// A schema that can drive a structured extraction call.
///
/// Implementations supply the JSON-Schema-shaped mapping sent to the
/// provider, the default system prompt, and a validator for the decoded
/// response. The trait is object-safe so compiled and loaded schemas can be
/// used interchangeably by the extractor.
pub trait ExtractionSchema: Send + Sync {
    /// Schema name, used as the wire-level schema identifier and in cache keys.
    fn name(&self) -> &str;

    /// Human-readable description, shown in template listings.
    fn description(&self) -> &str;

    /// Default system prompt used when the caller does not override it.
    fn extraction_prompt(&self) -> &str;

    /// The JSON-Schema-shaped mapping describing the expected output.
    fn schema_mapping(&self) -> Value;

    /// Validate a decoded response value against this schema.
    ///
    /// Returns the validated payload as a plain JSON mapping, or a
    /// [`ExtractError::Validation`] naming the violated constraint.
    fn validate(&self, raw: &Value) -> Result<Value>;
}

/// Schema backed by a Rust type, validated through serde.
///
/// The decoded response is deserialized into `T` and re-serialized to a
/// plain mapping, so unknown fields are dropped and field types are checked
/// by `T`'s `Deserialize` implementation.
///
/// # Example
///
/// ```rust
/// use exstruct_schema::{SchemaBuilder, TypedSchema};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Serialize, Deserialize)]
/// struct Person {
///     name: String,
///     age: u32,
/// }
///
/// let schema: TypedSchema<Person> = TypedSchema::new(
///     "person",
///     "Extract a person",
///     "Extract the person described in the text.",
///     SchemaBuilder::new()
///         .string("name", "Full name", true)
///         .integer("age", "Age in years", true)
///         .build(),
/// );
/// ```
#[derive(Debug, Clone)]
pub struct TypedSchema<T> {
    name: String,
    description: String,
    prompt: String,
    schema: Value,
    _phantom: PhantomData<T>,
}

impl<T: DeserializeOwned + Serialize + Send + Sync> TypedSchema<T> {
    /// Create a new typed schema.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        prompt: impl Into<String>,
        schema: Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            prompt: prompt.into(),
            schema,
            _phantom: PhantomData,
        }
    }

    /// Deserialize a validated payload into the backing type.
    pub fn parse(&self, value: &Value) -> Result<T> {
        serde_json::from_value(value.clone())
            .map_err(|err| ExtractError::validation(err.to_string()))
    }
}

impl<T: DeserializeOwned + Serialize + Send + Sync> ExtractionSchema for TypedSchema<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn extraction_prompt(&self) -> &str {
        &self.prompt
    }

    fn schema_mapping(&self) -> Value {
        self.schema.clone()
    }

    fn validate(&self, raw: &Value) -> Result<Value> {
        let typed: T = serde_json::from_value(raw.clone())
            .map_err(|err| ExtractError::validation(err.to_string()))?;
        Ok(serde_json::to_value(&typed)?)
    }
}
