//! # exstruct-schema
//!
//! Schema definitions and strict-mode normalization for exstruct.
//!
//! This crate provides everything the extractor needs to describe and check
//! its output shape:
//!
//! - **[`ExtractionSchema`]**: the contract shared by all schema kinds
//! - **[`TypedSchema`]**: compiled schemas validated through serde
//! - **[`LoadedSchema`]**: schemas read from YAML documents at runtime
//! - **[`to_strict_schema`]**: normalization for strict structured-output mode
//! - **[`SchemaBuilder`]**: fluent object-schema construction
//! - **[`templates`]**: built-in templates (job, recipe, review, event, email)
//!
//! ## Example
//!
//! ```rust
//! use exstruct_schema::{templates, to_strict_schema, ExtractionSchema};
//!
//! let schema = templates::get("recipe").unwrap();
//! let strict = to_strict_schema(&schema.schema_mapping());
//! assert_eq!(strict["additionalProperties"], serde_json::json!(false));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod builder;
pub mod loaded;
pub mod schema;
pub mod strict;
pub mod templates;

// Re-exports for convenience
pub use builder::SchemaBuilder;
pub use loaded::{list_schemas, load_schema, LoadedSchema, SchemaDocument};
pub use schema::{ExtractionSchema, TypedSchema};
pub use strict::to_strict_schema;
