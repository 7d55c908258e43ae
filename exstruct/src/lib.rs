//! # exstruct - Structured Data Extraction for Rust
//!
//! exstruct turns free-form text into schema-conforming JSON by driving an
//! LLM provider's strict structured-output mode. You describe the shape you
//! want (a built-in template, a typed schema, a YAML document, or a raw
//! JSON-Schema mapping); exstruct normalizes the schema for strict decoding,
//! issues the provider call with retries and local rate limiting, validates
//! the reply, and hands back one uniform result with usage and cost figures.
//!
//! ## Quick Start
//!
//! ```ignore
//! use exstruct::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let extractor = Extractor::from_env()?;
//!     let schema = templates::get("recipe").expect("known template");
//!
//!     let result = extractor
//!         .extract(schema, "Beat two eggs, fold in flour, bake at 180C...")
//!         .await;
//!
//!     if result.success() {
//!         println!("{}", serde_json::to_string_pretty(result.data().unwrap())?);
//!     } else {
//!         eprintln!("{}", result.error_message().unwrap());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Key Features
//!
//! - **Strict schema normalization**: every object node closed with
//!   `additionalProperties: false`, recursively and idempotently
//! - **Typed and loaded schemas**: compile-time `TypedSchema<T>` definitions
//!   or runtime YAML documents sharing one validation contract
//! - **Bounded retries**: transient provider failures and malformed
//!   generations retried within one attempt budget
//! - **Local rate limiting**: token-bucket admission with fail-fast or
//!   bounded-wait behavior
//! - **Response caching**: LRU memoization of successful extractions
//! - **Exact cost accounting**: decimal per-model price table with a running
//!   total
//!
//! ## Architecture
//!
//! exstruct is organized as a workspace of focused crates:
//!
//! - [`exstruct_core`] - Configuration, errors, results, and usage types
//! - [`exstruct_schema`] - Schema definitions, normalization, and templates
//! - [`exstruct_extract`] - The extraction pipeline and its collaborators

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

// ============================================================================
// Crate Re-exports
// ============================================================================

/// Configuration, errors, results, and usage types.
pub use exstruct_core as core;

/// Schema definitions, strict-mode normalization, and built-in templates.
pub use exstruct_schema as schema;

/// The extraction pipeline: provider calls, retries, rate limiting,
/// caching, and cost tracking.
pub use exstruct_extract as extract;

// ============================================================================
// Core Type Re-exports (Flat)
// ============================================================================

// Configuration and results
pub use exstruct_core::{
    ExtractError, ExtractionResult, ExtractorConfig, LogFormat, Result, TokenUsage,
};

// Schemas
pub use exstruct_schema::{
    list_schemas, load_schema, templates, to_strict_schema, ExtractionSchema, LoadedSchema,
    SchemaBuilder, SchemaDocument, TypedSchema,
};

// Pipeline
pub use exstruct_extract::{
    fingerprint, CostInfo, CostSummary, CostTracker, Extractor, ModelPrice, PriceTable,
    ResponseCache, RetryPolicy,
};

/// Prelude for common imports.
pub mod prelude {
    pub use crate::{
        templates, ExtractError, ExtractionResult, ExtractionSchema, Extractor, ExtractorConfig,
        LoadedSchema, Result, SchemaBuilder, TypedSchema,
    };
}
