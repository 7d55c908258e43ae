//! # exstruct-extract
//!
//! Extraction pipeline for exstruct.
//!
//! This crate turns a schema and a piece of free-form text into validated
//! structured data by calling a chat completions endpoint in strict JSON
//! schema mode. Around that single call it layers the operational machinery
//! a long-running process needs.
//!
//! ## Core Concepts
//!
//! - **[`Extractor`]**: The orchestrator; owns the HTTP client and the
//!   shared pipeline state
//! - **[`CallLimiter`]**: Local token-bucket admission control
//! - **[`ResponseCache`]**: LRU memoization of successful extractions
//! - **[`CostTracker`]**: Decimal-exact usage and cost ledger
//! - **[`RetryPolicy`]**: Exponential backoff for transient failures
//!
//! ## Example
//!
//! ```ignore
//! use exstruct_core::ExtractorConfig;
//! use exstruct_extract::Extractor;
//! use exstruct_schema::templates;
//!
//! let extractor = Extractor::new(ExtractorConfig::from_env()?)?;
//! let schema = templates::get("recipe").expect("known template");
//!
//! let result = extractor.extract(schema, "Whisk two eggs with sugar...").await;
//! if result.success() {
//!     println!("{}", serde_json::to_string_pretty(result.data().unwrap())?);
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod cache;
pub mod cost;
pub mod extractor;
pub mod rate_limit;
pub mod retry;
pub mod types;

// Re-exports
pub use cache::{fingerprint, ResponseCache};
pub use cost::{CostInfo, CostRecord, CostSummary, CostTracker, ModelPrice, PriceTable};
pub use extractor::Extractor;
pub use rate_limit::CallLimiter;
pub use retry::RetryPolicy;

/// Prelude for common imports.
pub mod prelude {
    pub use crate::{CostSummary, CostTracker, Extractor, ResponseCache, RetryPolicy};
}
