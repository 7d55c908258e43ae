//! # exstruct-core
//!
//! Core configuration, errors, and result types for the exstruct pipeline.
//!
//! This crate provides the foundational types shared by every other exstruct
//! crate:
//!
//! - **Config**: environment-sourced extractor settings
//! - **Errors**: the extraction error taxonomy with retry classification
//! - **Result**: the uniform [`ExtractionResult`] outcome type
//! - **Usage**: provider-reported token counts
//!
//! ## Example
//!
//! ```rust
//! use exstruct_core::{ExtractionResult, ExtractorConfig, TokenUsage};
//!
//! let config = ExtractorConfig::new("sk-test")
//!     .model("gpt-4o-mini")
//!     .max_retries(5);
//! assert!(config.validate().is_ok());
//!
//! let usage = TokenUsage::with_tokens(100, 50);
//! let result = ExtractionResult::ok(
//!     serde_json::json!({"title": "Engineer"}),
//!     &config.model,
//!     Some(usage.total_tokens),
//! );
//! assert!(result.success());
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod result;
pub mod usage;

// Re-exports for convenience
pub use config::{ExtractorConfig, LogFormat, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use error::{ExtractError, Result};
pub use result::ExtractionResult;
pub use usage::TokenUsage;

/// Prelude module for common imports.
///
/// ```rust
/// use exstruct_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{ExtractorConfig, LogFormat};
    pub use crate::error::{ExtractError, Result};
    pub use crate::result::ExtractionResult;
    pub use crate::usage::TokenUsage;
}
