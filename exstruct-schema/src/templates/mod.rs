//! Built-in extraction templates.
//!
//! Each template is a compiled schema registered for the process lifetime
//! and resolvable by name.

use std::sync::OnceLock;

use crate::schema::{ExtractionSchema, TypedSchema};

pub mod email;
pub mod event;
pub mod job;
pub mod recipe;
pub mod review;

/// Names of the built-in templates, in listing order.
pub const TEMPLATE_NAMES: &[&str] = &["job", "recipe", "review", "event", "email"];

static JOB: OnceLock<TypedSchema<job::Job>> = OnceLock::new();
static RECIPE: OnceLock<TypedSchema<recipe::Recipe>> = OnceLock::new();
static REVIEW: OnceLock<TypedSchema<review::Review>> = OnceLock::new();
static EVENT: OnceLock<TypedSchema<event::Event>> = OnceLock::new();
static EMAIL: OnceLock<TypedSchema<email::Email>> = OnceLock::new();

/// Resolve a built-in template by name.
#[must_use]
pub fn get(name: &str) -> Option<&'static dyn ExtractionSchema> {
    match name {
        "job" => Some(JOB.get_or_init(job::schema)),
        "recipe" => Some(RECIPE.get_or_init(recipe::schema)),
        "review" => Some(REVIEW.get_or_init(review::schema)),
        "event" => Some(EVENT.get_or_init(event::schema)),
        "email" => Some(EMAIL.get_or_init(email::schema)),
        _ => None,
    }
}

/// List the built-in templates as (name, description) pairs.
#[must_use]
pub fn list() -> Vec<(&'static str, &'static str)> {
    TEMPLATE_NAMES
        .iter()
        .filter_map(|name| get(name).map(|schema| (*name, schema.description())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_known_templates() {
        for name in TEMPLATE_NAMES {
            let schema = get(name).unwrap();
            assert_eq!(schema.name(), *name);
            assert!(!schema.extraction_prompt().is_empty());
            assert_eq!(schema.schema_mapping()["type"], "object");
        }
    }

    #[test]
    fn test_get_unknown_template() {
        assert!(get("missing").is_none());
    }

    #[test]
    fn test_list() {
        let listed = list();
        assert_eq!(listed.len(), TEMPLATE_NAMES.len());
        assert_eq!(listed[0].0, "job");
        assert!(listed
            .iter()
            .all(|(_, description)| !description.is_empty()));
    }
}
