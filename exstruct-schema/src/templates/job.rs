//! Job description extraction template.

use serde::{Deserialize, Serialize};

use crate::builder::SchemaBuilder;
use crate::schema::TypedSchema;

const PROMPT: &str = "Extract structured information from the following job description.
Focus on identifying:
- Job title and company information
- Location and employment details
- Required and preferred skills
- Responsibilities and requirements
- Compensation and benefits

If information is not explicitly mentioned, leave the field empty or null.";

/// Structured fields of a job description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// Job title or position name.
    pub title: String,
    /// Company name.
    pub company: String,
    /// Job location.
    pub location: Option<String>,
    /// Employment type (full-time, part-time, contract, etc.).
    pub employment_type: Option<String>,
    /// Required experience level (entry, mid, senior, etc.).
    pub experience_level: Option<String>,
    /// Salary range or compensation information.
    pub salary_range: Option<String>,
    /// Required technical skills and technologies.
    #[serde(default)]
    pub required_skills: Vec<String>,
    /// Preferred or nice-to-have skills.
    #[serde(default)]
    pub preferred_skills: Vec<String>,
    /// Key job responsibilities and duties.
    #[serde(default)]
    pub responsibilities: Vec<String>,
    /// Job requirements and qualifications.
    #[serde(default)]
    pub requirements: Vec<String>,
    /// Benefits and perks offered.
    #[serde(default)]
    pub benefits: Vec<String>,
    /// Whether remote work is available.
    pub remote_work: Option<bool>,
}

/// The `job` template.
#[must_use]
pub fn schema() -> TypedSchema<Job> {
    TypedSchema::new(
        "job",
        "Extract structured information from job descriptions.",
        PROMPT,
        SchemaBuilder::new()
            .string("title", "Job title or position name", true)
            .string("company", "Company name", true)
            .nullable_string("location", "Job location")
            .nullable_string(
                "employment_type",
                "Employment type (full-time, part-time, contract, etc.)",
            )
            .nullable_string(
                "experience_level",
                "Required experience level (entry, mid, senior, etc.)",
            )
            .nullable_string("salary_range", "Salary range or compensation information")
            .string_array(
                "required_skills",
                "Required technical skills and technologies",
                false,
            )
            .string_array("preferred_skills", "Preferred or nice-to-have skills", false)
            .string_array(
                "responsibilities",
                "Key job responsibilities and duties",
                false,
            )
            .string_array("requirements", "Job requirements and qualifications", false)
            .string_array("benefits", "Benefits and perks offered", false)
            .nullable_boolean("remote_work", "Whether remote work is available")
            .build(),
    )
}
