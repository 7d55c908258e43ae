//! Event announcement extraction template.

use serde::{Deserialize, Serialize};

use crate::builder::SchemaBuilder;
use crate::schema::TypedSchema;

const PROMPT: &str = "Extract structured information from the following event description or announcement.
Focus on identifying:
- Event title, type, and description
- Date, time, and location details (including virtual platform if applicable)
- Organizer and contact information
- Registration requirements and costs
- Speakers, agenda topics, and target audience
- Additional logistics like dress code, parking, accessibility
- Websites, social media, and contact details

If information is not explicitly mentioned, leave the field empty or null.
For date/time fields, preserve the original format when possible.
Extract all relevant items for list fields.";

/// Structured fields of an event announcement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Event title or name.
    pub title: String,
    /// Event description or summary.
    pub description: Option<String>,
    /// Type of event: conference, workshop, party, meeting, etc.
    pub event_type: Option<String>,
    /// Category: business, social, educational, cultural, etc.
    pub category: Option<String>,
    /// Start date of the event.
    pub start_date: Option<String>,
    /// End date of the event.
    pub end_date: Option<String>,
    /// Start time.
    pub start_time: Option<String>,
    /// End time.
    pub end_time: Option<String>,
    /// Duration of the event.
    pub duration: Option<String>,
    /// Timezone if specified.
    pub timezone: Option<String>,
    /// Name of the venue.
    pub venue_name: Option<String>,
    /// Full address of the event.
    pub address: Option<String>,
    /// City where the event takes place.
    pub city: Option<String>,
    /// State or province.
    pub state_province: Option<String>,
    /// Country.
    pub country: Option<String>,
    /// Whether the event is virtual/online.
    pub is_virtual: Option<bool>,
    /// Platform for virtual events.
    pub virtual_platform: Option<String>,
    /// Name of the organizing person or entity.
    pub organizer_name: Option<String>,
    /// Contact information for the organizer.
    pub organizer_contact: Option<String>,
    /// Company organizing the event.
    pub organizing_company: Option<String>,
    /// Maximum number of attendees.
    pub capacity: Option<u32>,
    /// Expected number of attendees.
    pub expected_attendance: Option<u32>,
    /// Target audience or demographics.
    #[serde(default)]
    pub target_audience: Vec<String>,
    /// Whether registration is required.
    pub registration_required: Option<bool>,
    /// Registration deadline.
    pub registration_deadline: Option<String>,
    /// URL for registration.
    pub registration_link: Option<String>,
    /// Cost or price to attend.
    pub cost: Option<String>,
    /// Whether the event is free.
    pub is_free: Option<bool>,
    /// Main topics or agenda items.
    #[serde(default)]
    pub agenda_topics: Vec<String>,
    /// Names of speakers or presenters.
    #[serde(default)]
    pub speakers: Vec<String>,
    /// Keynote speakers if specified.
    #[serde(default)]
    pub keynote_speakers: Vec<String>,
    /// Dress code if specified.
    pub dress_code: Option<String>,
    /// Primary language of the event.
    pub language: Option<String>,
    /// Accessibility information.
    pub accessibility_info: Option<String>,
    /// Parking information.
    pub parking_info: Option<String>,
    /// Whether food/refreshments are provided.
    pub food_provided: Option<bool>,
    /// Event website.
    pub website: Option<String>,
    /// Social media links or hashtags.
    #[serde(default)]
    pub social_media: Vec<String>,
    /// Contact email for inquiries.
    pub contact_email: Option<String>,
    /// Contact phone number.
    pub contact_phone: Option<String>,
    /// Tags or keywords associated with the event.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Industries or sectors relevant to the event.
    #[serde(default)]
    pub industries: Vec<String>,
}

/// The `event` template.
#[must_use]
pub fn schema() -> TypedSchema<Event> {
    TypedSchema::new(
        "event",
        "Extract structured information from event descriptions.",
        PROMPT,
        SchemaBuilder::new()
            .string("title", "Event title or name", true)
            .nullable_string("description", "Event description or summary")
            .nullable_string(
                "event_type",
                "Type of event: conference, workshop, party, meeting, etc.",
            )
            .nullable_string(
                "category",
                "Category: business, social, educational, cultural, etc.",
            )
            .nullable_string("start_date", "Start date of the event")
            .nullable_string("end_date", "End date of the event")
            .nullable_string("start_time", "Start time")
            .nullable_string("end_time", "End time")
            .nullable_string("duration", "Duration of the event")
            .nullable_string("timezone", "Timezone if specified")
            .nullable_string("venue_name", "Name of the venue")
            .nullable_string("address", "Full address of the event")
            .nullable_string("city", "City where the event takes place")
            .nullable_string("state_province", "State or province")
            .nullable_string("country", "Country")
            .nullable_boolean("is_virtual", "Whether the event is virtual/online")
            .nullable_string("virtual_platform", "Platform for virtual events")
            .nullable_string("organizer_name", "Name of the organizing person or entity")
            .nullable_string("organizer_contact", "Contact information for the organizer")
            .nullable_string("organizing_company", "Company organizing the event")
            .nullable_integer("capacity", "Maximum number of attendees")
            .nullable_integer("expected_attendance", "Expected number of attendees")
            .string_array("target_audience", "Target audience or demographics", false)
            .nullable_boolean("registration_required", "Whether registration is required")
            .nullable_string("registration_deadline", "Registration deadline")
            .nullable_string("registration_link", "URL for registration")
            .nullable_string("cost", "Cost or price to attend")
            .nullable_boolean("is_free", "Whether the event is free")
            .string_array("agenda_topics", "Main topics or agenda items", false)
            .string_array("speakers", "Names of speakers or presenters", false)
            .string_array("keynote_speakers", "Keynote speakers if specified", false)
            .nullable_string("dress_code", "Dress code if specified")
            .nullable_string("language", "Primary language of the event")
            .nullable_string("accessibility_info", "Accessibility information")
            .nullable_string("parking_info", "Parking information")
            .nullable_boolean("food_provided", "Whether food/refreshments are provided")
            .nullable_string("website", "Event website")
            .string_array("social_media", "Social media links or hashtags", false)
            .nullable_string("contact_email", "Contact email for inquiries")
            .nullable_string("contact_phone", "Contact phone number")
            .string_array("tags", "Tags or keywords associated with the event", false)
            .string_array(
                "industries",
                "Industries or sectors relevant to the event",
                false,
            )
            .build(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ExtractionSchema;
    use serde_json::json;

    #[test]
    fn test_schema_shape() {
        let schema = schema();
        assert_eq!(schema.name(), "event");
        let mapping = schema.schema_mapping();
        assert_eq!(mapping["required"], json!(["title"]));
        assert_eq!(
            mapping["properties"]["is_virtual"]["anyOf"][0]["type"],
            "boolean"
        );
    }

    #[test]
    fn test_validate() {
        let schema = schema();
        let validated = schema
            .validate(&json!({
                "title": "RustConf",
                "is_virtual": false,
                "speakers": ["Alice", "Bob"],
                "capacity": 500
            }))
            .unwrap();
        assert_eq!(validated["title"], "RustConf");
        assert_eq!(validated["tags"], json!([]));

        let err = schema.validate(&json!({"capacity": 500})).unwrap_err();
        assert!(err.to_string().contains("title"));
    }
}
