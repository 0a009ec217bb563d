use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Event details form of the package flow. Everything except the notes is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EventDetails {
    #[validate(custom(function = "non_blank"))]
    pub event_name: String,
    #[validate(custom(function = "non_blank"))]
    pub event_date: String,
    #[validate(custom(function = "non_blank"))]
    pub venue: String,
    #[validate(custom(function = "non_blank"))]
    pub expected_attendance: String,
    #[validate(custom(function = "non_blank"))]
    pub contact_name: String,
    #[validate(custom(function = "non_blank"))]
    pub contact_email: String,
    #[validate(custom(function = "non_blank"))]
    pub contact_phone: String,
    pub additional_notes: String,
}

fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DetailsField {
    EventName,
    EventDate,
    Venue,
    ExpectedAttendance,
    ContactName,
    ContactEmail,
    ContactPhone,
    AdditionalNotes,
}

impl DetailsField {
    /// Form order.
    pub const ALL: [DetailsField; 8] = [
        DetailsField::EventName,
        DetailsField::EventDate,
        DetailsField::Venue,
        DetailsField::ExpectedAttendance,
        DetailsField::ContactName,
        DetailsField::ContactEmail,
        DetailsField::ContactPhone,
        DetailsField::AdditionalNotes,
    ];

    /// Struct field name, as reported by `validator`.
    fn key(self) -> &'static str {
        match self {
            DetailsField::EventName => "event_name",
            DetailsField::EventDate => "event_date",
            DetailsField::Venue => "venue",
            DetailsField::ExpectedAttendance => "expected_attendance",
            DetailsField::ContactName => "contact_name",
            DetailsField::ContactEmail => "contact_email",
            DetailsField::ContactPhone => "contact_phone",
            DetailsField::AdditionalNotes => "additional_notes",
        }
    }

    /// Name used by the form on the wire.
    pub fn label(self) -> &'static str {
        match self {
            DetailsField::EventName => "eventName",
            DetailsField::EventDate => "eventDate",
            DetailsField::Venue => "venue",
            DetailsField::ExpectedAttendance => "expectedAttendance",
            DetailsField::ContactName => "contactName",
            DetailsField::ContactEmail => "contactEmail",
            DetailsField::ContactPhone => "contactPhone",
            DetailsField::AdditionalNotes => "additionalNotes",
        }
    }
}

impl EventDetails {
    pub fn set(&mut self, field: DetailsField, value: String) {
        let slot = match field {
            DetailsField::EventName => &mut self.event_name,
            DetailsField::EventDate => &mut self.event_date,
            DetailsField::Venue => &mut self.venue,
            DetailsField::ExpectedAttendance => &mut self.expected_attendance,
            DetailsField::ContactName => &mut self.contact_name,
            DetailsField::ContactEmail => &mut self.contact_email,
            DetailsField::ContactPhone => &mut self.contact_phone,
            DetailsField::AdditionalNotes => &mut self.additional_notes,
        };
        *slot = value;
    }

    /// Required fields that are still blank, in form order.
    pub fn missing_fields(&self) -> Vec<DetailsField> {
        let errors = match self.validate() {
            Ok(()) => return Vec::new(),
            Err(errors) => errors,
        };
        let field_errors = errors.field_errors();
        DetailsField::ALL
            .into_iter()
            .filter(|field| field_errors.contains_key(field.key()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_form_misses_all_required_fields() {
        let missing = EventDetails::default().missing_fields();
        assert_eq!(missing.len(), 7);
        assert_eq!(missing[0], DetailsField::EventName);
        assert!(!missing.contains(&DetailsField::AdditionalNotes));
    }

    #[test]
    fn whitespace_counts_as_blank() {
        let mut details = EventDetails::default();
        for field in DetailsField::ALL {
            details.set(field, "x".into());
        }
        assert!(details.missing_fields().is_empty());

        details.set(DetailsField::Venue, "   ".into());
        assert_eq!(details.missing_fields(), vec![DetailsField::Venue]);
    }

    #[test]
    fn notes_are_optional() {
        let mut details = EventDetails::default();
        for field in DetailsField::ALL {
            details.set(field, "filled".into());
        }
        details.set(DetailsField::AdditionalNotes, String::new());
        assert!(details.missing_fields().is_empty());
    }

    #[test]
    fn wire_names_are_camel_case() {
        let json = serde_json::to_value(EventDetails::default()).unwrap();
        assert!(json.get("expectedAttendance").is_some());
        let field: DetailsField = serde_json::from_str("\"contactEmail\"").unwrap();
        assert_eq!(field, DetailsField::ContactEmail);
    }
}
