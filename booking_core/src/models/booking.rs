//! Booking models with validation

use crate::validation::{
    rules::{validate_email, validate_event_date_format, validate_not_blank, validate_phone_length},
    ContextValidatable, Validatable, ValidationContext, ValidationResult,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A persisted event reservation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Booking {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub event_type: String,
    pub event_date: String,
    pub guests: i64,
    pub special_requests: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CreateBookingRequest {
    #[validate(custom(function = "validate_not_blank", message = "Name cannot be empty"))]
    pub name: String,

    #[validate(custom(function = "validate_email", message = "Invalid email format"))]
    pub email: String,

    #[validate(custom(function = "validate_not_blank", message = "Phone number cannot be empty"))]
    pub phone: String,

    #[validate(custom(function = "validate_not_blank", message = "Event type cannot be empty"))]
    pub event_type: String,

    #[validate(custom(
        function = "validate_event_date_format",
        message = "Event date must use the YYYY-MM-DD format"
    ))]
    pub event_date: String,

    // Zero and negative counts are accepted as-is.
    pub guests: i64,

    #[serde(default)]
    pub special_requests: Option<String>,
}

impl ContextValidatable for CreateBookingRequest {
    fn validate_with_context(&self, context: &ValidationContext) -> ValidationResult {
        let mut result = self.validate_comprehensive();

        if let Some(bounds) = context.phone_length {
            if validate_phone_length(&self.phone, bounds).is_err() {
                result.add_error(
                    "phone",
                    &format!(
                        "Phone number must be between {} and {} characters",
                        bounds.min, bounds.max
                    ),
                );
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CreateBookingRequest {
        CreateBookingRequest {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone: "5551234567".to_string(),
            event_type: "wedding".to_string(),
            event_date: "2025-06-01".to_string(),
            guests: 50,
            special_requests: None,
        }
    }

    #[test]
    fn test_valid_request_passes() {
        let result = valid_request().validate_with_context(&ValidationContext::default());
        assert!(result.is_valid, "unexpected errors: {:?}", result.errors);
    }

    #[test]
    fn test_reports_every_failing_field() {
        let request = CreateBookingRequest {
            name: " ".to_string(),
            email: "not-an-email".to_string(),
            event_date: "June 1st".to_string(),
            ..valid_request()
        };

        let result = request.validate_with_context(&ValidationContext::default());
        assert!(!result.is_valid);
        assert_eq!(result.failed_fields(), vec!["email", "event_date", "name"]);
        assert_eq!(result.errors["name"], vec!["Name cannot be empty".to_string()]);
    }

    #[test]
    fn test_guests_have_no_lower_bound() {
        for guests in [0, -3] {
            let request = CreateBookingRequest { guests, ..valid_request() };
            assert!(request.validate_with_context(&ValidationContext::default()).is_valid);
        }
    }

    #[test]
    fn test_phone_length_only_when_configured() {
        let request = CreateBookingRequest {
            phone: "555".to_string(),
            ..valid_request()
        };

        assert!(request.validate_with_context(&ValidationContext::default()).is_valid);

        let strict = ValidationContext::with_phone_length(10, 15);
        let result = request.validate_with_context(&strict);
        assert!(!result.is_valid);
        assert_eq!(
            result.errors["phone"],
            vec!["Phone number must be between 10 and 15 characters".to_string()]
        );

        assert!(valid_request().validate_with_context(&strict).is_valid);
    }

    #[test]
    fn test_special_requests_optional_in_json() {
        let request: CreateBookingRequest = serde_json::from_value(serde_json::json!({
            "name": "Ada",
            "email": "ada@example.com",
            "phone": "5551234567",
            "event_type": "wedding",
            "event_date": "2025-06-01",
            "guests": 50
        }))
        .unwrap();

        assert_eq!(request.special_requests, None);
    }
}
