//! Field-level validation rules

use super::LengthBounds;
use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    static ref EMAIL_REGEX: Regex = Regex::new(
        r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$"
    ).unwrap();

    static ref EVENT_DATE_REGEX: Regex = Regex::new(
        r"^\d{4}-\d{2}-\d{2}$"
    ).unwrap();
}

pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }

    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::new("Email cannot be empty"));
    }

    if email.len() > 254 {
        return Err(ValidationError::new("Email is too long"));
    }

    if !EMAIL_REGEX.is_match(email) {
        return Err(ValidationError::new("Invalid email format"));
    }

    Ok(())
}

/// Shape check only; `2025-02-30` passes.
pub fn validate_event_date_format(date: &str) -> Result<(), ValidationError> {
    if !EVENT_DATE_REGEX.is_match(date) {
        return Err(ValidationError::new("Event date must use the YYYY-MM-DD format"));
    }

    Ok(())
}

pub fn validate_phone_length(phone: &str, bounds: LengthBounds) -> Result<(), ValidationError> {
    let length = phone.chars().count();

    if length < bounds.min || length > bounds.max {
        return Err(ValidationError::new("phone_length"));
    }

    Ok(())
}
