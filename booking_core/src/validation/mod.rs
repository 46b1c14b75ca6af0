//! Input validation for booking and contact submissions

pub mod rules;

pub use rules::*;

use crate::config::ValidationConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::{Validate, ValidationErrors};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: BTreeMap<String, Vec<String>>,
}

impl ValidationResult {
    pub fn success() -> Self {
        Self {
            is_valid: true,
            errors: BTreeMap::new(),
        }
    }

    pub fn from_validation_errors(errors: ValidationErrors) -> Self {
        let mut result = Self::success();

        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                let message = match &error.message {
                    Some(message) => message.to_string(),
                    None => format!("Validation failed for field '{}'", field),
                };
                result.add_error(&field, &message);
            }
        }

        result
    }

    pub fn add_error(&mut self, field: &str, message: &str) {
        self.is_valid = false;
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.to_string());
    }

    /// Names of the fields that failed, in a stable order.
    pub fn failed_fields(&self) -> Vec<&str> {
        self.errors.keys().map(String::as_str).collect()
    }
}

pub trait Validatable {
    fn validate_comprehensive(&self) -> ValidationResult;
}

impl<T> Validatable for T
where
    T: Validate,
{
    fn validate_comprehensive(&self) -> ValidationResult {
        match self.validate() {
            Ok(_) => ValidationResult::success(),
            Err(errors) => ValidationResult::from_validation_errors(errors),
        }
    }
}

/// Inclusive character-count bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthBounds {
    pub min: usize,
    pub max: usize,
}

/// Rules that depend on deployment configuration rather than on the type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationContext {
    pub phone_length: Option<LengthBounds>,
}

impl ValidationContext {
    pub fn from_config(config: &ValidationConfig) -> Self {
        let phone_length = config.enforce_phone_length.then_some(LengthBounds {
            min: config.phone_min_length,
            max: config.phone_max_length,
        });

        Self { phone_length }
    }

    pub fn with_phone_length(min: usize, max: usize) -> Self {
        Self {
            phone_length: Some(LengthBounds { min, max }),
        }
    }
}

pub trait ContextValidatable {
    fn validate_with_context(&self, context: &ValidationContext) -> ValidationResult;
}
