//! Contact message models

use crate::validation::{
    rules::{validate_email, validate_not_blank},
    ContextValidatable, Validatable, ValidationContext, ValidationResult,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Contact {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CreateContactRequest {
    #[validate(custom(function = "validate_not_blank", message = "Name cannot be empty"))]
    pub name: String,

    #[validate(custom(function = "validate_email", message = "Invalid email format"))]
    pub email: String,

    #[validate(custom(function = "validate_not_blank", message = "Message cannot be empty"))]
    pub message: String,
}

impl ContextValidatable for CreateContactRequest {
    fn validate_with_context(&self, _context: &ValidationContext) -> ValidationResult {
        self.validate_comprehensive()
    }
}
