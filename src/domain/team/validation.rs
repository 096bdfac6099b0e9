//! Team validation

use thiserror::Error;

use crate::domain::volunteer::{validate_email, MAX_FIELD_LENGTH};

/// Errors that can occur during team validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TeamValidationError {
    #[error("identifier is required")]
    EmptyIdentifier,

    #[error("identifier cannot exceed {0} characters")]
    IdentifierTooLong(usize),

    #[error("name cannot exceed {0} characters")]
    NameTooLong(usize),

    #[error("volunteeremail: {0}")]
    InvalidVolunteerEmail(String),
}

/// Validate a team identifier
pub fn validate_team_identifier(identifier: &str) -> Result<(), TeamValidationError> {
    if identifier.is_empty() {
        return Err(TeamValidationError::EmptyIdentifier);
    }

    if identifier.chars().count() > MAX_FIELD_LENGTH {
        return Err(TeamValidationError::IdentifierTooLong(MAX_FIELD_LENGTH));
    }

    Ok(())
}

/// Validate a team display name
pub fn validate_team_name(name: &str) -> Result<(), TeamValidationError> {
    if name.chars().count() > MAX_FIELD_LENGTH {
        return Err(TeamValidationError::NameTooLong(MAX_FIELD_LENGTH));
    }

    Ok(())
}

/// Validate the email of a volunteer being assigned to a team
pub fn validate_assignment_email(email: &str) -> Result<(), TeamValidationError> {
    validate_email(email).map_err(|e| TeamValidationError::InvalidVolunteerEmail(e.to_string()))
}
