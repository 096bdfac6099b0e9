//! Volunteer validation

use thiserror::Error;
use validator::ValidateEmail;

/// Errors that can occur during volunteer validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum VolunteerValidationError {
    #[error("email is required")]
    EmptyEmail,

    #[error("email '{0}' is not a valid address")]
    InvalidEmail(String),

    #[error("email cannot exceed {0} characters")]
    EmailTooLong(usize),

    #[error("lastname is required")]
    EmptyLastName,

    #[error("lastname cannot exceed {0} characters")]
    LastNameTooLong(usize),

    #[error("firstname cannot exceed {0} characters")]
    FirstNameTooLong(usize),

    #[error("password cannot exceed {0} characters")]
    PasswordTooLong(usize),
}

pub const MAX_FIELD_LENGTH: usize = 255;

/// Validate a volunteer email (the volunteer's identity)
pub fn validate_email(email: &str) -> Result<(), VolunteerValidationError> {
    if email.is_empty() {
        return Err(VolunteerValidationError::EmptyEmail);
    }

    if email.chars().count() > MAX_FIELD_LENGTH {
        return Err(VolunteerValidationError::EmailTooLong(MAX_FIELD_LENGTH));
    }

    if !email.validate_email() {
        return Err(VolunteerValidationError::InvalidEmail(email.to_string()));
    }

    Ok(())
}

/// Validate a volunteer last name
pub fn validate_last_name(last_name: &str) -> Result<(), VolunteerValidationError> {
    if last_name.is_empty() {
        return Err(VolunteerValidationError::EmptyLastName);
    }

    if last_name.chars().count() > MAX_FIELD_LENGTH {
        return Err(VolunteerValidationError::LastNameTooLong(MAX_FIELD_LENGTH));
    }

    Ok(())
}

/// Validate a volunteer first name
pub fn validate_first_name(first_name: &str) -> Result<(), VolunteerValidationError> {
    if first_name.chars().count() > MAX_FIELD_LENGTH {
        return Err(VolunteerValidationError::FirstNameTooLong(MAX_FIELD_LENGTH));
    }

    Ok(())
}

/// Validate a volunteer password
pub fn validate_password(password: &str) -> Result<(), VolunteerValidationError> {
    if password.chars().count() > MAX_FIELD_LENGTH {
        return Err(VolunteerValidationError::PasswordTooLong(MAX_FIELD_LENGTH));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_email() {
        assert!(validate_email("a@x.com").is_ok());
        assert!(validate_email("first.last@example.org").is_ok());
    }

    #[test]
    fn test_empty_email() {
        assert_eq!(validate_email(""), Err(VolunteerValidationError::EmptyEmail));
    }

    #[test]
    fn test_invalid_email() {
        assert_eq!(
            validate_email("not-an-email"),
            Err(VolunteerValidationError::InvalidEmail("not-an-email".to_string()))
        );
    }

    #[test]
    fn test_email_too_long() {
        let long_email = format!("{}@x.com", "a".repeat(250));
        assert_eq!(
            validate_email(&long_email),
            Err(VolunteerValidationError::EmailTooLong(255))
        );
    }

    #[test]
    fn test_last_name() {
        assert!(validate_last_name("Doe").is_ok());
        assert_eq!(
            validate_last_name(""),
            Err(VolunteerValidationError::EmptyLastName)
        );
        assert_eq!(
            validate_last_name(&"d".repeat(256)),
            Err(VolunteerValidationError::LastNameTooLong(255))
        );
    }

    #[test]
    fn test_first_name_is_optional() {
        assert!(validate_first_name("").is_ok());
        assert!(validate_first_name(&"j".repeat(255)).is_ok());
        assert_eq!(
            validate_first_name(&"j".repeat(256)),
            Err(VolunteerValidationError::FirstNameTooLong(255))
        );
    }

    #[test]
    fn test_password_length() {
        assert!(validate_password("").is_ok());
        assert_eq!(
            validate_password(&"p".repeat(256)),
            Err(VolunteerValidationError::PasswordTooLong(255))
        );
    }
}
