//! Volunteer entity

use serde::Serialize;

use super::validation::{
    validate_email, validate_first_name, validate_last_name, validate_password,
    VolunteerValidationError,
};

/// Numeric identifier assigned by the store
pub type VolunteerId = i64;

/// Volunteer entity
///
/// The email is the volunteer's identity: it is the Basic auth username and never
/// changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Volunteer {
    id: VolunteerId,
    email: String,
    #[serde(rename = "firstname")]
    first_name: String,
    #[serde(rename = "lastname")]
    last_name: String,
    password: String,
}

impl Volunteer {
    /// Create a volunteer that has not been persisted yet
    pub fn new(
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, VolunteerValidationError> {
        let volunteer = Self {
            id: 0,
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            password: password.into(),
        };
        volunteer.validate()?;
        Ok(volunteer)
    }

    /// Rebuild a volunteer from stored values without validation
    pub fn from_stored(
        id: VolunteerId,
        email: String,
        first_name: String,
        last_name: String,
        password: String,
    ) -> Self {
        Self {
            id,
            email,
            first_name,
            last_name,
            password,
        }
    }

    /// Set the store-assigned identifier (builder pattern)
    pub fn with_id(mut self, id: VolunteerId) -> Self {
        self.id = id;
        self
    }

    /// Overlay caller-supplied fields onto this stored record.
    ///
    /// The identifier and email always come from `self`. An empty password keeps
    /// the stored one.
    pub fn overlay(
        &self,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        password: &str,
    ) -> Result<Self, VolunteerValidationError> {
        let password = if password.is_empty() {
            self.password.clone()
        } else {
            password.to_string()
        };

        let merged = Self {
            id: self.id,
            email: self.email.clone(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            password,
        };
        merged.validate()?;
        Ok(merged)
    }

    fn validate(&self) -> Result<(), VolunteerValidationError> {
        validate_email(&self.email)?;
        validate_first_name(&self.first_name)?;
        validate_last_name(&self.last_name)?;
        validate_password(&self.password)
    }

    // Getters

    pub fn id(&self) -> VolunteerId {
        self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Check whether the given identity owns this record
    pub fn is_owned_by(&self, identity: &str) -> bool {
        self.email == identity
    }
}
