//! Volunteer domain module
//!
//! Volunteers register themselves and afterwards manage only their own record.

mod entity;
mod repository;
mod validation;

pub use entity::{Volunteer, VolunteerId};
pub use repository::VolunteerRepository;
pub use validation::{
    validate_email, validate_first_name, validate_last_name, validate_password,
    VolunteerValidationError, MAX_FIELD_LENGTH,
};
