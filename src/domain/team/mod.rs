//! Team domain module
//!
//! Teams group volunteers. A team owns its assignment records; the volunteer
//! email on an assignment is a reference, not an owned relationship.

mod entity;
mod repository;
mod validation;

pub use entity::{Assignment, Team, TeamId};
pub use repository::TeamRepository;
pub use validation::{
    validate_assignment_email, validate_team_identifier, validate_team_name, TeamValidationError,
};
