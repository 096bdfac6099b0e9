//! Volunteer infrastructure implementations

mod password;
mod postgres_repository;
mod service;

pub use password::PasswordGenerator;
pub use postgres_repository::PostgresVolunteerRepository;
pub use service::{CreateVolunteerRequest, UpdateVolunteerRequest, VolunteerService};
