//! Domain layer - Core business logic and entities

pub mod credentials;
pub mod error;
pub mod notification;
pub mod team;
pub mod volunteer;

pub use credentials::{Credential, CredentialStore};
pub use error::DomainError;
pub use notification::{EmailMessage, Notifier, PasswordNoticeTemplate};
pub use team::{Assignment, Team, TeamId, TeamRepository};
pub use volunteer::{Volunteer, VolunteerId, VolunteerRepository};
