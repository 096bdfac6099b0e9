//! Team infrastructure implementations

mod postgres_repository;
mod service;

pub use postgres_repository::PostgresTeamRepository;
pub use service::{CreateTeamRequest, TeamService};
