//! Volunteer Registry API
//!
//! Registers volunteers, organises them into teams and records team
//! assignments. Every route except volunteer sign-up and the health probes
//! requires HTTP Basic credentials checked against an in-memory cache of
//! stored passwords.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
