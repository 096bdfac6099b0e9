//! API middleware components

pub mod basic_auth;

pub use basic_auth::{
    extract_basic_credentials, BasicCredentials, Caller, RequireCredentials, RequireReporter,
};
