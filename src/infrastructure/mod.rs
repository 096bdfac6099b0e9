//! Infrastructure layer - External service implementations

pub mod credentials;
pub mod logging;
pub mod notification;
pub mod storage;
pub mod team;
pub mod volunteer;
