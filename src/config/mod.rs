//! Typed application configuration

mod app_config;

pub use app_config::{
    AppConfig, AuthConfig, DatabaseConfig, EmailConfig, LogFormat, LoggingConfig, MessagesConfig,
    ServerConfig, StorageBackend,
};
