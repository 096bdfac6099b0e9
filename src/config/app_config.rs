use std::path::Path;

use serde::Deserialize;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub messages: MessagesConfig,
    pub email: EmailConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Storage backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub backend: StorageBackend,
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    pub statement_timeout_ms: u64,
    /// Returns (email, password) rows used to fill the credential cache
    pub credentials_query: String,
    /// Binds $1 = volunteer email, $2 = team identifier and returns
    /// (team_id, volunteer_email) rows
    pub assignment_query: String,
}

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub realm_prefix: String,
    pub realm: String,
    pub challenge_header: String,
    pub reporter_user: String,
    pub reporter_password: String,
}

/// User-visible error messages
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MessagesConfig {
    pub not_found: String,
    pub unauthorized: String,
    pub json_decoding: String,
    pub entity_exists: String,
    pub internal: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
    /// When disabled, notices are logged instead of sent
    pub enabled: bool,
    /// SMTP relay as `host:port`
    pub relay: String,
    pub sender: String,
    pub subject: String,
    /// Body template; `{password}` is replaced with the generated password
    pub body: String,
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            url: "postgres://localhost/volunteers".to_string(),
            max_connections: 10,
            acquire_timeout_secs: 5,
            statement_timeout_ms: 5000,
            credentials_query: "SELECT email, password FROM volunteers".to_string(),
            assignment_query: "SELECT ve.team_id, ve.volunteer_email \
                FROM volunteer_emails ve \
                JOIN teams t ON t.id = ve.team_id \
                WHERE ve.volunteer_email = $1 AND t.identifier = $2"
                .to_string(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            realm_prefix: "Basic realm=".to_string(),
            realm: "Authorization Required".to_string(),
            challenge_header: "WWW-Authenticate".to_string(),
            reporter_user: "reporter".to_string(),
            reporter_password: String::new(),
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("realm_prefix", &self.realm_prefix)
            .field("realm", &self.realm)
            .field("challenge_header", &self.challenge_header)
            .field("reporter_user", &self.reporter_user)
            .field("reporter_password", &"[REDACTED]")
            .finish()
    }
}

impl AuthConfig {
    /// Value of the challenge header sent with every 401
    pub fn challenge(&self) -> String {
        format!("{}{:?}", self.realm_prefix, self.realm)
    }
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            not_found: "Not found".to_string(),
            unauthorized: "Unauthorized".to_string(),
            json_decoding: "JSON decoding error: ".to_string(),
            entity_exists: "Entity already exists".to_string(),
            internal: "Internal server error".to_string(),
        }
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            relay: "localhost:25".to_string(),
            sender: "noreply@localhost".to_string(),
            subject: "Your volunteer account".to_string(),
            body: "Your account has been created. Your password is: {password}".to_string(),
            timeout_secs: 10,
        }
    }
}

impl AppConfig {
    /// Load configuration from the default files, an optional explicit file and
    /// `APP__`-prefixed environment variables (later sources win)
    pub fn load(file: Option<&Path>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false));

        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
