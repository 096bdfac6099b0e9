//! Error envelope and domain error mapping

use axum::{
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::config::{AuthConfig, MessagesConfig};
use crate::domain::DomainError;

/// Error body: `{"error": <message>, "status": <code>}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: String,
    pub status: u16,
}

/// Header attached to every 401
#[derive(Debug, Clone)]
pub struct Challenge {
    pub name: HeaderName,
    pub value: HeaderValue,
}

impl Challenge {
    pub fn from_config(auth: &AuthConfig) -> Result<Self, DomainError> {
        let name = HeaderName::from_bytes(auth.challenge_header.as_bytes()).map_err(|e| {
            DomainError::configuration(format!(
                "Invalid challenge header name '{}': {}",
                auth.challenge_header, e
            ))
        })?;

        let value = HeaderValue::from_str(&auth.challenge()).map_err(|e| {
            DomainError::configuration(format!("Invalid challenge header value: {}", e))
        })?;

        Ok(Self { name, value })
    }
}

impl Default for Challenge {
    fn default() -> Self {
        Self {
            name: header::WWW_AUTHENTICATE,
            value: HeaderValue::from_static("Basic realm=\"Authorization Required\""),
        }
    }
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub challenge: Option<Challenge>,
}

impl ApiError {
    /// Create a new API error
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            challenge: None,
        }
    }

    /// Attach the authentication challenge header
    pub fn with_challenge(mut self, challenge: Challenge) -> Self {
        self.challenge = Some(challenge);
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorResponse {
            error: self.message,
            status: self.status.as_u16(),
        };

        let mut response = (self.status, Json(body)).into_response();

        if let Some(challenge) = self.challenge {
            response.headers_mut().insert(challenge.name, challenge.value);
        }

        response
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Turns domain errors into responses carrying only configured messages.
///
/// Internal detail is logged, never returned to the caller.
#[derive(Debug, Clone)]
pub struct ErrorMapper {
    messages: MessagesConfig,
    challenge: Challenge,
}

impl ErrorMapper {
    pub fn new(messages: MessagesConfig, challenge: Challenge) -> Self {
        Self {
            messages,
            challenge,
        }
    }

    pub fn from_config(messages: &MessagesConfig, auth: &AuthConfig) -> Result<Self, DomainError> {
        Ok(Self::new(messages.clone(), Challenge::from_config(auth)?))
    }

    /// 401 with the challenge header
    pub fn unauthorized(&self) -> ApiError {
        ApiError::new(StatusCode::UNAUTHORIZED, &self.messages.unauthorized)
            .with_challenge(self.challenge.clone())
    }

    /// 400 for a body that could not be decoded or validated
    pub fn bad_request(&self, detail: impl std::fmt::Display) -> ApiError {
        ApiError::bad_request(format!("{}{}", self.messages.json_decoding, detail))
    }

    pub fn map(&self, err: DomainError) -> ApiError {
        match err {
            DomainError::Validation { message } => self.bad_request(message),
            DomainError::Unauthorized { message } => {
                debug!(reason = %message, "Request rejected as unauthorized");
                self.unauthorized()
            }
            DomainError::NotFound { message } => {
                debug!(reason = %message, "Resource not found");
                ApiError::not_found(&self.messages.not_found)
            }
            DomainError::Conflict { message } => {
                debug!(reason = %message, "Request conflicts with stored state");
                ApiError::conflict(&self.messages.entity_exists)
            }
            other @ (DomainError::Internal { .. }
            | DomainError::Storage { .. }
            | DomainError::Notification { .. }
            | DomainError::Configuration { .. }) => {
                error!(error = %other, "Request failed");
                ApiError::internal(&self.messages.internal)
            }
        }
    }
}

impl Default for ErrorMapper {
    fn default() -> Self {
        Self::new(MessagesConfig::default(), Challenge::default())
    }
}
