//! HTTP Basic authentication extractors
//!
//! Two gates:
//! - `RequireCredentials`: any pair known to the credential cache
//! - `RequireReporter`: exactly the configured reporter pair
//!
//! A missing, non-Basic or undecodable `Authorization` header is rejected the
//! same way as a wrong password.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use base64::{engine::general_purpose::STANDARD, Engine};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::infrastructure::credentials::constant_time_eq;

/// Identity and secret presented in a Basic `Authorization` header
#[derive(Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub identity: String,
    pub secret: String,
}

impl std::fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("identity", &self.identity)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Parse `Authorization: Basic base64(identity:secret)`
pub fn extract_basic_credentials(headers: &HeaderMap) -> Option<BasicCredentials> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;

    let (scheme, encoded) = value.trim().split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (identity, secret) = decoded.split_once(':')?;

    Some(BasicCredentials {
        identity: identity.to_string(),
        secret: secret.to_string(),
    })
}

/// Authenticated caller identity (the Basic username)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller(pub String);

impl Caller {
    pub fn identity(&self) -> &str {
        &self.0
    }
}

/// Extractor that requires credentials present in the credential cache
#[derive(Debug, Clone)]
pub struct RequireCredentials(pub Caller);

impl FromRequestParts<AppState> for RequireCredentials {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(credentials) = extract_basic_credentials(&parts.headers) else {
            debug!("Missing or malformed Basic credentials");
            return Err(state.errors.unauthorized());
        };

        if !state
            .credentials
            .verify(&credentials.identity, &credentials.secret)
            .await
        {
            debug!(identity = %credentials.identity, "Basic credentials rejected");
            return Err(state.errors.unauthorized());
        }

        Ok(RequireCredentials(Caller(credentials.identity)))
    }
}

/// Extractor that requires the configured reporter pair
#[derive(Debug, Clone)]
pub struct RequireReporter;

impl FromRequestParts<AppState> for RequireReporter {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(credentials) = extract_basic_credentials(&parts.headers) else {
            debug!("Missing or malformed reporter credentials");
            return Err(state.errors.unauthorized());
        };

        let expected_password = &state.auth.reporter_password;

        let accepted = !expected_password.is_empty()
            && constant_time_eq(&credentials.identity, &state.auth.reporter_user)
            && constant_time_eq(&credentials.secret, expected_password);

        if !accepted {
            debug!(identity = %credentials.identity, "Reporter credentials rejected");
            return Err(state.errors.unauthorized());
        }

        Ok(RequireReporter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, value.parse().unwrap());
        headers
    }

    fn basic(identity: &str, secret: &str) -> String {
        format!("Basic {}", STANDARD.encode(format!("{}:{}", identity, secret)))
    }

    #[test]
    fn test_extract_basic_credentials() {
        let headers = headers_with(&basic("a@x.com", "pa:ss"));

        let credentials = extract_basic_credentials(&headers).unwrap();
        assert_eq!(credentials.identity, "a@x.com");
        assert_eq!(credentials.secret, "pa:ss");
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        let value = basic("a@x.com", "pw").replacen("Basic", "basic", 1);
        assert!(extract_basic_credentials(&headers_with(&value)).is_some());
    }

    #[test]
    fn test_missing_header() {
        assert!(extract_basic_credentials(&HeaderMap::new()).is_none());
    }

    #[test]
    fn test_wrong_scheme() {
        assert!(extract_basic_credentials(&headers_with("Bearer abc")).is_none());
    }

    #[test]
    fn test_undecodable_payload() {
        assert!(extract_basic_credentials(&headers_with("Basic %%%")).is_none());
    }

    #[test]
    fn test_payload_without_separator() {
        let value = format!("Basic {}", STANDARD.encode("no-separator"));
        assert!(extract_basic_credentials(&headers_with(&value)).is_none());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let credentials = BasicCredentials {
            identity: "a@x.com".to_string(),
            secret: "hunter2".to_string(),
        };

        assert!(!format!("{:?}", credentials).contains("hunter2"));
    }
}
