//! API wire types

pub mod error;
pub mod json;

use serde::{Deserialize, Serialize};

pub use error::{ApiError, ApiErrorResponse, Challenge, ErrorMapper};
pub use json::{null_as_empty, Json};

/// Acknowledgement body: `{"Message": "<subject> created|deleted"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(rename = "Message")]
    pub message: String,
}

impl MessageResponse {
    pub fn created(subject: &str) -> Self {
        Self {
            message: format!("{} created", subject),
        }
    }

    pub fn deleted(subject: &str) -> Self {
        Self {
            message: format!("{} deleted", subject),
        }
    }
}
