//! Error types for the Malga SDK.
//!
//! [`ApiError`] mirrors the error body returned by the remote API.
//! [`MalgaError`] is what every SDK operation (and every collaborator the
//! charge pipeline calls) returns.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Boxed error used for transport and decoding failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Base error type for Malga operations.
#[derive(Debug, thiserror::Error)]
pub enum MalgaError {
    /// The remote API rejected the call.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The request never produced a usable response.
    #[error("HTTP error: {context}: {source}")]
    Transport {
        /// Human-readable context (e.g. `"POST /charges"`).
        context: &'static str,
        /// The underlying transport error.
        #[source]
        source: BoxError,
    },

    /// A successful response body could not be decoded.
    #[error("Failed to deserialize JSON: {context}: {source}")]
    Decode {
        /// Human-readable context.
        context: &'static str,
        /// The underlying decoding error.
        #[source]
        source: BoxError,
    },

    /// A request URL could not be constructed.
    #[error("URL parse error: {context}: {source}")]
    Url {
        /// Human-readable context.
        context: &'static str,
        /// The underlying parse error.
        #[source]
        source: BoxError,
    },

    /// The request was rejected locally before any network call.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl MalgaError {
    /// Returns the remote API error, if this is one.
    #[must_use]
    pub const fn as_api(&self) -> Option<&ApiError> {
        match self {
            Self::Api(e) => Some(e),
            _ => None,
        }
    }
}

/// Error reported by the remote API.
///
/// Deserializes from the inner object of the `{"error": {...}}` envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error type (e.g. `"card_declined"`, `"bad_request"`).
    #[serde(rename = "type")]
    pub error_type: String,

    /// HTTP-like status code reported by the API.
    pub code: u16,

    /// Human-readable message.
    pub message: String,

    /// Validation details, when the API provides them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,

    /// Issuer decline code for `card_declined` errors.
    #[serde(
        default,
        alias = "declined_code",
        skip_serializing_if = "Option::is_none"
    )]
    /// Issuer decline code, for declined cards.
    pub declined_code: Option<String>,
}

impl ApiError {
    /// Error type used for unexpected and server-side failures.
    pub const API_ERROR: &'static str = "api_error";
    /// Error type used for rejected credentials.
    pub const INVALID_REQUEST_ERROR: &'static str = "invalid_request_error";
    /// Error type used for issuer declines.
    pub const CARD_DECLINED: &'static str = "card_declined";

    /// Creates a new API error.
    #[must_use]
    pub fn new(error_type: impl Into<String>, code: u16, message: impl Into<String>) -> Self {
        Self {
            error_type: error_type.into(),
            code,
            message: message.into(),
            details: Vec::new(),
            declined_code: None,
        }
    }

    /// The error reported when the API fails with a 5xx or an unreadable body.
    #[must_use]
    pub fn unexpected() -> Self {
        Self::new(Self::API_ERROR, 500, "unexpected error")
    }

    /// The error reported when the API answers 403.
    #[must_use]
    pub fn forbidden() -> Self {
        Self::new(Self::INVALID_REQUEST_ERROR, 403, "forbidden")
    }

    /// Sets the validation details.
    #[must_use]
    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = details;
        self
    }

    /// Sets the issuer decline code.
    #[must_use]
    pub fn with_declined_code(mut self, code: impl Into<String>) -> Self {
        self.declined_code = Some(code.into());
        self
    }

    /// Returns `true` if the issuer declined the card.
    #[must_use]
    pub fn is_card_declined(&self) -> bool {
        self.error_type == Self::CARD_DECLINED
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.error_type, self.code, self.message)?;
        if let Some(code) = &self.declined_code {
            write!(f, " [declined: {code}]")?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

/// Wire envelope wrapping [`ApiError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// The wrapped error.
    pub error: ApiError,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_deserializes_snake_case_declined_code() {
        let body = serde_json::json!({
            "error": {
                "type": "card_declined",
                "code": 402,
                "message": "declined",
                "declined_code": "51"
            }
        });
        let parsed: ApiErrorResponse = serde_json::from_value(body).unwrap();
        assert!(parsed.error.is_card_declined());
        assert_eq!(parsed.error.declined_code.as_deref(), Some("51"));
    }

    #[test]
    fn test_api_error_display() {
        let err = ApiError::new("bad_request", 400, "Bad Request Exception");
        assert_eq!(err.to_string(), "bad_request (400): Bad Request Exception");
        let err = ApiError::unexpected();
        assert_eq!(err.code, 500);
        assert_eq!(err.error_type, ApiError::API_ERROR);
    }

    #[test]
    fn test_malga_error_exposes_api_error() {
        let err = MalgaError::from(ApiError::forbidden());
        assert_eq!(err.as_api().map(|e| e.code), Some(403));
        let err = MalgaError::InvalidRequest("both".into());
        assert!(err.as_api().is_none());
    }
}
