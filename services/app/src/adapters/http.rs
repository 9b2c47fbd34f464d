//! services/app/src/adapters/http.rs
//!
//! Shared plumbing for the REST adapters: client construction, the Google API
//! error envelope, and transport error mapping.

use informes_core::{CollaboratorError, ErrorCode};
use reqwest::Client;
use serde::Deserialize;

/// Builds the HTTP client shared by the REST adapters. No request timeout is
/// set; the backend's own limits apply.
pub fn build_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(concat!("informes/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// `{"error": {"code": 403, "message": "...", "status": "PERMISSION_DENIED"}}`
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// Parses an error response body, if it has the standard shape.
pub fn parse_error_body(body: &str) -> Option<ErrorBody> {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .map(|envelope| envelope.error)
}

/// Maps a failure to send or receive a request.
pub fn transport_error(err: reqwest::Error) -> CollaboratorError {
    if err.is_connect() || err.is_timeout() || err.is_request() {
        CollaboratorError::new(ErrorCode::Network, format!("network error: {}", err))
    } else {
        CollaboratorError::unknown(err.to_string())
    }
}

pub fn malformed_response(what: &str, err: impl std::fmt::Display) -> CollaboratorError {
    CollaboratorError::unknown(format!("Malformed {} response: {}", what, err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_google_error_envelope() {
        let body = r#"{"error":{"code":403,"message":"Missing or insufficient permissions.","status":"PERMISSION_DENIED"}}"#;
        let parsed = parse_error_body(body).unwrap();
        assert_eq!(parsed.code, 403);
        assert_eq!(parsed.status.as_deref(), Some("PERMISSION_DENIED"));
    }

    #[test]
    fn tolerates_bodies_without_status() {
        let body = r#"{"error":{"code":400,"message":"INVALID_PASSWORD"}}"#;
        let parsed = parse_error_body(body).unwrap();
        assert_eq!(parsed.message, "INVALID_PASSWORD");
        assert_eq!(parsed.status, None);
    }

    #[test]
    fn non_json_bodies_are_not_envelopes() {
        assert!(parse_error_body("<html>Bad Gateway</html>").is_none());
    }
}
