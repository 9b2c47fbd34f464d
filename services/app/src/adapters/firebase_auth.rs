//! services/app/src/adapters/firebase_auth.rs
//!
//! This module contains the adapter for Firebase Authentication's REST API.
//! It implements the `IdentityService` port from the `core` crate.

use std::sync::Mutex;

use async_trait::async_trait;
use informes_core::{CollaboratorError, ErrorCode, IdentityService, PortResult, Session};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::adapters::http::{malformed_response, parse_error_body, transport_error};
use crate::config::FirebaseSettings;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements the `IdentityService` port with email/password
/// sign-in against the Identity Toolkit endpoint.
pub struct FirebaseAuthAdapter {
    client: Client,
    auth_url: String,
    api_key: String,
    current: Mutex<Option<Session>>,
}

impl FirebaseAuthAdapter {
    /// Creates a new `FirebaseAuthAdapter`.
    pub fn new(client: Client, settings: &FirebaseSettings) -> Self {
        Self {
            client,
            auth_url: settings.auth_url.clone(),
            api_key: settings.api_key.clone(),
            current: Mutex::new(None),
        }
    }

    fn sign_in_url(&self) -> String {
        format!("{}/v1/accounts:signInWithPassword", self.auth_url)
    }
}

//=========================================================================================
// Wire Types
//=========================================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInBody<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    id_token: Option<String>,
}

impl SignInResponse {
    fn into_domain(self) -> Session {
        Session {
            uid: self.local_id,
            email: self.email.filter(|e| !e.is_empty()),
            id_token: self.id_token,
        }
    }
}

/// Maps an Identity Toolkit error response onto a collaborator error.
///
/// The service reports a code such as `INVALID_PASSWORD` as the message,
/// sometimes followed by `" : explanation"`.
pub(crate) fn auth_error(http_status: u16, body: &str) -> CollaboratorError {
    let Some(parsed) = parse_error_body(body) else {
        return CollaboratorError::unknown(format!("HTTP {}: {}", http_status, body.trim()));
    };
    let reason = parsed
        .message
        .split(|c: char| c == ' ' || c == ':')
        .next()
        .unwrap_or("");
    let code = match reason {
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" | "INVALID_EMAIL" => {
            ErrorCode::InvalidCredentials
        }
        "USER_DISABLED" => ErrorCode::UserDisabled,
        "TOO_MANY_ATTEMPTS_TRY_LATER" => ErrorCode::TooManyRequests,
        "API_KEY_INVALID" | "CONFIGURATION_NOT_FOUND" | "PROJECT_NOT_FOUND"
        | "OPERATION_NOT_ALLOWED" => ErrorCode::Misconfigured,
        _ if parsed.message.starts_with("API key not valid") => ErrorCode::Misconfigured,
        _ => ErrorCode::Unknown,
    };
    CollaboratorError::new(code, parsed.message)
}

//=========================================================================================
// `IdentityService` Trait Implementation
//=========================================================================================

#[async_trait]
impl IdentityService for FirebaseAuthAdapter {
    async fn sign_in(&self, email: &str, password: &str) -> PortResult<Session> {
        debug!(email, "Calling signInWithPassword.");
        let response = self
            .client
            .post(self.sign_in_url())
            .query(&[("key", self.api_key.as_str())])
            .json(&SignInBody {
                email,
                password,
                return_secure_token: true,
            })
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(auth_error(status.as_u16(), &body));
        }

        let session = response
            .json::<SignInResponse>()
            .await
            .map_err(|e| malformed_response("sign-in", e))?
            .into_domain();

        info!(uid = %session.uid, "Identity provider accepted the credentials.");
        *self.current.lock().unwrap_or_else(|e| e.into_inner()) = Some(session.clone());
        Ok(session)
    }

    fn current_session(&self) -> Option<Session> {
        self.current
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}
