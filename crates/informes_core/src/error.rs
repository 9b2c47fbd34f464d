//! crates/informes_core/src/error.rs
//!
//! Failure classes a submission can end in, and their mapping to
//! user-facing messages.

use crate::messages::Messages;
use crate::ports::{CollaboratorError, ErrorCode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialProblem {
    Invalid,
    Disabled,
    Throttled,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    /// A field is empty or malformed. Shown inline, never dispatched.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Something the attempt needs is missing (e.g. no signed-in user).
    #[error("precondition failed: {0}")]
    Precondition(String),

    #[error("network unreachable: {0}")]
    Transport(String),

    #[error("permission denied: {0}")]
    Permission(String),

    #[error("backend misconfigured: {0}")]
    Configuration(String),

    #[error("credentials rejected ({problem:?}): {message}")]
    Credentials {
        problem: CredentialProblem,
        message: String,
    },

    #[error("{0}")]
    Unknown(String),

    /// Another submission from the same form is still in flight.
    #[error("a submission is already in progress")]
    Busy,
}

impl SubmitError {
    /// Maps a collaborator failure onto the taxonomy.
    ///
    /// The structured code decides. Text matching is only consulted for
    /// `ErrorCode::Unknown`, for collaborators that report nothing but a message.
    pub fn classify(err: &CollaboratorError) -> Self {
        let message = err.message.clone();
        match err.code {
            ErrorCode::Network => SubmitError::Transport(message),
            ErrorCode::PermissionDenied | ErrorCode::Unauthenticated => {
                SubmitError::Permission(message)
            }
            ErrorCode::Misconfigured => SubmitError::Configuration(message),
            ErrorCode::InvalidCredentials => SubmitError::Credentials {
                problem: CredentialProblem::Invalid,
                message,
            },
            ErrorCode::UserDisabled => SubmitError::Credentials {
                problem: CredentialProblem::Disabled,
                message,
            },
            ErrorCode::TooManyRequests => SubmitError::Credentials {
                problem: CredentialProblem::Throttled,
                message,
            },
            ErrorCode::Unknown => Self::classify_text(message),
        }
    }

    fn classify_text(message: String) -> Self {
        if message.contains("PERMISSION_DENIED") {
            SubmitError::Permission(message)
        } else if message.to_lowercase().contains("network") {
            SubmitError::Transport(message)
        } else if message.contains("FirebaseApp") {
            SubmitError::Configuration(message)
        } else {
            SubmitError::Unknown(message)
        }
    }

    /// Whether pressing the same control again might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SubmitError::Transport(_) | SubmitError::Credentials { .. } | SubmitError::Unknown(_)
        )
    }

    pub fn user_message(&self, messages: &Messages) -> String {
        match self {
            SubmitError::Validation(message) | SubmitError::Precondition(message) => {
                message.clone()
            }
            SubmitError::Transport(_) => messages.network.to_string(),
            SubmitError::Permission(_) => messages.permission.to_string(),
            SubmitError::Configuration(_) => messages.configuration.to_string(),
            SubmitError::Credentials { problem, .. } => match problem {
                CredentialProblem::Invalid => messages.invalid_credentials.to_string(),
                CredentialProblem::Disabled => messages.user_disabled.to_string(),
                CredentialProblem::Throttled => messages.too_many_attempts.to_string(),
            },
            SubmitError::Unknown(raw) => messages.raw_error(raw),
            SubmitError::Busy => messages.submission_in_progress.to_string(),
        }
    }
}
