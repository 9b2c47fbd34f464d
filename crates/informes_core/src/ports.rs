//! crates/informes_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the external collaborators.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of the concrete identity provider and document database.

use async_trait::async_trait;

use crate::domain::{DocumentId, NavOptions, NoticeDuration, Session, StoredReport};

//=========================================================================================
// Collaborator Error and Result Types
//=========================================================================================

/// Structured failure codes reported by the collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// The backend could not be reached.
    Network,
    /// The backend refused the operation under its access rules.
    PermissionDenied,
    /// The request carried no valid user credential.
    Unauthenticated,
    /// Wrong email/password or unknown account.
    InvalidCredentials,
    UserDisabled,
    TooManyRequests,
    /// The backend project or API key is not set up correctly.
    Misconfigured,
    /// Anything the adapter could not map. Only the message text is meaningful.
    Unknown,
}

/// An error returned by any collaborator port.
/// This abstracts away the specific errors of the backend SDK or HTTP client.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code:?}: {message}")]
pub struct CollaboratorError {
    pub code: ErrorCode,
    pub message: String,
}

impl CollaboratorError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unknown, message)
    }
}

/// A convenience type alias for `Result<T, CollaboratorError>`.
pub type PortResult<T> = Result<T, CollaboratorError>;

//=========================================================================================
// Collaborator Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Signs a user in with email and password.
    async fn sign_in(&self, email: &str, password: &str) -> PortResult<Session>;

    /// The user signed in on this device, if any.
    fn current_session(&self) -> Option<Session>;
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Inserts a new record into `collection` and returns its identifier.
    async fn insert(&self, collection: &str, record: StoredReport) -> PortResult<DocumentId>;
}

/// One-way screen transitions.
pub trait Navigator: Send + Sync {
    fn navigate_to(&self, route: &str, options: NavOptions);
}

/// Transient, toast-style notices.
pub trait Notifier: Send + Sync {
    fn notify(&self, text: &str, duration: NoticeDuration);
}
