//! crates/informes_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any backend SDK or wire format.

use chrono::{DateTime, Utc};
use std::fmt;

/// Name of the document-store collection reports are written to.
pub const INFORMES_COLLECTION: &str = "informes";

//=========================================================================================
// Login
//=========================================================================================

/// The login form's input. Only ever lives inside a form state.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LoginField {
    Email,
    Password,
}

/// An authenticated user as reported by the identity provider.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub uid: String,
    pub email: Option<String>,
    /// Bearer credential for backend calls made on behalf of this user.
    pub id_token: Option<String>,
}

impl Session {
    pub fn new(uid: impl Into<String>, email: Option<String>) -> Self {
        Self {
            uid: uid.into(),
            email,
            id_token: None,
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("uid", &self.uid)
            .field("email", &self.email)
            .field("id_token", &self.id_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

//=========================================================================================
// Reports
//=========================================================================================

/// The report form's input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportDraft {
    pub course: String,
    pub year: String,
    pub semester: String,
    pub date: String,
    pub comments: String,
    /// Always empty: attachment upload is not implemented.
    pub attachments: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReportField {
    Course,
    Year,
    Semester,
    Date,
    Comments,
}

impl ReportField {
    pub const REQUIRED: [ReportField; 3] =
        [ReportField::Course, ReportField::Year, ReportField::Semester];
}

/// Lifecycle state of a stored report. New reports always start as `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportStatus {
    Pending,
}

impl ReportStatus {
    /// The value persisted in the store.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "pendiente",
        }
    }
}

/// A timestamp that is either already known or left for the store to assign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timestamp {
    /// Resolved by the store at write time.
    Server,
    At(DateTime<Utc>),
}

/// The record handed to the document store. Owned by the store once inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredReport {
    pub course: String,
    pub year: String,
    pub semester: String,
    pub date: String,
    pub comments: String,
    pub attachments: Vec<String>,
    pub created_at: Timestamp,
    pub status: ReportStatus,
    pub owner_id: String,
    pub owner_email: Option<String>,
}

impl StoredReport {
    /// Builds the record for a freshly submitted draft.
    pub fn from_draft(draft: ReportDraft, session: &Session) -> Self {
        Self {
            course: draft.course,
            year: draft.year,
            semester: draft.semester,
            date: draft.date,
            comments: draft.comments,
            attachments: Vec::new(),
            created_at: Timestamp::Server,
            status: ReportStatus::Pending,
            owner_id: session.uid.clone(),
            owner_email: session.email.clone(),
        }
    }
}

/// Identifier assigned to an inserted document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentId(pub String);

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

//=========================================================================================
// Validation
//=========================================================================================

/// Outcome of validating a single value. An empty message means "no error".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub valid: bool,
    pub message: String,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            message: String::new(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
        }
    }
}

//=========================================================================================
// Navigation and notices
//=========================================================================================

/// Route names used by the two screens.
pub mod routes {
    pub const LOGIN: &str = "login";
    pub const LOG_SUCCESS: &str = "log_success";
    pub const REGISTER: &str = "register";
    pub const INFORMES: &str = "informes";
}

/// Back-stack manipulation requested alongside a navigation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavOptions {
    /// Pop the back stack down to this route before navigating.
    pub pop_up_to: Option<String>,
    /// Also pop `pop_up_to` itself.
    pub inclusive: bool,
}

impl NavOptions {
    pub fn pop_up_to(route: impl Into<String>, inclusive: bool) -> Self {
        Self {
            pop_up_to: Some(route.into()),
            inclusive,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeDuration {
    Short,
    Long,
}
