pub mod domain;
pub mod error;
pub mod flows;
pub mod form;
pub mod messages;
pub mod ports;
pub mod validation;

pub use domain::{
    routes, Credentials, DocumentId, LoginField, NavOptions, NoticeDuration, ReportDraft,
    ReportField, ReportStatus, Session, StoredReport, Timestamp, ValidationResult,
    INFORMES_COLLECTION,
};
pub use error::{CredentialProblem, SubmitError};
pub use form::{reduce, FormEvent, FormFields, FormState, FormStatus, FormView, MessageTone, SubmitOutcome};
pub use messages::{Locale, Messages};
pub use ports::{
    CollaboratorError, DocumentStore, ErrorCode, IdentityService, Navigator, Notifier, PortResult,
};
