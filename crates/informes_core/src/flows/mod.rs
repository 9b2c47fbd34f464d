//! crates/informes_core/src/flows/mod.rs
//!
//! Submission flows: validation, the external call, and the state update.
//!
//! Each flow comes in three steps so the form's owner never holds the form
//! across a suspension point: `prepare_*` validates and enters `Submitting`,
//! the request's `send` performs the collaborator call, and `finish_*` applies
//! the result. `authenticate` and `create_report` chain the three.

pub mod login;
pub mod report;

use crate::error::SubmitError;

pub use login::{authenticate, finish_sign_in, open_register, prepare_sign_in, SignInRequest};
pub use report::{
    attach_files, create_report, finish_report, prepare_report, InsertRequest,
};

/// What happened when a submission was requested.
#[derive(Debug)]
pub enum Prepared<R> {
    /// The form is already submitting; nothing changed.
    Busy,
    /// Rejected locally; nothing was dispatched.
    Rejected(SubmitError),
    /// The form is now `Submitting` and the request must be sent.
    Ready(R),
}
