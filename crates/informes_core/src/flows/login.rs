//! crates/informes_core/src/flows/login.rs
//!
//! The login screen's sign-in flow.

use std::fmt;

use tracing::{info, warn};

use crate::domain::{routes, Credentials, LoginField, NavOptions, NoticeDuration, Session};
use crate::error::SubmitError;
use crate::flows::Prepared;
use crate::form::{FormState, SubmitOutcome};
use crate::messages::Messages;
use crate::ports::{IdentityService, Navigator, Notifier, PortResult};
use crate::validation::{validate_email, validate_password};

/// An owned snapshot of the credentials to send.
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for SignInRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignInRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl SignInRequest {
    pub async fn send(self, identity: &dyn IdentityService) -> PortResult<Session> {
        identity.sign_in(&self.email, &self.password).await
    }
}

/// Validates both fields and, if they pass, enters `Submitting`.
///
/// Field errors are written next to each field; on a validation failure the
/// status is left as it was.
pub fn prepare_sign_in(
    form: &mut FormState<Credentials>,
    messages: &Messages,
) -> Prepared<SignInRequest> {
    if form.is_submitting() {
        return Prepared::Busy;
    }

    let email = validate_email(form.value(LoginField::Email), messages);
    let password = validate_password(form.value(LoginField::Password), messages);
    form.set_errors([
        (LoginField::Email, email.message.clone()),
        (LoginField::Password, password.message.clone()),
    ]);

    if !email.valid || !password.valid {
        let summary = [email.message, password.message]
            .into_iter()
            .filter(|m| !m.is_empty())
            .collect::<Vec<_>>()
            .join("; ");
        return Prepared::Rejected(SubmitError::Validation(summary));
    }

    if !form.begin_submit() {
        return Prepared::Busy;
    }
    form.set_message("");

    let values = form.values();
    info!(email = %values.email, "Signing in.");
    Prepared::Ready(SignInRequest {
        email: values.email.clone(),
        password: values.password.clone(),
    })
}

/// Applies the identity provider's answer to the form.
///
/// On success the login screen is removed from history on the way to the
/// success screen.
pub fn finish_sign_in(
    form: &mut FormState<Credentials>,
    result: PortResult<Session>,
    messages: &Messages,
    navigator: &dyn Navigator,
    notifier: &dyn Notifier,
) -> Result<Session, SubmitError> {
    match result {
        Ok(session) => {
            info!(uid = %session.uid, "Sign-in succeeded.");
            form.complete_submit(SubmitOutcome::Succeeded {
                message: messages.login_success.to_string(),
            });
            notifier.notify(messages.login_success, NoticeDuration::Short);
            navigator.navigate_to(
                routes::LOG_SUCCESS,
                NavOptions::pop_up_to(routes::LOGIN, true),
            );
            Ok(session)
        }
        Err(err) => {
            warn!(code = ?err.code, "Sign-in failed: {}", err.message);
            let classified = SubmitError::classify(&err);
            let message = classified.user_message(messages);
            form.complete_submit(SubmitOutcome::Failed {
                message: message.clone(),
            });
            notifier.notify(&message, NoticeDuration::Long);
            Err(classified)
        }
    }
}

/// Runs the whole flow while holding the form.
pub async fn authenticate(
    form: &mut FormState<Credentials>,
    identity: &dyn IdentityService,
    navigator: &dyn Navigator,
    notifier: &dyn Notifier,
    messages: &Messages,
) -> Result<Session, SubmitError> {
    let request = match prepare_sign_in(form, messages) {
        Prepared::Ready(request) => request,
        Prepared::Rejected(err) => return Err(err),
        Prepared::Busy => return Err(SubmitError::Busy),
    };
    let result = request.send(identity).await;
    finish_sign_in(form, result, messages, navigator, notifier)
}

/// The login screen's link to account registration.
pub fn open_register(navigator: &dyn Navigator) {
    navigator.navigate_to(routes::REGISTER, NavOptions::default());
}
