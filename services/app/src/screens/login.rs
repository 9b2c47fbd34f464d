//! services/app/src/screens/login.rs
//!
//! The login screen controller.

use std::sync::Arc;

use informes_core::flows::{finish_sign_in, open_register, prepare_sign_in, Prepared};
use informes_core::{
    Credentials, FormState, FormView, IdentityService, LoginField, Messages, Navigator, Notifier,
    PortResult, Session, SubmitError,
};
use tokio::sync::mpsc;
use tracing::debug;

use super::dispatch;

pub struct LoginScreen {
    form: FormState<Credentials>,
    messages: &'static Messages,
    identity: Arc<dyn IdentityService>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    completions_tx: mpsc::UnboundedSender<PortResult<Session>>,
    completions_rx: mpsc::UnboundedReceiver<PortResult<Session>>,
}

impl LoginScreen {
    /// Mounts the screen with an empty form.
    pub fn new(
        messages: &'static Messages,
        identity: Arc<dyn IdentityService>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            form: FormState::new(),
            messages,
            identity,
            navigator,
            notifier,
            completions_tx,
            completions_rx,
        }
    }

    pub fn form(&self) -> &FormState<Credentials> {
        &self.form
    }

    pub fn view(&self) -> FormView<Credentials> {
        self.form.view()
    }

    pub fn edit(&mut self, field: LoginField, value: impl Into<String>) {
        self.form.set_field(field, value);
    }

    /// Validates and, if valid, dispatches sign-in in the background.
    /// Returns whether a request was dispatched.
    pub fn submit(&mut self) -> bool {
        let request = match prepare_sign_in(&mut self.form, self.messages) {
            Prepared::Ready(request) => request,
            Prepared::Rejected(err) => {
                debug!(%err, "Sign-in not dispatched.");
                return false;
            }
            Prepared::Busy => return false,
        };

        let identity = self.identity.clone();
        dispatch(
            "Sign-in",
            async move { request.send(identity.as_ref()).await },
            self.completions_tx.clone(),
        );
        true
    }

    pub fn register(&self) {
        open_register(self.navigator.as_ref());
    }

    /// Waits for the in-flight sign-in to answer. Pending forever if none is.
    pub async fn completed(&mut self) -> PortResult<Session> {
        match self.completions_rx.recv().await {
            Some(result) => result,
            None => std::future::pending().await,
        }
    }

    /// Applies a completion received from `completed`.
    pub fn apply(&mut self, result: PortResult<Session>) -> Result<Session, SubmitError> {
        finish_sign_in(
            &mut self.form,
            result,
            self.messages,
            self.navigator.as_ref(),
            self.notifier.as_ref(),
        )
    }

    /// Waits for and applies the in-flight sign-in, if there is one.
    pub async fn settle(&mut self) -> Option<Result<Session, SubmitError>> {
        if !self.form.is_submitting() {
            return None;
        }
        let result = self.completed().await;
        Some(self.apply(result))
    }
}
