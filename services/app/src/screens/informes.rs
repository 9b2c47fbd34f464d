//! services/app/src/screens/informes.rs
//!
//! The "new report" screen controller.

use std::sync::Arc;

use informes_core::flows::{attach_files, finish_report, prepare_report, Prepared};
use informes_core::{
    DocumentId, DocumentStore, FormState, FormView, IdentityService, Messages, Notifier,
    PortResult, ReportDraft, ReportField, SubmitError,
};
use tokio::sync::mpsc;
use tracing::debug;

use super::dispatch;

pub struct InformesScreen {
    form: FormState<ReportDraft>,
    messages: &'static Messages,
    identity: Arc<dyn IdentityService>,
    store: Arc<dyn DocumentStore>,
    notifier: Arc<dyn Notifier>,
    completions_tx: mpsc::UnboundedSender<PortResult<DocumentId>>,
    completions_rx: mpsc::UnboundedReceiver<PortResult<DocumentId>>,
}

impl InformesScreen {
    pub fn new(
        messages: &'static Messages,
        identity: Arc<dyn IdentityService>,
        store: Arc<dyn DocumentStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            form: FormState::new(),
            messages,
            identity,
            store,
            notifier,
            completions_tx,
            completions_rx,
        }
    }

    pub fn form(&self) -> &FormState<ReportDraft> {
        &self.form
    }

    pub fn view(&self) -> FormView<ReportDraft> {
        self.form.view()
    }

    pub fn edit(&mut self, field: ReportField, value: impl Into<String>) {
        self.form.set_field(field, value);
    }

    /// Checks the draft against the signed-in user and, if it can be saved,
    /// dispatches the insert in the background.
    pub fn submit(&mut self) -> bool {
        let session = self.identity.current_session();
        let request = match prepare_report(
            &mut self.form,
            session.as_ref(),
            self.messages,
            self.notifier.as_ref(),
        ) {
            Prepared::Ready(request) => request,
            Prepared::Rejected(err) => {
                debug!(%err, "Report not dispatched.");
                return false;
            }
            Prepared::Busy => return false,
        };

        let store = self.store.clone();
        dispatch(
            "Report save",
            async move { request.send(store.as_ref()).await },
            self.completions_tx.clone(),
        );
        true
    }

    pub fn attach_files(&self) -> &'static str {
        attach_files(self.messages, self.notifier.as_ref())
    }

    pub async fn completed(&mut self) -> PortResult<DocumentId> {
        match self.completions_rx.recv().await {
            Some(result) => result,
            None => std::future::pending().await,
        }
    }

    pub fn apply(&mut self, result: PortResult<DocumentId>) -> Result<DocumentId, SubmitError> {
        finish_report(&mut self.form, result, self.messages, self.notifier.as_ref())
    }

    pub async fn settle(&mut self) -> Option<Result<DocumentId, SubmitError>> {
        if !self.form.is_submitting() {
            return None;
        }
        let result = self.completed().await;
        Some(self.apply(result))
    }
}
