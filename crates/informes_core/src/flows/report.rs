//! crates/informes_core/src/flows/report.rs
//!
//! The report screen's create flow.

use tracing::{info, warn};

use crate::domain::{
    DocumentId, NoticeDuration, ReportDraft, Session, StoredReport, INFORMES_COLLECTION,
};
use crate::error::SubmitError;
use crate::flows::Prepared;
use crate::form::{FormState, SubmitOutcome};
use crate::messages::Messages;
use crate::ports::{DocumentStore, Notifier, PortResult};
use crate::validation::validate_required;

#[derive(Debug, Clone)]
pub struct InsertRequest {
    pub collection: &'static str,
    pub record: StoredReport,
}

impl InsertRequest {
    pub async fn send(self, store: &dyn DocumentStore) -> PortResult<DocumentId> {
        store.insert(self.collection, self.record).await
    }
}

/// Checks the required fields and the session, then enters `Submitting` and
/// builds the record to store.
pub fn prepare_report(
    form: &mut FormState<ReportDraft>,
    session: Option<&Session>,
    messages: &Messages,
    notifier: &dyn Notifier,
) -> Prepared<InsertRequest> {
    if form.is_submitting() {
        return Prepared::Busy;
    }

    let required = validate_required(form.values(), messages);
    if !required.valid {
        form.reject(required.message.clone());
        return Prepared::Rejected(SubmitError::Validation(required.message));
    }

    let Some(session) = session else {
        warn!("Report submitted without a signed-in user.");
        form.reject(messages.no_session);
        notifier.notify(messages.no_session, NoticeDuration::Long);
        return Prepared::Rejected(SubmitError::Precondition(messages.no_session.to_string()));
    };

    if !form.begin_submit() {
        return Prepared::Busy;
    }
    form.set_message(messages.report_saving);

    let record = StoredReport::from_draft(form.values().clone(), session);
    info!(owner = %record.owner_id, course = %record.course, "Saving report.");
    Prepared::Ready(InsertRequest {
        collection: INFORMES_COLLECTION,
        record,
    })
}

pub fn finish_report(
    form: &mut FormState<ReportDraft>,
    result: PortResult<DocumentId>,
    messages: &Messages,
    notifier: &dyn Notifier,
) -> Result<DocumentId, SubmitError> {
    match result {
        Ok(id) => {
            info!(document_id = %id, "Report saved.");
            form.complete_submit(SubmitOutcome::Succeeded {
                message: messages.report_saved.to_string(),
            });
            notifier.notify(messages.report_saved_toast, NoticeDuration::Short);
            Ok(id)
        }
        Err(err) => {
            warn!(code = ?err.code, "Saving report failed: {}", err.message);
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

pub async fn create_report(
    form: &mut FormState<ReportDraft>,
    session: Option<&Session>,
    store: &dyn DocumentStore,
    notifier: &dyn Notifier,
    messages: &Messages,
) -> Result<DocumentId, SubmitError> {
    let request = match prepare_report(form, session, messages, notifier) {
        Prepared::Ready(request) => request,
        Prepared::Rejected(err) => return Err(err),
        Prepared::Busy => return Err(SubmitError::Busy),
    };
    let result = request.send(store).await;
    finish_report(form, result, messages, notifier)
}

/// Attachment upload is not implemented; the control says so instead of
/// doing nothing.
pub fn attach_files(messages: &Messages, notifier: &dyn Notifier) -> &'static str {
    notifier.notify(messages.attachments_pending, NoticeDuration::Short);
    messages.attachments_pending
}
