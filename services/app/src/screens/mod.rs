//! services/app/src/screens/mod.rs
//!
//! Screen controllers. Each owns its form state exclusively; background calls
//! report back over the screen's channel and are applied by the owner between
//! input events.

pub mod informes;
pub mod login;

pub use informes::InformesScreen;
pub use login::LoginScreen;

use std::future::Future;

use informes_core::{CollaboratorError, PortResult};
use tokio::sync::mpsc;
use tracing::error;

/// Runs a collaborator call on its own task and delivers exactly one
/// completion to `tx`. A call that panics or is cancelled completes as an
/// unknown collaborator failure, so the form always leaves `Submitting`.
pub(crate) fn dispatch<T, Fut>(
    what: &'static str,
    call: Fut,
    tx: mpsc::UnboundedSender<PortResult<T>>,
) where
    T: Send + 'static,
    Fut: Future<Output = PortResult<T>> + Send + 'static,
{
    let handle = tokio::spawn(call);
    tokio::spawn(async move {
        let result = match handle.await {
            Ok(result) => result,
            Err(join_err) => {
                error!(%join_err, "{} task did not complete.", what);
                Err(CollaboratorError::unknown(format!(
                    "{} failed unexpectedly",
                    what
                )))
            }
        };
        // The screen may have been dropped; nothing left to update then.
        let _ = tx.send(result);
    });
}
