//! services/app/src/bootstrap.rs
//!
//! Wires the configured adapters into the two screens.

use std::sync::Arc;

use informes_core::{routes, DocumentStore, IdentityService, Messages, Navigator, Notifier};
use tracing::info;

use crate::adapters::{
    http::build_client, BackStackNavigator, FirebaseAuthAdapter, FirestoreAdapter,
    InMemoryIdentity, InMemoryStore, ToastQueue,
};
use crate::config::{Backend, Config};
use crate::error::AppError;
use crate::screens::{InformesScreen, LoginScreen};
use crate::shell::Shell;

/// The process-wide collaborators.
pub struct Collaborators {
    pub identity: Arc<dyn IdentityService>,
    pub store: Arc<dyn DocumentStore>,
}

pub fn build_collaborators(config: &Config) -> Result<Collaborators, AppError> {
    match &config.backend {
        Backend::Firebase(settings) => {
            info!(project = %settings.project_id, "Using the Firebase backend.");
            let client = build_client()?;
            let identity: Arc<dyn IdentityService> =
                Arc::new(FirebaseAuthAdapter::new(client.clone(), settings));
            let store = Arc::new(FirestoreAdapter::new(client, settings, identity.clone()));
            Ok(Collaborators { identity, store })
        }
        Backend::Memory {
            demo_email,
            demo_password,
        } => {
            info!(demo_email = %demo_email, "Using the in-memory backend.");
            Ok(Collaborators {
                identity: Arc::new(InMemoryIdentity::new().with_account(demo_email, demo_password)),
                store: Arc::new(InMemoryStore::new()),
            })
        }
    }
}

/// Mounts both screens, starting on the login route.
pub fn build_shell(config: &Config, collaborators: Collaborators) -> Shell {
    let messages = Messages::for_locale(config.locale);
    let navigator = Arc::new(BackStackNavigator::new(routes::LOGIN));
    let toasts = Arc::new(ToastQueue::new());

    let login = LoginScreen::new(
        messages,
        collaborators.identity.clone(),
        navigator.clone() as Arc<dyn Navigator>,
        toasts.clone() as Arc<dyn Notifier>,
    );
    let informes = InformesScreen::new(
        messages,
        collaborators.identity,
        collaborators.store,
        toasts.clone() as Arc<dyn Notifier>,
    );
    Shell::new(login, informes, navigator, toasts)
}
