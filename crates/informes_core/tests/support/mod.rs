//! Hand-written fakes for the collaborator ports.

#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use informes_core::{
    CollaboratorError, DocumentId, DocumentStore, IdentityService, NavOptions, Navigator,
    NoticeDuration, Notifier, PortResult, Session, StoredReport,
};

pub struct FakeIdentity {
    pub result: PortResult<Session>,
    pub calls: Mutex<Vec<(String, String)>>,
}

impl FakeIdentity {
    pub fn succeeding(uid: &str, email: &str) -> Self {
        Self {
            result: Ok(Session::new(uid, Some(email.to_string()))),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(err: CollaboratorError) -> Self {
        Self {
            result: Err(err),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl IdentityService for FakeIdentity {
    async fn sign_in(&self, email: &str, password: &str) -> PortResult<Session> {
        self.calls
            .lock()
            .unwrap()
            .push((email.to_string(), password.to_string()));
        self.result.clone()
    }

    fn current_session(&self) -> Option<Session> {
        None
    }
}

pub struct FakeStore {
    pub result: PortResult<DocumentId>,
    pub inserted: Mutex<Vec<(String, StoredReport)>>,
}

impl FakeStore {
    pub fn succeeding(id: &str) -> Self {
        Self {
            result: Ok(DocumentId(id.to_string())),
            inserted: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(err: CollaboratorError) -> Self {
        Self {
            result: Err(err),
            inserted: Mutex::new(Vec::new()),
        }
    }

    pub fn insert_count(&self) -> usize {
        self.inserted.lock().unwrap().len()
    }
}

#[async_trait]
impl DocumentStore for FakeStore {
    async fn insert(&self, collection: &str, record: StoredReport) -> PortResult<DocumentId> {
        self.inserted
            .lock()
            .unwrap()
            .push((collection.to_string(), record));
        self.result.clone()
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    pub transitions: Mutex<Vec<(String, NavOptions)>>,
}

impl Navigator for RecordingNavigator {
    fn navigate_to(&self, route: &str, options: NavOptions) {
        self.transitions
            .lock()
            .unwrap()
            .push((route.to_string(), options));
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub notices: Mutex<Vec<(String, NoticeDuration)>>,
}

impl RecordingNotifier {
    pub fn texts(&self) -> Vec<String> {
        self.notices
            .lock()
            .unwrap()
            .iter()
            .map(|(text, _)| text.clone())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, text: &str, duration: NoticeDuration) {
        self.notices
            .lock()
            .unwrap()
            .push((text.to_string(), duration));
    }
}
