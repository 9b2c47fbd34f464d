//! services/app/src/adapters/memory.rs
//!
//! Process-local implementations of the identity and document-store ports.
//! They back the `memory` configuration and the service's tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use informes_core::{
    CollaboratorError, DocumentId, DocumentStore, ErrorCode, IdentityService, PortResult,
    Session, StoredReport, Timestamp,
};
use tracing::info;
use uuid::Uuid;

//=========================================================================================
// Identity
//=========================================================================================

struct Account {
    uid: String,
    password: String,
}

#[derive(Default)]
pub struct InMemoryIdentity {
    accounts: HashMap<String, Account>,
    current: Mutex<Option<Session>>,
    scripted_failures: Mutex<VecDeque<CollaboratorError>>,
}

impl InMemoryIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an account. Emails are matched case-insensitively.
    pub fn with_account(mut self, email: &str, password: &str) -> Self {
        self.accounts.insert(
            email.to_lowercase(),
            Account {
                uid: Uuid::new_v4().simple().to_string(),
                password: password.to_string(),
            },
        );
        self
    }

    /// Makes the next `sign_in` fail with `err`, whatever the credentials.
    pub fn fail_next(&self, err: CollaboratorError) {
        self.scripted_failures
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(err);
    }
}

#[async_trait]
impl IdentityService for InMemoryIdentity {
    async fn sign_in(&self, email: &str, password: &str) -> PortResult<Session> {
        if let Some(err) = self
            .scripted_failures
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
        {
            return Err(err);
        }

        let account = self
            .accounts
            .get(&email.to_lowercase())
            .filter(|account| account.password == password)
            .ok_or_else(|| {
                CollaboratorError::new(ErrorCode::InvalidCredentials, "INVALID_LOGIN_CREDENTIALS")
            })?;

        let session = Session {
            uid: account.uid.clone(),
            email: Some(email.to_lowercase()),
            id_token: Some(Uuid::new_v4().to_string()),
        };
        *self.current.lock().unwrap_or_else(|e| e.into_inner()) = Some(session.clone());
        Ok(session)
    }

    fn current_session(&self) -> Option<Session> {
        self.current
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

//=========================================================================================
// Document Store
//=========================================================================================

#[derive(Debug, Clone)]
pub struct StoredDocument {
    pub collection: String,
    pub id: DocumentId,
    pub record: StoredReport,
}

#[derive(Default)]
pub struct InMemoryStore {
    documents: Mutex<Vec<StoredDocument>>,
    scripted_failures: Mutex<VecDeque<CollaboratorError>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_next(&self, err: CollaboratorError) {
        self.scripted_failures
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(err);
    }

    /// All documents stored in `collection`, oldest first.
    pub fn documents(&self, collection: &str) -> Vec<StoredDocument> {
        self.documents
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|doc| doc.collection == collection)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn insert(&self, collection: &str, mut record: StoredReport) -> PortResult<DocumentId> {
        if let Some(err) = self
            .scripted_failures
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
        {
            return Err(err);
        }

        if record.created_at == Timestamp::Server {
            record.created_at = Timestamp::At(Utc::now());
        }
        let id = DocumentId(Uuid::new_v4().simple().to_string());
        info!(collection, document_id = %id, "Stored document in memory.");
        self.documents
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(StoredDocument {
                collection: collection.to_string(),
                id: id.clone(),
                record,
            });
        Ok(id)
    }
}
