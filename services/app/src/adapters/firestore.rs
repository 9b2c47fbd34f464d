//! services/app/src/adapters/firestore.rs
//!
//! This module contains the adapter for Cloud Firestore's REST API.
//! It implements the `DocumentStore` port from the `core` crate.
//!
//! Reports are written with a single `documents:commit` so that the creation
//! time can be assigned by the server (`REQUEST_TIME` transform).

use std::sync::Arc;

use async_trait::async_trait;
use informes_core::{
    CollaboratorError, DocumentId, DocumentStore, ErrorCode, IdentityService, PortResult,
    StoredReport, Timestamp,
};
use reqwest::Client;
use serde_json::{json, Map, Value};
use tracing::{debug, info};
use uuid::Uuid;

use crate::adapters::http::{malformed_response, parse_error_body, transport_error};
use crate::config::FirebaseSettings;

/// Field the server timestamp is written to.
const CREATED_AT_FIELD: &str = "fechaCreacion";

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

pub struct FirestoreAdapter {
    client: Client,
    firestore_url: String,
    project_id: String,
    /// Source of the bearer token for the signed-in user.
    identity: Arc<dyn IdentityService>,
}

impl FirestoreAdapter {
    /// Creates a new `FirestoreAdapter`.
    pub fn new(
        client: Client,
        settings: &FirebaseSettings,
        identity: Arc<dyn IdentityService>,
    ) -> Self {
        Self {
            client,
            firestore_url: settings.firestore_url.clone(),
            project_id: settings.project_id.clone(),
            identity,
        }
    }

    fn database_path(&self) -> String {
        format!("projects/{}/databases/(default)", self.project_id)
    }

    fn commit_url(&self) -> String {
        format!("{}/v1/{}/documents:commit", self.firestore_url, self.database_path())
    }
}

//=========================================================================================
// Record Encoding
//=========================================================================================

fn string_value(s: &str) -> Value {
    json!({ "stringValue": s })
}

/// Encodes a report as Firestore typed fields, using the field names existing
/// documents in the collection already carry.
pub(crate) fn encode_fields(record: &StoredReport) -> Map<String, Value> {
    let mut fields = Map::new();
    fields.insert("curso".into(), string_value(&record.course));
    fields.insert("año".into(), string_value(&record.year));
    fields.insert("semestre".into(), string_value(&record.semester));
    fields.insert("fecha".into(), string_value(&record.date));
    fields.insert("comentarios".into(), string_value(&record.comments));
    let attachments: Vec<Value> = record.attachments.iter().map(|a| string_value(a)).collect();
    fields.insert(
        "archivos".into(),
        json!({ "arrayValue": { "values": attachments } }),
    );
    fields.insert("estado".into(), string_value(record.status.as_str()));
    fields.insert("usuarioId".into(), string_value(&record.owner_id));
    fields.insert(
        "usuarioEmail".into(),
        match &record.owner_email {
            Some(email) => string_value(email),
            None => json!({ "nullValue": null }),
        },
    );
    if let Timestamp::At(at) = record.created_at {
        fields.insert(
            CREATED_AT_FIELD.into(),
            json!({ "timestampValue": at.to_rfc3339() }),
        );
    }
    fields
}

/// Builds the commit request creating `document_name` from `record`.
pub(crate) fn commit_body(document_name: &str, record: &StoredReport) -> Value {
    let mut write = json!({
        "update": {
            "name": document_name,
            "fields": encode_fields(record),
        },
        "currentDocument": { "exists": false },
    });
    if record.created_at == Timestamp::Server {
        write["updateTransforms"] = json!([
            { "fieldPath": CREATED_AT_FIELD, "setToServerValue": "REQUEST_TIME" }
        ]);
    }
    json!({ "writes": [write] })
}

/// Maps a Firestore error response onto a collaborator error. The canonical
/// `status` string decides.
pub(crate) fn firestore_error(http_status: u16, body: &str) -> CollaboratorError {
    let Some(parsed) = parse_error_body(body) else {
        return CollaboratorError::unknown(format!("HTTP {}: {}", http_status, body.trim()));
    };
    let status = parsed.status.unwrap_or_default();
    let code = match status.as_str() {
        "PERMISSION_DENIED" => ErrorCode::PermissionDenied,
        "UNAUTHENTICATED" => ErrorCode::Unauthenticated,
        "NOT_FOUND" | "FAILED_PRECONDITION" => ErrorCode::Misconfigured,
        "UNAVAILABLE" | "DEADLINE_EXCEEDED" => ErrorCode::Network,
        "INVALID_ARGUMENT" if parsed.message.starts_with("API key not valid") => {
            ErrorCode::Misconfigured
        }
        _ => ErrorCode::Unknown,
    };
    let message = if status.is_empty() {
        parsed.message
    } else {
        format!("{}: {}", status, parsed.message)
    };
    CollaboratorError::new(code, message)
}

//=========================================================================================
// `DocumentStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl DocumentStore for FirestoreAdapter {
    async fn insert(&self, collection: &str, record: StoredReport) -> PortResult<DocumentId> {
        let id = Uuid::new_v4().simple().to_string();
        let document_name = format!("{}/documents/{}/{}", self.database_path(), collection, id);
        let body = commit_body(&document_name, &record);

        let mut request = self.client.post(self.commit_url()).json(&body);
        match self.identity.current_session().and_then(|s| s.id_token) {
            Some(token) => request = request.bearer_auth(token),
            None => debug!("No signed-in token; committing without Authorization."),
        }

        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(firestore_error(status.as_u16(), &body));
        }

        // Only the shape is checked; the write results carry nothing we keep.
        response
            .json::<Value>()
            .await
            .map_err(|e| malformed_response("commit", e))?;

        info!(collection, document_id = %id, "Document committed.");
        Ok(DocumentId(id))
    }
}
