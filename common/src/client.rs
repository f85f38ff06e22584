//! Contract for talking to one logical resource of the clinic backend.
//!
//! Two implementations exist: the backend's `UpstreamClient` (reqwest, talks
//! to the clinic backend directly) and the frontend's `BrowserClient`
//! (gloo-net, talks to the console's `/api` relay). Both apply the same
//! payload encoding rule: a `Payload` that carries attachments, or that was
//! built with [`Payload::form`], goes out as `multipart/form-data`; any other
//! payload goes out as a JSON object of its text fields.

use log::warn;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::model::resource::Resource;

/// A file chosen for upload, held in memory until it is submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    File(Attachment),
}

/// Ordered set of named fields sent to a create or update endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payload {
    fields: Vec<(String, FieldValue)>,
    form: bool,
}

impl Payload {
    /// A payload encoded as JSON unless an attachment is added.
    pub fn new() -> Self {
        Self::default()
    }

    /// A payload always encoded as `multipart/form-data`.
    pub fn form() -> Self {
        Self {
            fields: Vec::new(),
            form: true,
        }
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push_text(name, value);
        self
    }

    pub fn file(mut self, name: impl Into<String>, attachment: Attachment) -> Self {
        self.push_file(name, attachment);
        self
    }

    pub fn push_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields
            .push((name.into(), FieldValue::Text(value.into())));
    }

    pub fn push_file(&mut self, name: impl Into<String>, attachment: Attachment) {
        self.fields
            .push((name.into(), FieldValue::File(attachment)));
    }

    pub fn is_multipart(&self) -> bool {
        self.form || self.has_attachments()
    }

    pub fn has_attachments(&self) -> bool {
        self.fields
            .iter()
            .any(|(_, value)| matches!(value, FieldValue::File(_)))
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.fields.iter().find_map(|(n, value)| match value {
            FieldValue::Text(text) if n == name => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn attachment(&self, name: &str) -> Option<&Attachment> {
        self.fields.iter().find_map(|(n, value)| match value {
            FieldValue::File(file) if n == name => Some(file),
            _ => None,
        })
    }

    /// JSON body for non-multipart payloads. Attachments are not representable
    /// and are left out.
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        for (name, value) in &self.fields {
            if let FieldValue::Text(text) = value {
                map.insert(name.clone(), Value::String(text.clone()));
            }
        }
        Value::Object(map)
    }
}

/// Why a call to the clinic backend did not succeed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// No response: connection refused, DNS failure.
    #[error("backend not reachable: {0}")]
    Transport(String),
    /// No response within the allowed wait.
    #[error("backend did not answer in time: {0}")]
    Timeout(String),
    /// The backend answered with a non-2xx status.
    #[error("backend rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },
    /// The backend answered 2xx but the body was not what the caller expects.
    #[error("unexpected backend response: {0}")]
    Malformed(String),
}

impl ClientError {
    /// Builds a `Rejected` error from a non-2xx response body.
    pub fn rejected(status: u16, body: &str) -> Self {
        ClientError::Rejected {
            status,
            message: error_message(body).unwrap_or_else(|| format!("HTTP {}", status)),
        }
    }

    /// True when no response came back at all, timeouts included.
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport(_) | ClientError::Timeout(_))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ClientError::Timeout(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Rejected { status: 404, .. })
    }

    /// The part of the error worth showing to a user.
    pub fn message(&self) -> &str {
        match self {
            ClientError::Transport(message)
            | ClientError::Timeout(message)
            | ClientError::Rejected { message, .. }
            | ClientError::Malformed(message) => message,
        }
    }
}

/// Extracts the human-readable message from a backend error body.
///
/// Structured bodies carry it under `error`, `message` (string or list of
/// strings) or `details`; anything else is returned as trimmed raw text.
pub fn error_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => ["error", "message", "details"]
            .iter()
            .filter_map(|key| map.get(*key))
            .find_map(|value| match value {
                Value::String(s) if !s.is_empty() => Some(s.clone()),
                Value::Array(items) => {
                    let parts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
                    (!parts.is_empty()).then(|| parts.join(", "))
                }
                _ => None,
            })
            .or_else(|| Some(body.to_string())),
        Ok(Value::String(s)) => Some(s),
        _ => Some(body.to_string()),
    }
}

/// Decodes a 2xx response body into the caller's record type.
///
/// An empty body decodes as JSON `null`, so endpoints that answer with no
/// content can be read as `()` or `serde::de::IgnoredAny`.
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ClientError> {
    let body: &[u8] = if body.iter().all(u8::is_ascii_whitespace) {
        b"null"
    } else {
        body
    };
    serde_json::from_slice(body).map_err(|e| ClientError::Malformed(e.to_string()))
}

/// The only part of a create response the submission workflow relies on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RecordId {
    #[serde(default, deserialize_with = "crate::model::de::optional_id")]
    pub id: Option<i64>,
}

/// One network operation against one logical resource.
///
/// Futures returned by implementations are not required to be `Send`: the
/// browser client runs on the JS event loop and the native client on an
/// actix worker.
#[allow(async_fn_in_trait)]
pub trait ResourceClient {
    async fn list<T: DeserializeOwned>(&self, resource: Resource) -> Result<Vec<T>, ClientError>;

    async fn fetch<T: DeserializeOwned>(&self, resource: Resource, id: i64)
    -> Result<T, ClientError>;

    async fn create<T: DeserializeOwned>(
        &self,
        resource: Resource,
        payload: &Payload,
    ) -> Result<T, ClientError>;

    async fn update<T: DeserializeOwned>(
        &self,
        resource: Resource,
        id: i64,
        payload: &Payload,
    ) -> Result<T, ClientError>;

    async fn remove(&self, resource: Resource, id: i64) -> Result<(), ClientError>;

    /// Fail-open listing for aggregate views: any failure counts as an empty list.
    async fn list_or_empty<T: DeserializeOwned>(&self, resource: Resource) -> Vec<T> {
        match self.list(resource).await {
            Ok(items) => items,
            Err(err) => {
                warn!("Listing {} failed, counting it as empty: {}", resource, err);
                Vec::new()
            }
        }
    }
}
