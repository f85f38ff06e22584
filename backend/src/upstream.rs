//! Native client for the clinic backend.
//!
//! `UpstreamClient` wraps one pooled `reqwest::Client` and is shared by every
//! actix worker through `web::Data`. It implements `ResourceClient`, so the
//! same submission workflow the browser runs can also run here, and it hands
//! out raw request builders to the pass-through relays.

use std::time::Duration;

use common::client::{decode, ClientError, FieldValue, Payload, ResourceClient};
use common::model::resource::Resource;
use log::{debug, warn};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: String,
}

impl UpstreamClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, self.url(path))
    }

    /// Any JSON document under `path`, for callers that do not know its shape.
    pub async fn get_value(&self, path: &str) -> Result<Value, ClientError> {
        let body = self.send(self.request(Method::GET, path)).await?;
        decode(&body)
    }

    /// Sends `payload` and returns the backend's success status with its body.
    pub async fn send_payload<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        payload: &Payload,
    ) -> Result<(StatusCode, T), ClientError> {
        let request = with_payload(self.request(method, path), payload)?;
        let (status, body) = self.send_with_status(request).await?;
        Ok((status, decode(&body)?))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Vec<u8>, ClientError> {
        self.send_with_status(request).await.map(|(_, body)| body)
    }

    async fn send_with_status(&self, request: RequestBuilder) -> Result<(StatusCode, Vec<u8>), ClientError> {
        let response = request.send().await.map_err(|e| transport_error(&e))?;
        let status = response.status();
        let body = response.bytes().await.map_err(|e| transport_error(&e))?;
        if status.is_success() {
            Ok((status, body.to_vec()))
        } else {
            let text = String::from_utf8_lossy(&body);
            warn!("Backend answered {} : {}", status, text.trim());
            Err(ClientError::rejected(status.as_u16(), &text))
        }
    }
}

/// Attaches `payload` as multipart or JSON, following the shared encoding rule.
pub fn with_payload(request: RequestBuilder, payload: &Payload) -> Result<RequestBuilder, ClientError> {
    if !payload.is_multipart() {
        return Ok(request.json(&payload.to_json()));
    }
    let mut form = Form::new();
    for (name, value) in payload.fields() {
        form = match value {
            FieldValue::Text(text) => form.text(name.to_string(), text.clone()),
            FieldValue::File(file) => {
                let mut part = Part::bytes(file.bytes.clone()).file_name(file.file_name.clone());
                if let Some(content_type) = &file.content_type {
                    part = part.mime_str(content_type).map_err(|_| {
                        ClientError::Malformed(format!("invalid content type {}", content_type))
                    })?;
                }
                form.part(name.to_string(), part)
            }
        };
    }
    Ok(request.multipart(form))
}

pub fn transport_error(err: &reqwest::Error) -> ClientError {
    if err.is_timeout() {
        ClientError::Timeout("request timed out".to_string())
    } else {
        ClientError::Transport(err.to_string())
    }
}

impl ResourceClient for UpstreamClient {
    async fn list<T: DeserializeOwned>(&self, resource: Resource) -> Result<Vec<T>, ClientError> {
        debug!("GET /{}", resource);
        let body = self.send(self.request(Method::GET, resource.path())).await?;
        decode(&body)
    }

    async fn fetch<T: DeserializeOwned>(&self, resource: Resource, id: i64) -> Result<T, ClientError> {
        debug!("GET /{}/{}", resource, id);
        let path = format!("{}/{}", resource.path(), id);
        let body = self.send(self.request(Method::GET, &path)).await?;
        decode(&body)
    }

    async fn create<T: DeserializeOwned>(
        &self,
        resource: Resource,
        payload: &Payload,
    ) -> Result<T, ClientError> {
        debug!("POST /{}", resource);
        let (_, created) = self.send_payload(Method::POST, resource.path(), payload).await?;
        Ok(created)
    }

    async fn update<T: DeserializeOwned>(
        &self,
        resource: Resource,
        id: i64,
        payload: &Payload,
    ) -> Result<T, ClientError> {
        debug!("PUT /{}/{}", resource, id);
        let path = format!("{}/{}", resource.path(), id);
        let (_, updated) = self.send_payload(Method::PUT, &path, payload).await?;
        Ok(updated)
    }

    async fn remove(&self, resource: Resource, id: i64) -> Result<(), ClientError> {
        debug!("DELETE /{}/{}", resource, id);
        let path = format!("{}/{}", resource.path(), id);
        self.send(self.request(Method::DELETE, &path)).await?;
        Ok(())
    }
}
