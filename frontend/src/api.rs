//! Browser implementation of `ResourceClient`, talking to the console's own
//! `/api` relay with gloo-net.
//!
//! The relay answers `502`/`504` when the clinic backend gave no response, so
//! those two statuses are reported as `Transport`/`Timeout` like a failed fetch.

use common::client::{decode, error_message, ClientError, FieldValue, Payload, ResourceClient};
use common::model::resource::Resource;
use gloo_net::http::{Request, RequestBuilder, Response};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use wasm_bindgen::JsValue;
use web_sys::{Blob, BlobPropertyBag, FormData};

const API_ROOT: &str = "/api";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrowserClient;

impl BrowserClient {
    fn url(resource: Resource, id: Option<i64>) -> String {
        match id {
            Some(id) => format!("{}/{}/{}", API_ROOT, resource.path(), id),
            None => format!("{}/{}", API_ROOT, resource.path()),
        }
    }

    async fn send(builder: RequestBuilder, payload: Option<&Payload>) -> Result<Vec<u8>, ClientError> {
        let request = match payload {
            Some(payload) if payload.is_multipart() => builder.body(form_data(payload)?),
            Some(payload) => builder.json(&payload.to_json()),
            None => builder.build(),
        }
        .map_err(|e| ClientError::Malformed(e.to_string()))?;

        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        read_response(response).await
    }
}

async fn read_response(response: Response) -> Result<Vec<u8>, ClientError> {
    let status = response.status();
    let body = response
        .binary()
        .await
        .map_err(|e| ClientError::Transport(e.to_string()))?;
    if response.ok() {
        return Ok(body);
    }

    let text = String::from_utf8_lossy(&body);
    warn!("{} answered {}: {}", response.url(), status, text.trim());
    let message = || error_message(&text).unwrap_or_else(|| "backend not reachable".to_string());
    match status {
        502 => Err(ClientError::Transport(message())),
        504 => Err(ClientError::Timeout(message())),
        _ => Err(ClientError::rejected(status, &text)),
    }
}

fn js_error(value: JsValue) -> ClientError {
    ClientError::Malformed(format!("cannot build form data: {:?}", value))
}

fn form_data(payload: &Payload) -> Result<FormData, ClientError> {
    let form = FormData::new().map_err(js_error)?;
    for (name, value) in payload.fields() {
        match value {
            FieldValue::Text(text) => form.append_with_str(name, text).map_err(js_error)?,
            FieldValue::File(file) => {
                let bytes = js_sys::Uint8Array::from(file.bytes.as_slice());
                let parts = js_sys::Array::of1(&bytes);
                let options = BlobPropertyBag::new();
                if let Some(content_type) = &file.content_type {
                    options.set_type(content_type);
                }
                let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
                    .map_err(js_error)?;
                form.append_with_blob_and_filename(name, &blob, &file.file_name)
                    .map_err(js_error)?;
            }
        }
    }
    Ok(form)
}

impl ResourceClient for BrowserClient {
    async fn list<T: DeserializeOwned>(&self, resource: Resource) -> Result<Vec<T>, ClientError> {
        debug!("GET {}", Self::url(resource, None));
        let body = Self::send(Request::get(&Self::url(resource, None)), None).await?;
        decode(&body)
    }

    async fn fetch<T: DeserializeOwned>(&self, resource: Resource, id: i64) -> Result<T, ClientError> {
        let body = Self::send(Request::get(&Self::url(resource, Some(id))), None).await?;
        decode(&body)
    }

    async fn create<T: DeserializeOwned>(
        &self,
        resource: Resource,
        payload: &Payload,
    ) -> Result<T, ClientError> {
        debug!("POST {}", Self::url(resource, None));
        let body = Self::send(Request::post(&Self::url(resource, None)), Some(payload)).await?;
        decode(&body)
    }

    async fn update<T: DeserializeOwned>(
        &self,
        resource: Resource,
        id: i64,
        payload: &Payload,
    ) -> Result<T, ClientError> {
        debug!("PUT {}", Self::url(resource, Some(id)));
        let body = Self::send(Request::put(&Self::url(resource, Some(id))), Some(payload)).await?;
        decode(&body)
    }

    async fn remove(&self, resource: Resource, id: i64) -> Result<(), ClientError> {
        debug!("DELETE {}", Self::url(resource, Some(id)));
        Self::send(Request::delete(&Self::url(resource, Some(id))), None).await?;
        Ok(())
    }
}
