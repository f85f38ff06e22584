//! `POST /api/doctor` and `PUT /api/doctor/{id}`.
//!
//! The incoming multipart form is read field by field. Known doctor text
//! fields and non-empty `photo`/`video` files are kept; everything else is
//! dropped before the form is re-encoded for the clinic backend.

use actix_multipart::Multipart;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use common::client::{Attachment, Payload};
use common::form::{AttachmentSlot, DoctorField};
use common::model::resource::Resource;
use futures_util::StreamExt;
use log::{debug, info};
use reqwest::Method;
use serde_json::Value;

use crate::error::ProxyError;
use crate::state::AppState;

/// Doctor columns accepted besides the form's own inputs.
const EXTRA_FIELDS: [&str; 2] = ["status", "rating"];

pub async fn create(
    state: web::Data<AppState>,
    multipart: Multipart,
) -> Result<HttpResponse, ProxyError> {
    let payload = read_doctor_form(multipart).await?;
    let (status, created): (_, Value) = state
        .upstream
        .send_payload(Method::POST, Resource::Doctor.path(), &payload)
        .await?;
    info!("Created doctor {}", created["id"]);
    Ok(HttpResponse::build(relayed_status(status)).json(created))
}

pub async fn update(
    state: web::Data<AppState>,
    doctor_id: web::Path<i64>,
    multipart: Multipart,
) -> Result<HttpResponse, ProxyError> {
    let doctor_id = doctor_id.into_inner();
    let payload = read_doctor_form(multipart).await?;
    let path = format!("{}/{}", Resource::Doctor.path(), doctor_id);
    let (status, updated): (_, Value) = state
        .upstream
        .send_payload(Method::PUT, &path, &payload)
        .await?;
    info!("Updated doctor {}", doctor_id);
    Ok(HttpResponse::build(relayed_status(status)).json(updated))
}

fn relayed_status(status: reqwest::StatusCode) -> StatusCode {
    StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::OK)
}

fn is_doctor_field(name: &str) -> bool {
    DoctorField::from_name(name).is_some() || EXTRA_FIELDS.contains(&name)
}

async fn read_doctor_form(mut multipart: Multipart) -> Result<Payload, ProxyError> {
    let mut payload = Payload::form();

    while let Some(item) = multipart.next().await {
        let mut field = item?;
        let Some(name) = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()))
        else {
            continue;
        };
        let file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename().map(|f| f.to_string()));
        let content_type = field.content_type().map(|mime| mime.to_string());

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            bytes.extend_from_slice(&chunk?);
        }

        if let Some(slot) = AttachmentSlot::from_name(&name) {
            if bytes.is_empty() {
                continue;
            }
            let mut attachment = Attachment::new(
                file_name.unwrap_or_else(|| slot.name().to_string()),
                bytes,
            );
            if let Some(content_type) = content_type {
                attachment = attachment.with_content_type(content_type);
            }
            payload.push_file(slot.name(), attachment);
        } else if is_doctor_field(&name) {
            payload.push_text(name, String::from_utf8_lossy(&bytes).into_owned());
        } else {
            debug!("Dropping unknown doctor field {}", name);
        }
    }
    Ok(payload)
}
