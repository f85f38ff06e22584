//! Pass-through relay: same method, body, content type and query string
//! upstream; same status, content type and body back.

use actix_web::http::header::{AUTHORIZATION, CONTENT_TYPE};
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse};
use common::model::resource::Resource;
use log::warn;
use reqwest::Method;

use crate::error::ProxyError;
use crate::state::AppState;
use crate::upstream::UpstreamClient;

/// `GET|POST /api/{resource}`
pub async fn collection(
    state: web::Data<AppState>,
    req: HttpRequest,
    resource: web::Path<String>,
    body: web::Bytes,
) -> Result<HttpResponse, ProxyError> {
    let resource = known_resource(&resource)?;
    forward(&state.upstream, &req, resource.path(), body).await
}

/// `GET|PUT|DELETE /api/{resource}/{id}`
pub async fn member(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<(String, i64)>,
    body: web::Bytes,
) -> Result<HttpResponse, ProxyError> {
    let (resource, id) = path.into_inner();
    let resource = known_resource(&resource)?;
    let path = format!("{}/{}", resource.path(), id);
    forward(&state.upstream, &req, &path, body).await
}

/// `DELETE /api/direction-doctors/doctor/{id}`: drops every link of one doctor.
pub async fn remove_doctor_links(
    state: web::Data<AppState>,
    req: HttpRequest,
    doctor_id: web::Path<i64>,
    body: web::Bytes,
) -> Result<HttpResponse, ProxyError> {
    let path = format!("{}/{}", Resource::DoctorDirectionLinks.path(), doctor_id);
    forward(&state.upstream, &req, &path, body).await
}

fn known_resource(name: &str) -> Result<Resource, ProxyError> {
    Resource::from_path(name)
        .filter(|resource| Resource::COLLECTIONS.contains(resource))
        .ok_or_else(|| ProxyError::UnknownResource(name.to_string()))
}

async fn forward(
    upstream: &UpstreamClient,
    req: &HttpRequest,
    path: &str,
    body: web::Bytes,
) -> Result<HttpResponse, ProxyError> {
    let path = match req.query_string() {
        "" => path.to_string(),
        query => format!("{}?{}", path, query),
    };
    let method = Method::from_bytes(req.method().as_str().as_bytes()).unwrap_or(Method::GET);

    let mut request = upstream.request(method, &path);
    for name in [CONTENT_TYPE, AUTHORIZATION] {
        if let Some(value) = req.headers().get(&name).and_then(|v| v.to_str().ok()) {
            request = request.header(name.as_str(), value);
        }
    }
    if !body.is_empty() {
        request = request.body(body.to_vec());
    }

    let response = request.send().await.map_err(|e| {
        warn!("{} /{} got no response: {}", req.method(), path, e);
        ProxyError::Unreachable(e)
    })?;
    relay_response(response).await
}

/// Copies an upstream response into an actix response.
pub async fn relay_response(response: reqwest::Response) -> Result<HttpResponse, ProxyError> {
    let status = StatusCode::from_u16(response.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = response.bytes().await?;

    let mut builder = HttpResponse::build(status);
    if let Some(content_type) = content_type {
        builder.content_type(content_type);
    }
    Ok(builder.body(body.to_vec()))
}
