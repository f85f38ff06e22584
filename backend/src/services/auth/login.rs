//! `POST /api/auth/login`: relays credentials to the clinic backend.
//!
//! The wait is bounded separately from the other relays. A backend that does
//! not answer in time reads as "Cannot reach backend at …", which the login
//! screen shows apart from rejected credentials.

use actix_web::{web, HttpResponse};
use common::client::ClientError;
use common::requests::{extract_token, LoginRequest};
use log::{info, warn};
use reqwest::Method;
use serde_json::Value;

use crate::error::ProxyError;
use crate::state::AppState;

pub async fn process(
    state: web::Data<AppState>,
    credentials: web::Json<LoginRequest>,
) -> Result<HttpResponse, ProxyError> {
    info!("Login attempt for {}", credentials.email);
    let upstream = &state.upstream;
    let response = upstream
        .request(Method::POST, "auth/login")
        .timeout(state.config.login_timeout)
        .json(&credentials.into_inner())
        .send()
        .await
        .map_err(|e| {
            warn!("Login relay got no response: {}", e);
            ProxyError::LoginUnreachable(upstream.base_url().to_string())
        })?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|_| ProxyError::LoginUnreachable(upstream.base_url().to_string()))?;
    if !status.is_success() {
        info!("Login rejected with {}", status);
        return Err(ClientError::rejected(status.as_u16(), &body).into());
    }

    let mut session: Value = serde_json::from_str(&body)
        .map_err(|e| ClientError::Malformed(e.to_string()))?;
    let token = extract_token(&session).ok_or_else(|| {
        ClientError::Malformed("login response carries no token".to_string())
    })?;
    if let Value::Object(map) = &mut session {
        map.insert("token".to_string(), Value::String(token));
    }
    Ok(HttpResponse::Ok().json(session))
}
