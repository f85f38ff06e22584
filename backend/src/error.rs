use actix_multipart::MultipartError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use common::client::ClientError;
use serde_json::json;
use thiserror::Error;

/// Failures of the `/api` relays, rendered as `{"error": message}`.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// The clinic backend gave no response.
    #[error("Cannot reach backend: {0}")]
    Unreachable(#[from] reqwest::Error),

    /// Login could not reach the backend within its bounded wait.
    #[error("Cannot reach backend at {0}")]
    LoginUnreachable(String),

    #[error("{}", .0.message())]
    Client(#[from] ClientError),

    #[error("Unknown resource: {0}")]
    UnknownResource(String),

    #[error("Invalid form data: {0}")]
    Multipart(String),
}

impl From<MultipartError> for ProxyError {
    fn from(err: MultipartError) -> Self {
        ProxyError::Multipart(err.to_string())
    }
}

impl ResponseError for ProxyError {
    fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::Unreachable(err) if err.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            ProxyError::Unreachable(_) => StatusCode::BAD_GATEWAY,
            ProxyError::LoginUnreachable(_) => StatusCode::GATEWAY_TIMEOUT,
            ProxyError::Client(ClientError::Rejected { status, .. }) => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ProxyError::Client(ClientError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
            ProxyError::Client(_) => StatusCode::BAD_GATEWAY,
            ProxyError::UnknownResource(_) => StatusCode::NOT_FOUND,
            ProxyError::Multipart(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}
