use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request payload for the login endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Picks the session token out of a login response.
///
/// Backends in use answer with `token`, `access_token`, `accessToken` or a
/// nested `data.token`; the first non-empty string wins.
pub fn extract_token(body: &Value) -> Option<String> {
    ["/token", "/access_token", "/accessToken", "/data/token"]
        .iter()
        .filter_map(|pointer| body.pointer(pointer).and_then(Value::as_str))
        .find(|token| !token.is_empty())
        .map(str::to_string)
}
