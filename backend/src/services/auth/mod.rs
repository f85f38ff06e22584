mod login;

use actix_web::web::{post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/auth";

/// Configures and returns the Actix scope for the login relay.
pub fn configure_routes() -> Scope {
    scope(API_PATH).route("/login", post().to(login::process))
}
