//! Relays for the clinic backend's resources.
//!
//! Most routes pass bodies, content types and query strings through
//! untouched. The doctor form is the exception: it is parsed, reduced to the
//! known doctor fields and re-encoded before going upstream.

mod doctor;
mod relay;

use actix_web::web::{delete, get, post, put, scope};
use actix_web::Scope;

const API_PATH: &str = "/api";

/// Specific routes come first; the method guard on each one lets other
/// methods fall through to the generic relay.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/doctor", post().to(doctor::create))
        .route("/doctor/{id}", put().to(doctor::update))
        .route(
            "/direction-doctors/doctor/{id}",
            delete().to(relay::remove_doctor_links),
        )
        .route("/{resource}", get().to(relay::collection))
        .route("/{resource}", post().to(relay::collection))
        .route("/{resource}/{id}", get().to(relay::member))
        .route("/{resource}/{id}", put().to(relay::member))
        .route("/{resource}/{id}", delete().to(relay::member))
}
