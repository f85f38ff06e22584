mod config;
mod error;
mod services;
mod state;
mod upstream;

#[cfg(test)]
mod test_support;

use crate::config::Config;
use crate::state::AppState;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use env_logger::Env;
use include_dir::{include_dir, Dir};
use log::{error, info};
use mime_guess::from_path;
use std::io;
use std::thread;
use std::time::Duration;

static STATIC_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/static/dist");

/// Upload bodies relayed as raw bytes (news, blog and service images).
const RELAY_BODY_LIMIT: usize = 25 * 1024 * 1024;

async fn serve_embedded(req: HttpRequest) -> HttpResponse {
    let path = req.path().trim_start_matches('/');
    let file_path = if path.is_empty() { "index.html" } else { path };

    match STATIC_DIR.get_file(file_path) {
        Some(file) => {
            let mime = from_path(file_path).first_or_octet_stream();
            HttpResponse::Ok()
                .content_type(mime.as_ref())
                .body(file.contents().to_vec())
        }
        None => match STATIC_DIR.get_file("index.html") {
            Some(index) => HttpResponse::Ok()
                .content_type("text/html; charset=utf-8")
                .body(index.contents().to_vec()),
            None => HttpResponse::NotFound().body("Not Found"),
        },
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = Config::load().map_err(|e| {
        error!("{}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e.to_string())
    })?;
    let state = AppState::new(config.clone()).map_err(|e| {
        error!("Cannot build the backend client: {}", e);
        io::Error::other(e.to_string())
    })?;
    let url = config.console_url();

    if config.open_browser {
        let url = url.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(500));
            let _ = webbrowser::open(&url);
        });
    }

    info!("Server running at {}", url);
    info!("Relaying /api to {}", config.api_url);

    let data = web::Data::new(state);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::JsonConfig::default().limit(10 * 1024 * 1024)) // 10 MB
            .app_data(web::PayloadConfig::new(RELAY_BODY_LIMIT))
            .app_data(data.clone())
            .service(services::auth::configure_routes())
            .service(services::dashboard::configure_routes())
            .service(services::resources::configure_routes())
            .default_service(web::route().to(serve_embedded))
    })
        .bind((config.host.as_str(), config.port))?
        .run()
        .await
}
