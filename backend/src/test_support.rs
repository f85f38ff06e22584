//! An in-process stand-in for the clinic backend, served on an ephemeral port.

use std::collections::BTreeMap;
use std::net::TcpListener;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use actix_multipart::Multipart;
use actix_web::{web, App, HttpResponse, HttpServer};
use futures_util::StreamExt;
use serde_json::{json, Map, Value};

#[derive(Default)]
struct ClinicState {
    doctors: BTreeMap<i64, Map<String, Value>>,
    /// (link id, doctor id, direction id)
    links: Vec<(i64, i64, i64)>,
    uploads: BTreeMap<i64, Vec<String>>,
    next_id: i64,
    fail_links: bool,
    slow_login: bool,
    slow_news: bool,
    slow_doctor_writes: bool,
}

type Shared = web::Data<Mutex<ClinicState>>;

pub struct FakeClinic {
    state: Arc<Mutex<ClinicState>>,
    port: u16,
}

impl FakeClinic {
    pub fn start() -> Self {
        let state = web::Data::new(Mutex::new(ClinicState {
            next_id: 1,
            ..Default::default()
        }));
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let app_state = state.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(app_state.clone())
                .route("/auth/login", web::post().to(login))
                .route("/doctor", web::get().to(list_doctors))
                .route("/doctor", web::post().to(create_doctor))
                .route("/doctor/{id}", web::get().to(get_doctor))
                .route("/doctor/{id}", web::put().to(update_doctor))
                .route("/doctor/{id}", web::delete().to(delete_doctor))
                .route("/direction", web::get().to(directions))
                .route("/direction-doctors", web::post().to(create_link))
                .route("/direction-doctors/doctor/{id}", web::delete().to(delete_links))
                .route("/news", web::get().to(news))
                .route("/blog", web::get().to(broken))
                .route("/users", web::get().to(users))
        })
        .workers(1)
        .listen(listener)
        .unwrap()
        .run();
        actix_web::rt::spawn(server);
        Self {
            state: state.into_inner(),
            port,
        }
    }

    pub fn url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    fn lock(&self) -> MutexGuard<'_, ClinicState> {
        self.state.lock().unwrap()
    }

    pub fn fail_links(&self) {
        self.lock().fail_links = true;
    }

    pub fn slow_login(&self) {
        self.lock().slow_login = true;
    }

    pub fn slow_news(&self) {
        self.lock().slow_news = true;
    }

    pub fn slow_doctor_writes(&self) {
        self.lock().slow_doctor_writes = true;
    }

    pub fn links_of(&self, doctor_id: i64) -> Vec<i64> {
        self.lock()
            .links
            .iter()
            .filter(|(_, doctor, _)| *doctor == doctor_id)
            .map(|(_, _, direction)| *direction)
            .collect()
    }

    pub fn uploads(&self, doctor_id: i64) -> Vec<String> {
        self.lock().uploads.get(&doctor_id).cloned().unwrap_or_default()
    }
}

struct ParsedForm {
    text: BTreeMap<String, String>,
    files: Vec<String>,
}

async fn read_form(mut multipart: Multipart) -> ParsedForm {
    let mut parsed = ParsedForm {
        text: BTreeMap::new(),
        files: Vec::new(),
    };
    while let Some(Ok(mut field)) = multipart.next().await {
        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(str::to_string))
            .unwrap_or_default();
        let file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename().map(str::to_string));
        let mut bytes = Vec::new();
        while let Some(Ok(chunk)) = field.next().await {
            bytes.extend_from_slice(&chunk);
        }
        match file_name {
            Some(file_name) => parsed.files.push(file_name),
            None => {
                parsed
                    .text
                    .insert(name, String::from_utf8_lossy(&bytes).into_owned());
            }
        }
    }
    parsed
}

fn doctor_json(state: &ClinicState, id: i64) -> Option<Value> {
    let mut doctor = state.doctors.get(&id)?.clone();
    let links: Vec<Value> = state
        .links
        .iter()
        .filter(|(_, doctor_id, _)| *doctor_id == id)
        .map(|(link_id, _, direction_id)| {
            json!({ "id": link_id, "direction": { "id": direction_id, "full_name": format!("Direction {}", direction_id) } })
        })
        .collect();
    doctor.insert("id".to_string(), json!(id));
    doctor.insert("directionDoctors".to_string(), Value::Array(links));
    Some(Value::Object(doctor))
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(json!({ "error": "Doctor not found" }))
}

async fn login(state: Shared, body: web::Json<Value>) -> HttpResponse {
    let slow = state.lock().unwrap().slow_login;
    stall_if(slow).await;
    if body["email"] == "admin@clinic.uz" && body["password"] == "secret" {
        HttpResponse::Ok().json(json!({ "access_token": "tok-1", "user": { "email": "admin@clinic.uz" } }))
    } else {
        HttpResponse::Unauthorized().json(json!({ "message": "Invalid credentials" }))
    }
}

async fn list_doctors(state: Shared) -> HttpResponse {
    let state = state.lock().unwrap();
    let all: Vec<Value> = state
        .doctors
        .keys()
        .filter_map(|id| doctor_json(&state, *id))
        .collect();
    HttpResponse::Ok().json(all)
}

async fn get_doctor(state: Shared, id: web::Path<i64>) -> HttpResponse {
    let state = state.lock().unwrap();
    doctor_json(&state, *id).map_or_else(not_found, |d| HttpResponse::Ok().json(d))
}

async fn stall_if(flag: bool) {
    if flag {
        actix_web::rt::time::sleep(Duration::from_secs(3)).await;
    }
}

async fn create_doctor(state: Shared, multipart: Multipart) -> HttpResponse {
    let slow = state.lock().unwrap().slow_doctor_writes;
    stall_if(slow).await;
    let form = read_form(multipart).await;
    let mut state = state.lock().unwrap();
    let id = state.next_id;
    state.next_id += 1;
    let record = form.text.into_iter().map(|(k, v)| (k, Value::String(v))).collect();
    state.doctors.insert(id, record);
    state.uploads.insert(id, form.files);
    HttpResponse::Created().json(doctor_json(&state, id))
}

async fn update_doctor(state: Shared, id: web::Path<i64>, multipart: Multipart) -> HttpResponse {
    let form = read_form(multipart).await;
    let mut state = state.lock().unwrap();
    let id = id.into_inner();
    let Some(record) = state.doctors.get_mut(&id) else {
        return not_found();
    };
    for (key, value) in form.text {
        record.insert(key, Value::String(value));
    }
    state.uploads.entry(id).or_default().extend(form.files);
    HttpResponse::Ok().json(doctor_json(&state, id))
}

async fn delete_doctor(state: Shared, id: web::Path<i64>) -> HttpResponse {
    let mut state = state.lock().unwrap();
    let id = id.into_inner();
    if state.doctors.remove(&id).is_none() {
        return not_found();
    }
    state.links.retain(|(_, doctor, _)| *doctor != id);
    HttpResponse::Ok().json(json!({ "deleted": true }))
}

async fn directions() -> HttpResponse {
    HttpResponse::Ok().json(json!([
        { "id": 1, "full_name": "Cardiology" },
        { "id": 2, "full_name": "Neurology" }
    ]))
}

async fn create_link(state: Shared, multipart: Multipart) -> HttpResponse {
    let form = read_form(multipart).await;
    let mut state = state.lock().unwrap();
    if state.fail_links {
        return HttpResponse::InternalServerError().json(json!({ "message": "Direction link failed" }));
    }
    let parse = |key: &str| form.text.get(key).and_then(|v| v.parse::<i64>().ok());
    let (Some(doctor), Some(direction)) = (parse("doctors_id"), parse("direction_id")) else {
        return HttpResponse::BadRequest().json(json!({ "message": ["doctors_id must be a number"] }));
    };
    let link_id = state.links.len() as i64 + 1000;
    state.links.push((link_id, doctor, direction));
    HttpResponse::Created().json(json!({ "id": link_id, "doctors_id": doctor, "direction_id": direction }))
}

async fn delete_links(state: Shared, id: web::Path<i64>) -> HttpResponse {
    let id = id.into_inner();
    state.lock().unwrap().links.retain(|(_, doctor, _)| *doctor != id);
    HttpResponse::NoContent().finish()
}

async fn news(state: Shared) -> HttpResponse {
    let slow = state.lock().unwrap().slow_news;
    stall_if(slow).await;
    HttpResponse::Ok().json(json!([{ "id": 1 }, { "id": 2 }]))
}

async fn users() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "data": [{ "id": 1 }, { "id": 2 }, { "id": 3 }], "total": 3 }))
}

async fn broken() -> HttpResponse {
    HttpResponse::InternalServerError().body("boom")
}
