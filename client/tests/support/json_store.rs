//! In-process JSON REST store double served by actix-web.
//!
//! Records are kept as raw JSON so tests can inspect exactly what the client
//! sent. New events get `max(id) + 1`, like a file-backed JSON server.

use std::net::TcpListener;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpResponse, HttpServer, web};
use serde_json::{Value, json};
use url::Url;

/// Mutable state behind the fake store.
#[derive(Default)]
pub struct StoreState {
    users: Mutex<Vec<Value>>,
    categories: Mutex<Vec<Value>>,
    events: Mutex<Vec<Value>>,
    /// Serve `/events` as an object instead of an array.
    pub events_as_object: AtomicBool,
    /// Answer every write with `500`.
    pub fail_writes: AtomicBool,
}

impl StoreState {
    /// Snapshot of the raw event records.
    pub fn events(&self) -> Vec<Value> {
        self.events.lock().expect("events lock").clone()
    }

    pub fn event(&self, id: i64) -> Option<Value> {
        self.events()
            .into_iter()
            .find(|event| event["id"].as_i64() == Some(id))
    }
}

/// A running fake store.
pub struct JsonStoreServer {
    pub base_url: Url,
    pub state: web::Data<StoreState>,
    handle: ServerHandle,
}

impl JsonStoreServer {
    /// Start a store seeded with two users, three categories and three events.
    pub fn start() -> Self {
        Self::start_with(seed_users(), seed_categories(), seed_events())
    }

    pub fn start_with(users: Vec<Value>, categories: Vec<Value>, events: Vec<Value>) -> Self {
        let state = web::Data::new(StoreState {
            users: Mutex::new(users),
            categories: Mutex::new(categories),
            events: Mutex::new(events),
            ..StoreState::default()
        });
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local address");

        let data = state.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(data.clone())
                .route("/users", web::get().to(list_users))
                .route("/categories", web::get().to(list_categories))
                .route("/events", web::get().to(list_events))
                .route("/events", web::post().to(create_event))
                .route("/events/{id}", web::get().to(get_event))
                .route("/events/{id}", web::put().to(replace_event))
                .route("/events/{id}", web::delete().to(delete_event))
        })
        .disable_signals()
        .workers(1)
        .listen(listener)
        .expect("listen on ephemeral port")
        .run();

        let handle = server.handle();
        actix_web::rt::spawn(server);

        Self {
            base_url: Url::parse(&format!("http://{addr}")).expect("valid base URL"),
            state,
            handle,
        }
    }

    pub async fn stop(self) {
        self.handle.stop(true).await;
    }
}

/// A base URL that refuses connections.
pub fn unreachable_base_url() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local address");
    drop(listener);
    Url::parse(&format!("http://{addr}")).expect("valid base URL")
}

pub fn seed_users() -> Vec<Value> {
    vec![
        json!({ "id": 1, "name": "Ada", "image": "https://img.example/ada.png" }),
        json!({ "id": 2, "name": "Grace", "image": "https://img.example/grace.png" }),
    ]
}

pub fn seed_categories() -> Vec<Value> {
    vec![
        json!({ "id": 1, "name": "sports" }),
        json!({ "id": 2, "name": "music" }),
        json!({ "id": 3, "name": "food" }),
    ]
}

pub fn seed_events() -> Vec<Value> {
    vec![
        json!({
            "id": 1,
            "title": "Park run",
            "description": "5k around the lake",
            "image": "https://img.example/run.jpg",
            "location": "Lakeside",
            "startTime": "2024-06-01T08:00:00.000Z",
            "endTime": "2024-06-01T09:00:00.000Z",
            "createdBy": 1,
            "categoryIds": [1]
        }),
        json!({
            "id": 2,
            "title": "Choir practice",
            "description": "Bring sheet music",
            "image": "",
            "location": "St Mary's",
            "startTime": "2024-06-02T18:30:00.000Z",
            "endTime": "2024-06-02T20:00:00.000Z",
            "createdBy": 2,
            "categoryIds": [2, 3]
        }),
        json!({
            "id": 3,
            "title": "Street food run",
            "startTime": "2024-06-03T11:00:00.000Z",
            "endTime": "2024-06-03T15:00:00.000Z",
            "categoryIds": [3]
        }),
    ]
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(json!({}))
}

fn write_failure() -> HttpResponse {
    HttpResponse::InternalServerError().json(json!({ "error": "disk full" }))
}

async fn list_users(state: web::Data<StoreState>) -> HttpResponse {
    let users = state.users.lock().expect("users lock").clone();
    HttpResponse::Ok().json(users)
}

async fn list_categories(state: web::Data<StoreState>) -> HttpResponse {
    let categories = state.categories.lock().expect("categories lock").clone();
    HttpResponse::Ok().json(categories)
}

async fn list_events(state: web::Data<StoreState>) -> HttpResponse {
    let events = state.events();
    if state.events_as_object.load(Ordering::SeqCst) {
        return HttpResponse::Ok().json(json!({ "events": events }));
    }
    HttpResponse::Ok().json(events)
}

async fn get_event(state: web::Data<StoreState>, id: web::Path<i64>) -> HttpResponse {
    state
        .event(id.into_inner())
        .map_or_else(not_found, |event| HttpResponse::Ok().json(event))
}

async fn create_event(state: web::Data<StoreState>, body: web::Json<Value>) -> HttpResponse {
    if state.fail_writes.load(Ordering::SeqCst) {
        return write_failure();
    }
    let mut events = state.events.lock().expect("events lock");
    let id = events
        .iter()
        .filter_map(|event| event["id"].as_i64())
        .max()
        .unwrap_or(0)
        + 1;
    let mut record = body.into_inner();
    record["id"] = json!(id);
    events.push(record.clone());
    HttpResponse::Created().json(record)
}

async fn replace_event(
    state: web::Data<StoreState>,
    id: web::Path<i64>,
    body: web::Json<Value>,
) -> HttpResponse {
    if state.fail_writes.load(Ordering::SeqCst) {
        return write_failure();
    }
    let id = id.into_inner();
    let mut events = state.events.lock().expect("events lock");
    let Some(slot) = events
        .iter_mut()
        .find(|event| event["id"].as_i64() == Some(id))
    else {
        return not_found();
    };
    let mut record = body.into_inner();
    record["id"] = json!(id);
    *slot = record.clone();
    HttpResponse::Ok().json(record)
}

async fn delete_event(state: web::Data<StoreState>, id: web::Path<i64>) -> HttpResponse {
    if state.fail_writes.load(Ordering::SeqCst) {
        return write_failure();
    }
    let id = id.into_inner();
    let mut events = state.events.lock().expect("events lock");
    let before = events.len();
    events.retain(|event| event["id"].as_i64() != Some(id));
    if events.len() == before {
        return not_found();
    }
    HttpResponse::Ok().json(json!({}))
}
