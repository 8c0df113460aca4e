//! In-process stand-in for the NUboard backend.
//!
//! Mirrors the real backend's mixed response shapes: users and the profile
//! come back bare, everything else inside a `{ code, data, message }`
//! envelope. Users are read with location and college names but written with
//! ids, events have no single-record read, and signed-out calls are
//! redirected to the sign-in page. Every request is counted so tests can
//! assert that nothing was sent.

#![allow(dead_code)]

use axum::extract::{Path, Query, Request, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

use nuboard_console::client::HttpClient;
use nuboard_console::config::Config;

#[derive(Default)]
pub struct BackendState {
    pub principal: Option<Value>,
    /// Answer a signed-out "who am I" with an empty 200 instead of a redirect.
    pub empty_principal_body: bool,
    pub profile: Option<Value>,
    pub users: BTreeMap<i64, Value>,
    pub events: BTreeMap<i64, Value>,
    pub colleges: Vec<Value>,
    pub locations: Vec<Value>,
    pub registrations: Vec<Value>,
    /// Return every registration regardless of the requested event.
    pub leaky_registrations: bool,
    pub next_user_id: i64,
    pub next_event_id: i64,
    pub next_registration_id: i64,
    pub requests: usize,
    pub cookies: Vec<String>,
}

pub type Shared = Arc<Mutex<BackendState>>;

pub struct FakeBackend {
    pub url: String,
    pub state: Shared,
}

impl FakeBackend {
    pub async fn start() -> Self {
        let state: Shared = Arc::new(Mutex::new(BackendState {
            colleges: vec![
                json!({"id": 1, "name": "Khoury College of Computer Sciences"}),
                json!({"id": 2, "name": "College of Engineering"}),
            ],
            locations: vec![
                json!({"id": 1, "name": "Boston"}),
                json!({"id": 2, "name": "Seattle"}),
            ],
            next_user_id: 1,
            next_event_id: 1,
            next_registration_id: 1,
            ..BackendState::default()
        }));

        let app = Router::new()
            .route(SIGN_IN_PATH, get(sign_in_page))
            .route("/api/user", get(who_am_i))
            .route("/api/profile", get(get_profile))
            .route("/api/profile/create", post(create_profile))
            .route("/api/users", get(list_users).post(create_user))
            .route("/api/users/search", get(search_users))
            .route(
                "/api/users/:id",
                get(get_user).put(update_user).delete(delete_user),
            )
            .route("/api/events", get(list_events).post(create_event))
            .route("/api/events/search", get(search_events))
            .route("/api/events/by-creator/:id", get(events_by_creator))
            .route("/api/events/:id", put(update_event).delete(delete_event))
            .route("/api/colleges", get(list_colleges))
            .route("/api/locations", get(list_locations))
            .route("/api/registrations/event/:id", get(event_registrations))
            .route("/api/registrations/user/:id", get(user_registrations))
            .route("/api/registrations/register", post(register))
            .route("/api/registrations/unregister", delete(unregister))
            .layer(middleware::from_fn_with_state(state.clone(), count))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: format!("http://{addr}"),
            state,
        }
    }

    pub fn config(&self) -> Config {
        Config::default().with_api_url(self.url.clone())
    }

    pub fn http(&self) -> HttpClient {
        HttpClient::new(&self.config()).unwrap()
    }

    pub fn sign_in(&self, email: &str) {
        self.state.lock().unwrap().principal = Some(json!({"email": email, "name": "Ana"}));
    }

    pub fn give_profile(&self, email: &str) {
        self.state.lock().unwrap().profile = Some(json!({
            "id": 100,
            "email": email,
            "username": "ana",
            "program": "CS",
            "location": {"id": 1, "name": "Boston"},
            "college": {"id": 1, "name": "Khoury College of Computer Sciences"},
        }));
    }

    pub fn requests(&self) -> usize {
        self.state.lock().unwrap().requests
    }
}

const SIGN_IN_PATH: &str = "/oauth2/authorization/google";

fn sign_in_redirect() -> Response {
    let mut response = StatusCode::FOUND.into_response();
    response
        .headers_mut()
        .insert(header::LOCATION, HeaderValue::from_static(SIGN_IN_PATH));
    response
}

async fn sign_in_page() -> Html<&'static str> {
    Html("<html><body>Sign in with Google</body></html>")
}

fn envelope(data: Value) -> Json<Value> {
    Json(json!({"code": 0, "message": "Success", "data": data}))
}

fn rejection(status: StatusCode, code: i64, message: &str) -> Response {
    (
        status,
        Json(json!({"code": code, "message": message, "data": null})),
    )
        .into_response()
}

fn not_found(message: &str) -> Response {
    (StatusCode::NOT_FOUND, message.to_string()).into_response()
}

async fn count(State(state): State<Shared>, request: Request, next: Next) -> Response {
    {
        let mut state = state.lock().unwrap();
        state.requests += 1;
        if let Some(cookie) = request.headers().get(header::COOKIE) {
            state
                .cookies
                .push(cookie.to_str().unwrap_or_default().to_string());
        }
    }
    next.run(request).await
}

async fn who_am_i(State(state): State<Shared>) -> Response {
    let state = state.lock().unwrap();
    match state.principal.clone() {
        Some(principal) => Json(principal).into_response(),
        None if state.empty_principal_body => StatusCode::OK.into_response(),
        None => sign_in_redirect(),
    }
}

async fn get_profile(State(state): State<Shared>) -> Response {
    let state = state.lock().unwrap();
    if state.principal.is_none() {
        return sign_in_redirect();
    }
    match state.profile.clone() {
        Some(profile) => Json(profile).into_response(),
        None => not_found("User not found"),
    }
}

async fn create_profile(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut state = state.lock().unwrap();
    let Some(principal) = state.principal.clone() else {
        return sign_in_redirect();
    };
    let location = lookup(&state.locations, &body["locationId"]);
    let college = lookup(&state.colleges, &body["collegeId"]);
    let profile = json!({
        "id": 100,
        "email": principal["email"],
        "username": body["username"],
        "program": body["program"],
        "location": location,
        "college": college,
    });
    state.profile = Some(profile.clone());
    Json(profile).into_response()
}

fn lookup(items: &[Value], id: &Value) -> Value {
    items
        .iter()
        .find(|item| &item["id"] == id)
        .cloned()
        .unwrap_or(Value::Null)
}

async fn list_users(State(state): State<Shared>) -> Json<Value> {
    Json(Value::Array(
        state.lock().unwrap().users.values().cloned().collect(),
    ))
}

#[derive(Deserialize)]
struct UserSearch {
    username: Option<String>,
    email: Option<String>,
}

async fn search_users(State(state): State<Shared>, Query(query): Query<UserSearch>) -> Response {
    let keyword = match query.username.or(query.email) {
        Some(keyword) if !keyword.trim().is_empty() => keyword,
        _ => return rejection(StatusCode::BAD_REQUEST, 2012, "Search keyword cannot be empty"),
    };
    let state = state.lock().unwrap();
    let found: Vec<Value> = state
        .users
        .values()
        .filter(|user| {
            ["username", "email"].iter().any(|field| {
                user[*field]
                    .as_str()
                    .is_some_and(|value| value.contains(keyword.as_str()))
            })
        })
        .map(|user| json!({"id": user["id"], "username": user["username"], "email": user["email"]}))
        .collect();
    Json(Value::Array(found)).into_response()
}

/// Read shape: references come back as names, never ids.
fn user_record(id: i64, body: &Value, state: &BackendState) -> Value {
    json!({
        "id": id,
        "username": body["username"],
        "email": body["email"],
        "program": body["program"],
        "location": lookup(&state.locations, &body["locationId"])["name"],
        "college": lookup(&state.colleges, &body["collegeId"])["name"],
        "eventsCount": 0,
    })
}

fn invalid_user(body: &Value) -> Option<Response> {
    if body["username"].as_str().map_or(true, |u| u.trim().is_empty()) {
        return Some(rejection(StatusCode::BAD_REQUEST, 2002, "Username cannot be empty"));
    }
    if !body["locationId"].is_number() {
        return Some(rejection(StatusCode::BAD_REQUEST, 2006, "Location ID cannot be null"));
    }
    if !body["collegeId"].is_number() {
        return Some(rejection(StatusCode::BAD_REQUEST, 2007, "College ID cannot be null"));
    }
    None
}

async fn create_user(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    if let Some(rejected) = invalid_user(&body) {
        return rejected;
    }
    let mut state = state.lock().unwrap();
    let id = state.next_user_id;
    state.next_user_id += 1;
    let user = user_record(id, &body, &state);
    state.users.insert(id, user.clone());
    Json(user).into_response()
}

async fn get_user(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    match state.lock().unwrap().users.get(&id).cloned() {
        Some(user) => Json(user).into_response(),
        None => not_found("User not found"),
    }
}

async fn update_user(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    if let Some(rejected) = invalid_user(&body) {
        return rejected;
    }
    let mut state = state.lock().unwrap();
    if !state.users.contains_key(&id) {
        return not_found("User not found");
    }
    let user = user_record(id, &body, &state);
    state.users.insert(id, user.clone());
    Json(user).into_response()
}

async fn delete_user(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    match state.lock().unwrap().users.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => not_found("User not found"),
    }
}

fn event_record(id: i64, body: &Value) -> Value {
    json!({
        "id": id.to_string(),
        "title": body["title"],
        "description": body.get("description").cloned().unwrap_or(Value::Null),
        "startTime": body["startTime"],
        "endTime": body["endTime"],
        "locationId": body.get("locationId").cloned().unwrap_or(Value::Null),
        "address": body.get("address").cloned().unwrap_or(Value::Null),
        "creatorId": body["creatorId"].to_string(),
        "organizerType": body["organizerType"],
    })
}

async fn list_events(State(state): State<Shared>) -> Json<Value> {
    envelope(Value::Array(
        state.lock().unwrap().events.values().cloned().collect(),
    ))
}

#[derive(Deserialize)]
struct EventSearch {
    keyword: String,
}

async fn search_events(State(state): State<Shared>, Query(query): Query<EventSearch>) -> Json<Value> {
    let state = state.lock().unwrap();
    envelope(Value::Array(
        state
            .events
            .values()
            .filter(|event| {
                event["title"]
                    .as_str()
                    .is_some_and(|title| title.contains(query.keyword.as_str()))
            })
            .cloned()
            .collect(),
    ))
}

async fn events_by_creator(State(state): State<Shared>, Path(id): Path<String>) -> Json<Value> {
    let state = state.lock().unwrap();
    envelope(Value::Array(
        state
            .events
            .values()
            .filter(|event| event["creatorId"].as_str() == Some(id.as_str()))
            .cloned()
            .collect(),
    ))
}

async fn create_event(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    if body["title"].as_str().map_or(true, |t| t.trim().is_empty()) {
        return rejection(StatusCode::BAD_REQUEST, 3001, "Invalid event title");
    }
    let mut state = state.lock().unwrap();
    let id = state.next_event_id;
    state.next_event_id += 1;
    let event = event_record(id, &body);
    state.events.insert(id, event.clone());
    envelope(event).into_response()
}

async fn update_event(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    if !state.events.contains_key(&id) {
        return rejection(StatusCode::NOT_FOUND, 3004, "Event not found");
    }
    let event = event_record(id, &body);
    state.events.insert(id, event.clone());
    envelope(event).into_response()
}

async fn delete_event(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    match state.lock().unwrap().events.remove(&id) {
        Some(_) => envelope(Value::Null).into_response(),
        None => rejection(StatusCode::NOT_FOUND, 3004, "Event not found"),
    }
}

async fn list_colleges(State(state): State<Shared>) -> Json<Value> {
    envelope(Value::Array(state.lock().unwrap().colleges.clone()))
}

async fn list_locations(State(state): State<Shared>) -> Json<Value> {
    envelope(Value::Array(state.lock().unwrap().locations.clone()))
}

async fn event_registrations(State(state): State<Shared>, Path(id): Path<i64>) -> Json<Value> {
    let state = state.lock().unwrap();
    envelope(Value::Array(
        state
            .registrations
            .iter()
            .filter(|r| state.leaky_registrations || r["eventId"] == json!(id))
            .cloned()
            .collect(),
    ))
}

async fn user_registrations(State(state): State<Shared>, Path(id): Path<i64>) -> Json<Value> {
    let state = state.lock().unwrap();
    envelope(Value::Array(
        state
            .registrations
            .iter()
            .filter(|r| r["userId"] == json!(id))
            .cloned()
            .collect(),
    ))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegistrationQuery {
    user_id: i64,
    event_id: i64,
}

async fn register(State(state): State<Shared>, Query(query): Query<RegistrationQuery>) -> Response {
    let mut state = state.lock().unwrap();
    let exists = state
        .registrations
        .iter()
        .any(|r| r["eventId"] == json!(query.event_id) && r["userId"] == json!(query.user_id));
    if exists {
        return rejection(StatusCode::CONFLICT, 4002, "User already registered for this event");
    }
    let id = state.next_registration_id;
    state.next_registration_id += 1;
    let record = json!({"id": id, "eventId": query.event_id, "userId": query.user_id});
    state.registrations.push(record.clone());
    (StatusCode::CREATED, envelope(record)).into_response()
}

async fn unregister(State(state): State<Shared>, Query(query): Query<RegistrationQuery>) -> Response {
    let mut state = state.lock().unwrap();
    let position = state
        .registrations
        .iter()
        .position(|r| r["eventId"] == json!(query.event_id) && r["userId"] == json!(query.user_id));
    match position {
        Some(index) => envelope(state.registrations.remove(index)).into_response(),
        None => rejection(StatusCode::NOT_FOUND, 4004, "Registration not found"),
    }
}
