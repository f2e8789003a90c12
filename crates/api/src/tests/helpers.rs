// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! An in-process fake of the schedule backend, served with axum.

use crate::parse_csv_pattern;
use crate::request_response::{
    ErrorResponse, GenerateExcelResponse, STATUS_SUCCESS, SaveScheduleRequest, ScheduleQuery,
    StatusResponse, UploadPatternResponse, export_file_name,
};
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use shiftboard_domain::{
    DEFAULT_MAX_SHIFTS, DEFAULT_MIN_SHIFTS, Engineer, Period, Schedule, Shift, Workplace,
};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
pub struct FakeStore {
    pub engineers: Vec<Engineer>,
    pub schedules: BTreeMap<String, Schedule>,
    pub files: BTreeMap<String, Vec<u8>>,
    pub uploaded: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct FakeBackend {
    pub store: Arc<Mutex<FakeStore>>,
}

impl FakeBackend {
    pub fn router(&self) -> Router {
        Router::new()
            .route("/api/engineers", get(list_engineers).post(upsert_engineer))
            .route("/api/engineers/{name}", delete(delete_engineer))
            .route("/api/schedule", get(get_schedule).post(save_schedule))
            .route("/api/generate_excel", post(generate_excel))
            .route("/api/download/{file}", get(download))
            .route("/api/pattern/upload", post(upload_pattern))
            .with_state(self.clone())
    }
}

/// Serves `router` on an ephemeral port and returns its API base URL.
pub async fn spawn(router: Router) -> String {
    let listener: tokio::net::TcpListener =
        tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: std::net::SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/api/")
}

/// Starts a fresh fake backend.
pub async fn spawn_backend() -> (FakeBackend, String) {
    let backend: FakeBackend = FakeBackend::default();
    let url: String = spawn(backend.router()).await;
    (backend, url)
}

pub fn period() -> Period {
    Period::new(1403, 1).unwrap()
}

pub fn lab_schedule() -> Schedule {
    let mut schedule: Schedule = Schedule::new();
    schedule.assign(&Workplace::new("Lab"), 1, Shift::First, "A");
    schedule
}

fn success() -> Json<StatusResponse> {
    Json(StatusResponse::success())
}

async fn list_engineers(State(backend): State<FakeBackend>) -> Json<Vec<Engineer>> {
    Json(backend.store.lock().unwrap().engineers.clone())
}

async fn upsert_engineer(
    State(backend): State<FakeBackend>,
    Json(mut engineer): Json<Engineer>,
) -> Json<StatusResponse> {
    engineer.min_shifts = engineer.min_shifts.or(Some(DEFAULT_MIN_SHIFTS));
    engineer.max_shifts = engineer.max_shifts.or(Some(DEFAULT_MAX_SHIFTS));
    let mut store = backend.store.lock().unwrap();
    if let Some(existing) = store.engineers.iter_mut().find(|e| e.name == engineer.name) {
        *existing = engineer;
    } else {
        store.engineers.push(engineer);
    }
    success()
}

async fn delete_engineer(
    State(backend): State<FakeBackend>,
    Path(name): Path<String>,
) -> Json<StatusResponse> {
    backend
        .store
        .lock()
        .unwrap()
        .engineers
        .retain(|e| e.name != name);
    success()
}

async fn get_schedule(
    State(backend): State<FakeBackend>,
    Query(query): Query<ScheduleQuery>,
) -> Json<Schedule> {
    let key: String = format!("{}-{}", query.year, query.month);
    Json(
        backend
            .store
            .lock()
            .unwrap()
            .schedules
            .get(&key)
            .cloned()
            .unwrap_or_default(),
    )
}

async fn save_schedule(
    State(backend): State<FakeBackend>,
    Json(request): Json<SaveScheduleRequest>,
) -> Json<StatusResponse> {
    let key: String = format!("{}-{}", request.year, request.month);
    backend
        .store
        .lock()
        .unwrap()
        .schedules
        .insert(key, request.workplaces);
    success()
}

async fn generate_excel(
    State(backend): State<FakeBackend>,
    Json(query): Json<ScheduleQuery>,
) -> Response {
    let mut store = backend.store.lock().unwrap();
    let key: String = format!("{}-{}", query.year, query.month);
    let Some(schedule) = store.schedules.get(&key).cloned() else {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: String::from("No schedule data found for selected period"),
            }),
        )
            .into_response();
    };

    let period: Period = Period::new(query.year, query.month).unwrap();
    let mut files: Vec<String> = Vec::new();
    for workplace in schedule.workplaces() {
        let name: String = export_file_name(workplace.name(), period);
        store
            .files
            .insert(name.clone(), format!("export of {workplace}").into_bytes());
        files.push(name);
    }
    Json(GenerateExcelResponse {
        status: String::from(STATUS_SUCCESS),
        files,
    })
    .into_response()
}

async fn download(State(backend): State<FakeBackend>, Path(file): Path<String>) -> Response {
    match backend.store.lock().unwrap().files.get(&file) {
        Some(bytes) => bytes.clone().into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: String::from("File not found"),
            }),
        )
            .into_response(),
    }
}

/// Parses the uploaded file as CSV in place of a spreadsheet reader.
async fn upload_pattern(State(backend): State<FakeBackend>, mut multipart: Multipart) -> Response {
    while let Some(field) = multipart.next_field().await.unwrap() {
        if field.name() != Some("file") {
            continue;
        }
        let file_name: String = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await.unwrap();
        backend.store.lock().unwrap().uploaded.push(file_name);
        return match parse_csv_pattern(&bytes) {
            Ok(pattern) => Json(UploadPatternResponse {
                status: String::from(STATUS_SUCCESS),
                pattern,
            })
            .into_response(),
            Err(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Error processing Excel file: {e}"),
                }),
            )
                .into_response(),
        };
    }
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: String::from("No file part"),
        }),
    )
        .into_response()
}
