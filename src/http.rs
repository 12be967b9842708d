//! HTTP transport - maps routes onto [`PatientService`] calls.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `GET /` and `GET /about` - static messages.
//! - `GET /health` - `{ "ok": true }`; does not touch the store.
//! - `GET /view` - the full store as `{ id: { fields } }`.
//! - `GET /patient/:id` - one record with its id.
//! - `GET /sort?sort_by=height|weight|BMI&order=asc|desc` - ordered records.
//! - `POST /create` - full record body, 201 on success.
//! - `PUT /edit/:id` - partial record body.
//! - `DELETE /delete/:id`
//!
//! Errors come back as `{ "error": "..." }` with the status from
//! [`ServiceError::status_code`].
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use patient_records::{http, service::PatientService, store::JsonFileStore};
//!
//! let service = Arc::new(PatientService::new(JsonFileStore::new("patients.json")));
//!
//! // Get the router to compose with other axum routes
//! let app = http::router(service.clone());
//!
//! // Or serve directly
//! http::serve(service, "0.0.0.0:8000").await?;
//! ```

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::patient::{NewPatient, PatientUpdate, ValidationError};
use crate::service::{PatientService, ServiceError};
use crate::store::PatientStore;

/// Build an axum `Router` serving the patient routes.
pub fn router<S: PatientStore + 'static>(service: Arc<PatientService<S>>) -> Router {
    Router::new()
        .route("/", get(home_handler))
        .route("/about", get(about_handler))
        .route("/health", get(health_handler))
        .route("/view", get(view_handler::<S>))
        .route("/patient/:id", get(patient_handler::<S>))
        .route("/sort", get(sort_handler::<S>))
        .route("/create", post(create_handler::<S>))
        .route("/edit/:id", put(edit_handler::<S>))
        .route("/delete/:id", delete(delete_handler::<S>))
        .with_state(service)
}

/// Serve the patient routes at `addr` (e.g. `"0.0.0.0:8000"`) until Ctrl-C.
pub async fn serve<S: PatientStore + 'static>(
    service: Arc<PatientService<S>>,
    addr: &str,
) -> Result<(), std::io::Error> {
    let app = router(service);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

#[derive(Debug, Deserialize)]
struct SortParams {
    sort_by: Option<String>,
    order: Option<String>,
}

async fn home_handler() -> impl IntoResponse {
    Json(json!({ "message": "Patients Management System API" }))
}

async fn about_handler() -> impl IntoResponse {
    Json(json!({ "message": "A fully functional API to manage patients records." }))
}

async fn health_handler() -> impl IntoResponse {
    Json(json!({ "ok": true }))
}

/// `GET /view` - the full store.
async fn view_handler<S: PatientStore + 'static>(
    State(service): State<Arc<PatientService<S>>>,
) -> Response {
    match service.list() {
        Ok(patients) => (StatusCode::OK, Json(patients)).into_response(),
        Err(e) => error_response(e),
    }
}

/// `GET /patient/:id`
async fn patient_handler<S: PatientStore + 'static>(
    State(service): State<Arc<PatientService<S>>>,
    Path(id): Path<String>,
) -> Response {
    match service.get(&id) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(e) => error_response(e),
    }
}

/// `GET /sort?sort_by=&order=`
async fn sort_handler<S: PatientStore + 'static>(
    State(service): State<Arc<PatientService<S>>>,
    Query(params): Query<SortParams>,
) -> Response {
    match service.sort_by_name(params.sort_by.as_deref(), params.order.as_deref()) {
        Ok(views) => (StatusCode::OK, Json(views)).into_response(),
        Err(e) => error_response(e),
    }
}

/// `POST /create` - 201 with a message; the stored record is not echoed.
async fn create_handler<S: PatientStore + 'static>(
    State(service): State<Arc<PatientService<S>>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let result = decode_body::<NewPatient>(body).and_then(|draft| service.create(draft));
    match result {
        Ok(_) => message(StatusCode::CREATED, "Patient created successfully"),
        Err(e) => error_response(e),
    }
}

/// `PUT /edit/:id`
async fn edit_handler<S: PatientStore + 'static>(
    State(service): State<Arc<PatientService<S>>>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let result = decode_body::<PatientUpdate>(body).and_then(|update| service.update(&id, update));
    match result {
        Ok(_) => message(StatusCode::OK, "Patient updated"),
        Err(e) => error_response(e),
    }
}

/// `DELETE /delete/:id`
async fn delete_handler<S: PatientStore + 'static>(
    State(service): State<Arc<PatientService<S>>>,
    Path(id): Path<String>,
) -> Response {
    match service.delete(&id) {
        Ok(()) => message(StatusCode::OK, "Patient deleted"),
        Err(e) => error_response(e),
    }
}

/// Malformed JSON and a missing content type fail the same way as a body of
/// the wrong shape: a 422 validation error.
fn decode_body<T: DeserializeOwned>(
    body: Result<Json<Value>, JsonRejection>,
) -> Result<T, ServiceError> {
    let Json(value) = body.map_err(|rejection| ValidationError::decode(rejection.body_text()))?;
    Ok(serde_json::from_value(value)?)
}

fn message(status: StatusCode, text: &str) -> Response {
    (status, Json(json!({ "message": text }))).into_response()
}

fn error_response(e: ServiceError) -> Response {
    let status = StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        tracing::error!(error = %e, "request failed");
    }
    let body = json!({ "error": e.to_string() });
    (status, Json(body)).into_response()
}
