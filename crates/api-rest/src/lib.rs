//! # API REST
//!
//! REST API implementation for the triage queue.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON bodies, CSV download, CORS, API key checks)
//!
//! Uses `api-shared` for request/response types and `triage-core` for the queue itself.

#![warn(rust_2018_idioms)]

mod error;

pub use error::ApiError;

use api_shared::auth::{validate_api_key, API_KEY_HEADER};
use api_shared::{
    CallNextRes, CreatePatientReq, CreatePatientRes, ErrorRes, HealthRes, HealthService,
    HistoryEntryRes, HistoryRes, PatientRes, PriorityCountsRes, QueueRes, RemovePatientRes,
    ResetRes, StatsRes, StatusRes, SymptomCountRes, UndoRes,
};
use axum::{
    extract::{Path as AxumPath, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Json, Response},
    routing::{delete, get, post},
    Router,
};
use std::sync::{Arc, Mutex, MutexGuard};
use tower_http::cors::CorsLayer;
use triage_core::{export, CoreConfig, HistoryStats, IdentityKey, QueueService};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Application state shared across REST API handlers.
///
/// The queue service is not internally synchronised, so every handler goes through the one
/// mutex; at most one operation touches the queue at a time.
#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<CoreConfig>,
    pub queue: Arc<Mutex<QueueService>>,
    /// When set, mutating endpoints require a matching `x-api-key` header.
    pub api_key: Option<Arc<str>>,
}

impl AppState {
    pub fn new(cfg: Arc<CoreConfig>, queue: QueueService, api_key: Option<String>) -> Self {
        Self {
            cfg,
            queue: Arc::new(Mutex::new(queue)),
            api_key: api_key.filter(|k| !k.is_empty()).map(Arc::from),
        }
    }

    fn lock_queue(&self) -> Result<MutexGuard<'_, QueueService>, ApiError> {
        self.queue.lock().map_err(|_| {
            tracing::error!("queue mutex poisoned");
            ApiError::Internal("queue state unavailable")
        })
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        get_queue,
        create_patient,
        remove_patient,
        call_next,
        undo_last_call,
        reset,
        get_history,
        download_history,
        history_stats,
        status,
    ),
    components(schemas(
        HealthRes,
        ErrorRes,
        PatientRes,
        CreatePatientReq,
        CreatePatientRes,
        QueueRes,
        CallNextRes,
        UndoRes,
        RemovePatientRes,
        ResetRes,
        HistoryEntryRes,
        HistoryRes,
        PriorityCountsRes,
        SymptomCountRes,
        StatsRes,
        StatusRes,
    ))
)]
pub struct ApiDoc;

/// Builds the REST router with Swagger UI and permissive CORS.
pub fn router(state: AppState) -> Router {
    let mutating = Router::new()
        .route("/patients", post(create_patient))
        .route("/patients/:national_id", delete(remove_patient))
        .route("/queue/call-next", post(call_next))
        .route("/queue/undo", post(undo_last_call))
        .route("/queue/reset", post(reset))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_api_key,
        ));

    Router::new()
        .route("/health", get(health))
        .route("/queue", get(get_queue))
        .route("/history", get(get_history))
        .route("/history/download", get(download_history))
        .route("/history/stats", get(history_stats))
        .route("/status", get(status))
        .merge(mutating)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Rejects the request unless it carries the configured API key. No-op when no key is set.
async fn require_api_key(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if let Some(expected) = state.api_key.as_deref() {
        let provided = req
            .headers()
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok());
        validate_api_key(provided, expected).map_err(|e| {
            tracing::warn!("rejected {} {}: {}", req.method(), req.uri().path(), e);
            ApiError::Unauthorized(e)
        })?;
    }
    Ok(next.run(req).await)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Used for monitoring and load balancer health checks.
#[axum::debug_handler]
async fn health(State(state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health(state.cfg.clinic_name()))
}

#[utoipa::path(
    get,
    path = "/queue",
    responses(
        (status = 200, description = "Current, previous and waiting patients", body = QueueRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Main screen: who is being served, who was served before, and who is waiting.
#[axum::debug_handler]
async fn get_queue(State(state): State<AppState>) -> Result<Json<QueueRes>, ApiError> {
    let queue = state.lock_queue()?;
    let waiting: Vec<PatientRes> = queue.queue_snapshot().iter().map(PatientRes::from).collect();

    Ok(Json(QueueRes {
        current: queue.current_patient().map(PatientRes::from),
        previous: queue.previous_patient().map(PatientRes::from),
        queue_total: waiting.len(),
        queue: waiting,
        history_total: queue.history_len(),
    }))
}

#[utoipa::path(
    post,
    path = "/patients",
    request_body = CreatePatientReq,
    responses(
        (status = 201, description = "Patient registered and queued", body = CreatePatientRes),
        (status = 400, description = "Invalid patient data", body = ErrorRes),
        (status = 401, description = "Missing or invalid API key", body = ErrorRes)
    )
)]
/// Register a patient and place them in the waiting queue
///
/// # Errors
/// Returns `400 Bad Request` if:
/// - a required field is blank or malformed,
/// - a patient with the same national ID is already waiting.
#[axum::debug_handler]
async fn create_patient(
    State(state): State<AppState>,
    Json(req): Json<CreatePatientReq>,
) -> Result<(StatusCode, Json<CreatePatientRes>), ApiError> {
    let mut queue = state.lock_queue()?;
    match queue.register(req.into()) {
        Ok(patient) => Ok((
            StatusCode::CREATED,
            Json(CreatePatientRes {
                success: true,
                patient: PatientRes::from(&patient),
            }),
        )),
        Err(e) => {
            tracing::warn!("Register patient rejected: {}", e);
            Err(e.into())
        }
    }
}

#[utoipa::path(
    delete,
    path = "/patients/{national_id}",
    params(
        ("national_id" = String, Path, description = "National ID of a waiting patient")
    ),
    responses(
        (status = 200, description = "Removal processed", body = RemovePatientRes),
        (status = 401, description = "Missing or invalid API key", body = ErrorRes)
    )
)]
/// Remove a waiting patient, e.g. one who left before being called
///
/// Idempotent: unknown or malformed IDs report `removed: false` rather than failing.
#[axum::debug_handler]
async fn remove_patient(
    State(state): State<AppState>,
    AxumPath(national_id): AxumPath<String>,
) -> Result<Json<RemovePatientRes>, ApiError> {
    let removed = match IdentityKey::parse(&national_id) {
        Ok(key) => state.lock_queue()?.remove_patient(&key),
        Err(e) => {
            tracing::debug!("remove ignored malformed national id: {}", e);
            false
        }
    };

    Ok(Json(RemovePatientRes {
        success: true,
        removed,
    }))
}

#[utoipa::path(
    post,
    path = "/queue/call-next",
    responses(
        (status = 200, description = "Next patient called", body = CallNextRes),
        (status = 400, description = "Queue is empty", body = ErrorRes),
        (status = 401, description = "Missing or invalid API key", body = ErrorRes)
    )
)]
/// Call the highest-priority waiting patient into service
#[axum::debug_handler]
async fn call_next(State(state): State<AppState>) -> Result<Json<CallNextRes>, ApiError> {
    let mut queue = state.lock_queue()?;
    match queue.call_next() {
        Ok(patient) => Ok(Json(CallNextRes {
            success: true,
            patient: PatientRes::from(&patient),
        })),
        Err(e) => {
            tracing::warn!("Call next rejected: {}", e);
            Err(e.into())
        }
    }
}

#[utoipa::path(
    post,
    path = "/queue/undo",
    responses(
        (status = 200, description = "Last call undone", body = UndoRes),
        (status = 400, description = "No call to undo", body = ErrorRes),
        (status = 401, description = "Missing or invalid API key", body = ErrorRes)
    )
)]
/// Undo the most recent call
///
/// The patient being served goes back to the front of the queue and the previous patient
/// becomes current again.
#[axum::debug_handler]
async fn undo_last_call(State(state): State<AppState>) -> Result<Json<UndoRes>, ApiError> {
    let mut queue = state.lock_queue()?;
    match queue.undo_last_call() {
        Ok(()) => Ok(Json(UndoRes {
            success: true,
            current: queue.current_patient().map(PatientRes::from),
            previous: queue.previous_patient().map(PatientRes::from),
        })),
        Err(e) => {
            tracing::warn!("Undo rejected: {}", e);
            Err(e.into())
        }
    }
}

#[utoipa::path(
    post,
    path = "/queue/reset",
    responses(
        (status = 200, description = "Queue, history and session cleared", body = ResetRes),
        (status = 401, description = "Missing or invalid API key", body = ErrorRes)
    )
)]
/// Clear the queue, the history and the current/previous patients
#[axum::debug_handler]
async fn reset(State(state): State<AppState>) -> Result<Json<ResetRes>, ApiError> {
    state.lock_queue()?.reset();
    Ok(Json(ResetRes { success: true }))
}

#[utoipa::path(
    get,
    path = "/history",
    responses(
        (status = 200, description = "Calls made, most recent first", body = HistoryRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
#[axum::debug_handler]
async fn get_history(State(state): State<AppState>) -> Result<Json<HistoryRes>, ApiError> {
    let queue = state.lock_queue()?;
    let history: Vec<HistoryEntryRes> = queue
        .history_snapshot()
        .iter()
        .map(HistoryEntryRes::from)
        .collect();

    Ok(Json(HistoryRes {
        history_total: history.len(),
        history,
        queue_total: queue.queue_len(),
    }))
}

#[utoipa::path(
    get,
    path = "/history/download",
    responses(
        (status = 200, description = "History as a CSV attachment", body = String, content_type = "text/csv"),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Download the call history as CSV, most recent call first
#[axum::debug_handler]
async fn download_history(State(state): State<AppState>) -> Result<Response, ApiError> {
    let history = state.lock_queue()?.history_snapshot();
    let body = export::history_to_csv(&history).map_err(|e| {
        tracing::error!("History export error: {:?}", e);
        ApiError::from(e)
    })?;

    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename={}", state.cfg.csv_filename()),
        ),
    ];
    Ok((headers, body).into_response())
}

#[utoipa::path(
    get,
    path = "/history/stats",
    responses(
        (status = 200, description = "Counts per priority and most frequent symptoms", body = StatsRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
#[axum::debug_handler]
async fn history_stats(State(state): State<AppState>) -> Result<Json<StatsRes>, ApiError> {
    let history = state.lock_queue()?.history_snapshot();
    let stats = HistoryStats::from_history(&history, state.cfg.top_symptoms_limit());
    Ok(Json(stats.into()))
}

#[utoipa::path(
    get,
    path = "/status",
    responses(
        (status = 200, description = "Current patient and totals", body = StatusRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
#[axum::debug_handler]
async fn status(State(state): State<AppState>) -> Result<Json<StatusRes>, ApiError> {
    Ok(Json(state.lock_queue()?.status().into()))
}
