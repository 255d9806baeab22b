//! HTTP API.
//!
//! - `GET /jobs` filters and sorts listings via the query engine
//! - `GET /jobs/{id}` fetches one listing
//! - `POST /jobs` posts a new listing
//! - `GET /health` health check

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::Utc;
use common::{BoardError, Job, NewJob, QueryParams, RawQuery, query};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::store::JobStore;

/// Shared application state
pub struct AppState {
    pub store: RwLock<JobStore>,
    pub response_delay: Duration,
}

impl AppState {
    pub fn new(store: JobStore, response_delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            store: RwLock::new(store),
            response_delay,
        })
    }
}

/// API response wrapper for listing queries
#[derive(Debug, Serialize)]
pub struct JobsResponse {
    pub total: usize,
    pub jobs: Vec<Job>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl From<BoardError> for ApiError {
    fn from(err: BoardError) -> Self {
        let status = match &err {
            BoardError::JobNotFound(_) => StatusCode::NOT_FOUND,
            BoardError::MissingField(_)
            | BoardError::InvalidSalaryRange { .. }
            | BoardError::DuplicateId(_)
            | BoardError::UnknownVariant { .. } => StatusCode::BAD_REQUEST,
            BoardError::Data(_) | BoardError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/jobs", get(list_jobs_handler).post(post_job_handler))
        .route("/jobs/{id}", get(get_job_handler))
        .with_state(state)
}

/// Handler for GET / (root)
async fn root_handler() -> &'static str {
    "🔍 Job Board API\n\nEndpoints:\n  GET  /jobs?search=&location=&type=&experience=&salary=&sort= - Browse jobs\n  GET  /jobs/{id} - Job details\n  POST /jobs - Post a job\n\nExample:\n  curl 'http://127.0.0.1:3000/jobs?search=developer&salary=100000-150000'"
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Handler for GET /jobs
async fn list_jobs_handler(
    State(state): State<Arc<AppState>>,
    Query(raw): Query<RawQuery>,
) -> Json<JobsResponse> {
    let params = QueryParams::from(&raw);

    if !state.response_delay.is_zero() {
        tokio::time::sleep(state.response_delay).await;
    }

    let store = state.store.read().await;
    let jobs: Vec<Job> = query(store.all(), &params).into_iter().cloned().collect();
    tracing::debug!(?params, matched = jobs.len(), of = store.len(), "Listing query");

    Json(JobsResponse {
        total: jobs.len(),
        jobs,
    })
}

async fn get_job_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Job>, ApiError> {
    let store = state.store.read().await;
    let job = store.get(&id)?.clone();
    Ok(Json(job))
}

async fn post_job_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewJob>, JsonRejection>,
) -> Result<(StatusCode, Json<Job>), ApiError> {
    let Json(new_job) = payload?;
    let posted = Utc::now().date_naive();
    let job = state.store.write().await.insert(new_job, posted)?;
    Ok((StatusCode::CREATED, Json(job)))
}
