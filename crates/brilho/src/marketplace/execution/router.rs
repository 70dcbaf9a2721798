use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use super::domain::{JobError, JobId};
use super::repository::JobRepository;
use super::service::{ExecutionError, ExecutionService};
use crate::marketplace::scheduling::repository::{OrderRepository, RepositoryError};

/// Router builder exposing HTTP endpoints for the employee execution flow.
pub fn job_router<J, R>(service: Arc<ExecutionService<J, R>>) -> Router
where
    J: JobRepository + 'static,
    R: OrderRepository + 'static,
{
    Router::new()
        .route("/api/v1/jobs", get(list_handler::<J, R>))
        .route("/api/v1/jobs/:job_id", get(get_handler::<J, R>))
        .route("/api/v1/jobs/:job_id/accept", post(accept_handler::<J, R>))
        .route(
            "/api/v1/jobs/:job_id/decline",
            post(decline_handler::<J, R>),
        )
        .route("/api/v1/jobs/:job_id/start", post(start_handler::<J, R>))
        .route("/api/v1/jobs/:job_id/pause", post(pause_handler::<J, R>))
        .route("/api/v1/jobs/:job_id/resume", post(resume_handler::<J, R>))
        .route(
            "/api/v1/jobs/:job_id/complete",
            post(complete_handler::<J, R>),
        )
        .route(
            "/api/v1/jobs/:job_id/checklist/:item_id/toggle",
            post(toggle_handler::<J, R>),
        )
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PauseRequest {
    #[serde(default)]
    pub(crate) reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CompleteRequest {
    #[serde(default)]
    pub(crate) notes: Option<String>,
    #[serde(default)]
    pub(crate) confirm_incomplete: bool,
}

pub(crate) async fn list_handler<J, R>(
    State(service): State<Arc<ExecutionService<J, R>>>,
) -> Response
where
    J: JobRepository + 'static,
    R: OrderRepository + 'static,
{
    match service.jobs() {
        Ok(jobs) => (StatusCode::OK, axum::Json(jobs)).into_response(),
        Err(error) => execution_error_response(error),
    }
}

pub(crate) async fn get_handler<J, R>(
    State(service): State<Arc<ExecutionService<J, R>>>,
    Path(job_id): Path<String>,
) -> Response
where
    J: JobRepository + 'static,
    R: OrderRepository + 'static,
{
    match service.job(&JobId(job_id)) {
        Ok(job) => (StatusCode::OK, axum::Json(job)).into_response(),
        Err(error) => execution_error_response(error),
    }
}

pub(crate) async fn accept_handler<J, R>(
    State(service): State<Arc<ExecutionService<J, R>>>,
    Path(job_id): Path<String>,
) -> Response
where
    J: JobRepository + 'static,
    R: OrderRepository + 'static,
{
    match service.accept(&JobId(job_id)) {
        Ok(job) => (StatusCode::OK, axum::Json(job)).into_response(),
        Err(error) => execution_error_response(error),
    }
}

pub(crate) async fn decline_handler<J, R>(
    State(service): State<Arc<ExecutionService<J, R>>>,
    Path(job_id): Path<String>,
) -> Response
where
    J: JobRepository + 'static,
    R: OrderRepository + 'static,
{
    match service.decline(&JobId(job_id)) {
        Ok(()) => (
            StatusCode::OK,
            axum::Json(json!({ "declined": true })),
        )
            .into_response(),
        Err(error) => execution_error_response(error),
    }
}

pub(crate) async fn start_handler<J, R>(
    State(service): State<Arc<ExecutionService<J, R>>>,
    Path(job_id): Path<String>,
) -> Response
where
    J: JobRepository + 'static,
    R: OrderRepository + 'static,
{
    match service.start(&JobId(job_id), Utc::now()) {
        Ok(job) => (StatusCode::OK, axum::Json(job)).into_response(),
        Err(error) => execution_error_response(error),
    }
}

pub(crate) async fn pause_handler<J, R>(
    State(service): State<Arc<ExecutionService<J, R>>>,
    Path(job_id): Path<String>,
    payload: Option<axum::Json<PauseRequest>>,
) -> Response
where
    J: JobRepository + 'static,
    R: OrderRepository + 'static,
{
    let request = payload.map(|axum::Json(body)| body).unwrap_or_default();
    match service.pause(&JobId(job_id), request.reason) {
        Ok(job) => (StatusCode::OK, axum::Json(job)).into_response(),
        Err(error) => execution_error_response(error),
    }
}

pub(crate) async fn resume_handler<J, R>(
    State(service): State<Arc<ExecutionService<J, R>>>,
    Path(job_id): Path<String>,
) -> Response
where
    J: JobRepository + 'static,
    R: OrderRepository + 'static,
{
    match service.resume(&JobId(job_id)) {
        Ok(job) => (StatusCode::OK, axum::Json(job)).into_response(),
        Err(error) => execution_error_response(error),
    }
}

pub(crate) async fn complete_handler<J, R>(
    State(service): State<Arc<ExecutionService<J, R>>>,
    Path(job_id): Path<String>,
    payload: Option<axum::Json<CompleteRequest>>,
) -> Response
where
    J: JobRepository + 'static,
    R: OrderRepository + 'static,
{
    let request = payload.map(|axum::Json(body)| body).unwrap_or_default();
    match service.complete(
        &JobId(job_id),
        Utc::now(),
        request.notes,
        request.confirm_incomplete,
    ) {
        Ok(summary) => (StatusCode::OK, axum::Json(summary)).into_response(),
        Err(error) => execution_error_response(error),
    }
}

pub(crate) async fn toggle_handler<J, R>(
    State(service): State<Arc<ExecutionService<J, R>>>,
    Path((job_id, item_id)): Path<(String, String)>,
) -> Response
where
    J: JobRepository + 'static,
    R: OrderRepository + 'static,
{
    match service.toggle_item(&JobId(job_id), &item_id) {
        Ok(job) => {
            let payload = json!({
                "job_id": job.id,
                "status": job.status,
                "progress_percentage": job.progress_percentage(),
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => execution_error_response(error),
    }
}

fn execution_error_response(error: ExecutionError) -> Response {
    match error {
        ExecutionError::Job(JobError::ChecklistIncomplete { remaining }) => {
            let payload = json!({
                "error": JobError::ChecklistIncomplete { remaining }.to_string(),
                "remaining": remaining,
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        ExecutionError::Job(JobError::ChecklistItemNotFound(_))
        | ExecutionError::Repository(RepositoryError::NotFound) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        ExecutionError::Job(JobError::InvalidTransition { .. })
        | ExecutionError::Job(JobError::OfferClosed(_))
        | ExecutionError::Order(_) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        other => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
