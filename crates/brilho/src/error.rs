use crate::config::ConfigError;
use crate::marketplace::execution::domain::JobError;
use crate::marketplace::execution::service::ExecutionError;
use crate::marketplace::scheduling::repository::RepositoryError;
use crate::marketplace::scheduling::service::SchedulingError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Scheduling(SchedulingError),
    Execution(ExecutionError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Scheduling(err) => write!(f, "scheduling error: {}", err),
            AppError::Execution(err) => write!(f, "execution error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Scheduling(err) => Some(err),
            AppError::Execution(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Scheduling(SchedulingError::Validation(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Scheduling(SchedulingError::ServiceNotFound(_))
            | AppError::Scheduling(SchedulingError::Repository(RepositoryError::NotFound))
            | AppError::Execution(ExecutionError::Repository(RepositoryError::NotFound))
            | AppError::Execution(ExecutionError::Job(JobError::ChecklistItemNotFound(_))) => {
                StatusCode::NOT_FOUND
            }
            AppError::Scheduling(SchedulingError::Transition(_))
            | AppError::Execution(ExecutionError::Order(_))
            | AppError::Execution(ExecutionError::Job(_)) => StatusCode::CONFLICT,
            AppError::Scheduling(SchedulingError::Gateway(_)) => StatusCode::BAD_GATEWAY,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Scheduling(_)
            | AppError::Execution(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<SchedulingError> for AppError {
    fn from(value: SchedulingError) -> Self {
        Self::Scheduling(value)
    }
}

impl From<ExecutionError> for AppError {
    fn from(value: ExecutionError) -> Self {
        Self::Execution(value)
    }
}
