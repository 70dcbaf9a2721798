use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::{OrderId, ScheduleRequest};
use super::gateway::ConfirmationGateway;
use super::repository::{OrderRepository, RepositoryError};
use super::service::{SchedulingError, SchedulingService};

/// Router builder exposing HTTP endpoints for quoting and scheduling.
pub fn order_router<R, G>(service: Arc<SchedulingService<R, G>>) -> Router
where
    R: OrderRepository + 'static,
    G: ConfirmationGateway + 'static,
{
    Router::new()
        .route("/api/v1/orders/quote", post(quote_handler::<R, G>))
        .route(
            "/api/v1/orders",
            post(submit_handler::<R, G>).get(list_handler::<R, G>),
        )
        .route("/api/v1/orders/:order_id", get(get_handler::<R, G>))
        .route(
            "/api/v1/orders/:order_id/cancel",
            post(cancel_handler::<R, G>),
        )
        .with_state(service)
}

pub(crate) async fn quote_handler<R, G>(
    State(service): State<Arc<SchedulingService<R, G>>>,
    axum::Json(request): axum::Json<ScheduleRequest>,
) -> Response
where
    R: OrderRepository + 'static,
    G: ConfirmationGateway + 'static,
{
    match service.quote(&request) {
        Ok(quote) => (StatusCode::OK, axum::Json(quote)).into_response(),
        Err(error) => scheduling_error_response(error),
    }
}

pub(crate) async fn submit_handler<R, G>(
    State(service): State<Arc<SchedulingService<R, G>>>,
    axum::Json(request): axum::Json<ScheduleRequest>,
) -> Response
where
    R: OrderRepository + 'static,
    G: ConfirmationGateway + 'static,
{
    match service.submit(request).await {
        Ok(order) => (StatusCode::CREATED, axum::Json(order)).into_response(),
        Err(error) => scheduling_error_response(error),
    }
}

pub(crate) async fn list_handler<R, G>(
    State(service): State<Arc<SchedulingService<R, G>>>,
) -> Response
where
    R: OrderRepository + 'static,
    G: ConfirmationGateway + 'static,
{
    match service.orders() {
        Ok(orders) => (StatusCode::OK, axum::Json(orders)).into_response(),
        Err(error) => scheduling_error_response(error),
    }
}

pub(crate) async fn get_handler<R, G>(
    State(service): State<Arc<SchedulingService<R, G>>>,
    Path(order_id): Path<String>,
) -> Response
where
    R: OrderRepository + 'static,
    G: ConfirmationGateway + 'static,
{
    match service.order(&OrderId(order_id)) {
        Ok(order) => (StatusCode::OK, axum::Json(order)).into_response(),
        Err(error) => scheduling_error_response(error),
    }
}

pub(crate) async fn cancel_handler<R, G>(
    State(service): State<Arc<SchedulingService<R, G>>>,
    Path(order_id): Path<String>,
) -> Response
where
    R: OrderRepository + 'static,
    G: ConfirmationGateway + 'static,
{
    match service.cancel(&OrderId(order_id)) {
        Ok(order) => (StatusCode::OK, axum::Json(order)).into_response(),
        Err(error) => scheduling_error_response(error),
    }
}

fn scheduling_error_response(error: SchedulingError) -> Response {
    match error {
        SchedulingError::Validation(validation) => {
            let payload = json!({
                "error": validation.to_string(),
                "missing": validation.missing,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        SchedulingError::ServiceNotFound(_)
        | SchedulingError::Repository(RepositoryError::NotFound) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        SchedulingError::Transition(transition) => {
            let payload = json!({
                "error": transition.to_string(),
                "status": transition.from,
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        SchedulingError::Gateway(gateway) => {
            let payload = json!({ "error": gateway.to_string() });
            (StatusCode::BAD_GATEWAY, axum::Json(payload)).into_response()
        }
        other => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
