use crate::infra::{AppState, InMemoryJobRepository, InMemoryOrderRepository};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use brilho::marketplace::catalog::{PaymentMethod, Service, ServiceCatalog};
use brilho::marketplace::execution::{job_router, ExecutionService};
use brilho::marketplace::pricing::AddOn;
use brilho::marketplace::scheduling::{order_router, SchedulingService, SimulatedConfirmation};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub(crate) struct CatalogResponse {
    pub(crate) services: Vec<Service>,
    pub(crate) add_ons: Vec<AddOnView>,
    pub(crate) time_slots: Vec<&'static str>,
    pub(crate) payment_methods: Vec<PaymentMethodView>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AddOnView {
    pub(crate) code: AddOn,
    pub(crate) label: &'static str,
    pub(crate) surcharge: u32,
}

#[derive(Debug, Serialize)]
pub(crate) struct PaymentMethodView {
    pub(crate) code: PaymentMethod,
    pub(crate) label: &'static str,
}

pub(crate) fn with_marketplace_routes(
    scheduling: Arc<SchedulingService<InMemoryOrderRepository, SimulatedConfirmation>>,
    execution: Arc<ExecutionService<InMemoryJobRepository, InMemoryOrderRepository>>,
) -> axum::Router {
    order_router(scheduling)
        .merge(job_router(execution))
        .route("/api/v1/catalog", axum::routing::get(catalog_endpoint))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Everything the booking form needs in one payload: services, add-ons with
/// their surcharges, the hourly slots, and the accepted payment methods.
pub(crate) async fn catalog_endpoint() -> Json<CatalogResponse> {
    let catalog = ServiceCatalog::standard();

    let add_ons = AddOn::ordered()
        .into_iter()
        .map(|add_on| AddOnView {
            code: add_on,
            label: add_on.label(),
            surcharge: add_on.surcharge(),
        })
        .collect();

    let payment_methods = PaymentMethod::ordered()
        .into_iter()
        .map(|method| PaymentMethodView {
            code: method,
            label: method.label(),
        })
        .collect();

    Json(CatalogResponse {
        services: catalog.services().to_vec(),
        add_ons,
        time_slots: ServiceCatalog::time_slots().to_vec(),
        payment_methods,
    })
}
