use crate::cli::ServeArgs;
use crate::infra::{seed_marketplace, AppState, InMemoryJobRepository, InMemoryOrderRepository};
use crate::routes::with_marketplace_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use brilho::config::AppConfig;
use brilho::error::AppError;
use brilho::marketplace::catalog::ServiceCatalog;
use brilho::marketplace::execution::ExecutionService;
use brilho::marketplace::scheduling::{SchedulingError, SchedulingService, SimulatedConfirmation};
use brilho::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(config.environment, &config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let orders = Arc::new(InMemoryOrderRepository::default());
    let jobs = Arc::new(InMemoryJobRepository::default());

    let (seeded_orders, seeded_jobs) =
        seed_marketplace(&orders, &jobs).map_err(SchedulingError::from)?;
    info!(seeded_orders, seeded_jobs, "marketplace stores seeded");

    let gateway = Arc::new(SimulatedConfirmation::new(
        config.gateway.confirmation_delay(),
    ));
    let scheduling = Arc::new(SchedulingService::new(
        ServiceCatalog::standard(),
        orders.clone(),
        gateway,
    ));
    let execution = Arc::new(ExecutionService::new(jobs, orders));

    let ticker = execution.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        loop {
            interval.tick().await;
            if let Err(err) = ticker.tick_active() {
                warn!(error = %err, "job timer pass failed");
            }
        }
    });

    let app = with_marketplace_routes(scheduling, execution)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "brilho marketplace ready");

    axum::serve(listener, app).await?;
    Ok(())
}
