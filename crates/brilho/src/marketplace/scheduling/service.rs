use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::info;

use super::domain::{
    Order, OrderDraft, OrderEvent, OrderId, OrderTransitionError, ScheduleRequest, ValidationError,
};
use super::gateway::{ConfirmationGateway, GatewayError};
use super::repository::{OrderRepository, RepositoryError};
use crate::marketplace::catalog::{ServiceCatalog, ServiceId};
use crate::marketplace::pricing::{compute_price, Quote};

const DEFAULT_CONFIRMATION_TIMEOUT: Duration = Duration::from_secs(10);

/// Service composing the catalog, the order store, and the confirmation
/// gateway. One instance is shared by the client-facing routes and by the
/// execution side, which pushes lifecycle events as the assigned job moves.
pub struct SchedulingService<R, G> {
    catalog: ServiceCatalog,
    repository: Arc<R>,
    gateway: Arc<G>,
    confirmation_timeout: Duration,
}

static ORDER_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_order_id() -> OrderId {
    let id = ORDER_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    OrderId(format!("ord-{id:06}"))
}

impl<R, G> SchedulingService<R, G>
where
    R: OrderRepository + 'static,
    G: ConfirmationGateway + 'static,
{
    pub fn new(catalog: ServiceCatalog, repository: Arc<R>, gateway: Arc<G>) -> Self {
        Self {
            catalog,
            repository,
            gateway,
            confirmation_timeout: DEFAULT_CONFIRMATION_TIMEOUT,
        }
    }

    /// Bound the wait on the confirmation gateway; elapsing the bound cancels
    /// the submission and persists nothing.
    pub fn with_confirmation_timeout(mut self, timeout: Duration) -> Self {
        self.confirmation_timeout = timeout;
        self
    }

    pub fn catalog(&self) -> &ServiceCatalog {
        &self.catalog
    }

    /// Price preview for the current form state; persists nothing.
    pub fn quote(&self, request: &ScheduleRequest) -> Result<Quote, SchedulingError> {
        let draft = self.draft(request)?;
        let service = self
            .catalog
            .service(draft.service_id)
            .ok_or(SchedulingError::ServiceNotFound(draft.service_id))?;
        Ok(Quote::build(service, draft.room_count, &draft.add_ons))
    }

    /// Validate, price, confirm, and persist a new pending order.
    pub async fn submit(&self, request: ScheduleRequest) -> Result<Order, SchedulingError> {
        let draft = self.draft(&request)?;

        tokio::time::timeout(self.confirmation_timeout, self.gateway.confirm(&draft))
            .await
            .map_err(|_| GatewayError::Cancelled(self.confirmation_timeout))??;

        let order = Order {
            id: next_order_id(),
            service_id: draft.service_id,
            service_name: draft.service_name,
            date: draft.date,
            time_slot: draft.time_slot,
            address: draft.address,
            room_count: draft.room_count,
            add_ons: draft.add_ons,
            payment_method: draft.payment_method,
            price: draft.price,
            status: super::domain::OrderStatus::Pending,
            created_at: Utc::now(),
            assigned_professional: None,
        };

        let stored = self.repository.insert(order)?;
        info!(order_id = %stored.id, price = stored.price, "order scheduled");
        Ok(stored)
    }

    /// Client-initiated cancellation; only valid while the order is pending.
    pub fn cancel(&self, order_id: &OrderId) -> Result<Order, SchedulingError> {
        self.advance(order_id, OrderEvent::Cancel)
    }

    /// Apply a lifecycle event to a stored order. Invalid transitions leave
    /// the stored state untouched.
    pub fn advance(&self, order_id: &OrderId, event: OrderEvent) -> Result<Order, SchedulingError> {
        let mut order = self
            .repository
            .fetch(order_id)?
            .ok_or(RepositoryError::NotFound)?;

        order.status = order.status.apply(event)?;
        self.repository.update(order.clone())?;
        Ok(order)
    }

    pub fn order(&self, order_id: &OrderId) -> Result<Order, SchedulingError> {
        let order = self
            .repository
            .fetch(order_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(order)
    }

    pub fn orders(&self) -> Result<Vec<Order>, SchedulingError> {
        let mut orders = self.repository.list()?;
        orders.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.0.cmp(&a.id.0))
        });
        Ok(orders)
    }

    fn draft(&self, request: &ScheduleRequest) -> Result<OrderDraft, SchedulingError> {
        let missing = request.missing_fields();
        if !missing.is_empty() {
            return Err(ValidationError { missing }.into());
        }

        let (Some(service_id), Some(date), Some(time_slot), Some(payment_method)) = (
            request.service_id,
            request.date,
            request.time_slot.clone(),
            request.payment_method,
        ) else {
            return Err(ValidationError {
                missing: request.missing_fields(),
            }
            .into());
        };

        let service = self
            .catalog
            .service(service_id)
            .ok_or(SchedulingError::ServiceNotFound(service_id))?;

        let room_count = request.room_count.max(1);
        let price = compute_price(service, room_count, &request.add_ons);

        Ok(OrderDraft {
            service_id,
            service_name: service.name.to_string(),
            date,
            time_slot,
            address: request.address.trim().to_string(),
            room_count,
            add_ons: request.add_ons.clone(),
            payment_method,
            price,
        })
    }
}

/// Error raised by the scheduling service.
#[derive(Debug, thiserror::Error)]
pub enum SchedulingError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("service {0} not found in catalog")]
    ServiceNotFound(ServiceId),
    #[error(transparent)]
    Transition(#[from] OrderTransitionError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
