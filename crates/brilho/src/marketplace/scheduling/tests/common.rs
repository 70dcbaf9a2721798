use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::marketplace::catalog::{PaymentMethod, ServiceCatalog, ServiceId};
use crate::marketplace::pricing::AddOn;
use crate::marketplace::scheduling::domain::{Order, OrderId, ScheduleRequest};
use crate::marketplace::scheduling::gateway::SimulatedConfirmation;
use crate::marketplace::scheduling::repository::{OrderRepository, RepositoryError};
use crate::marketplace::scheduling::service::SchedulingService;

#[derive(Default, Clone)]
pub(super) struct MemoryOrders {
    records: Arc<Mutex<HashMap<OrderId, Order>>>,
}

impl MemoryOrders {
    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("orders mutex poisoned").len()
    }
}

impl OrderRepository for MemoryOrders {
    fn insert(&self, order: Order) -> Result<Order, RepositoryError> {
        let mut guard = self.records.lock().expect("orders mutex poisoned");
        if guard.contains_key(&order.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(order.id.clone(), order.clone());
        Ok(order)
    }

    fn update(&self, order: Order) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("orders mutex poisoned");
        if guard.contains_key(&order.id) {
            guard.insert(order.id.clone(), order);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &OrderId) -> Result<Option<Order>, RepositoryError> {
        let guard = self.records.lock().expect("orders mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<Order>, RepositoryError> {
        let guard = self.records.lock().expect("orders mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

/// Repository that always reports itself unavailable.
pub(super) struct UnavailableOrders;

impl OrderRepository for UnavailableOrders {
    fn insert(&self, _order: Order) -> Result<Order, RepositoryError> {
        Err(RepositoryError::Unavailable("maintenance window".into()))
    }

    fn update(&self, _order: Order) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("maintenance window".into()))
    }

    fn fetch(&self, _id: &OrderId) -> Result<Option<Order>, RepositoryError> {
        Err(RepositoryError::Unavailable("maintenance window".into()))
    }

    fn list(&self) -> Result<Vec<Order>, RepositoryError> {
        Err(RepositoryError::Unavailable("maintenance window".into()))
    }
}

pub(super) fn build_service() -> (
    SchedulingService<MemoryOrders, SimulatedConfirmation>,
    MemoryOrders,
) {
    let repository = MemoryOrders::default();
    let service = SchedulingService::new(
        ServiceCatalog::standard(),
        Arc::new(repository.clone()),
        Arc::new(SimulatedConfirmation::instant()),
    );
    (service, repository)
}

pub(super) fn residential_request() -> ScheduleRequest {
    ScheduleRequest {
        service_id: Some(ServiceId(1)),
        room_count: 3,
        add_ons: BTreeSet::from([AddOn::DeepClean, AddOn::PremiumProducts]),
        address: "Rua das Flores, 123 - Centro".to_string(),
        date: NaiveDate::from_ymd_opt(2025, 10, 15),
        time_slot: Some("14:00".to_string()),
        payment_method: Some(PaymentMethod::Pix),
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    serde_json::from_slice(&bytes).expect("body is json")
}
