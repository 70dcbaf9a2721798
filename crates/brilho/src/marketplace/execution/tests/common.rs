use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, Utc};

use crate::marketplace::catalog::{PaymentMethod, ServiceId};
use crate::marketplace::execution::domain::{AssignedJob, JobId, Priority};
use crate::marketplace::execution::repository::JobRepository;
use crate::marketplace::execution::service::{ExecutionService, JobAssignment};
use crate::marketplace::pricing::AddOn;
use crate::marketplace::scheduling::domain::{Order, OrderId, OrderStatus};
use crate::marketplace::scheduling::repository::{OrderRepository, RepositoryError};

#[derive(Default, Clone)]
pub(super) struct MemoryOrders {
    records: Arc<Mutex<HashMap<OrderId, Order>>>,
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

#[derive(Default, Clone)]
pub(super) struct MemoryJobs {
    records: Arc<Mutex<HashMap<JobId, AssignedJob>>>,
}

impl JobRepository for MemoryJobs {
    fn insert(&self, job: AssignedJob) -> Result<AssignedJob, RepositoryError> {
        let mut guard = self.records.lock().expect("jobs mutex poisoned");
        if guard.contains_key(&job.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(job.id.clone(), job.clone());
        Ok(job)
    }

    fn update(&self, job: AssignedJob) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("jobs mutex poisoned");
        if guard.contains_key(&job.id) {
            guard.insert(job.id.clone(), job);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &JobId) -> Result<Option<AssignedJob>, RepositoryError> {
        let guard = self.records.lock().expect("jobs mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn remove(&self, id: &JobId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("jobs mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }

    fn list(&self) -> Result<Vec<AssignedJob>, RepositoryError> {
        let guard = self.records.lock().expect("jobs mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn tick_running(&self) -> Result<usize, RepositoryError> {
        let mut guard = self.records.lock().expect("jobs mutex poisoned");
        Ok(guard
            .values_mut()
            .map(|job| job.tick())
            .filter(|ticked| *ticked)
            .count())
    }
}

/// Job store whose `remove` is permanently unavailable.
pub(super) struct StuckRemovalJobs {
    pub(super) inner: MemoryJobs,
}

impl JobRepository for StuckRemovalJobs {
    fn insert(&self, job: AssignedJob) -> Result<AssignedJob, RepositoryError> {
        self.inner.insert(job)
    }

    fn update(&self, job: AssignedJob) -> Result<(), RepositoryError> {
        self.inner.update(job)
    }

    fn fetch(&self, id: &JobId) -> Result<Option<AssignedJob>, RepositoryError> {
        self.inner.fetch(id)
    }

    fn remove(&self, _id: &JobId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("maintenance window".into()))
    }

    fn list(&self) -> Result<Vec<AssignedJob>, RepositoryError> {
        self.inner.list()
    }

    fn tick_running(&self) -> Result<usize, RepositoryError> {
        self.inner.tick_running()
    }
}

static ORDER_SEED: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

pub(super) fn pending_order() -> Order {
    let seq = ORDER_SEED.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
    Order {
        id: OrderId(format!("ord-test-{seq:04}")),
        service_id: ServiceId(1),
        service_name: "Limpeza Residencial".to_string(),
        date: NaiveDate::from_ymd_opt(2025, 10, 15).expect("valid date"),
        time_slot: "14:00".to_string(),
        address: "Rua das Flores, 123 - Centro".to_string(),
        room_count: 2,
        add_ons: BTreeSet::from([AddOn::DeepClean]),
        payment_method: PaymentMethod::Pix,
        price: 190,
        status: OrderStatus::Pending,
        created_at: Utc::now(),
        assigned_professional: None,
    }
}

pub(super) fn build_service() -> (
    ExecutionService<MemoryJobs, MemoryOrders>,
    MemoryJobs,
    MemoryOrders,
) {
    let jobs = MemoryJobs::default();
    let orders = MemoryOrders::default();
    let service = ExecutionService::new(Arc::new(jobs.clone()), Arc::new(orders.clone()));
    (service, jobs, orders)
}

pub(super) fn assignment_for(order: &Order) -> JobAssignment {
    JobAssignment {
        order_id: order.id.clone(),
        professional: "Ana Costa".to_string(),
        client_name: "Maria Silva".to_string(),
        client_phone: "(11) 99999-1234".to_string(),
        priority: Priority::High,
        description: "Limpeza completa do apartamento de 2 quartos".to_string(),
    }
}
