use brilho::marketplace::catalog::{PaymentMethod, ServiceId};
use brilho::marketplace::execution::{AssignedJob, JobId, JobRepository, Priority, SeededJob};
use brilho::marketplace::pricing::AddOn;
use brilho::marketplace::scheduling::{
    Order, OrderId, OrderRepository, OrderStatus, RepositoryError,
};
use chrono::{Duration, Local, NaiveDate, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryOrderRepository {
    records: Arc<Mutex<HashMap<OrderId, Order>>>,
}

impl OrderRepository for InMemoryOrderRepository {
    fn insert(&self, order: Order) -> Result<Order, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&order.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(order.id.clone(), order.clone());
        Ok(order)
    }

    fn update(&self, order: Order) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&order.id) {
            guard.insert(order.id.clone(), order);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &OrderId) -> Result<Option<Order>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<Order>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryJobRepository {
    records: Arc<Mutex<HashMap<JobId, AssignedJob>>>,
}

impl JobRepository for InMemoryJobRepository {
    fn insert(&self, job: AssignedJob) -> Result<AssignedJob, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&job.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(job.id.clone(), job.clone());
        Ok(job)
    }

    fn update(&self, job: AssignedJob) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&job.id) {
            guard.insert(job.id.clone(), job);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &JobId) -> Result<Option<AssignedJob>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn remove(&self, id: &JobId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }

    fn list(&self) -> Result<Vec<AssignedJob>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn tick_running(&self) -> Result<usize, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values_mut()
            .map(|job| job.tick())
            .filter(|ticked| *ticked)
            .count())
    }
}

/// Populate the stores with a small set of realistic orders so the HTTP
/// surface has data to show right after boot. One pending order carries an
/// open offer; the completed one is pure history.
pub(crate) fn seed_marketplace(
    orders: &InMemoryOrderRepository,
    jobs: &InMemoryJobRepository,
) -> Result<(usize, usize), RepositoryError> {
    let today = Local::now().date_naive();

    let residential = Order {
        id: OrderId("ord-demo-0002".to_string()),
        service_id: ServiceId(1),
        service_name: "Limpeza Residencial".to_string(),
        date: today + Duration::days(1),
        time_slot: "14:00".to_string(),
        address: "Rua das Flores, 123 - Centro".to_string(),
        room_count: 2,
        add_ons: BTreeSet::from([AddOn::DeepClean]),
        payment_method: PaymentMethod::Pix,
        price: 190,
        status: OrderStatus::Pending,
        created_at: Utc::now(),
        assigned_professional: Some("Ana Costa".to_string()),
    };

    let offers = [SeededJob {
        order_id: residential.id.clone(),
        client_name: "Maria Silva".to_string(),
        client_phone: "(11) 99999-1234".to_string(),
        address: residential.address.clone(),
        scheduled_date: residential.date,
        time_slot: residential.time_slot.clone(),
        priority: Priority::High,
        description: "Limpeza completa do apartamento de 2 quartos".to_string(),
        can_accept_decline: true,
    }
    .build()];

    let seeds = [
        Order {
            id: OrderId("ord-demo-0001".to_string()),
            service_id: ServiceId(2),
            service_name: "Limpeza Comercial".to_string(),
            date: today + Duration::days(3),
            time_slot: "08:00".to_string(),
            address: "Av. Paulista, 1000 - Bela Vista".to_string(),
            room_count: 5,
            add_ons: BTreeSet::new(),
            payment_method: PaymentMethod::CreditCard,
            price: 600,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
            assigned_professional: None,
        },
        residential,
        Order {
            id: OrderId("ord-demo-0003".to_string()),
            service_id: ServiceId(5),
            service_name: "Limpeza de Vidros".to_string(),
            date: today - Duration::days(7),
            time_slot: "10:00".to_string(),
            address: "Rua Augusta, 456 - Consolação".to_string(),
            room_count: 1,
            add_ons: BTreeSet::new(),
            payment_method: PaymentMethod::Cash,
            price: 40,
            status: OrderStatus::Completed,
            created_at: Utc::now() - Duration::days(8),
            assigned_professional: Some("Maria Santos".to_string()),
        },
    ];

    let mut seeded_orders = 0;
    for order in seeds {
        orders.insert(order)?;
        seeded_orders += 1;
    }

    let mut seeded_jobs = 0;
    for offer in offers {
        jobs.insert(offer)?;
        seeded_jobs += 1;
    }

    Ok((seeded_orders, seeded_jobs))
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_counts_match_the_stored_records() {
        let orders = InMemoryOrderRepository::default();
        let jobs = InMemoryJobRepository::default();

        let (seeded_orders, seeded_jobs) =
            seed_marketplace(&orders, &jobs).expect("seeding succeeds");

        assert_eq!(seeded_orders, orders.list().expect("orders list").len());
        assert_eq!(seeded_jobs, jobs.list().expect("jobs list").len());

        let open_offers = jobs
            .list()
            .expect("jobs list")
            .into_iter()
            .filter(|job| job.can_accept_decline)
            .count();
        assert_eq!(open_offers, seeded_jobs, "every seeded job is an open offer");
    }
}
