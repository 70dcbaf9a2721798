use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::NaiveDate;

use brilho::marketplace::catalog::{PaymentMethod, ServiceCatalog, ServiceId};
use brilho::marketplace::pricing::AddOn;
use brilho::marketplace::scheduling::{
    GatewayError, MissingField, Order, OrderId, OrderRepository, RepositoryError, ScheduleRequest,
    SchedulingError, SchedulingService, SimulatedConfirmation,
};

#[derive(Default, Clone)]
struct MemoryOrders {
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

fn filled_request() -> ScheduleRequest {
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

fn service_with(
    orders: MemoryOrders,
    gateway: SimulatedConfirmation,
) -> SchedulingService<MemoryOrders, SimulatedConfirmation> {
    SchedulingService::new(
        ServiceCatalog::standard(),
        Arc::new(orders),
        Arc::new(gateway),
    )
}

#[tokio::test]
async fn quote_matches_the_submitted_order_price() {
    let orders = MemoryOrders::default();
    let service = service_with(orders.clone(), SimulatedConfirmation::instant());

    let request = filled_request();
    let quote = service.quote(&request).expect("quote builds");
    assert_eq!(quote.total, 290);
    assert_eq!(quote.rooms_subtotal, 240);

    let order = service.submit(request).await.expect("submission accepted");
    assert_eq!(order.price, quote.total);
    assert_eq!(order.service_name, "Limpeza Residencial");

    let stored = orders
        .fetch(&order.id)
        .expect("fetch")
        .expect("order persisted");
    assert_eq!(stored, order);
}

#[tokio::test]
async fn submission_rejects_incomplete_forms_without_persisting() {
    let orders = MemoryOrders::default();
    let service = service_with(orders.clone(), SimulatedConfirmation::instant());

    let request = ScheduleRequest {
        time_slot: None,
        payment_method: None,
        ..filled_request()
    };

    let error = service
        .submit(request)
        .await
        .expect_err("incomplete form rejected");
    match error {
        SchedulingError::Validation(validation) => {
            assert_eq!(
                validation.missing,
                vec![MissingField::TimeSlot, MissingField::PaymentMethod]
            );
        }
        other => panic!("expected validation error, got {other}"),
    }

    assert!(orders.list().expect("list").is_empty());
}

#[tokio::test]
async fn cancellation_is_a_one_way_door_out_of_pending() {
    let orders = MemoryOrders::default();
    let service = service_with(orders.clone(), SimulatedConfirmation::instant());

    let order = service
        .submit(filled_request())
        .await
        .expect("submission accepted");
    let cancelled = service.cancel(&order.id).expect("pending orders cancel");
    assert_eq!(cancelled.status.label(), "Cancelado");

    let error = service
        .cancel(&order.id)
        .expect_err("cancelled orders stay cancelled");
    assert!(matches!(error, SchedulingError::Transition(_)));
}

#[tokio::test]
async fn slow_confirmation_gateway_cancels_the_submission() {
    let orders = MemoryOrders::default();
    let service = service_with(
        orders.clone(),
        SimulatedConfirmation::new(Duration::from_secs(5)),
    )
    .with_confirmation_timeout(Duration::from_millis(20));

    let error = service
        .submit(filled_request())
        .await
        .expect_err("slow gateway must not hang the submission");
    assert!(matches!(
        error,
        SchedulingError::Gateway(GatewayError::Cancelled(_))
    ));

    assert!(
        orders.list().expect("list").is_empty(),
        "cancelled submissions persist nothing"
    );
}
