use std::sync::Arc;
use std::time::Duration;

use super::common::*;
use crate::marketplace::catalog::{ServiceCatalog, ServiceId};
use crate::marketplace::scheduling::domain::{
    MissingField, OrderEvent, OrderId, OrderStatus, ScheduleRequest,
};
use crate::marketplace::scheduling::gateway::{GatewayError, SimulatedConfirmation};
use crate::marketplace::scheduling::repository::RepositoryError;
use crate::marketplace::scheduling::service::{SchedulingError, SchedulingService};

#[tokio::test]
async fn submit_stores_a_priced_pending_order() {
    let (service, repository) = build_service();

    let order = service
        .submit(residential_request())
        .await
        .expect("submission succeeds");

    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.price, 290, "80 * 3 + 30 + 20");
    assert_eq!(order.service_name, "Limpeza Residencial");
    assert!(order.assigned_professional.is_none());
    assert_eq!(repository.len(), 1);
}

#[tokio::test]
async fn submit_rejects_incomplete_forms_without_persisting() {
    let (service, repository) = build_service();

    let request = ScheduleRequest {
        address: String::new(),
        time_slot: None,
        ..residential_request()
    };

    let error = service
        .submit(request)
        .await
        .expect_err("validation blocks submission");

    match error {
        SchedulingError::Validation(validation) => {
            assert_eq!(
                validation.missing,
                vec![MissingField::Address, MissingField::TimeSlot]
            );
        }
        other => panic!("expected validation error, got {other}"),
    }
    assert_eq!(repository.len(), 0, "no partial submission is accepted");
}

#[tokio::test]
async fn submit_rejects_unknown_services() {
    let (service, _) = build_service();

    let request = ScheduleRequest {
        service_id: Some(ServiceId(42)),
        ..residential_request()
    };

    let error = service.submit(request).await.expect_err("unknown service");
    assert!(matches!(error, SchedulingError::ServiceNotFound(_)));
}

#[tokio::test]
async fn quote_matches_the_submitted_price() {
    let (service, _) = build_service();

    let request = residential_request();
    let quote = service.quote(&request).expect("quote builds");
    let order = service.submit(request).await.expect("submission succeeds");

    assert_eq!(quote.total, order.price);
    assert_eq!(quote.rooms_subtotal, 240);
}

#[tokio::test]
async fn cancel_is_rejected_once_work_is_in_progress() {
    let (service, _) = build_service();

    let order = service
        .submit(residential_request())
        .await
        .expect("submission succeeds");

    service
        .advance(&order.id, OrderEvent::Confirm)
        .expect("confirm");
    service
        .advance(&order.id, OrderEvent::Begin)
        .expect("begin");

    let error = service
        .cancel(&order.id)
        .expect_err("cancel only valid from pending");
    assert!(matches!(error, SchedulingError::Transition(_)));

    let stored = service.order(&order.id).expect("order still stored");
    assert_eq!(
        stored.status,
        OrderStatus::InProgress,
        "rejected transition leaves state unchanged"
    );
}

#[tokio::test]
async fn cancel_from_pending_succeeds() {
    let (service, _) = build_service();

    let order = service
        .submit(residential_request())
        .await
        .expect("submission succeeds");

    let cancelled = service.cancel(&order.id).expect("pending orders cancel");
    assert_eq!(cancelled.status, OrderStatus::Cancelled);
}

#[tokio::test]
async fn lookup_of_unknown_order_reports_not_found() {
    let (service, _) = build_service();

    let error = service
        .order(&OrderId("ord-does-not-exist".to_string()))
        .expect_err("unknown order");
    assert!(matches!(
        error,
        SchedulingError::Repository(RepositoryError::NotFound)
    ));
}

#[tokio::test]
async fn slow_confirmation_is_cancelled_and_persists_nothing() {
    let repository = MemoryOrders::default();
    let service = SchedulingService::new(
        ServiceCatalog::standard(),
        Arc::new(repository.clone()),
        Arc::new(SimulatedConfirmation::new(Duration::from_millis(200))),
    )
    .with_confirmation_timeout(Duration::from_millis(10));

    let error = service
        .submit(residential_request())
        .await
        .expect_err("confirmation wait is bounded");

    assert!(matches!(
        error,
        SchedulingError::Gateway(GatewayError::Cancelled(_))
    ));
    assert_eq!(repository.len(), 0);
}

#[tokio::test]
async fn orders_are_listed_newest_first() {
    let (service, _) = build_service();

    let first = service
        .submit(residential_request())
        .await
        .expect("first submission");
    let second = service
        .submit(residential_request())
        .await
        .expect("second submission");

    let orders = service.orders().expect("listing succeeds");
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].id, second.id);
    assert_eq!(orders[1].id, first.id);
}
