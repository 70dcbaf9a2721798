//! Client-facing scheduling: draft validation, order creation, and the
//! order status lifecycle (pending → confirmed → in_progress → completed,
//! with cancellation only while pending).

pub mod domain;
pub mod gateway;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    MissingField, Order, OrderDraft, OrderEvent, OrderId, OrderStatus, OrderTransitionError,
    ScheduleRequest, ValidationError,
};
pub use gateway::{ConfirmationGateway, GatewayError, SimulatedConfirmation};
pub use repository::{OrderRepository, RepositoryError};
pub use router::order_router;
pub use service::{SchedulingError, SchedulingService};
