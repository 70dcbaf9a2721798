use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::marketplace::catalog::{PaymentMethod, ServiceId};
use crate::marketplace::pricing::AddOn;

/// Identifier wrapper for scheduled orders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub String);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Client-visible order lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pendente",
            Self::Confirmed => "Confirmado",
            Self::InProgress => "Em Andamento",
            Self::Completed => "Concluído",
            Self::Cancelled => "Cancelado",
        }
    }

    /// Ordered progression shown on the client timeline. `Cancelled` sits
    /// outside the progression and never appears here.
    pub const fn timeline() -> [Self; 4] {
        [
            Self::Pending,
            Self::Confirmed,
            Self::InProgress,
            Self::Completed,
        ]
    }

    /// Position within the timeline, or `None` for cancelled orders.
    pub fn timeline_position(self) -> Option<usize> {
        Self::timeline().iter().position(|status| *status == self)
    }

    /// Transition table for the order lifecycle. Anything not listed is
    /// rejected and leaves the state unchanged.
    pub fn apply(self, event: OrderEvent) -> Result<Self, OrderTransitionError> {
        match (self, event) {
            (Self::Pending, OrderEvent::Confirm) => Ok(Self::Confirmed),
            (Self::Confirmed, OrderEvent::Begin) => Ok(Self::InProgress),
            (Self::InProgress, OrderEvent::Finish) => Ok(Self::Completed),
            (Self::Pending, OrderEvent::Cancel) => Ok(Self::Cancelled),
            (from, event) => Err(OrderTransitionError { from, event }),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Events that drive the order lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderEvent {
    Confirm,
    Begin,
    Finish,
    Cancel,
}

impl OrderEvent {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Confirm => "confirm",
            Self::Begin => "begin",
            Self::Finish => "finish",
            Self::Cancel => "cancel",
        }
    }
}

impl fmt::Display for OrderEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Rejected state change; the order keeps its current status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("order cannot move from '{from}' via '{event}'")]
pub struct OrderTransitionError {
    pub from: OrderStatus,
    pub event: OrderEvent,
}

/// Required scheduling fields a submission may be missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingField {
    Service,
    Address,
    Date,
    TimeSlot,
    PaymentMethod,
}

impl MissingField {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Service => "service",
            Self::Address => "address",
            Self::Date => "date",
            Self::TimeSlot => "time slot",
            Self::PaymentMethod => "payment method",
        }
    }
}

/// Blocking validation failure; no partial submission is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub missing: Vec<MissingField>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.missing.iter().map(|field| field.label()).collect();
        write!(
            f,
            "missing required scheduling fields: {}",
            fields.join(", ")
        )
    }
}

impl std::error::Error for ValidationError {}

/// Draft filled in by the client form; validated once at submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRequest {
    pub service_id: Option<ServiceId>,
    #[serde(default = "default_room_count")]
    pub room_count: u32,
    #[serde(default)]
    pub add_ons: BTreeSet<AddOn>,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub time_slot: Option<String>,
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
}

fn default_room_count() -> u32 {
    1
}

impl Default for ScheduleRequest {
    fn default() -> Self {
        Self {
            service_id: None,
            room_count: default_room_count(),
            add_ons: BTreeSet::new(),
            address: String::new(),
            date: None,
            time_slot: None,
            payment_method: None,
        }
    }
}

impl ScheduleRequest {
    pub fn missing_fields(&self) -> Vec<MissingField> {
        let mut missing = Vec::new();
        if self.service_id.is_none() {
            missing.push(MissingField::Service);
        }
        if self.address.trim().is_empty() {
            missing.push(MissingField::Address);
        }
        if self.date.is_none() {
            missing.push(MissingField::Date);
        }
        if self.time_slot.is_none() {
            missing.push(MissingField::TimeSlot);
        }
        if self.payment_method.is_none() {
            missing.push(MissingField::PaymentMethod);
        }
        missing
    }
}

/// Validated and priced submission, ready for confirmation and persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderDraft {
    pub service_id: ServiceId,
    pub service_name: String,
    pub date: NaiveDate,
    pub time_slot: String,
    pub address: String,
    pub room_count: u32,
    pub add_ons: BTreeSet<AddOn>,
    pub payment_method: PaymentMethod,
    pub price: u32,
}

/// A scheduled cleaning request as the client sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub service_id: ServiceId,
    pub service_name: String,
    pub date: NaiveDate,
    pub time_slot: String,
    pub address: String,
    pub room_count: u32,
    pub add_ons: BTreeSet<AddOn>,
    pub payment_method: PaymentMethod,
    pub price: u32,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub assigned_professional: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_progresses_through_the_timeline() {
        let status = OrderStatus::Pending;
        let status = status.apply(OrderEvent::Confirm).expect("confirm");
        let status = status.apply(OrderEvent::Begin).expect("begin");
        let status = status.apply(OrderEvent::Finish).expect("finish");
        assert_eq!(status, OrderStatus::Completed);
    }

    #[test]
    fn pending_cannot_jump_straight_to_completed() {
        let error = OrderStatus::Pending
            .apply(OrderEvent::Finish)
            .expect_err("no direct jump to completed");
        assert_eq!(error.from, OrderStatus::Pending);
        assert_eq!(error.event, OrderEvent::Finish);
    }

    #[test]
    fn cancel_is_only_valid_from_pending() {
        assert_eq!(
            OrderStatus::Pending.apply(OrderEvent::Cancel),
            Ok(OrderStatus::Cancelled)
        );
        assert!(OrderStatus::InProgress.apply(OrderEvent::Cancel).is_err());
        assert!(OrderStatus::Confirmed.apply(OrderEvent::Cancel).is_err());
        assert!(OrderStatus::Completed.apply(OrderEvent::Cancel).is_err());
    }

    #[test]
    fn cancelled_sits_outside_the_timeline() {
        assert_eq!(OrderStatus::Pending.timeline_position(), Some(0));
        assert_eq!(OrderStatus::Completed.timeline_position(), Some(3));
        assert_eq!(OrderStatus::Cancelled.timeline_position(), None);
    }

    #[test]
    fn missing_fields_are_collected_in_form_order() {
        let request = ScheduleRequest::default();
        assert_eq!(
            request.missing_fields(),
            vec![
                MissingField::Service,
                MissingField::Address,
                MissingField::Date,
                MissingField::TimeSlot,
                MissingField::PaymentMethod,
            ]
        );
    }

    #[test]
    fn whitespace_address_counts_as_missing() {
        let request = ScheduleRequest {
            address: "   ".to_string(),
            ..ScheduleRequest::default()
        };
        assert!(request.missing_fields().contains(&MissingField::Address));
    }
}
