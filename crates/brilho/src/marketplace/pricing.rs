use super::catalog::{Service, ServiceId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Optional extras selected at scheduling time, each adding a flat surcharge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddOn {
    DeepClean,
    PremiumProducts,
    Organization,
}

impl AddOn {
    pub const fn ordered() -> [Self; 3] {
        [Self::DeepClean, Self::PremiumProducts, Self::Organization]
    }

    /// Flat surcharge in whole currency units; not multiplied by room count.
    pub const fn surcharge(self) -> u32 {
        match self {
            Self::DeepClean => 30,
            Self::PremiumProducts => 20,
            Self::Organization => 40,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::DeepClean => "Limpeza profunda",
            Self::PremiumProducts => "Produtos premium",
            Self::Organization => "Organização",
        }
    }
}

/// Pure price calculation: base price times room count plus flat surcharges.
/// Room counts below one are clamped to one; the room count comes straight
/// from the request body, so the arithmetic saturates instead of wrapping.
pub fn compute_price(service: &Service, room_count: u32, add_ons: &BTreeSet<AddOn>) -> u32 {
    let rooms = room_count.max(1);
    let surcharges: u32 = add_ons.iter().map(|add_on| add_on.surcharge()).sum();
    service
        .base_price
        .saturating_mul(rooms)
        .saturating_add(surcharges)
}

/// One surcharge line on a quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteLine {
    pub add_on: AddOn,
    pub label: &'static str,
    pub surcharge: u32,
}

/// Itemized price estimate shown to the client before submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub service_id: ServiceId,
    pub service_name: String,
    pub base_price: u32,
    pub room_count: u32,
    pub rooms_subtotal: u32,
    pub add_ons: Vec<QuoteLine>,
    pub total: u32,
}

impl Quote {
    pub fn build(service: &Service, room_count: u32, add_ons: &BTreeSet<AddOn>) -> Self {
        let room_count = room_count.max(1);
        let add_on_lines: Vec<QuoteLine> = add_ons
            .iter()
            .map(|&add_on| QuoteLine {
                add_on,
                label: add_on.label(),
                surcharge: add_on.surcharge(),
            })
            .collect();

        Self {
            service_id: service.id,
            service_name: service.name.to_string(),
            base_price: service.base_price,
            room_count,
            rooms_subtotal: service.base_price.saturating_mul(room_count),
            add_ons: add_on_lines,
            total: compute_price(service, room_count, add_ons),
        }
    }
}
