use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier wrapper for catalog services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServiceId(pub u32);

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A bookable cleaning service. Immutable; loaded from the static catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Service {
    pub id: ServiceId,
    pub name: &'static str,
    pub description: &'static str,
    pub base_price: u32,
    pub duration_estimate: &'static str,
}

/// Payment options a client can pick at scheduling time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard,
    DebitCard,
    Pix,
    Cash,
}

impl PaymentMethod {
    pub const fn ordered() -> [Self; 4] {
        [Self::CreditCard, Self::DebitCard, Self::Pix, Self::Cash]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::CreditCard => "Cartão de Crédito",
            Self::DebitCard => "Cartão de Débito",
            Self::Pix => "Pix",
            Self::Cash => "Dinheiro",
        }
    }
}

/// Read-only lookup of the services offered on the marketplace.
#[derive(Debug)]
pub struct ServiceCatalog {
    services: Vec<Service>,
}

impl ServiceCatalog {
    pub fn standard() -> Self {
        Self {
            services: standard_services(),
        }
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn service(&self, id: ServiceId) -> Option<&Service> {
        self.services.iter().find(|service| service.id == id)
    }

    /// Hourly booking slots offered to clients.
    pub const fn time_slots() -> [&'static str; 11] {
        [
            "08:00", "09:00", "10:00", "11:00", "12:00", "13:00", "14:00", "15:00", "16:00",
            "17:00", "18:00",
        ]
    }

    pub const fn payment_methods() -> [PaymentMethod; 4] {
        PaymentMethod::ordered()
    }
}

impl Default for ServiceCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

fn standard_services() -> Vec<Service> {
    vec![
        Service {
            id: ServiceId(1),
            name: "Limpeza Residencial",
            description: "Limpeza completa da sua casa",
            base_price: 80,
            duration_estimate: "2-4 horas",
        },
        Service {
            id: ServiceId(2),
            name: "Limpeza Comercial",
            description: "Escritórios e estabelecimentos",
            base_price: 120,
            duration_estimate: "3-6 horas",
        },
        Service {
            id: ServiceId(3),
            name: "Limpeza Pós-Obra",
            description: "Remoção de entulhos e sujeira",
            base_price: 150,
            duration_estimate: "4-8 horas",
        },
        Service {
            id: ServiceId(4),
            name: "Limpeza de Carpetes",
            description: "Higienização profunda",
            base_price: 60,
            duration_estimate: "1-2 horas",
        },
        Service {
            id: ServiceId(5),
            name: "Limpeza de Vidros",
            description: "Janelas e superfícies de vidro",
            base_price: 40,
            duration_estimate: "1-3 horas",
        },
        Service {
            id: ServiceId(6),
            name: "Limpeza Pesada",
            description: "Para situações extremas",
            base_price: 200,
            duration_estimate: "6-8 horas",
        },
    ]
}
