//! Domain core for the Brilho cleaning-service marketplace.
//!
//! The `marketplace` module carries the business logic: the static service
//! catalog, the pure price calculator, the client-facing order lifecycle, and
//! the employee-facing job execution lifecycle with its checklist. `config`,
//! `telemetry`, and `error` provide the ambient plumbing shared with the HTTP
//! service.

pub mod config;
pub mod error;
pub mod marketplace;
pub mod telemetry;
