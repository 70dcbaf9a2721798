//! Marketplace domain logic.
//!
//! `catalog` holds the static service offering, `pricing` the pure quote
//! calculator, `scheduling` the client-facing order lifecycle, and
//! `execution` the employee-facing job lifecycle with its checklist.

pub mod catalog;
pub mod execution;
pub mod pricing;
pub mod scheduling;
