//! Reservation engine services
//!
//! Business logic layer: calendar rules, admission policy, pricing and
//! reporting, orchestrated by the engine.

pub mod calendar;
pub mod engine;
pub mod policy;
pub mod pricing;
pub mod report;

pub use engine::{AdmissionReceipt, CancellationReceipt, Engine};
