//! MPCS Inc. Reservation Engine
//!
//! A small in-process booking system for a manufacturing facility's shared
//! equipment: a calendar of business hours, an ordered admission policy, a
//! pricing service and a flat-file backed store, wired together by
//! [`Engine`].
//!
//! # Architecture
//!
//! - **models**: half-hour time encoding, resources, reservations and
//!   transactions.
//! - **services**: calendar rules, admission policy, pricing, reporting and
//!   the [`Engine`] that orchestrates them.
//! - **store**: the append-only, flat-file backed reservation/transaction
//!   ledger.
//! - **config**: layered configuration (defaults, TOML file, environment).
//! - **error**: the engine's error taxonomy.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod store;

pub use config::EngineConfig;
pub use error::{EngineError, OperationKind};
pub use models::{HalfHourTime, Reservation, ReservationCandidate, Resource, Transaction, TransactionKind};
pub use services::{AdmissionReceipt, CancellationReceipt, Engine};
pub use store::Store;

/// Crate version, as declared in `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
