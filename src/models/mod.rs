//! MPCS Reservation Data Models
//!
//! - `calendar`: half-hour time encoding and day-range helpers shared by every
//!   other module.
//! - `reservation`: the resource enum and the confirmed-booking record.
//! - `transaction`: the append-only audit record paired with each admission
//!   and cancellation.

pub mod calendar;
pub mod reservation;
pub mod transaction;

pub use calendar::HalfHourTime;
pub use reservation::{Reservation, ReservationCandidate, Resource};
pub use transaction::{Transaction, TransactionKind};
