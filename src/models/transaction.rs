//! Transaction Models
//!
//! An immutable audit record of either a reservation creation or a
//! cancellation. Transactions are append-only: a cancellation retains the
//! full snapshot of the reservation it refers to even after that reservation
//! is removed from the Store's reservation list.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::reservation::Reservation;

/// Whether a transaction records an admission or a cancellation.
///
/// On disk this is encoded as `RESERVATION` or `CANCELLATION$<amount>`; the
/// amount always equals `Transaction::amount` and is kept in the string only
/// for format compatibility with the source system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Reservation,
    Cancellation,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Reservation => "RESERVATION",
            TransactionKind::Cancellation => "CANCELLATION",
        }
    }
}

/// An audit record created alongside every admission and every cancellation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_id: u64,
    pub kind: TransactionKind,
    pub transaction_date: NaiveDate,
    pub payload: Reservation,
    pub amount: Decimal,
    pub timestamp: u64,
    pub staff_id: String,
}
