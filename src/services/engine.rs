//! Reservation Engine
//!
//! The single entry point mutating state goes through. `admit` and
//! `cancel` each take the store's lock for their full duration: the
//! admission check reads the current reservation list and the resulting
//! write happens before another caller can observe a stale decision.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::{EngineError, OperationKind};
use crate::models::reservation::{Reservation, ReservationCandidate};
use crate::models::transaction::{Transaction, TransactionKind};
use crate::services::{policy, pricing, report};
use crate::store::Store;

/// The result of successfully admitting a reservation.
#[derive(Debug, Clone)]
pub struct AdmissionReceipt {
    pub reservation: Reservation,
    pub transaction_id: u64,
    /// 25 if the early-booking discount applied, 0 otherwise.
    pub discount: u32,
}

/// The result of successfully cancelling a reservation.
#[derive(Debug, Clone)]
pub struct CancellationReceipt {
    pub percent_returned: u32,
    pub refund_amount: Decimal,
    pub transaction_id: u64,
}

/// Orchestrates admission, cancellation and listing against a [`Store`].
pub struct Engine {
    store: Store,
}

impl Engine {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Attempt to admit a reservation candidate, running every policy rule
    /// before committing anything. Returns the confirmed reservation and
    /// the id of the transaction recorded alongside it.
    pub fn admit(
        &self,
        candidate: ReservationCandidate,
        staff_id: &str,
        now: u64,
    ) -> Result<AdmissionReceipt, EngineError> {
        let existing = self.store.snapshot_reservations();

        if let Err(violation) = policy::evaluate(&candidate, &existing) {
            tracing::warn!(
                customer_id = %candidate.customer_id,
                resource = %candidate.resource,
                reason = %violation,
                "reservation rejected"
            );
            return Err(EngineError::validation(OperationKind::Reservation, violation.0));
        }

        let total_cost = pricing::total_cost(&candidate);
        let down_payment = pricing::down_payment(&candidate, total_cost);
        let discount = pricing::discount_percent(&candidate);

        let reservation = Reservation {
            reservation_id: self.store.next_reservation_id(),
            customer_id: candidate.customer_id,
            resource: candidate.resource,
            start_date: candidate.start_date,
            end_date: candidate.end_date,
            start_time: candidate.start_time,
            end_time: candidate.end_time,
            date_of_reservation: candidate.date_of_reservation,
            total_cost,
            down_payment,
        };

        self.store.append_reservation(reservation.clone())?;

        let transaction = Transaction {
            transaction_id: self.store.next_transaction_id(),
            kind: TransactionKind::Reservation,
            transaction_date: reservation.date_of_reservation,
            payload: reservation.clone(),
            amount: down_payment,
            timestamp: now,
            staff_id: staff_id.to_string(),
        };
        let transaction_id = transaction.transaction_id;
        self.store.append_transaction(transaction)?;

        tracing::debug!(
            reservation_id = reservation.reservation_id,
            customer_id = %reservation.customer_id,
            resource = %reservation.resource,
            "reservation admitted"
        );

        Ok(AdmissionReceipt {
            reservation,
            transaction_id,
            discount,
        })
    }

    /// Cancel an existing reservation, computing the refund due based on
    /// how far ahead of the start date the cancellation happens.
    pub fn cancel(
        &self,
        reservation_id: u64,
        cancellation_date: NaiveDate,
        staff_id: &str,
        now: u64,
    ) -> Result<CancellationReceipt, EngineError> {
        let reservation = self
            .store
            .find_reservation(reservation_id)
            .ok_or(EngineError::NotFound)?;

        let (percent_returned, refund) = pricing::refund(
            reservation.down_payment,
            reservation.start_date,
            cancellation_date,
        );

        self.store.remove_reservation(reservation_id)?;

        let transaction = Transaction {
            transaction_id: self.store.next_transaction_id(),
            kind: TransactionKind::Cancellation,
            transaction_date: cancellation_date,
            payload: reservation.clone(),
            amount: refund,
            timestamp: now,
            staff_id: staff_id.to_string(),
        };
        let transaction_id = transaction.transaction_id;
        self.store.append_transaction(transaction)?;

        tracing::debug!(
            reservation_id,
            customer_id = %reservation.customer_id,
            refund_amount = %refund,
            "reservation cancelled"
        );

        Ok(CancellationReceipt {
            percent_returned,
            refund_amount: refund,
            transaction_id,
        })
    }

    /// Reservations whose `start_date` falls in `[start_date, end_date]`,
    /// optionally narrowed to a single customer.
    pub fn list_reservations(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
        customer_id: Option<&str>,
    ) -> Vec<Reservation> {
        report::list_reservations(&self.store.snapshot_reservations(), start_date, end_date, customer_id)
    }

    /// Transactions whose `transaction_date` falls in `[start_date, end_date]`.
    pub fn list_transactions(&self, start_date: NaiveDate, end_date: NaiveDate) -> Vec<Transaction> {
        report::list_transactions(&self.store.snapshot_transactions(), start_date, end_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::calendar::HalfHourTime;
    use crate::models::reservation::Resource;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn engine() -> Engine {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::load(dir.path().join("data.txt")).unwrap();
        // Leak the tempdir so the store's path stays valid for the test's life.
        std::mem::forget(dir);
        Engine::new(store)
    }

    fn candidate(today: NaiveDate, resource: Resource, start: u32, end: u32) -> ReservationCandidate {
        ReservationCandidate {
            customer_id: "alice".into(),
            resource,
            start_date: today + chrono::Duration::days(1),
            end_date: today + chrono::Duration::days(1),
            start_time: HalfHourTime::from_hm(start, 0).unwrap(),
            end_time: HalfHourTime::from_hm(end, 0).unwrap(),
            date_of_reservation: today,
        }
    }

    #[test]
    fn admits_a_valid_candidate_and_records_a_transaction() {
        let engine = engine();
        let today = date(2022, 4, 28); // Thursday
        let receipt = engine
            .admit(candidate(today, Resource::Workshop, 10, 11), "staff-1", 1000)
            .unwrap();

        let window_start = today;
        let window_end = today + chrono::Duration::days(2);
        assert_eq!(engine.list_reservations(window_start, window_end, None).len(), 1);
        assert_eq!(engine.list_transactions(window_start, window_end).len(), 1);
        assert_eq!(receipt.reservation.down_payment, Decimal::ZERO);
    }

    #[test]
    fn rejects_an_invalid_candidate_without_mutating_the_store() {
        let engine = engine();
        let today = date(2022, 4, 28);
        // Sunday is closed.
        let sunday = date(2022, 5, 1);
        let mut c = candidate(today, Resource::Workshop, 10, 11);
        c.start_date = sunday;
        c.end_date = sunday;

        let result = engine.admit(c, "staff-1", 1000);
        assert!(result.is_err());
        assert!(engine
            .list_reservations(today, today + chrono::Duration::days(7), None)
            .is_empty());
    }

    #[test]
    fn cancelling_an_unknown_reservation_is_not_found() {
        let engine = engine();
        let result = engine.cancel(999, date(2022, 4, 28), "staff-1", 1000);
        assert!(matches!(result, Err(EngineError::NotFound)));
    }

    #[test]
    fn cancel_removes_the_reservation_and_records_a_refund_transaction() {
        let engine = engine();
        let today = date(2022, 4, 28);
        let receipt = engine
            .admit(candidate(today, Resource::Workshop, 10, 11), "staff-1", 1000)
            .unwrap();

        let cancel_receipt = engine
            .cancel(receipt.reservation.reservation_id, today, "staff-1", 2000)
            .unwrap();

        let window_start = today;
        let window_end = today + chrono::Duration::days(2);
        assert!(engine.list_reservations(window_start, window_end, None).is_empty());
        assert_eq!(engine.list_transactions(window_start, window_end).len(), 2);
        assert_eq!(cancel_receipt.refund_amount, Decimal::ZERO);
        assert_eq!(cancel_receipt.percent_returned, 0);
    }
}
