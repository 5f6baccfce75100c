//! Reporter
//!
//! Pure, read-only projections over a reservation/transaction snapshot.
//! Never touches the `Store` directly — the engine hands it a snapshot,
//! which keeps these functions trivially unit-testable and safe to run
//! concurrently with a mutating request against the same store.

use chrono::NaiveDate;

use crate::models::reservation::Reservation;
use crate::models::transaction::Transaction;

/// Reservations whose `start_date` falls within `[start_date, end_date]`,
/// optionally narrowed to a single customer.
pub fn list_reservations(
    reservations: &[Reservation],
    start_date: NaiveDate,
    end_date: NaiveDate,
    customer_id: Option<&str>,
) -> Vec<Reservation> {
    reservations
        .iter()
        .filter(|r| customer_id.is_none_or(|id| r.customer_id == id))
        .filter(|r| start_date <= r.start_date && r.start_date <= end_date)
        .cloned()
        .collect()
}

/// Transactions whose `transaction_date` falls within `[start_date, end_date]`.
pub fn list_transactions(transactions: &[Transaction], start_date: NaiveDate, end_date: NaiveDate) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| start_date <= t.transaction_date && t.transaction_date <= end_date)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::calendar::HalfHourTime;
    use crate::models::reservation::Resource;
    use crate::models::transaction::TransactionKind;
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn reservation(id: u64, customer: &str, start_date: NaiveDate) -> Reservation {
        Reservation {
            reservation_id: id,
            customer_id: customer.to_string(),
            resource: Resource::Workshop,
            start_date,
            end_date: start_date,
            start_time: HalfHourTime::from_hm(10, 0).unwrap(),
            end_time: HalfHourTime::from_hm(10, 30).unwrap(),
            date_of_reservation: start_date - chrono::Duration::days(1),
            total_cost: Decimal::new(4950, 2),
            down_payment: Decimal::ZERO,
        }
    }

    #[test]
    fn filters_reservations_by_date_range() {
        let reservations = vec![
            reservation(1, "alice", date(2022, 4, 28)),
            reservation(2, "alice", date(2022, 5, 5)),
        ];
        let result = list_reservations(&reservations, date(2022, 4, 1), date(2022, 4, 30), None);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].reservation_id, 1);
    }

    #[test]
    fn filters_reservations_by_customer_when_given() {
        let reservations = vec![
            reservation(1, "alice", date(2022, 4, 28)),
            reservation(2, "bob", date(2022, 4, 28)),
        ];
        let result = list_reservations(&reservations, date(2022, 4, 1), date(2022, 4, 30), Some("bob"));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].customer_id, "bob");
    }

    #[test]
    fn filters_transactions_by_date_range() {
        let r = reservation(1, "alice", date(2022, 4, 28));
        let transactions = vec![
            Transaction {
                transaction_id: 1,
                kind: TransactionKind::Reservation,
                transaction_date: date(2022, 4, 28),
                payload: r.clone(),
                amount: Decimal::ZERO,
                timestamp: 1000,
                staff_id: "s1".into(),
            },
            Transaction {
                transaction_id: 2,
                kind: TransactionKind::Cancellation,
                transaction_date: date(2022, 5, 10),
                payload: r,
                amount: Decimal::ZERO,
                timestamp: 2000,
                staff_id: "s1".into(),
            },
        ];
        let result = list_transactions(&transactions, date(2022, 4, 1), date(2022, 4, 30));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].transaction_id, 1);
    }
}
