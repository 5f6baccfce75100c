//! Pricing Service
//!
//! Computes total cost, down payment and refund amounts for a reservation.
//! All money is expressed as `Decimal` to keep cent arithmetic exact.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::reservation::{ReservationCandidate, Resource};

/// Base price per half-hour slot, by resource.
fn base_price_per_half_hour(resource: Resource) -> Decimal {
    match resource {
        Resource::Workshop => dec!(49.50),
        Resource::Microvac => dec!(500),
        Resource::Irradiator => dec!(1110),
        Resource::Extruder => dec!(300),
        Resource::Hvc => dec!(10000),
        Resource::Harvester => dec!(4400),
    }
}

fn slot_count(candidate: &ReservationCandidate) -> u64 {
    let half_hours_per_day =
        (candidate.end_time.index() - candidate.start_time.index()) as u64;
    let days = candidate.days().count() as u64;
    half_hours_per_day * days
}

/// Total cost of a reservation, before any discount: slots times the
/// resource's per-half-hour price. The HVC's table price is already the
/// rate actually charged per slot; it is not halved again the way a naive
/// port of the source's full-hour constants would suggest.
fn base_cost(candidate: &ReservationCandidate) -> Decimal {
    Decimal::from(slot_count(candidate)) * base_price_per_half_hour(candidate.resource)
}

/// Whether a reservation made on `date_of_reservation` for `start_date`
/// qualifies for the early-booking discount (14 or more days of lead time).
fn qualifies_for_early_discount(date_of_reservation: NaiveDate, start_date: NaiveDate) -> bool {
    (start_date - date_of_reservation).num_days() >= 14
}

/// The total cost of the reservation, including the 25% early-booking
/// discount when booked 14 or more days ahead of the start date.
pub fn total_cost(candidate: &ReservationCandidate) -> Decimal {
    let cost = base_cost(candidate);
    if qualifies_for_early_discount(candidate.date_of_reservation, candidate.start_date) {
        cost * dec!(0.75)
    } else {
        cost
    }
}

/// The discount percentage recorded alongside a reservation: 25 if the
/// early-booking discount applied, 0 otherwise.
pub fn discount_percent(candidate: &ReservationCandidate) -> u32 {
    if qualifies_for_early_discount(candidate.date_of_reservation, candidate.start_date) {
        25
    } else {
        0
    }
}

/// The down payment due at booking time: the workshop requires none, every
/// other resource requires half of the total cost up front.
pub fn down_payment(candidate: &ReservationCandidate, total: Decimal) -> Decimal {
    match candidate.resource {
        Resource::Workshop => Decimal::ZERO,
        _ => total * dec!(0.5),
    }
}

/// Refund tiers for a cancellation, keyed by how many days ahead of the
/// reservation's start date the cancellation happens: 75% of the down
/// payment at 7 or more days out, 50% at 2 to 6 days out, no refund inside
/// 2 days. Returns `(percent_returned, refund_amount)`.
pub fn refund(down_payment: Decimal, start_date: NaiveDate, cancellation_date: NaiveDate) -> (u32, Decimal) {
    let days_ahead = (start_date - cancellation_date).num_days();
    if days_ahead >= 7 {
        (75, down_payment * dec!(0.75))
    } else if days_ahead >= 2 {
        (50, down_payment * dec!(0.5))
    } else {
        (0, Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::calendar::HalfHourTime;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn candidate(resource: Resource, start_date: NaiveDate, start: (u32, u32), end: (u32, u32), lead_days: i64) -> ReservationCandidate {
        ReservationCandidate {
            customer_id: "alice".into(),
            resource,
            start_date,
            end_date: start_date,
            start_time: HalfHourTime::from_hm(start.0, start.1).unwrap(),
            end_time: HalfHourTime::from_hm(end.0, end.1).unwrap(),
            date_of_reservation: start_date - chrono::Duration::days(lead_days),
        }
    }

    #[test]
    fn workshop_single_half_hour_slot_no_discount() {
        // Boundary scenario 1: 11:00-11:30, one slot, one day out.
        let c = candidate(Resource::Workshop, date(2022, 4, 28), (11, 0), (11, 30), 3);
        assert_eq!(total_cost(&c), dec!(49.50));
        assert_eq!(discount_percent(&c), 0);
        assert_eq!(down_payment(&c, total_cost(&c)), Decimal::ZERO);
    }

    #[test]
    fn hvc_recurring_two_days_is_not_halved() {
        // Boundary scenario 2: 11:00-11:30 across two days.
        let start = date(2022, 4, 28);
        let c = ReservationCandidate {
            customer_id: "bob".into(),
            resource: Resource::Hvc,
            start_date: start,
            end_date: start + chrono::Duration::days(1),
            start_time: HalfHourTime::from_hm(11, 0).unwrap(),
            end_time: HalfHourTime::from_hm(11, 30).unwrap(),
            date_of_reservation: start - chrono::Duration::days(3),
        };
        assert_eq!(total_cost(&c), dec!(20000));
        assert_eq!(down_payment(&c, total_cost(&c)), dec!(10000));
    }

    #[test]
    fn early_booking_gets_twenty_five_percent_off() {
        // Boundary scenario 3: same as scenario 1 but booked 20 days ahead.
        let c = candidate(Resource::Workshop, date(2022, 5, 15), (11, 0), (11, 30), 20);
        assert_eq!(total_cost(&c), dec!(37.125));
        assert_eq!(discount_percent(&c), 25);
    }

    #[test]
    fn other_resources_require_half_down() {
        let c = candidate(Resource::Extruder, date(2022, 5, 1), (10, 0), (12, 0), 1);
        let total = total_cost(&c);
        assert_eq!(down_payment(&c, total), total * dec!(0.5));
    }

    #[test]
    fn refund_tiers_match_days_ahead_of_start() {
        let start = date(2022, 5, 10);
        let down = dec!(1000);
        assert_eq!(refund(down, start, date(2022, 5, 2)), (75, dec!(750)));
        assert_eq!(refund(down, start, date(2022, 5, 5)), (50, dec!(500)));
        assert_eq!(refund(down, start, date(2022, 5, 9)), (0, Decimal::ZERO));
    }
}
