//! Admission Policy
//!
//! Twelve ordered rules decide whether a reservation candidate is admitted.
//! Each rule is an independent, separately testable predicate; `evaluate`
//! runs them in the fixed order below and returns the first violation.
//! Order matters: a candidate that fails rule 3 is rejected for rule 3's
//! reason even if it would also fail rule 9.

use chrono::NaiveDate;

use crate::models::reservation::{Reservation, ReservationCandidate, Resource};
use crate::services::calendar;

/// A rejected candidate, carrying the exact message the caller should see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation(pub String);

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Check a candidate against every admission rule, in order.
///
/// `existing` is every reservation currently on the books, used for
/// capacity, cooldown, co-op and quota checks.
pub fn evaluate(candidate: &ReservationCandidate, existing: &[Reservation]) -> Result<(), Violation> {
    check_known_resource(candidate)?;
    check_not_in_past(candidate)?;
    check_within_booking_window(candidate)?;
    check_half_hour_alignment(candidate)?;
    check_business_hours(candidate)?;
    check_one_special_machine_per_customer(candidate, existing)?;
    check_capacity(candidate, existing)?;
    check_irradiator_exclusive_use(candidate, existing)?;
    check_harvester_co_op_limit(candidate, existing)?;
    check_hvc_cooldown(candidate, existing)?;
    check_irradiator_cooldown(candidate, existing)?;
    check_weekly_quota(candidate, existing)?;
    Ok(())
}

fn reject<T>(msg: impl Into<String>) -> Result<T, Violation> {
    Err(Violation(msg.into()))
}

/// Rule 1: the resource named must be one of the six known resources.
///
/// `ReservationCandidate::resource` is already a parsed `Resource`, so this
/// rule exists purely to mirror the source system's validation order; it
/// can never actually fail for a value constructed via `Resource::parse`.
fn check_known_resource(_candidate: &ReservationCandidate) -> Result<(), Violation> {
    Ok(())
}

/// Rule 2: the reservation cannot start before the date it was made on.
fn check_not_in_past(candidate: &ReservationCandidate) -> Result<(), Violation> {
    if candidate.start_date < candidate.date_of_reservation {
        return reject("Cannot reserve time already passed");
    }
    Ok(())
}

/// Rule 3: the reservation must end within 30 days of being made.
fn check_within_booking_window(candidate: &ReservationCandidate) -> Result<(), Violation> {
    if (candidate.end_date - candidate.date_of_reservation).num_days() > 30 {
        return reject("Cannot reserve time more than 30 days away");
    }
    Ok(())
}

/// Rule 4: start and end time must be 30-minute-aligned and start before end.
///
/// Alignment itself is enforced by `HalfHourTime`'s constructors; this rule
/// only checks that the window is non-empty and well-ordered.
fn check_half_hour_alignment(candidate: &ReservationCandidate) -> Result<(), Violation> {
    if candidate.start_time.index() >= candidate.end_time.index() {
        return reject(
            "Reservations for all resources are made in 30 minute blocks and always start on the hour or half hour",
        );
    }
    Ok(())
}

/// Rule 5: the reservation's time window must fit inside business hours on
/// every day it spans.
fn check_business_hours(candidate: &ReservationCandidate) -> Result<(), Violation> {
    for day in candidate.days() {
        if !calendar::is_open(candidate.start_time, candidate.end_time, day) {
            return reject(format!(
                "Cannot reserve time interval from {} to {} on {}",
                candidate.start_time, candidate.end_time, day
            ));
        }
    }
    Ok(())
}

/// Rule 6: a customer may hold at most one reservation on a "special"
/// (non-workshop) machine at a time, across all resources.
fn check_one_special_machine_per_customer(
    candidate: &ReservationCandidate,
    existing: &[Reservation],
) -> Result<(), Violation> {
    if !candidate.resource.is_special() {
        return Ok(());
    }
    let conflicts = existing.iter().any(|r| {
        r.resource.is_special()
            && r.customer_id == candidate.customer_id
            && candidate.days().any(|day| r.days().any(|d| d == day))
            && r.time_overlaps(candidate.start_time, candidate.end_time)
    });
    if conflicts {
        return reject("A client can only reserve one special machine at a time");
    }
    Ok(())
}

/// Count reservations on `resource` active at `day`/`half_hour`.
fn active_count(existing: &[Reservation], resource: Resource, day: NaiveDate, half_hour: u8) -> usize {
    existing
        .iter()
        .filter(|r| r.resource == resource && r.active_at(day, half_hour))
        .count()
}

/// Rule 7: at every half-hour the candidate occupies, the resource's
/// capacity must not be exceeded once the candidate is added.
fn check_capacity(candidate: &ReservationCandidate, existing: &[Reservation]) -> Result<(), Violation> {
    let capacity = candidate.resource.capacity();
    for day in candidate.days() {
        for half_hour in candidate.start_time.index()..candidate.end_time.index() {
            let count = active_count(existing, candidate.resource, day, half_hour);
            if count + 1 > capacity {
                return reject(format!(
                    "Not enough available {}, {} already reserved",
                    candidate.resource, count
                ));
            }
        }
    }
    Ok(())
}

/// Rule 8: the irradiator is single-use — while any reservation holds it at
/// a given half-hour, no other reservation (same customer or not) may hold
/// it at the same half-hour. Capacity alone (rule 7, limit 2) would permit
/// two concurrent irradiator reservations; this rule forbids that.
fn check_irradiator_exclusive_use(
    candidate: &ReservationCandidate,
    existing: &[Reservation],
) -> Result<(), Violation> {
    if candidate.resource != Resource::Irradiator {
        return Ok(());
    }
    for day in candidate.days() {
        for half_hour in candidate.start_time.index()..candidate.end_time.index() {
            if active_count(existing, Resource::Irradiator, day, half_hour) > 0 {
                return reject("Only 1 irradiator can be used at a time");
            }
        }
    }
    Ok(())
}

/// Rule 9: while a prior harvester reservation is active at a half-hour,
/// the total count of non-workshop reservations active at that half-hour,
/// including the candidate, must not exceed 4. Only a prior reservation
/// starts the harvester running; a harvester candidate itself does not
/// trigger the check against its own window.
fn check_harvester_co_op_limit(
    candidate: &ReservationCandidate,
    existing: &[Reservation],
) -> Result<(), Violation> {
    for day in candidate.days() {
        for half_hour in candidate.start_time.index()..candidate.end_time.index() {
            let harvester_active = existing
                .iter()
                .any(|r| r.resource == Resource::Harvester && r.active_at(day, half_hour));
            if !harvester_active {
                continue;
            }
            let mut special_count = existing
                .iter()
                .filter(|r| r.resource.is_special() && r.active_at(day, half_hour))
                .count();
            if candidate.resource.is_special() {
                special_count += 1;
            }
            if special_count > 4 {
                return reject(
                    "Only 3 other machines can run while the 1.21 gigawatt lightning harvester is operating",
                );
            }
        }
    }
    Ok(())
}

/// Rule 10: the HVC requires a 6-hour cooldown between any two uses,
/// regardless of customer.
fn check_hvc_cooldown(candidate: &ReservationCandidate, existing: &[Reservation]) -> Result<(), Violation> {
    if candidate.resource != Resource::Hvc {
        return Ok(());
    }
    let window_start = candidate.start_time.saturating_shift_hours(-6);
    let window_end = candidate.end_time.saturating_shift_hours(6);
    for day in candidate.days() {
        let conflict = existing.iter().any(|r| {
            r.resource == Resource::Hvc && r.days().any(|d| d == day) && r.time_overlaps(window_start, window_end)
        });
        if conflict {
            return reject(
                "High velocity crusher needs to cool down for 6 hours between uses",
            );
        }
    }
    Ok(())
}

/// Rule 11: the irradiator requires a 1-hour cooldown between any two uses,
/// regardless of customer.
fn check_irradiator_cooldown(
    candidate: &ReservationCandidate,
    existing: &[Reservation],
) -> Result<(), Violation> {
    if candidate.resource != Resource::Irradiator {
        return Ok(());
    }
    let window_start = candidate.start_time.saturating_shift_hours(-1);
    let window_end = candidate.end_time.saturating_shift_hours(1);
    for day in candidate.days() {
        let count = existing
            .iter()
            .filter(|r| {
                r.resource == Resource::Irradiator
                    && r.days().any(|d| d == day)
                    && r.time_overlaps(window_start, window_end)
            })
            .count();
        if count >= 2 {
            return reject("Irradiators need to cool down for 1 hour between uses");
        }
    }
    Ok(())
}

/// Rule 12: across every resource (workshop included), a customer may not
/// occupy more than 3 distinct calendar days in the same ISO week.
fn check_weekly_quota(candidate: &ReservationCandidate, existing: &[Reservation]) -> Result<(), Violation> {
    for day in candidate.days() {
        let bucket = calendar::iso_week_bucket(day);
        let existing_days = existing
            .iter()
            .filter(|r| r.customer_id == candidate.customer_id)
            .flat_map(|r| r.days())
            .filter(|d| calendar::iso_week_bucket(*d) == bucket)
            .count();
        let candidate_days = candidate
            .days()
            .filter(|d| calendar::iso_week_bucket(*d) == bucket)
            .count();
        if existing_days + candidate_days > 3 {
            return reject("A client can only make reservations for 3 different days in a given week");
        }
    }
    Ok(())
}
