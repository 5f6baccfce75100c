//! Calendar Service
//!
//! Business-hours rules and ISO week bucketing for the admission policy.
//! Pure functions only — no knowledge of the Store or of any particular
//! reservation's resource.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::models::calendar::HalfHourTime;

/// Business hours for a given day of week, as `[open, close)` half-hour
/// indices, or `None` if the facility is closed all day.
fn business_hours(day: NaiveDate) -> Option<(HalfHourTime, HalfHourTime)> {
    match day.weekday() {
        Weekday::Sun => None,
        Weekday::Sat => Some((
            HalfHourTime::from_hm(10, 0).unwrap(),
            HalfHourTime::from_hm(16, 0).unwrap(),
        )),
        _ => Some((
            HalfHourTime::from_hm(9, 0).unwrap(),
            HalfHourTime::from_hm(18, 0).unwrap(),
        )),
    }
}

/// Whether a reservation's fixed `[start, end)` window fits inside the
/// facility's business hours on `day`.
pub fn is_open(start: HalfHourTime, end: HalfHourTime, day: NaiveDate) -> bool {
    match business_hours(day) {
        None => false,
        Some((open, close)) => start.index() >= open.index() && end.index() <= close.index(),
    }
}

/// The ISO `(year, week)` bucket a calendar date falls into.
pub fn iso_week_bucket(day: NaiveDate) -> (i32, u32) {
    let iso = day.iso_week();
    (iso.year(), iso.week())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn sunday_is_always_closed() {
        // 2022-05-01 is a Sunday.
        let sunday = date(2022, 5, 1);
        assert!(!is_open(
            HalfHourTime::from_hm(10, 0).unwrap(),
            HalfHourTime::from_hm(10, 30).unwrap(),
            sunday
        ));
    }

    #[test]
    fn saturday_hours_are_narrower_than_weekdays() {
        // 2022-04-30 is a Saturday.
        let saturday = date(2022, 4, 30);
        assert!(is_open(
            HalfHourTime::from_hm(10, 0).unwrap(),
            HalfHourTime::from_hm(16, 0).unwrap(),
            saturday
        ));
        assert!(!is_open(
            HalfHourTime::from_hm(9, 0).unwrap(),
            HalfHourTime::from_hm(16, 0).unwrap(),
            saturday
        ));
        assert!(!is_open(
            HalfHourTime::from_hm(10, 0).unwrap(),
            HalfHourTime::from_hm(16, 30).unwrap(),
            saturday
        ));
    }

    #[test]
    fn weekday_hours_run_nine_to_six() {
        // 2022-04-28 is a Thursday.
        let weekday = date(2022, 4, 28);
        assert!(is_open(
            HalfHourTime::from_hm(9, 0).unwrap(),
            HalfHourTime::from_hm(18, 0).unwrap(),
            weekday
        ));
        assert!(!is_open(
            HalfHourTime::from_hm(8, 30).unwrap(),
            HalfHourTime::from_hm(18, 0).unwrap(),
            weekday
        ));
    }

    #[test]
    fn iso_week_bucket_groups_the_same_week_together() {
        let mon = date(2022, 4, 25);
        let wed = date(2022, 4, 27);
        let next_mon = date(2022, 5, 2);
        assert_eq!(iso_week_bucket(mon), iso_week_bucket(wed));
        assert_ne!(iso_week_bucket(mon), iso_week_bucket(next_mon));
    }
}
