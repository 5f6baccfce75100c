//! Half-hour time encoding and inclusive date-range iteration.
//!
//! Every reservation window is expressed as a half-hour index within a day
//! (`hh*2 + mm/30`, valid range `0..=47`) rather than as a `chrono::NaiveTime`
//! directly, so that interval arithmetic (overlap checks, cooldown windows)
//! stays in plain integers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A time of day aligned to a 30-minute boundary, stored as a half-hour index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HalfHourTime(u8);

impl HalfHourTime {
    /// Build from an hour/minute pair. `minute` must be 0 or 30.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        if hour > 23 || (minute != 0 && minute != 30) {
            return None;
        }
        Some(Self((hour * 2 + minute / 30) as u8))
    }

    /// Build directly from a half-hour index (0..=47).
    pub fn from_index(index: u8) -> Option<Self> {
        if index > 47 {
            None
        } else {
            Some(Self(index))
        }
    }

    /// Parse `"HH:MM"`, rejecting anything off the half-hour grid.
    pub fn parse(s: &str) -> Option<Self> {
        let (h, m) = s.split_once(':')?;
        Self::from_hm(h.parse().ok()?, m.parse().ok()?)
    }

    pub fn index(&self) -> u8 {
        self.0
    }

    pub fn hour(&self) -> u32 {
        (self.0 / 2) as u32
    }

    pub fn minute(&self) -> u32 {
        if self.0 % 2 == 0 { 0 } else { 30 }
    }

    /// This time shifted by a whole number of hours, clamped to the day's
    /// half-hour range rather than wrapping — used for cooldown-window math
    /// where the caller only cares whether the shifted bound is "past the
    /// edge of the day".
    pub fn saturating_shift_hours(&self, hours: i32) -> Self {
        let shifted = self.0 as i32 + hours * 2;
        Self(shifted.clamp(0, 47) as u8)
    }
}

impl fmt::Display for HalfHourTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl TryFrom<String> for HalfHourTime {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("invalid half-hour time: {value}"))
    }
}

impl From<HalfHourTime> for String {
    fn from(value: HalfHourTime) -> Self {
        value.to_string()
    }
}

/// Iterate every calendar day from `start` to `end`, inclusive on both ends.
pub fn date_range(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    let mut cur = start;
    std::iter::from_fn(move || {
        if cur > end {
            None
        } else {
            let day = cur;
            cur += chrono::Duration::days(1);
            Some(day)
        }
    })
}
