//! Reservation Models
//!
//! A reservation is one confirmed booking of one resource across one or
//! more contiguous calendar days, at the same time-of-day window each day.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::calendar::HalfHourTime;

/// The six bookable resources offered by the facility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Workshop,
    Microvac,
    Irradiator,
    Extruder,
    Hvc,
    Harvester,
}

impl Resource {
    /// All resources known to the system, in a stable order.
    pub const ALL: [Resource; 6] = [
        Resource::Workshop,
        Resource::Microvac,
        Resource::Irradiator,
        Resource::Extruder,
        Resource::Hvc,
        Resource::Harvester,
    ];

    /// Parse a resource from its wire/disk name.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "workshop" => Some(Resource::Workshop),
            "microvac" => Some(Resource::Microvac),
            "irradiator" => Some(Resource::Irradiator),
            "extruder" => Some(Resource::Extruder),
            "hvc" => Some(Resource::Hvc),
            "harvester" => Some(Resource::Harvester),
            _ => None,
        }
    }

    /// The name used on disk and in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Workshop => "workshop",
            Resource::Microvac => "microvac",
            Resource::Irradiator => "irradiator",
            Resource::Extruder => "extruder",
            Resource::Hvc => "hvc",
            Resource::Harvester => "harvester",
        }
    }

    /// Any resource other than the shared workshop.
    pub fn is_special(&self) -> bool {
        !matches!(self, Resource::Workshop)
    }

    /// Maximum simultaneous reservations active at any single half-hour.
    pub fn capacity(&self) -> usize {
        match self {
            Resource::Workshop => 15,
            Resource::Microvac => 2,
            Resource::Irradiator => 2,
            Resource::Extruder => 3,
            Resource::Hvc => 1,
            Resource::Harvester => 1,
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A confirmed booking of one resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub reservation_id: u64,
    pub customer_id: String,
    pub resource: Resource,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_time: HalfHourTime,
    pub end_time: HalfHourTime,
    pub date_of_reservation: NaiveDate,
    pub total_cost: Decimal,
    pub down_payment: Decimal,
}

impl Reservation {
    /// Iterate every calendar day this reservation occupies, inclusive.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        super::calendar::date_range(self.start_date, self.end_date)
    }

    /// Whether this reservation is active at the given day and half-hour index.
    pub fn active_at(&self, day: NaiveDate, half_hour: u8) -> bool {
        self.start_date <= day
            && day <= self.end_date
            && self.start_time.index() <= half_hour
            && half_hour < self.end_time.index()
    }

    /// Whether this reservation's time interval overlaps the given one, ignoring day.
    pub fn time_overlaps(&self, other_start: HalfHourTime, other_end: HalfHourTime) -> bool {
        !(self.end_time.index() <= other_start.index() || other_end.index() <= self.start_time.index())
    }
}

/// Fields needed to propose a new reservation, before admission.
#[derive(Debug, Clone)]
pub struct ReservationCandidate {
    pub customer_id: String,
    pub resource: Resource,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_time: HalfHourTime,
    pub end_time: HalfHourTime,
    pub date_of_reservation: NaiveDate,
}

impl ReservationCandidate {
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        super::calendar::date_range(self.start_date, self.end_date)
    }
}
