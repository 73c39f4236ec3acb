//! Domain data structures for municipalities, households, and collection days.

use std::collections::HashSet;
use std::fmt;

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::holiday::HolidayRule;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Identifier for a municipality known to binday.
pub struct MunicipalityId(pub String);

impl fmt::Display for MunicipalityId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Metadata describing a municipality and its human-friendly name.
pub struct MunicipalityMeta {
    /// Unique identifier.
    pub id: MunicipalityId,
    /// Display name.
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Collection rules shared by every household of a municipality.
pub struct GlobalScheduleConfig {
    /// Weekday that closes a leap-forward window and starts a rotation week.
    pub reset_weekday: Option<Weekday>,
    /// Date the week rotations start on.
    pub rotation_start: Option<NaiveDate>,
    /// Whether garbage is collected at all.
    pub garbage_enabled: bool,
    /// Whether recycling is collected at all.
    pub recycling_enabled: bool,
    /// Garbage rotation labels; one label or none means every week.
    pub garbage_rotation: Vec<String>,
    /// Recycling rotation labels; one label or none means every week.
    pub recycling_rotation: Vec<String>,
    /// Holidays that push the rest of the week's collection one day later.
    pub leap_holidays: HashSet<HolidayRule>,
    /// Holidays that cancel collection without rescheduling it.
    pub holidays: HashSet<HolidayRule>,
    /// First days of the weeks in which bulk items are collected.
    pub bulk_week_anchors: HashSet<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
/// Collection preferences of a single household.
pub struct HouseholdScheduleConfig {
    /// Regular collection weekday.
    pub collection_weekday: Weekday,
    /// Garbage rotation label assigned to the household.
    #[serde(default)]
    pub garbage_slot: Option<String>,
    /// Recycling rotation label assigned to the household.
    #[serde(default)]
    pub recycling_slot: Option<String>,
}

impl HouseholdScheduleConfig {
    /// Household collected every week on `collection_weekday`.
    #[must_use]
    pub fn weekly(collection_weekday: Weekday) -> Self {
        Self {
            collection_weekday,
            garbage_slot: None,
            recycling_slot: None,
        }
    }

    /// Same household with the given rotation labels.
    #[must_use]
    pub fn with_slots<G: Into<String>, R: Into<String>>(
        self,
        garbage_slot: Option<G>,
        recycling_slot: Option<R>,
    ) -> Self {
        Self {
            garbage_slot: garbage_slot.map(Into::into),
            recycling_slot: recycling_slot.map(Into::into),
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Collection outcome of a single day for one household.
pub struct ScheduleResult {
    /// Day in question.
    pub date: NaiveDate,
    /// Garbage is collected.
    pub garbage_day: bool,
    /// Recycling is collected.
    pub recycling_day: bool,
    /// Bulk items are collected.
    pub bulk_day: bool,
}

impl ScheduleResult {
    /// Whether anything is collected on this day.
    #[must_use]
    pub fn any(&self) -> bool {
        self.garbage_day || self.recycling_day || self.bulk_day
    }

    /// Whether `stream` is collected on this day.
    #[must_use]
    pub fn collects(&self, stream: WasteStream) -> bool {
        match stream {
            WasteStream::Garbage => self.garbage_day,
            WasteStream::Recycling => self.recycling_day,
            WasteStream::Bulk => self.bulk_day,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Waste streams picked up at the curb.
pub enum WasteStream {
    /// Regular household garbage.
    Garbage,
    /// Recycling.
    Recycling,
    /// Bulk items.
    Bulk,
}

impl WasteStream {
    /// Every stream, in the order pickups are listed for a day.
    pub const ALL: [WasteStream; 3] = [
        WasteStream::Garbage,
        WasteStream::Recycling,
        WasteStream::Bulk,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Scheduled pickup for a specific day.
pub struct PickupEvent {
    /// Date of the pickup.
    pub date: NaiveDate,
    /// Stream collected.
    pub stream: WasteStream,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Inclusive start/end range for requested schedules.
pub struct DateRange {
    /// Start date (inclusive).
    pub start: NaiveDate,
    /// End date (inclusive).
    pub end: NaiveDate,
}

impl DateRange {
    /// Longest range a schedule may be requested for, in days.
    pub const MAX_DAYS: i64 = 366;

    /// Number of days covered, or `None` when `end` precedes `start`.
    #[must_use]
    pub fn days(&self) -> Option<i64> {
        let span = self.end.signed_duration_since(self.start).num_days();
        (span >= 0).then_some(span + 1)
    }

    /// Every date in the range, in order.
    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }
}
