//! United States holiday rules for binday.
//!
//! Holidays covered:
//! * New Year's Eve (Dec 31, expressed as the day before Jan 1)
//! * New Year's Day (Jan 1)
//! * Memorial Day (last Mon in May)
//! * Independence Day (Jul 4)
//! * Labor Day (1st Mon in Sep)
//! * Thanksgiving Day (4th Thu in Nov) and the day after
//! * Christmas Eve and Christmas Day (Dec 24/25)
//!
//! Observed-date shifts for weekends are not modelled; municipalities that
//! skip collection on those days list them as extra rules.

use std::collections::HashSet;

use binday_core::{HolidayOffset, HolidayRule};
use chrono::{Month, Weekday};

/// December 31, as the day before New Year's Day.
#[must_use]
pub fn new_years_eve() -> HolidayRule {
    new_years_day().with_offset(HolidayOffset::DayBefore)
}

/// January 1.
#[must_use]
pub fn new_years_day() -> HolidayRule {
    HolidayRule::fixed(Month::January, 1)
}

/// Last Monday of May.
#[must_use]
pub fn memorial_day() -> HolidayRule {
    HolidayRule::last_weekday(Month::May, Weekday::Mon)
}

/// July 4.
#[must_use]
pub fn independence_day() -> HolidayRule {
    HolidayRule::fixed(Month::July, 4)
}

/// First Monday of September.
#[must_use]
pub fn labor_day() -> HolidayRule {
    HolidayRule::nth_weekday(Month::September, Weekday::Mon, 0)
}

/// Fourth Thursday of November.
#[must_use]
pub fn thanksgiving() -> HolidayRule {
    HolidayRule::nth_weekday(Month::November, Weekday::Thu, 3)
}

/// Friday after Thanksgiving.
#[must_use]
pub fn day_after_thanksgiving() -> HolidayRule {
    thanksgiving().with_offset(HolidayOffset::DayAfter)
}

/// December 24, as the day before Christmas.
#[must_use]
pub fn christmas_eve() -> HolidayRule {
    christmas().with_offset(HolidayOffset::DayBefore)
}

/// December 25.
#[must_use]
pub fn christmas() -> HolidayRule {
    HolidayRule::fixed(Month::December, 25)
}

/// Holidays after which most US haulers slide the rest of the week by a day.
#[must_use]
pub fn common_leap_holidays() -> HashSet<HolidayRule> {
    HashSet::from([
        memorial_day(),
        independence_day(),
        labor_day(),
        thanksgiving(),
        christmas(),
    ])
}

/// Every holiday in this catalogue.
#[must_use]
pub fn all() -> HashSet<HolidayRule> {
    HashSet::from([
        new_years_eve(),
        new_years_day(),
        memorial_day(),
        independence_day(),
        labor_day(),
        thanksgiving(),
        day_after_thanksgiving(),
        christmas_eve(),
        christmas(),
    ])
}
