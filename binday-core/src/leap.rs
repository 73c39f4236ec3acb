//! Leap-forward windows following rescheduling holidays.
//!
//! When a leap holiday cancels collection, every collection for the rest of
//! that week slides one day later. The window closes at the reset weekday.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate, Weekday};

/// Days after `holiday` up to, but excluding, the first `reset` weekday on or
/// after `holiday`.
///
/// A holiday that falls on the reset weekday itself shifts nothing.
pub fn days_until_reset(holiday: NaiveDate, reset: Weekday) -> impl Iterator<Item = NaiveDate> {
    holiday
        .iter_days()
        .take_while(move |day| day.weekday() != reset)
        .skip(1)
}

/// Union of the leap windows of every trigger date.
#[must_use]
pub fn leap_forward_days<'a>(
    triggers: impl IntoIterator<Item = &'a NaiveDate>,
    reset: Weekday,
) -> HashSet<NaiveDate> {
    triggers
        .into_iter()
        .flat_map(|holiday| days_until_reset(*holiday, reset))
        .collect()
}
