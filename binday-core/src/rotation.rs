//! Week rotations such as "week A / week B" collection.
//!
//! Weeks are counted from an anchor date that falls on the municipality's
//! reset weekday; the week number of the year is never consulted.

use std::num::NonZeroUsize;

use chrono::{Datelike, NaiveDate, Weekday};

const DAYS_PER_WEEK: i64 = 7;

/// The latest date on or before `start` that falls on `reset`.
#[must_use]
pub fn anchor_on_or_before(start: NaiveDate, reset: Weekday) -> NaiveDate {
    let back = i64::from(start.weekday().days_since(reset));
    start
        .checked_sub_signed(chrono::Duration::days(back))
        .unwrap_or(start)
}

/// Maps dates to their slot in a rotation of `length` weeks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekRotationIndexer {
    anchor: NaiveDate,
    length: NonZeroUsize,
}

impl WeekRotationIndexer {
    /// Create an indexer counting weeks from `anchor`.
    #[must_use]
    pub fn new(anchor: NaiveDate, length: NonZeroUsize) -> Self {
        Self { anchor, length }
    }

    /// Anchor date the weeks are counted from.
    #[must_use]
    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    /// Number of slots in the rotation.
    #[must_use]
    pub fn length(&self) -> NonZeroUsize {
        self.length
    }

    /// Slot of `date`, always in `0..length`.
    ///
    /// Days are counted up to the day after `date`, so a slot turns over on the
    /// day before the anchor's weekday. Dates before the anchor wrap around.
    #[must_use]
    pub fn index_of(&self, date: NaiveDate) -> usize {
        let days_since_anchor = date.signed_duration_since(self.anchor).num_days() + 1;
        let weeks = days_since_anchor.div_euclid(DAYS_PER_WEEK);
        let length = i64::try_from(self.length.get()).unwrap_or(i64::MAX);
        // rem_euclid keeps the slot in 0..length, which always fits in usize
        usize::try_from(weeks.rem_euclid(length)).unwrap_or_default()
    }
}
