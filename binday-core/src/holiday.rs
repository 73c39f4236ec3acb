//! Holiday definitions and their resolution to concrete dates.

use std::collections::HashSet;

use chrono::{Datelike, Month, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Shift applied to a holiday after its base date has been found.
///
/// Useful for the day after Thanksgiving or Christmas Eve.
pub enum HolidayOffset {
    /// The base date itself.
    #[default]
    DayOf,
    /// One day after the base date.
    DayAfter,
    /// One day before the base date.
    DayBefore,
}

impl HolidayOffset {
    /// Apply the offset to `date`.
    ///
    /// Returns `None` only when the shifted date is outside chrono's range.
    #[must_use]
    pub fn apply(self, date: NaiveDate) -> Option<NaiveDate> {
        match self {
            HolidayOffset::DayOf => Some(date),
            HolidayOffset::DayAfter => date.succ_opt(),
            HolidayOffset::DayBefore => date.pred_opt(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
/// How the base date of a holiday is derived each year.
pub enum HolidayKind {
    /// Same month and day every year, e.g. Christmas.
    FixedDate {
        /// Month of the holiday.
        month: Month,
        /// Day of the month, starting at 1.
        day: u32,
    },
    /// The nth occurrence of a weekday within a month, e.g. Thanksgiving.
    NthWeekday {
        /// Month of the holiday.
        month: Month,
        /// Weekday the holiday falls on.
        weekday: Weekday,
        /// 0 for the first occurrence, 1 for the second, -1 for the last.
        occurrence: i32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// A holiday definition: a base date rule plus an optional offset.
pub struct HolidayRule {
    /// Base date rule.
    #[serde(flatten)]
    pub kind: HolidayKind,
    /// Shift applied after the base date has been resolved.
    #[serde(default)]
    pub offset: HolidayOffset,
}

impl HolidayRule {
    /// Holiday on a fixed month and day.
    #[must_use]
    pub fn fixed(month: Month, day: u32) -> Self {
        Self {
            kind: HolidayKind::FixedDate { month, day },
            offset: HolidayOffset::DayOf,
        }
    }

    /// Holiday on the `occurrence`-th `weekday` of `month` (0-based, negative from the end).
    #[must_use]
    pub fn nth_weekday(month: Month, weekday: Weekday, occurrence: i32) -> Self {
        Self {
            kind: HolidayKind::NthWeekday {
                month,
                weekday,
                occurrence,
            },
            offset: HolidayOffset::DayOf,
        }
    }

    /// Holiday on the last `weekday` of `month`.
    #[must_use]
    pub fn last_weekday(month: Month, weekday: Weekday) -> Self {
        Self::nth_weekday(month, weekday, -1)
    }

    /// Same rule with a different offset.
    #[must_use]
    pub fn with_offset(self, offset: HolidayOffset) -> Self {
        Self { offset, ..self }
    }
}

/// Resolve `rule` against `year`.
///
/// The offset is applied after the base date is found, so the result may lie
/// in the previous or next year. Rules that have no date in `year` (Feb 30, a
/// fifth Monday that does not exist) yield `None`.
#[must_use]
pub fn resolve(rule: &HolidayRule, year: i32) -> Option<NaiveDate> {
    let base = match rule.kind {
        HolidayKind::FixedDate { month, day } => {
            NaiveDate::from_ymd_opt(year, month.number_from_month(), day)?
        }
        HolidayKind::NthWeekday {
            month,
            weekday,
            occurrence,
        } => nth_weekday_of_month(year, month, weekday, occurrence)?,
    };
    rule.offset.apply(base)
}

fn nth_weekday_of_month(
    year: i32,
    month: Month,
    weekday: Weekday,
    occurrence: i32,
) -> Option<NaiveDate> {
    let month_number = month.number_from_month();
    let first = NaiveDate::from_ymd_opt(year, month_number, 1)?;
    let matches: Vec<NaiveDate> = first
        .iter_days()
        .take_while(|day| day.month() == month_number)
        .filter(|day| day.weekday() == weekday)
        .collect();

    let count = i32::try_from(matches.len()).ok()?;
    let index = if occurrence < 0 {
        count + occurrence
    } else {
        occurrence
    };
    matches.get(usize::try_from(index).ok()?).copied()
}

/// All dates within `year` produced by `rules`.
///
/// Each rule is resolved for the previous, current and next year so that
/// offsets crossing New Year land in the right set: "the day before January 1"
/// belongs to the year it falls in, not the year it was resolved for.
pub fn expand<'a>(
    rules: impl IntoIterator<Item = &'a HolidayRule>,
    year: i32,
) -> HashSet<NaiveDate> {
    let years = year.saturating_sub(1)..=year.saturating_add(1);
    rules
        .into_iter()
        .flat_map(|rule| {
            years
                .clone()
                .filter_map(move |candidate| resolve(rule, candidate))
        })
        .filter(|date| date.year() == year)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
    }

    #[test]
    fn fixed_date_resolves_in_requested_year() {
        let christmas = HolidayRule::fixed(Month::December, 25);
        assert_eq!(resolve(&christmas, 2019), Some(date(2019, 12, 25)));
    }

    #[test]
    fn invalid_fixed_date_has_no_occurrence() {
        let rule = HolidayRule::fixed(Month::February, 30);
        assert_eq!(resolve(&rule, 2019), None);

        let leap_day = HolidayRule::fixed(Month::February, 29);
        assert_eq!(resolve(&leap_day, 2019), None);
        assert_eq!(resolve(&leap_day, 2020), Some(date(2020, 2, 29)));
    }

    #[test]
    fn nth_weekday_counts_from_zero() {
        let labor_day = HolidayRule::nth_weekday(Month::September, Weekday::Mon, 0);
        assert_eq!(resolve(&labor_day, 2019), Some(date(2019, 9, 2)));

        let thanksgiving = HolidayRule::nth_weekday(Month::November, Weekday::Thu, 3);
        assert_eq!(resolve(&thanksgiving, 2019), Some(date(2019, 11, 28)));
    }

    #[test]
    fn negative_occurrence_counts_from_the_end() {
        let memorial_day = HolidayRule::last_weekday(Month::May, Weekday::Mon);
        assert_eq!(resolve(&memorial_day, 2019), Some(date(2019, 5, 27)));

        let second_to_last = HolidayRule::nth_weekday(Month::May, Weekday::Mon, -2);
        assert_eq!(resolve(&second_to_last, 2019), Some(date(2019, 5, 20)));
    }

    #[test]
    fn occurrence_out_of_range_has_no_date() {
        let fifth_sunday = HolidayRule::nth_weekday(Month::February, Weekday::Sun, 4);
        assert_eq!(resolve(&fifth_sunday, 2020), None);

        let too_far_back = HolidayRule::nth_weekday(Month::February, Weekday::Sun, -5);
        assert_eq!(resolve(&too_far_back, 2020), None);
    }

    #[test]
    fn offset_may_leave_the_requested_year() {
        let new_years_eve =
            HolidayRule::fixed(Month::January, 1).with_offset(HolidayOffset::DayBefore);
        assert_eq!(resolve(&new_years_eve, 2020), Some(date(2019, 12, 31)));
    }

    #[test]
    fn expand_keeps_offset_dates_in_their_own_year() {
        let new_years_eve =
            HolidayRule::fixed(Month::January, 1).with_offset(HolidayOffset::DayBefore);
        assert_eq!(
            expand([&new_years_eve], 2019),
            HashSet::from([date(2019, 12, 31)])
        );

        let day_after_dec_31 =
            HolidayRule::fixed(Month::December, 31).with_offset(HolidayOffset::DayAfter);
        assert_eq!(
            expand([&day_after_dec_31], 2019),
            HashSet::from([date(2019, 1, 1)])
        );
    }

    #[test]
    fn expand_drops_missing_occurrences() {
        let fifth_sunday = HolidayRule::nth_weekday(Month::February, Weekday::Sun, 4);
        assert!(expand([&fifth_sunday], 2020).is_empty());
        assert!(expand(std::iter::empty(), 2020).is_empty());
    }

    #[test]
    fn expand_collapses_duplicate_dates() {
        let christmas = HolidayRule::fixed(Month::December, 25);
        let christmas_eve_after =
            HolidayRule::fixed(Month::December, 24).with_offset(HolidayOffset::DayAfter);
        assert_eq!(
            expand([&christmas, &christmas_eve_after], 2019),
            HashSet::from([date(2019, 12, 25)])
        );
    }

    #[test]
    fn rule_deserializes_with_default_offset() {
        let json = r#"{"type":"nth_weekday","month":"May","weekday":"Mon","occurrence":-1}"#;
        let rule: HolidayRule = serde_json::from_str(json).expect("valid rule");
        assert_eq!(rule, HolidayRule::last_weekday(Month::May, Weekday::Mon));
    }
}
