//! The collection-day decision function.

use std::num::NonZeroUsize;

use chrono::{Datelike, NaiveDate, Weekday};
use tracing::debug;

use crate::cache::YearCache;
use crate::error::{ConfigError, RotationCategory};
use crate::holiday;
use crate::leap;
use crate::model::{
    DateRange, GlobalScheduleConfig, HouseholdScheduleConfig, PickupEvent, ScheduleResult,
    WasteStream,
};
use crate::ports::PortError;
use crate::rotation::{self, WeekRotationIndexer};

const BULK_LOOKBACK_DAYS: u64 = 6;

/// Answers whether garbage, recycling and bulk items are collected on a date
/// for one household.
///
/// Holiday and leap-forward dates are expanded lazily per calendar year and
/// cached inside the engine, which is why queries take `&mut self`. Share the
/// configuration, not the engine, between threads.
#[derive(Debug, Clone)]
pub struct ScheduleEngine {
    global: GlobalScheduleConfig,
    household: HouseholdScheduleConfig,
    reset_weekday: Weekday,
    rotation_start: NaiveDate,
    rotation_anchor: NaiveDate,
    holiday_dates: YearCache,
    leap_days: YearCache,
}

impl ScheduleEngine {
    /// Validate both configurations and build an engine for them.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the reset weekday or rotation start is
    /// missing, or when a rotation of two or more labels does not contain the
    /// household's slot.
    pub fn new(
        global: GlobalScheduleConfig,
        household: HouseholdScheduleConfig,
    ) -> Result<Self, ConfigError> {
        let reset_weekday = global
            .reset_weekday
            .ok_or(ConfigError::MissingResetWeekday)?;
        let rotation_start = global
            .rotation_start
            .ok_or(ConfigError::MissingRotationStart)?;

        check_slot(
            RotationCategory::Garbage,
            &global.garbage_rotation,
            household.garbage_slot.as_deref(),
        )?;
        check_slot(
            RotationCategory::Recycling,
            &global.recycling_rotation,
            household.recycling_slot.as_deref(),
        )?;

        let rotation_anchor = rotation::anchor_on_or_before(rotation_start, reset_weekday);
        debug!(
            %reset_weekday,
            %rotation_start,
            %rotation_anchor,
            collection_weekday = %household.collection_weekday,
            "built schedule engine"
        );

        Ok(Self {
            global,
            household,
            reset_weekday,
            rotation_start,
            rotation_anchor,
            holiday_dates: YearCache::new("holidays"),
            leap_days: YearCache::new("leap_days"),
        })
    }

    /// Municipality configuration the engine was built from.
    #[must_use]
    pub fn global(&self) -> &GlobalScheduleConfig {
        &self.global
    }

    /// Household configuration the engine was built from.
    #[must_use]
    pub fn household(&self) -> &HouseholdScheduleConfig {
        &self.household
    }

    /// Reset weekday on or before the rotation start; week slots count from here.
    #[must_use]
    pub fn rotation_anchor(&self) -> NaiveDate {
        self.rotation_anchor
    }

    /// Collection summary for `date`.
    pub fn compute(&mut self, date: NaiveDate) -> ScheduleResult {
        let expected = if self.is_leap_forward(date) {
            self.household.collection_weekday.succ()
        } else {
            self.household.collection_weekday
        };
        let day_of_week_match = !self.is_holiday(date) && date.weekday() == expected;

        let garbage_day = self.global.garbage_enabled
            && day_of_week_match
            && self.is_users_week(
                date,
                &self.global.garbage_rotation,
                self.household.garbage_slot.as_deref(),
            );
        let recycling_day = self.global.recycling_enabled
            && day_of_week_match
            && self.is_users_week(
                date,
                &self.global.recycling_rotation,
                self.household.recycling_slot.as_deref(),
            );
        // bulk pickup ignores both enable flags
        let bulk_day = day_of_week_match && self.is_bulk_week(date);

        ScheduleResult {
            date,
            garbage_day,
            recycling_day,
            bulk_day,
        }
    }

    /// Collection summaries for every day of `range`.
    ///
    /// # Errors
    ///
    /// Returns [`PortError::InvalidRange`] when `range` ends before it starts
    /// or spans more than [`DateRange::MAX_DAYS`].
    pub fn compute_range(&mut self, range: DateRange) -> Result<Vec<ScheduleResult>, PortError> {
        match range.days() {
            Some(days) if days <= DateRange::MAX_DAYS => {}
            _ => return Err(PortError::InvalidRange(range)),
        }
        Ok(range.iter().map(|date| self.compute(date)).collect())
    }

    /// Pickups within `range`, ordered by date and then stream.
    ///
    /// # Errors
    ///
    /// Same as [`ScheduleEngine::compute_range`].
    pub fn pickups(&mut self, range: DateRange) -> Result<Vec<PickupEvent>, PortError> {
        let results = self.compute_range(range)?;
        Ok(results
            .iter()
            .flat_map(|result| {
                WasteStream::ALL
                    .into_iter()
                    .filter(move |stream| result.collects(*stream))
                    .map(move |stream| PickupEvent {
                        date: result.date,
                        stream,
                    })
            })
            .collect())
    }

    /// First date on or after `from`, within a year, on which `stream` is collected.
    pub fn next_pickup(&mut self, from: NaiveDate, stream: WasteStream) -> Option<NaiveDate> {
        let horizon = usize::try_from(DateRange::MAX_DAYS).unwrap_or(usize::MAX);
        from.iter_days()
            .take(horizon)
            .find(|date| self.compute(*date).collects(stream))
    }

    /// Whether `date` is a holiday of either kind.
    pub fn is_holiday(&mut self, date: NaiveDate) -> bool {
        let global = &self.global;
        self.holiday_dates
            .get_or_fill(date.year(), |year| {
                let mut dates = holiday::expand(&global.holidays, year);
                dates.extend(holiday::expand(&global.leap_holidays, year));
                dates
            })
            .contains(&date)
    }

    /// Whether collection on `date` is shifted one weekday later.
    pub fn is_leap_forward(&mut self, date: NaiveDate) -> bool {
        let global = &self.global;
        let reset = self.reset_weekday;
        self.leap_days
            .get_or_fill(date.year(), |year| {
                leap::leap_forward_days(&holiday::expand(&global.leap_holidays, year), reset)
            })
            .contains(&date)
    }

    fn is_users_week(&self, date: NaiveDate, labels: &[String], slot: Option<&str>) -> bool {
        if date < self.rotation_start {
            return true;
        }
        let Some(length) = NonZeroUsize::new(labels.len()).filter(|len| len.get() > 1) else {
            return true;
        };
        let index = WeekRotationIndexer::new(self.rotation_anchor, length).index_of(date);
        labels.get(index).map(String::as_str) == slot
    }

    fn is_bulk_week(&self, date: NaiveDate) -> bool {
        let anchors = &self.global.bulk_week_anchors;
        !anchors.is_empty()
            && (0..=BULK_LOOKBACK_DAYS)
                .filter_map(|back| date.checked_sub_days(chrono::Days::new(back)))
                .any(|day| anchors.contains(&day))
    }
}

fn check_slot(
    category: RotationCategory,
    labels: &[String],
    slot: Option<&str>,
) -> Result<(), ConfigError> {
    if labels.len() <= 1
        || slot.is_some_and(|assigned| labels.iter().any(|label| label == assigned))
    {
        return Ok(());
    }
    Err(ConfigError::SlotNotInRotation {
        category,
        slot: slot.map(str::to_owned),
        labels: labels.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use chrono::Month;

    use super::*;
    use crate::holiday::HolidayRule;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
    }

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| (*name).to_owned()).collect()
    }

    fn memorial_day() -> HolidayRule {
        HolidayRule::last_weekday(Month::May, Weekday::Mon)
    }

    fn global() -> GlobalScheduleConfig {
        GlobalScheduleConfig {
            reset_weekday: Some(Weekday::Sun),
            rotation_start: Some(date(2019, 5, 1)),
            garbage_enabled: true,
            recycling_enabled: true,
            recycling_rotation: labels(&["A", "B"]),
            leap_holidays: HashSet::from([memorial_day()]),
            ..GlobalScheduleConfig::default()
        }
    }

    fn thursday(recycling: &str) -> HouseholdScheduleConfig {
        HouseholdScheduleConfig::weekly(Weekday::Thu).with_slots(None::<String>, Some(recycling))
    }

    fn flags(result: ScheduleResult) -> (bool, bool, bool) {
        (result.garbage_day, result.recycling_day, result.bulk_day)
    }

    #[test]
    fn missing_reset_weekday_is_rejected() {
        let config = GlobalScheduleConfig {
            reset_weekday: None,
            ..global()
        };
        let err = ScheduleEngine::new(config, thursday("A")).expect_err("must fail");
        assert_eq!(err, ConfigError::MissingResetWeekday);
    }

    #[test]
    fn missing_rotation_start_is_rejected() {
        let config = GlobalScheduleConfig {
            rotation_start: None,
            ..global()
        };
        let err = ScheduleEngine::new(config, thursday("A")).expect_err("must fail");
        assert_eq!(err, ConfigError::MissingRotationStart);
    }

    #[test]
    fn unknown_slot_is_rejected() {
        let err = ScheduleEngine::new(global(), thursday("C")).expect_err("must fail");
        assert!(matches!(
            err,
            ConfigError::SlotNotInRotation {
                category: RotationCategory::Recycling,
                ..
            }
        ));

        let no_slot = HouseholdScheduleConfig::weekly(Weekday::Thu);
        assert!(ScheduleEngine::new(global(), no_slot).is_err());
    }

    #[test]
    fn single_label_rotation_needs_no_slot() {
        let config = GlobalScheduleConfig {
            garbage_rotation: labels(&["every week"]),
            recycling_rotation: Vec::new(),
            ..global()
        };
        let engine = ScheduleEngine::new(config, HouseholdScheduleConfig::weekly(Weekday::Thu));
        assert!(engine.is_ok());
    }

    #[test]
    fn shifted_collection_inside_leap_window() {
        let mut engine = ScheduleEngine::new(global(), thursday("A")).expect("valid config");
        assert_eq!(flags(engine.compute(date(2019, 5, 31))), (true, true, false));
        assert_eq!(flags(engine.compute(date(2019, 5, 30))), (false, false, false));
    }

    #[test]
    fn ordinary_weeks_follow_rotation() {
        let mut engine = ScheduleEngine::new(global(), thursday("A")).expect("valid config");
        assert_eq!(flags(engine.compute(date(2019, 5, 16))), (true, true, false));
        assert_eq!(flags(engine.compute(date(2019, 5, 23))), (true, false, false));
        assert_eq!(flags(engine.compute(date(2019, 5, 22))), (false, false, false));
    }

    #[test]
    fn holiday_cancels_every_weekday() {
        for weekday in [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ] {
            let household =
                HouseholdScheduleConfig::weekly(weekday).with_slots(None::<String>, Some("A"));
            let mut engine = ScheduleEngine::new(global(), household).expect("valid config");
            assert!(!engine.compute(date(2019, 5, 27)).any());
        }
    }

    #[test]
    fn reset_day_ends_the_leap_window() {
        let household = HouseholdScheduleConfig::weekly(Weekday::Sun)
            .with_slots(None::<String>, Some("B"));
        let mut engine = ScheduleEngine::new(global(), household).expect("valid config");
        assert_eq!(flags(engine.compute(date(2019, 6, 2))), (true, true, false));
    }

    #[test]
    fn dates_before_start_ignore_rotation() {
        for slot in ["A", "B"] {
            let household = HouseholdScheduleConfig::weekly(Weekday::Tue)
                .with_slots(None::<String>, Some(slot));
            let mut engine = ScheduleEngine::new(global(), household).expect("valid config");
            assert_eq!(flags(engine.compute(date(2019, 4, 30))), (true, true, false));
        }
    }

    #[test]
    fn disabled_streams_are_never_collected() {
        let config = GlobalScheduleConfig {
            garbage_enabled: false,
            recycling_rotation: Vec::new(),
            ..global()
        };
        let mut engine = ScheduleEngine::new(config, HouseholdScheduleConfig::weekly(Weekday::Thu))
            .expect("valid config");
        assert_eq!(flags(engine.compute(date(2019, 5, 16))), (false, true, false));
    }

    #[test]
    fn bulk_week_counts_six_days_back() {
        let config = GlobalScheduleConfig {
            rotation_start: Some(date(2019, 1, 1)),
            garbage_enabled: false,
            recycling_enabled: false,
            recycling_rotation: Vec::new(),
            leap_holidays: HashSet::new(),
            bulk_week_anchors: HashSet::from([date(2019, 4, 8), date(2019, 9, 16)]),
            ..global()
        };

        let mut monday =
            ScheduleEngine::new(config.clone(), HouseholdScheduleConfig::weekly(Weekday::Mon))
                .expect("valid config");
        assert!(!monday.compute(date(2019, 4, 1)).bulk_day);
        assert_eq!(flags(monday.compute(date(2019, 4, 8))), (false, false, true));
        assert!(!monday.compute(date(2019, 4, 15)).bulk_day);

        let mut sunday = ScheduleEngine::new(config, HouseholdScheduleConfig::weekly(Weekday::Sun))
            .expect("valid config");
        assert!(!sunday.compute(date(2019, 4, 7)).bulk_day);
        assert!(sunday.compute(date(2019, 4, 14)).bulk_day);
        assert!(!sunday.compute(date(2019, 4, 21)).bulk_day);
    }

    #[test]
    fn leap_window_stays_with_trigger_year() {
        // Monday 2018-12-31 only shifts days of 2018
        let new_years_eve = HolidayRule::fixed(Month::December, 31);
        let config = GlobalScheduleConfig {
            leap_holidays: HashSet::from([new_years_eve]),
            recycling_rotation: Vec::new(),
            ..global()
        };
        let mut engine = ScheduleEngine::new(config, HouseholdScheduleConfig::weekly(Weekday::Wed))
            .expect("valid config");
        assert!(!engine.is_leap_forward(date(2019, 1, 2)));
        assert!(engine.compute(date(2019, 1, 2)).garbage_day);
        assert!(!engine.compute(date(2019, 1, 3)).garbage_day);
    }

    #[test]
    fn leap_holiday_on_reset_day_shifts_nothing() {
        // Christmas 2022 is a Sunday
        let christmas = HolidayRule::fixed(Month::December, 25);
        let config = GlobalScheduleConfig {
            leap_holidays: HashSet::from([christmas]),
            recycling_rotation: Vec::new(),
            ..global()
        };
        let mut engine = ScheduleEngine::new(config, HouseholdScheduleConfig::weekly(Weekday::Wed))
            .expect("valid config");
        assert!(!engine.compute(date(2022, 12, 25)).garbage_day);
        assert!(!engine.is_leap_forward(date(2022, 12, 28)));
        assert!(engine.compute(date(2022, 12, 28)).garbage_day);
        assert!(!engine.compute(date(2022, 12, 29)).garbage_day);
    }

    #[test]
    fn pickups_list_each_stream() {
        let mut engine = ScheduleEngine::new(global(), thursday("A")).expect("valid config");
        let range = DateRange {
            start: date(2019, 5, 13),
            end: date(2019, 5, 26),
        };
        let pickups = engine.pickups(range).expect("valid range");
        assert_eq!(
            pickups,
            vec![
                PickupEvent {
                    date: date(2019, 5, 16),
                    stream: WasteStream::Garbage,
                },
                PickupEvent {
                    date: date(2019, 5, 16),
                    stream: WasteStream::Recycling,
                },
                PickupEvent {
                    date: date(2019, 5, 23),
                    stream: WasteStream::Garbage,
                },
            ]
        );
    }

    #[test]
    fn compute_range_rejects_bad_ranges() {
        let mut engine = ScheduleEngine::new(global(), thursday("A")).expect("valid config");
        let reversed = DateRange {
            start: date(2019, 5, 2),
            end: date(2019, 5, 1),
        };
        assert!(matches!(
            engine.compute_range(reversed),
            Err(PortError::InvalidRange(_))
        ));

        let too_long = DateRange {
            start: date(2019, 1, 1),
            end: date(2020, 1, 2),
        };
        assert!(engine.compute_range(too_long).is_err());

        let full_leap_year = DateRange {
            start: date(2020, 1, 1),
            end: date(2020, 12, 31),
        };
        assert_eq!(engine.compute_range(full_leap_year).map(|days| days.len()).ok(), Some(366));
    }

    #[test]
    fn next_pickup_skips_off_weeks() {
        let mut engine = ScheduleEngine::new(global(), thursday("A")).expect("valid config");
        assert_eq!(
            engine.next_pickup(date(2019, 5, 17), WasteStream::Recycling),
            Some(date(2019, 5, 31))
        );
        assert_eq!(
            engine.next_pickup(date(2019, 5, 17), WasteStream::Garbage),
            Some(date(2019, 5, 23))
        );
        assert_eq!(engine.next_pickup(date(2019, 5, 17), WasteStream::Bulk), None);
    }
}
