//! Memoization of date sets that are derived once per calendar year.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use tracing::debug;

/// Date sets keyed by the year they were computed for.
#[derive(Debug, Clone, Default)]
pub struct YearCache {
    label: &'static str,
    years: HashMap<i32, HashSet<NaiveDate>>,
}

impl YearCache {
    /// Empty cache; `label` names the cached set in log output.
    #[must_use]
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            years: HashMap::new(),
        }
    }

    /// Dates for `year`, computing them with `fill` on first access.
    pub fn get_or_fill(
        &mut self,
        year: i32,
        fill: impl FnOnce(i32) -> HashSet<NaiveDate>,
    ) -> &HashSet<NaiveDate> {
        let label = self.label;
        self.years.entry(year).or_insert_with(|| {
            let dates = fill(year);
            debug!(cache = label, year, count = dates.len(), "populated year cache");
            dates
        })
    }

    /// Number of years computed so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.years.len()
    }

    /// Whether nothing has been computed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}
