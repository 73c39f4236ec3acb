//! High-level service facade combining all municipalities.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::instrument;

use crate::engine::ScheduleEngine;
use crate::model::{
    DateRange, HouseholdScheduleConfig, MunicipalityId, PickupEvent, ScheduleResult,
};
use crate::plugin::MunicipalityRegistry;
use crate::ports::PortError;

/// Public entry point for collection-day queries.
///
/// Every call builds its own [`ScheduleEngine`], so the service can be shared
/// freely between threads.
pub struct BindayService {
    registry: Arc<MunicipalityRegistry>,
}

impl BindayService {
    /// Create a new service bound to the provided registry.
    #[must_use]
    pub fn new(registry: Arc<MunicipalityRegistry>) -> Self {
        Self { registry }
    }

    /// List all available municipalities and their display names.
    #[must_use]
    pub fn municipalities(&self) -> Vec<(MunicipalityId, String)> {
        self.registry
            .municipalities()
            .into_iter()
            .map(|meta| (meta.id, meta.name))
            .collect()
    }

    /// Build an engine for a household of the given municipality.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] if the municipality is unsupported, its provider
    /// fails, or the configuration is rejected.
    pub fn engine_for(
        &self,
        municipality: &MunicipalityId,
        household: HouseholdScheduleConfig,
    ) -> Result<ScheduleEngine, PortError> {
        let plugin = self.registry.plugin(municipality)?;
        let global = plugin.config_port.global_config()?;
        Ok(ScheduleEngine::new(global, household)?)
    }

    /// Collection summary for a single day.
    ///
    /// # Errors
    ///
    /// Same as [`BindayService::engine_for`].
    #[instrument(skip_all, fields(%municipality, %date))]
    pub fn day_for(
        &self,
        municipality: &MunicipalityId,
        household: HouseholdScheduleConfig,
        date: NaiveDate,
    ) -> Result<ScheduleResult, PortError> {
        let mut engine = self.engine_for(municipality, household)?;
        Ok(engine.compute(date))
    }

    /// Pickups for a household within a date range.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] if the engine cannot be built or the range is
    /// reversed or longer than a year.
    #[instrument(skip_all, fields(%municipality, start = %range.start, end = %range.end))]
    pub fn schedule_for(
        &self,
        municipality: &MunicipalityId,
        household: HouseholdScheduleConfig,
        range: DateRange,
    ) -> Result<Vec<PickupEvent>, PortError> {
        let mut engine = self.engine_for(municipality, household)?;
        engine.pickups(range)
    }
}
