//! Traits describing configuration providers and shared error types.

use crate::error::ConfigError;
use crate::model::{DateRange, GlobalScheduleConfig, MunicipalityMeta};

#[derive(thiserror::Error, Debug)]
/// Errors that can occur while building or querying schedules.
pub enum PortError {
    /// Configuration was rejected when building an engine.
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    /// The municipality has no registered plugin.
    #[error("Unsupported municipality")]
    UnsupportedMunicipality,
    /// The requested range is reversed or longer than a year.
    #[error("Invalid date range {}..={}", .0.start, .0.end)]
    InvalidRange(DateRange),
    /// Provider failed to supply its configuration.
    #[error("Provider error: {0}")]
    Provider(String),
}

/// Trait for providers that supply a municipality's collection rules.
///
/// Providers hand out already-validated configuration; where it comes from
/// is up to them.
pub trait ConfigPort: Send + Sync {
    /// Metadata describing the municipality handled by this port.
    fn municipality(&self) -> &MunicipalityMeta;

    /// Collection rules of the municipality.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the provider cannot produce its configuration.
    fn global_config(&self) -> Result<GlobalScheduleConfig, PortError>;
}

/// Provider serving a configuration held in memory.
#[derive(Debug, Clone)]
pub struct StaticConfigPort {
    meta: MunicipalityMeta,
    config: GlobalScheduleConfig,
}

impl StaticConfigPort {
    /// Serve `config` for the municipality described by `meta`.
    #[must_use]
    pub fn new(meta: MunicipalityMeta, config: GlobalScheduleConfig) -> Self {
        Self { meta, config }
    }
}

impl ConfigPort for StaticConfigPort {
    fn municipality(&self) -> &MunicipalityMeta {
        &self.meta
    }

    fn global_config(&self) -> Result<GlobalScheduleConfig, PortError> {
        Ok(self.config.clone())
    }
}
