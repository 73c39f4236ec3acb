//! Registry for all municipality plugins and their configuration ports.

use std::collections::HashMap;
use std::sync::Arc;

use crate::model::{MunicipalityId, MunicipalityMeta};
use crate::ports::{ConfigPort, PortError};

/// A municipality and the port supplying its collection rules.
pub struct MunicipalityPlugin {
    /// Static metadata describing the municipality.
    pub meta: MunicipalityMeta,
    /// Provider of the municipality's configuration.
    pub config_port: Arc<dyn ConfigPort>,
}

impl MunicipalityPlugin {
    /// Bundle a port with the metadata it reports.
    #[must_use]
    pub fn new(config_port: Arc<dyn ConfigPort>) -> Self {
        Self {
            meta: config_port.municipality().clone(),
            config_port,
        }
    }
}

/// Registry that resolves plugins by municipality identifier.
pub struct MunicipalityRegistry {
    plugins: HashMap<MunicipalityId, MunicipalityPlugin>,
}

impl MunicipalityRegistry {
    /// Build a registry from the provided plugin list.
    #[must_use]
    pub fn new(plugins: Vec<MunicipalityPlugin>) -> Self {
        let plugins_map = plugins
            .into_iter()
            .map(|plugin| (plugin.meta.id.clone(), plugin))
            .collect();
        Self {
            plugins: plugins_map,
        }
    }

    /// Return metadata for all registered municipalities.
    #[must_use]
    pub fn municipalities(&self) -> Vec<MunicipalityMeta> {
        self.plugins
            .values()
            .map(|plugin| plugin.meta.clone())
            .collect()
    }

    /// Look up a plugin for the given municipality.
    ///
    /// # Errors
    ///
    /// Returns [`PortError::UnsupportedMunicipality`] when no plugin is registered.
    pub fn plugin(&self, municipality: &MunicipalityId) -> Result<&MunicipalityPlugin, PortError> {
        self.plugins
            .get(municipality)
            .ok_or(PortError::UnsupportedMunicipality)
    }
}
