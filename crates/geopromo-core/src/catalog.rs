use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::geo::Zone;
use crate::offers::Offer;
use crate::ConfigError;

/// Static zone and offer reference data for a session.
///
/// Zone order is significant: it is the tie-break order used when a
/// coordinate falls inside more than one zone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub zones: Vec<Zone>,
    #[serde(default)]
    pub offers: Vec<Offer>,
}

impl Catalog {
    #[must_use]
    pub fn zone(&self, id: &str) -> Option<&Zone> {
        self.zones.iter().find(|z| z.id == id)
    }

    #[must_use]
    pub fn offer(&self, id: &str) -> Option<&Offer> {
        self.offers.iter().find(|o| o.id == id)
    }
}

/// Load and validate a zone/offer catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_catalog(path: &Path) -> Result<Catalog, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_catalog(&content)
}

/// Parse and validate a catalog from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the text is not a valid catalog document or fails validation.
pub fn parse_catalog(content: &str) -> Result<Catalog, ConfigError> {
    let catalog: Catalog = serde_yaml::from_str(content)?;
    validate_catalog(&catalog)?;
    Ok(catalog)
}

fn validate_catalog(catalog: &Catalog) -> Result<(), ConfigError> {
    let mut zone_ids = HashSet::new();

    for zone in &catalog.zones {
        if zone.id.trim().is_empty() {
            return Err(ConfigError::Validation(
                "zone id must be non-empty".to_string(),
            ));
        }

        if zone.name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "zone '{}' must have a non-empty name",
                zone.id
            )));
        }

        if let Some(reason) = zone.bounds.invalid_reason() {
            return Err(ConfigError::Validation(format!(
                "zone '{}' has invalid bounds: {reason}",
                zone.id
            )));
        }

        if !zone_ids.insert(zone.id.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate zone id: '{}'",
                zone.id
            )));
        }
    }

    let mut offer_ids = HashSet::new();

    for offer in &catalog.offers {
        if offer.id.trim().is_empty() {
            return Err(ConfigError::Validation(
                "offer id must be non-empty".to_string(),
            ));
        }

        if !offer_ids.insert(offer.id.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate offer id: '{}'",
                offer.id
            )));
        }

        if !zone_ids.contains(offer.zone_id.as_str()) {
            return Err(ConfigError::Validation(format!(
                "offer '{}' references unknown zone '{}'",
                offer.id, offer.zone_id
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
