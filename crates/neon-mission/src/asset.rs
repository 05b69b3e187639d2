//! Owned catalog loaded from a JSON asset document.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::{
    validate_source, Archetype, CatalogSource, District, Faction, Implant, Weapon,
};
use crate::error::{CatalogError, MissionError};

/// Catalog tables keyed by asset type, as stored on disk.
///
/// ```json
/// { "districts": [...], "factions": [...], "archetypes": [...],
///   "weapons": [...], "implants": [...],
///   "complications": ["..."], "extraction_conditions": ["..."] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetCatalog {
    #[serde(default)]
    pub districts: Vec<District>,
    #[serde(default)]
    pub factions: Vec<Faction>,
    #[serde(default)]
    pub archetypes: Vec<Archetype>,
    #[serde(default)]
    pub weapons: Vec<Weapon>,
    #[serde(default)]
    pub implants: Vec<Implant>,
    #[serde(default)]
    pub complications: Vec<String>,
    #[serde(default)]
    pub extraction_conditions: Vec<String>,
}

impl AssetCatalog {
    /// Parse and validate a catalog document.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let catalog: AssetCatalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Read, parse and validate a catalog file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json_str(&json)?;
        tracing::debug!(
            path = %path.display(),
            archetypes = catalog.archetypes.len(),
            districts = catalog.districts.len(),
            "loaded mission catalog"
        );
        Ok(catalog)
    }

    /// Owned snapshot of any catalog source.
    pub fn from_source<S: CatalogSource + ?Sized>(source: &S) -> Self {
        Self {
            districts: source.districts().to_vec(),
            factions: source.factions().to_vec(),
            archetypes: source.archetypes().to_vec(),
            weapons: source.weapons().to_vec(),
            implants: source.implants().to_vec(),
            complications: source.complications().to_vec(),
            extraction_conditions: source.extraction_conditions().to_vec(),
        }
    }

    pub fn to_json(&self) -> Result<String, CatalogError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), MissionError> {
        validate_source(self)
    }
}

impl CatalogSource for AssetCatalog {
    fn districts(&self) -> &[District] {
        &self.districts
    }
    fn factions(&self) -> &[Faction] {
        &self.factions
    }
    fn archetypes(&self) -> &[Archetype] {
        &self.archetypes
    }
    fn weapons(&self) -> &[Weapon] {
        &self.weapons
    }
    fn implants(&self) -> &[Implant] {
        &self.implants
    }
    fn complications(&self) -> &[String] {
        &self.complications
    }
    fn extraction_conditions(&self) -> &[String] {
        &self.extraction_conditions
    }
}
