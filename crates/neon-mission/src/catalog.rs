//! Catalog record types and the source trait the generator samples from.

use serde::{Deserialize, Serialize};

use crate::error::MissionError;

/// An active or passive power that can appear on an archetype.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub cooldown_seconds: u32,
    #[serde(default)]
    pub has_cooldown: bool,
    /// Damage family tag; empty for utility abilities.
    #[serde(default)]
    pub damage_type: String,
}

/// A combat specialization available to Ascendants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Archetype {
    pub name: String,
    pub role: String,
    pub signature: String,
    pub abilities: Vec<Ability>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    pub category: String,
    pub description: String,
    pub damage_profile: String,
}

/// Cybernetic enhancement occupying one body slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Implant {
    pub name: String,
    pub slot: String,
    pub effects: Vec<String>,
}

/// Zone template. Hazards and enemy profiles are descriptive flavor only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct District {
    pub name: String,
    pub description: String,
    pub hazards: Vec<String>,
    pub enemy_profiles: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faction {
    pub name: String,
    pub philosophy: String,
    pub signature_tactics: Vec<String>,
}

/// Names the catalog tables, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Table {
    Districts,
    Factions,
    Archetypes,
    Weapons,
    Implants,
    Complications,
    ExtractionConditions,
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Table::Districts => "districts",
            Table::Factions => "factions",
            Table::Archetypes => "archetypes",
            Table::Weapons => "weapons",
            Table::Implants => "implants",
            Table::Complications => "complications",
            Table::ExtractionConditions => "extraction_conditions",
        };
        f.write_str(name)
    }
}

/// Read-only access to the catalog tables.
pub trait CatalogSource {
    fn districts(&self) -> &[District];
    fn factions(&self) -> &[Faction];
    fn archetypes(&self) -> &[Archetype];
    fn weapons(&self) -> &[Weapon];
    fn implants(&self) -> &[Implant];
    fn complications(&self) -> &[String];
    fn extraction_conditions(&self) -> &[String];

    // Name lookups ignore ASCII case.

    fn archetype_by_name(&self, name: &str) -> Option<&Archetype> {
        self.archetypes().iter().find(|a| a.name.eq_ignore_ascii_case(name))
    }

    fn weapon_by_name(&self, name: &str) -> Option<&Weapon> {
        self.weapons().iter().find(|w| w.name.eq_ignore_ascii_case(name))
    }

    fn district_by_name(&self, name: &str) -> Option<&District> {
        self.districts().iter().find(|d| d.name.eq_ignore_ascii_case(name))
    }

    fn faction_by_name(&self, name: &str) -> Option<&Faction> {
        self.factions().iter().find(|f| f.name.eq_ignore_ascii_case(name))
    }

    fn implant_by_name(&self, name: &str) -> Option<&Implant> {
        self.implants().iter().find(|i| i.name.eq_ignore_ascii_case(name))
    }

    /// First ability with this name on any archetype.
    fn ability_by_name(&self, name: &str) -> Option<&Ability> {
        self.archetypes()
            .iter()
            .flat_map(|a| a.abilities.iter())
            .find(|ability| ability.name.eq_ignore_ascii_case(name))
    }
}

impl<S: CatalogSource + ?Sized> CatalogSource for &S {
    fn districts(&self) -> &[District] {
        (**self).districts()
    }
    fn factions(&self) -> &[Faction] {
        (**self).factions()
    }
    fn archetypes(&self) -> &[Archetype] {
        (**self).archetypes()
    }
    fn weapons(&self) -> &[Weapon] {
        (**self).weapons()
    }
    fn implants(&self) -> &[Implant] {
        (**self).implants()
    }
    fn complications(&self) -> &[String] {
        (**self).complications()
    }
    fn extraction_conditions(&self) -> &[String] {
        (**self).extraction_conditions()
    }
}

/// Check that every table can be sampled: no table is empty and every
/// archetype has at least one ability. Reports the first problem found.
pub fn validate_source<S: CatalogSource + ?Sized>(source: &S) -> Result<(), MissionError> {
    let sizes = [
        (Table::Districts, source.districts().len()),
        (Table::Factions, source.factions().len()),
        (Table::Archetypes, source.archetypes().len()),
        (Table::Weapons, source.weapons().len()),
        (Table::Implants, source.implants().len()),
        (Table::Complications, source.complications().len()),
        (Table::ExtractionConditions, source.extraction_conditions().len()),
    ];
    for (table, len) in sizes {
        if len == 0 {
            return Err(MissionError::EmptyTable(table));
        }
    }

    if let Some(archetype) = source.archetypes().iter().find(|a| a.abilities.is_empty()) {
        return Err(MissionError::ArchetypeWithoutAbilities(
            archetype.name.clone(),
        ));
    }

    Ok(())
}
