//! Procedural mission briefs for Neon Ascendant.
//!
//! A brief is one independent uniform draw from each catalog table
//! (district, faction, archetype, weapon, implant, complication,
//! extraction condition) plus one ability from the chosen archetype.
//! Catalogs come either from the embedded literal tables or from a
//! loaded asset file; the generator treats both the same way.
//!
//! `simulation` plays a brief out as a staged dice run and `dismemberment`
//! narrates individual weapon impacts.

pub mod asset;
pub mod brief;
pub mod catalog;
pub mod dismemberment;
pub mod embedded;
pub mod error;
pub mod generator;
pub mod simulation;

pub use asset::AssetCatalog;
pub use brief::MissionBrief;
pub use catalog::{Ability, Archetype, CatalogSource, District, Faction, Implant, Table, Weapon};
pub use embedded::EmbeddedCatalog;
pub use error::{CatalogError, MissionError};
pub use generator::MissionGenerator;
pub use simulation::{MissionReport, MissionSimulator, SimulationRequest, StageResult};
