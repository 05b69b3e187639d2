//! Mission generation and catalog loading errors.

use std::path::PathBuf;

use crate::catalog::Table;

/// Precondition failures reported by the generator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MissionError {
    #[error("brief count must be positive, got {0}")]
    InvalidCount(i32),

    #[error("catalog table '{0}' is empty")]
    EmptyTable(Table),

    #[error("archetype '{0}' has no abilities")]
    ArchetypeWithoutAbilities(String),

    #[error("difficulty must be at least 1, got {0}")]
    InvalidDifficulty(i32),

    #[error("unknown {kind}: {name}")]
    UnknownName { kind: &'static str, name: String },

    #[error("no stat profile defined for archetype '{0}'")]
    MissingProfile(String),

    #[error("limb table is empty")]
    NoLimbs,
}

/// Failures loading an asset catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid catalog: {0}")]
    Invalid(#[from] MissionError),
}
