//! Seeded mission brief generation.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::brief::MissionBrief;
use crate::catalog::{validate_source, CatalogSource};
use crate::embedded::EmbeddedCatalog;
use crate::error::MissionError;

/// Draws mission briefs from a catalog source.
///
/// The same seed over the same catalog yields the same sequence of briefs.
/// An unseeded generator seeds itself from the wall clock on first use.
pub struct MissionGenerator<S: CatalogSource = EmbeddedCatalog> {
    source: S,
    rng: Option<ChaCha8Rng>,
}

impl Default for MissionGenerator<EmbeddedCatalog> {
    fn default() -> Self {
        Self::new(EmbeddedCatalog)
    }
}

impl<S: CatalogSource> MissionGenerator<S> {
    pub fn new(source: S) -> Self {
        Self { source, rng: None }
    }

    pub fn with_seed(source: S, seed: u64) -> Self {
        Self {
            source,
            rng: Some(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    /// Reset the random stream. Later draws are reproducible from `value`.
    pub fn seed(&mut self, value: u64) {
        self.rng = Some(ChaCha8Rng::seed_from_u64(value));
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Draw one brief.
    ///
    /// The catalog is checked before any draw, so a failed call leaves the
    /// random stream untouched.
    pub fn generate_brief(&mut self) -> Result<MissionBrief, MissionError> {
        if let Err(err) = validate_source(&self.source) {
            tracing::warn!(%err, "cannot generate mission brief");
            return Err(err);
        }

        // Split borrows: the rng is mutated while the tables are read.
        let Self { source, rng } = self;
        let rng = rng.get_or_insert_with(|| ChaCha8Rng::seed_from_u64(clock_seed()));

        let district = pick(rng, source.districts()).clone();
        let opposition = pick(rng, source.factions()).clone();
        let archetype = pick(rng, source.archetypes()).clone();
        let primary_weapon = pick(rng, source.weapons()).clone();
        let backup_implant = pick(rng, source.implants()).clone();
        let featured_ability = pick(rng, &archetype.abilities).clone();
        let complication = pick(rng, source.complications()).clone();
        let extraction_condition = pick(rng, source.extraction_conditions()).clone();

        tracing::trace!(
            district = %district.name,
            faction = %opposition.name,
            archetype = %archetype.name,
            ability = %featured_ability.name,
            "generated mission brief"
        );

        Ok(MissionBrief {
            district,
            opposition,
            archetype,
            primary_weapon,
            backup_implant,
            featured_ability,
            complication,
            extraction_condition,
        })
    }

    /// Draw `count` briefs in sequence. Equivalent to `count` calls of
    /// [`generate_brief`](Self::generate_brief).
    pub fn generate_briefs(&mut self, count: i32) -> Result<Vec<MissionBrief>, MissionError> {
        if count <= 0 {
            tracing::warn!(count, "refusing to generate a non-positive number of briefs");
            return Err(MissionError::InvalidCount(count));
        }
        let briefs = (0..count)
            .map(|_| self.generate_brief())
            .collect::<Result<Vec<_>, _>>()?;
        tracing::info!(count, "generated mission briefs");
        Ok(briefs)
    }
}

/// Low 32 bits of the wall-clock nanosecond count.
pub(crate) fn clock_seed() -> u64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    let seed = (nanos & 0xFFFF_FFFF) as u64;
    tracing::debug!(seed, "self-seeded from clock");
    seed
}

/// Uniform index draw. Callers guarantee `items` is non-empty.
pub(crate) fn pick<'a, T>(rng: &mut ChaCha8Rng, items: &'a [T]) -> &'a T {
    let last = items.len() - 1;
    &items[rng.gen_range(0..=last)]
}
