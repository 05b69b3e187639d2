//! Staged text simulation of a mission run.
//!
//! A run builds a brief, optionally forcing the archetype and district by
//! name, then plays four stages. Each stage rolls the archetype's focus stat
//! plus a d6 against `difficulty + stage index + (d4 - 1)`. A featured
//! ability or implant slot that stresses the same stat adds a flat bonus.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::brief::MissionBrief;
use crate::catalog::{validate_source, CatalogSource};
use crate::embedded::EmbeddedCatalog;
use crate::error::MissionError;
use crate::generator::{clock_seed, pick};

pub const DEFAULT_DIFFICULTY: i32 = 6;
pub const ABILITY_BONUS: i32 = 2;
pub const IMPLANT_BONUS: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    Stealth,
    Assault,
    Tech,
    Resilience,
}

impl std::fmt::Display for Stat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stat::Stealth => "stealth",
            Stat::Assault => "assault",
            Stat::Tech => "tech",
            Stat::Resilience => "resilience",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatProfile {
    pub stealth: i32,
    pub assault: i32,
    pub tech: i32,
    pub resilience: i32,
}

impl StatProfile {
    pub fn get(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Stealth => self.stealth,
            Stat::Assault => self.assault,
            Stat::Tech => self.tech,
            Stat::Resilience => self.resilience,
        }
    }

    /// Built-in profile for one of the shipped archetypes.
    pub fn for_archetype(name: &str) -> Option<Self> {
        let (stealth, assault, tech, resilience) = match name.to_ascii_lowercase().as_str() {
            "specter" => (9, 5, 8, 4),
            "juggernaut" => (4, 9, 5, 8),
            "tracer" => (7, 8, 5, 6),
            "synthmage" => (5, 4, 9, 7),
            _ => return None,
        };
        Some(Self {
            stealth,
            assault,
            tech,
            resilience,
        })
    }
}

/// Stat a featured ability reinforces.
pub fn ability_synergy(ability: &str) -> Option<Stat> {
    match ability {
        "EMP Burst" | "Neural Hack" => Some(Stat::Tech),
        "Overdrive" => Some(Stat::Assault),
        "Nanite Swarm" => Some(Stat::Resilience),
        _ => None,
    }
}

/// Stat an implant slot reinforces.
pub fn implant_synergy(slot: &str) -> Option<Stat> {
    match slot {
        "Cyberdeck" => Some(Stat::Tech),
        "Reflex Core" => Some(Stat::Stealth),
        "Optic Cortex" => Some(Stat::Assault),
        _ => None,
    }
}

struct StageDefinition {
    name: &'static str,
    challenge: &'static str,
    focus: Stat,
}

const STAGES: [StageDefinition; 4] = [
    StageDefinition {
        name: "Infiltration",
        challenge: "Ghost through the perimeter sensors",
        focus: Stat::Stealth,
    },
    StageDefinition {
        name: "Combat Clash",
        challenge: "Break the opposition strike team",
        focus: Stat::Assault,
    },
    StageDefinition {
        name: "Ghost Capture",
        challenge: "Stabilize the target data ghost",
        focus: Stat::Tech,
    },
    StageDefinition {
        name: "Extraction",
        challenge: "Escape the hot zone before reinforcements arrive",
        focus: Stat::Resilience,
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageResult {
    pub name: String,
    pub challenge: String,
    pub focus: Stat,
    pub roll: i32,
    pub threshold: i32,
    /// `roll >= threshold`.
    pub success: bool,
    pub narration: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionReport {
    pub brief: MissionBrief,
    pub stages: Vec<StageResult>,
    /// True only when every stage succeeded.
    pub success: bool,
    pub rewards: Vec<String>,
}

impl MissionReport {
    /// Render the outcome as a markdown section headed by the district.
    pub fn to_markdown(&self) -> String {
        let brief = &self.brief;
        let mut lines = vec![
            format!("## Mission Outcome: {}", brief.district.name),
            format!("**Archetype:** {}", brief.archetype.name),
            format!("**Opposition:** {}", brief.opposition.name),
            format!("**Primary Weapon:** {}", brief.primary_weapon.name),
            format!("**Featured Ability:** {}", brief.featured_ability.name),
            format!("**Extraction Condition:** {}", brief.extraction_condition),
            String::new(),
        ];

        for stage in &self.stages {
            let status = if stage.success { "Success" } else { "Setback" };
            lines.push(format!("### {} — {}", stage.name, status));
            lines.push(format!("*Challenge:* {}", stage.challenge));
            lines.push(format!(
                "*Roll:* {} vs difficulty {}",
                stage.roll, stage.threshold
            ));
            lines.push(stage.narration.clone());
            lines.push(String::new());
        }

        let resolution = if self.success {
            "Extraction successful"
        } else {
            "Extraction compromised"
        };
        lines.push(format!("**Result:** {resolution}."));
        lines.push("**Rewards:**".to_string());
        lines.extend(self.rewards.iter().map(|reward| format!("- {reward}")));
        lines.push(String::new());
        lines.join("\n")
    }
}

/// What to simulate. Unset names are drawn at random.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationRequest {
    pub archetype: Option<String>,
    pub district: Option<String>,
    pub difficulty: i32,
}

impl Default for SimulationRequest {
    fn default() -> Self {
        Self {
            archetype: None,
            district: None,
            difficulty: DEFAULT_DIFFICULTY,
        }
    }
}

/// Plays mission runs over a catalog source.
///
/// Seeded simulators replay identically; unseeded ones seed from the clock.
pub struct MissionSimulator<S: CatalogSource = EmbeddedCatalog> {
    source: S,
    rng: ChaCha8Rng,
}

impl Default for MissionSimulator<EmbeddedCatalog> {
    fn default() -> Self {
        Self::new(EmbeddedCatalog)
    }
}

impl<S: CatalogSource> MissionSimulator<S> {
    pub fn new(source: S) -> Self {
        Self::with_seed(source, clock_seed())
    }

    pub fn with_seed(source: S, seed: u64) -> Self {
        Self {
            source,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Run one mission.
    ///
    /// Forced names are resolved before any draw. The archetype must have a
    /// built-in stat profile.
    pub fn simulate(&mut self, request: &SimulationRequest) -> Result<MissionReport, MissionError> {
        if request.difficulty < 1 {
            tracing::warn!(difficulty = request.difficulty, "refusing to simulate");
            return Err(MissionError::InvalidDifficulty(request.difficulty));
        }
        validate_source(&self.source)?;

        let Self { source, rng } = self;
        let source = &*source;
        let forced_archetype = request
            .archetype
            .as_deref()
            .map(|name| source.archetype_by_name(name).ok_or_else(|| unknown("archetype", name)))
            .transpose()?;
        let forced_district = request
            .district
            .as_deref()
            .map(|name| source.district_by_name(name).ok_or_else(|| unknown("district", name)))
            .transpose()?;

        let archetype = forced_archetype
            .unwrap_or_else(|| pick(rng, source.archetypes()))
            .clone();
        let profile = StatProfile::for_archetype(&archetype.name)
            .ok_or_else(|| MissionError::MissingProfile(archetype.name.clone()))?;
        let district = forced_district
            .unwrap_or_else(|| pick(rng, source.districts()))
            .clone();
        let opposition = pick(rng, source.factions()).clone();
        let primary_weapon = pick(rng, source.weapons()).clone();
        let backup_implant = pick(rng, source.implants()).clone();
        let featured_ability = pick(rng, &archetype.abilities).clone();
        let complication = pick(rng, source.complications()).clone();
        let extraction_condition = pick(rng, source.extraction_conditions()).clone();

        let brief = MissionBrief {
            district,
            opposition,
            archetype,
            primary_weapon,
            backup_implant,
            featured_ability,
            complication,
            extraction_condition,
        };

        let ability_focus = ability_synergy(&brief.featured_ability.name);
        let implant_focus = implant_synergy(&brief.backup_implant.slot);
        let hazards = &brief.district.hazards;

        let mut stages = Vec::with_capacity(STAGES.len());
        for (index, stage) in STAGES.iter().enumerate() {
            let mut roll = profile.get(stage.focus) + rng.gen_range(1..=6);
            let threshold = request.difficulty + index as i32 + rng.gen_range(0..=3);

            let mut narration = vec![if hazards.is_empty() {
                format!("{}: the approach is quiet.", stage.name)
            } else {
                format!(
                    "{}: {} complicates the approach.",
                    stage.name,
                    hazards[index % hazards.len()]
                )
            }];

            if ability_focus == Some(stage.focus) {
                roll += ABILITY_BONUS;
                narration.push(format!(
                    "{} grants an edge during {}",
                    brief.featured_ability.name,
                    stage.name.to_lowercase()
                ));
            }
            if implant_focus == Some(stage.focus) {
                roll += IMPLANT_BONUS;
                narration.push(format!(
                    "{} reinforces {} protocols",
                    brief.backup_implant.name, stage.focus
                ));
            }

            let success = roll >= threshold;
            narration.push(if success {
                "The team holds momentum and presses forward.".to_string()
            } else {
                "Setbacks slow the push, burning through reserves.".to_string()
            });

            stages.push(StageResult {
                name: stage.name.to_string(),
                challenge: stage.challenge.to_string(),
                focus: stage.focus,
                roll,
                threshold,
                success,
                narration: narration.join(" "),
            });
        }

        let success = stages.iter().all(|s| s.success);
        let rewards = if success {
            vec![
                format!("Recovered schematic: {}", pick(rng, source.weapons()).name),
                format!("Prototype implant: {}", pick(rng, source.implants()).name),
            ]
        } else {
            vec![
                "Partial data cache salvaged".to_string(),
                "Requisition cost increases next drop".to_string(),
            ]
        };

        tracing::info!(
            archetype = %brief.archetype.name,
            district = %brief.district.name,
            difficulty = request.difficulty,
            success,
            "mission simulated"
        );

        Ok(MissionReport {
            brief,
            stages,
            success,
            rewards,
        })
    }
}

fn unknown(kind: &'static str, name: &str) -> MissionError {
    MissionError::UnknownName {
        kind,
        name: name.to_string(),
    }
}
