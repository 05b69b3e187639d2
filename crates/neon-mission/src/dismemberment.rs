//! Limb damage resolution for narrated combat.
//!
//! An impact picks a limb weighted by the attack vector, turns the weapon's
//! momentum into a peak force over a short contact window and compares it
//! with the limb's resistance after resilience and armor damping.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::error::MissionError;
use crate::generator::clock_seed;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimbProfile {
    pub name: String,
    /// Resistance before damage, in kN.
    pub bone_strength: f64,
    /// Force past resistance needed to sever, in kN.
    pub shear_threshold: f64,
    pub mass: f64,
    pub surface_area: f64,
}

impl LimbProfile {
    fn new(name: &str, bone_strength: f64, shear_threshold: f64, mass: f64, surface_area: f64) -> Self {
        Self {
            name: name.to_string(),
            bone_strength,
            shear_threshold,
            mass,
            surface_area,
        }
    }

    /// Humanoid frame used when no custom limb table is given.
    pub fn humanoid() -> Vec<Self> {
        vec![
            Self::new("Head", 5.0, 3.2, 4.5, 0.03),
            Self::new("Torso", 8.5, 5.0, 32.0, 0.12),
            Self::new("Left Arm", 4.0, 2.8, 6.0, 0.04),
            Self::new("Right Arm", 4.0, 2.8, 6.0, 0.04),
            Self::new("Left Leg", 5.5, 3.4, 11.0, 0.06),
            Self::new("Right Leg", 5.5, 3.4, 11.0, 0.06),
        ]
    }
}

/// Ballistic properties of a weapon category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponProfile {
    pub name: &'static str,
    pub projectile_mass: f64,
    pub velocity: f64,
    pub sharpness: f64,
    pub impulse_variance: f64,
}

const MELEE: WeaponProfile = WeaponProfile {
    name: "Melee",
    projectile_mass: 2.8,
    velocity: 35.0,
    sharpness: 0.7,
    impulse_variance: 18.0,
};

impl WeaponProfile {
    /// Profile for a catalog weapon category. Unknown categories hit like melee.
    pub fn for_category(category: &str) -> Self {
        match category {
            "SMG" => WeaponProfile {
                name: "SMG",
                projectile_mass: 0.007,
                velocity: 610.0,
                sharpness: 0.5,
                impulse_variance: 12.0,
            },
            "Railgun" => WeaponProfile {
                name: "Railgun",
                projectile_mass: 0.02,
                velocity: 1500.0,
                sharpness: 0.8,
                impulse_variance: 25.0,
            },
            "Experimental" => WeaponProfile {
                name: "Experimental",
                projectile_mass: 0.05,
                velocity: 900.0,
                sharpness: 1.2,
                impulse_variance: 30.0,
            },
            _ => MELEE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackVector {
    Frontal,
    Flanking,
    Low,
    Aerial,
}

impl AttackVector {
    fn limb_weight(self, limb: &str) -> u32 {
        let (head, torso, arm, leg) = match self {
            AttackVector::Frontal => (3, 4, 1, 1),
            AttackVector::Flanking => (1, 2, 3, 1),
            AttackVector::Low => (0, 1, 1, 4),
            AttackVector::Aerial => (3, 3, 1, 1),
        };
        let weight = match limb {
            "Head" => head,
            "Torso" => torso,
            "Left Arm" | "Right Arm" => arm,
            "Left Leg" | "Right Leg" => leg,
            _ => 0,
        };
        // Every limb stays reachable.
        weight.max(1)
    }

    fn force_modifier(self) -> f64 {
        match self {
            AttackVector::Frontal => 1.0,
            AttackVector::Flanking => 0.9,
            AttackVector::Low => 0.85,
            AttackVector::Aerial => 1.1,
        }
    }

    fn describe(self) -> &'static str {
        match self {
            AttackVector::Frontal => "Frontal charge",
            AttackVector::Flanking => "Flanking sweep",
            AttackVector::Low => "Low sweep",
            AttackVector::Aerial => "Descending strike",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Intact,
    Mangled,
    Severed,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Severity::Intact => "Intact",
            Severity::Mangled => "Mangled",
            Severity::Severed => "Severed",
        };
        f.write_str(name)
    }
}

/// How explicit the narration is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Intensity {
    Sterile,
    Cinematic,
    Graphic,
}

impl Intensity {
    fn from_gore_bias(bias: f64) -> Self {
        if bias < 0.35 {
            Intensity::Sterile
        } else if bias > 0.75 {
            Intensity::Graphic
        } else {
            Intensity::Cinematic
        }
    }
}

/// One hit to resolve.
#[derive(Debug, Clone, PartialEq)]
pub struct Impact {
    pub weapon_category: String,
    pub vector: AttackVector,
    pub target_resilience: i32,
    pub armor_rating: i32,
    /// 0 narrates clinically, 1 graphically.
    pub gore_bias: f64,
    /// Extra strike speed from abilities, 25 m/s per point.
    pub bonus_force: i32,
}

impl Default for Impact {
    fn default() -> Self {
        Self {
            weapon_category: MELEE.name.to_string(),
            vector: AttackVector::Frontal,
            target_resilience: 0,
            armor_rating: 0,
            gore_bias: 0.5,
            bonus_force: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DismemberEvent {
    pub limb: String,
    pub severity: Severity,
    /// N·s
    pub impulse: f64,
    /// kN
    pub resistance: f64,
    /// Effective force minus resistance, kN.
    pub margin: f64,
    pub description: String,
}

impl DismemberEvent {
    pub fn summary(&self) -> String {
        format!(
            "{} {} (impulse {:.1} vs resistance {:.1})",
            self.severity,
            self.limb.to_lowercase(),
            self.impulse,
            self.resistance
        )
    }
}

pub struct DismembermentSystem {
    rng: ChaCha8Rng,
    limbs: Vec<LimbProfile>,
}

impl Default for DismembermentSystem {
    fn default() -> Self {
        Self::with_seed(clock_seed())
    }
}

impl DismembermentSystem {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            limbs: LimbProfile::humanoid(),
        }
    }

    /// Replace the limb table. Limbs the attack vectors don't name get weight 1.
    pub fn with_limbs(mut self, limbs: Vec<LimbProfile>) -> Result<Self, MissionError> {
        if limbs.is_empty() {
            return Err(MissionError::NoLimbs);
        }
        self.limbs = limbs;
        Ok(self)
    }

    pub fn limbs(&self) -> &[LimbProfile] {
        &self.limbs
    }

    pub fn resolve_impact(&mut self, impact: &Impact) -> DismemberEvent {
        let limb = self.select_limb(impact.vector);
        let weapon = WeaponProfile::for_category(&impact.weapon_category);

        let velocity = (weapon.velocity + f64::from(impact.bonus_force) * 25.0).max(0.0);
        let variation = self
            .rng
            .gen_range(-weapon.impulse_variance..=weapon.impulse_variance);
        let impulse =
            ((weapon.projectile_mass * velocity + variation) * impact.vector.force_modifier()).max(0.0);

        // Fast strikes have shorter contact windows; heavier limbs lengthen them.
        let base_contact = if velocity > 500.0 { 0.003 } else { 0.006 };
        let contact_time = (base_contact + limb.mass * 0.00005).max(1e-4);
        let force = impulse / contact_time;

        let damping = 1.0 + 0.08 * f64::from(impact.target_resilience.max(0));
        let absorption = 1.0 - (0.07 * f64::from(impact.armor_rating.max(0))).min(0.75);
        let effective_force = force * absorption;

        let surface_factor = 1.0 + limb.surface_area * 8.0;
        let resistance_force = limb.bone_strength * 1000.0 * damping * surface_factor;
        let sever_force = limb.shear_threshold * 1000.0 * damping * surface_factor;
        let margin_force = effective_force - resistance_force;

        let severity = if margin_force >= sever_force {
            Severity::Severed
        } else if margin_force >= -0.2 * resistance_force {
            Severity::Mangled
        } else {
            Severity::Intact
        };

        let description = describe(
            &limb.name,
            severity,
            impact.vector,
            Intensity::from_gore_bias(impact.gore_bias),
            impulse,
            resistance_force / 1000.0,
            margin_force > 0.0,
        );

        tracing::trace!(limb = %limb.name, %severity, impulse, "impact resolved");

        DismemberEvent {
            limb: limb.name,
            severity,
            impulse,
            resistance: resistance_force / 1000.0,
            margin: margin_force / 1000.0,
            description,
        }
    }

    fn select_limb(&mut self, vector: AttackVector) -> LimbProfile {
        let limbs = &self.limbs;
        match limbs.choose_weighted(&mut self.rng, |limb| vector.limb_weight(&limb.name)) {
            Ok(limb) => limb.clone(),
            // Weights are at least 1 and the table is never empty.
            Err(_) => limbs[0].clone(),
        }
    }
}

fn describe(
    limb: &str,
    severity: Severity,
    vector: AttackVector,
    intensity: Intensity,
    impulse: f64,
    resistance_kn: f64,
    momentum: bool,
) -> String {
    let lower = limb.to_lowercase();
    let outcome = match (severity, intensity) {
        (Severity::Severed, Intensity::Sterile) => {
            format!("Clean separation at the {lower}; actuators shear without spatter.")
        }
        (Severity::Severed, Intensity::Graphic) => {
            format!("{limb} detaches amid sparking implants and coolant spray.")
        }
        (Severity::Severed, Intensity::Cinematic) => {
            format!("{limb} severs as reinforced tendons snap in a pulse of ionized air.")
        }
        (Severity::Mangled, Intensity::Sterile) => {
            format!("Impact crushes structural supports, leaving the {lower} limp.")
        }
        (Severity::Mangled, Intensity::Graphic) => {
            format!("The {lower} twists, plating torn back with exposed conduits.")
        }
        (Severity::Mangled, Intensity::Cinematic) => {
            format!("Torsion fractures ripple through the {lower}, disabling it.")
        }
        (Severity::Intact, Intensity::Sterile) => {
            format!("Force disperses across armour; the {lower} stays operational.")
        }
        (Severity::Intact, Intensity::Graphic) => {
            "The strike bruises synth-flesh but fails to breach core plating.".to_string()
        }
        (Severity::Intact, Intensity::Cinematic) => {
            format!("Deflection fields flare, absorbing the blow around the {lower}.")
        }
    };
    let momentum = if momentum {
        "Momentum surges forward"
    } else {
        "Target regains stance"
    };
    format!(
        "{} hits with {impulse:.1} N·s against {resistance_kn:.1} kN. {outcome} {momentum}.",
        vector.describe()
    )
}
