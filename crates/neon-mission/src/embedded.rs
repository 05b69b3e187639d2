//! Built-in catalog tables.
//!
//! Built once on first access and shared read-only by every generator.

use std::sync::OnceLock;

use crate::catalog::{Ability, Archetype, CatalogSource, District, Faction, Implant, Weapon};

struct Tables {
    districts: Vec<District>,
    factions: Vec<Faction>,
    archetypes: Vec<Archetype>,
    weapons: Vec<Weapon>,
    implants: Vec<Implant>,
    complications: Vec<String>,
    extraction_conditions: Vec<String>,
}

static TABLES: OnceLock<Tables> = OnceLock::new();

fn tables() -> &'static Tables {
    TABLES.get_or_init(build_tables)
}

/// Handle to the embedded literal catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedCatalog;

impl CatalogSource for EmbeddedCatalog {
    fn districts(&self) -> &[District] {
        &tables().districts
    }
    fn factions(&self) -> &[Faction] {
        &tables().factions
    }
    fn archetypes(&self) -> &[Archetype] {
        &tables().archetypes
    }
    fn weapons(&self) -> &[Weapon] {
        &tables().weapons
    }
    fn implants(&self) -> &[Implant] {
        &tables().implants
    }
    fn complications(&self) -> &[String] {
        &tables().complications
    }
    fn extraction_conditions(&self) -> &[String] {
        &tables().extraction_conditions
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn ability(name: &str, description: &str, cooldown: u32, damage_type: &str) -> Ability {
    Ability {
        name: name.into(),
        description: description.into(),
        cooldown_seconds: cooldown,
        has_cooldown: true,
        damage_type: damage_type.into(),
    }
}

fn archetype(name: &str, role: &str, signature: &str, abilities: Vec<Ability>) -> Archetype {
    Archetype {
        name: name.into(),
        role: role.into(),
        signature: signature.into(),
        abilities,
    }
}

fn weapon(name: &str, category: &str, description: &str, damage_profile: &str) -> Weapon {
    Weapon {
        name: name.into(),
        category: category.into(),
        description: description.into(),
        damage_profile: damage_profile.into(),
    }
}

fn implant(name: &str, slot: &str, effects: &[&str]) -> Implant {
    Implant {
        name: name.into(),
        slot: slot.into(),
        effects: strings(effects),
    }
}

fn district(name: &str, description: &str, hazards: &[&str], enemy_profiles: &[&str]) -> District {
    District {
        name: name.into(),
        description: description.into(),
        hazards: strings(hazards),
        enemy_profiles: strings(enemy_profiles),
    }
}

fn faction(name: &str, philosophy: &str, tactics: &[&str]) -> Faction {
    Faction {
        name: name.into(),
        philosophy: philosophy.into(),
        signature_tactics: strings(tactics),
    }
}

fn build_tables() -> Tables {
    let emp_burst = ability(
        "EMP Burst",
        "Detonates an electromagnetic pulse that disables shields and drones",
        18,
        "electric",
    );
    let neural_hack = ability(
        "Neural Hack",
        "Hijacks a target's firmware, forcing temporary allegiance",
        24,
        "cyber",
    );
    let nanite_swarm = ability(
        "Nanite Swarm",
        "Deploys repair nanites that devour enemies while mending armor",
        30,
        "nanotech",
    );
    let overdrive = ability(
        "Overdrive",
        "Initiates bullet time and boosts reaction throughput",
        60,
        "",
    );

    let archetypes = vec![
        archetype(
            "Specter",
            "Stealth infiltrator",
            "Adaptive camouflage and ghosting protocols",
            vec![emp_burst.clone(), neural_hack.clone()],
        ),
        archetype(
            "Juggernaut",
            "Front-line tank",
            "Exosuit plating with hydraulic melee amplifiers",
            vec![emp_burst.clone(), nanite_swarm.clone()],
        ),
        archetype(
            "Tracer",
            "Hyper-mobile skirmisher",
            "Reflex accelerators and kinetic boosters",
            vec![overdrive, emp_burst],
        ),
        archetype(
            "Synthmage",
            "Battlefield control",
            "Nanite constructs and viral warfare",
            vec![neural_hack, nanite_swarm],
        ),
    ];

    let weapons = vec![
        weapon(
            "Pulsecaster SMG",
            "SMG",
            "High rate-of-fire smg with conductive rounds",
            "Rapid electrical bursts with chaining potential",
        ),
        weapon(
            "Helix Rail Rifle",
            "Railgun",
            "Mag-accelerated rifle built for surgical strikes",
            "Piercing kinetic slug with armor shredding",
        ),
        weapon(
            "Singularity Projector",
            "Experimental",
            "Prototype weapon that collapses localized gravity wells",
            "Area denial with escalating implosion damage",
        ),
    ];

    let implants = vec![
        implant(
            "Cyberdeck Mk.IV",
            "Cyberdeck",
            &["+25% hack success", "Unlocks ghost grid reconnaissance overlay"],
        ),
        implant(
            "Reflex Core X",
            "Reflex Core",
            &["+15% movement speed", "Stacking evasion when chaining eliminations"],
        ),
        implant(
            "Optic Cortex Prism",
            "Optic Cortex",
            &["Highlights data ghost signatures", "Increases weak point critical damage"],
        ),
    ];

    let districts = vec![
        district(
            "Neon Abyss",
            "Gutter-level sprawl carved by gang warfare and neon smog",
            &["Toxic runoff", "Rolling brownouts", "Ambush choke points"],
            &["Lightly armored gangers", "Black market drones"],
        ),
        district(
            "Spire District",
            "Corporate citadel patrolled by Helix Corp security",
            &["Persistent surveillance", "Shielded turret nests"],
            &["Powered exosuits", "Security mechs"],
        ),
        district(
            "Ghost Grid",
            "Digital-physical overlap where data ghosts manifest",
            &["Reality drift", "Rogue AI anomalies"],
            &["Spectral constructs", "Hijacked sentry bots"],
        ),
    ];

    let factions = vec![
        faction(
            "Helix Corp",
            "Bio-digital ascension through proprietary consciousness loops",
            &["Deploys gene-modded operatives", "Controls orbital overwatch"],
        ),
        faction(
            "Vanta Syndicate",
            "Profit through clandestine memory trading and assassinations",
            &["Optic camouflage strike teams", "Backdoor market manipulation"],
        ),
        faction(
            "Dawnbreakers",
            "Liberate AI to birth post-human divinity",
            &["Swarm hacking", "Cybernetic zealots with martyr protocols"],
        ),
    ];

    let complications = strings(&[
        "Ghost Grid instabilities cause random HUD distortion",
        "Helix orbital overwatch sweeps disrupt cloak cycles",
        "Dawnbreaker converts attempt to hack your cyberdeck mid-fight",
        "Rival Ascendant strike team is pursuing the same data ghost",
    ]);

    let extraction_conditions = strings(&[
        "Secure a clean uplink and survive the counter-hack timer",
        "Evacuate via hijacked mag-lev within 90 seconds of objective completion",
        "Carry data-core physically to an Ascendant drop pod",
        "Maintain over 50% armor integrity for premium rewards",
    ]);

    Tables {
        districts,
        factions,
        archetypes,
        weapons,
        implants,
        complications,
        extraction_conditions,
    }
}
