use serde::{Deserialize, Serialize};

use crate::catalog::{Ability, Archetype, District, Faction, Implant, Weapon};

/// One generated mission. Every field is a copy of a catalog record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionBrief {
    pub district: District,
    pub opposition: Faction,
    pub archetype: Archetype,
    pub primary_weapon: Weapon,
    pub backup_implant: Implant,
    /// Always one of `archetype.abilities`.
    pub featured_ability: Ability,
    pub complication: String,
    pub extraction_condition: String,
}

impl MissionBrief {
    /// Render as a markdown section headed by the district.
    pub fn to_markdown(&self) -> String {
        let lines = [
            format!("### Operation: {}", self.district.name),
            format!(
                "**Opposition:** {} — {}",
                self.opposition.name, self.opposition.philosophy
            ),
            format!(
                "**Primary Archetype:** {} ({})",
                self.archetype.name, self.archetype.role
            ),
            format!(
                "**Signature Ability:** {} — {}",
                self.featured_ability.name, self.featured_ability.description
            ),
            format!(
                "**Loadout Anchor:** {} — {}",
                self.primary_weapon.name, self.primary_weapon.damage_profile
            ),
            format!(
                "**Adaptive Implant:** {} ({})",
                self.backup_implant.name, self.backup_implant.slot
            ),
            format!("**Complication:** {}", self.complication),
            format!("**Extraction Condition:** {}", self.extraction_condition),
            String::new(),
        ];
        lines.join("\n")
    }
}
