//! Built-in sample skills.
//!
//! A small Black Mage kit for illustration; not a live data feed.

use phf::phf_map;

use crate::skills::{AbilitySkill, GcdSkill, Skill, SkillId, SkillInfo};

/// How a catalog entry is gated
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Recast {
    Gcd { base_secs: f64 },
    Ability { recast_secs: f64, max_charges: u32 },
}

/// Static description of one catalog skill
#[derive(Debug, Clone, Copy)]
pub struct SkillData {
    pub name: &'static str,
    pub cast_time: f64,
    pub potency: u32,
    pub recast: Recast,
    pub description: &'static str,
}

impl SkillData {
    const fn gcd(
        name: &'static str,
        cast_time: f64,
        potency: u32,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            cast_time,
            potency,
            recast: Recast::Gcd { base_secs: 2.5 },
            description,
        }
    }

    const fn ability(name: &'static str, recast_secs: f64, description: &'static str) -> Self {
        Self {
            name,
            cast_time: 0.0,
            potency: 0,
            recast: Recast::Ability {
                recast_secs,
                max_charges: 1,
            },
            description,
        }
    }

    fn info(&self, id: u32) -> SkillInfo {
        SkillInfo::new(self.name, id)
            .with_cast_time(self.cast_time)
            .with_potency(self.potency)
            .with_description(self.description)
    }

    /// Build a fresh skill with default cooldown state
    pub fn to_skill(&self, id: u32) -> Skill {
        match self.recast {
            Recast::Gcd { base_secs } => GcdSkill::new(self.info(id))
                .with_base_gcd(base_secs)
                .into(),
            Recast::Ability {
                recast_secs,
                max_charges,
            } => AbilitySkill::new(self.info(id), recast_secs)
                .with_max_charges(max_charges)
                .into(),
        }
    }
}

/// Catalog order for GCD skills
const GCD_IDS: [u32; 5] = [141, 142, 144, 147, 25793];
/// Catalog order for abilities
const ABILITY_IDS: [u32; 4] = [7562, 7561, 7421, 158];

/// Sample skill table indexed by skill ID
pub static SKILL_DATA: phf::Map<u32, SkillData> = phf_map! {
    // ═══════════════════════════════════════════════════════════════════════
    // GCD spells
    // ═══════════════════════════════════════════════════════════════════════
    141u32 => SkillData::gcd("Fire", 2.5, 180, "Deals fire damage with a potency of 180."),
    142u32 => SkillData::gcd("Blizzard", 2.5, 180, "Deals ice damage with a potency of 180."),
    144u32 => SkillData::gcd("Thunder", 2.5, 30, "Deals lightning damage with a potency of 30. Damage over time potency 50 for 30s."),
    147u32 => SkillData::gcd("Fire II", 3.0, 260, "Deals fire damage with a potency of 260."),
    25793u32 => SkillData::gcd("Blizzard II", 3.0, 260, "Deals ice damage with a potency of 260."),

    // ═══════════════════════════════════════════════════════════════════════
    // Abilities
    // ═══════════════════════════════════════════════════════════════════════
    7562u32 => SkillData::ability("Lucid Dreaming", 60.0, "Gradually restores MP. Cure potency 550 for 21s."),
    7561u32 => SkillData::ability("Swiftcast", 60.0, "Next spell is cast immediately. Duration 10s."),
    7421u32 => SkillData::ability("Triplecast", 60.0, "Next three spells are cast immediately. Duration 15s."),
    158u32 => SkillData::ability("Manafont", 100.0, "Restores all MP."),
};

/// Get catalog data for a skill ID
pub fn lookup_skill(id: SkillId) -> Option<&'static SkillData> {
    SKILL_DATA.get(&id.0)
}

pub fn sample_gcd_skills() -> Vec<GcdSkill> {
    GCD_IDS
        .iter()
        .filter_map(|&id| match SKILL_DATA.get(&id)?.to_skill(id) {
            Skill::Gcd(skill) => Some(skill),
            Skill::Ability(_) => None,
        })
        .collect()
}

pub fn sample_ability_skills() -> Vec<AbilitySkill> {
    ABILITY_IDS
        .iter()
        .filter_map(|&id| match SKILL_DATA.get(&id)?.to_skill(id) {
            Skill::Ability(skill) => Some(skill),
            Skill::Gcd(_) => None,
        })
        .collect()
}

pub fn gcd_skill_by_name(name: &str) -> Option<GcdSkill> {
    sample_gcd_skills().into_iter().find(|s| s.info.name == name)
}

pub fn ability_skill_by_name(name: &str) -> Option<AbilitySkill> {
    sample_ability_skills()
        .into_iter()
        .find(|s| s.info.name == name)
}

/// Fresh skill for a catalog ID, GCD or ability
pub fn skill_by_id(id: SkillId) -> Option<Skill> {
    lookup_skill(id).map(|data| data.to_skill(id.0))
}
