mod catalog;

pub use catalog::{
    Recast, SKILL_DATA, SkillData, ability_skill_by_name, gcd_skill_by_name, lookup_skill,
    sample_ability_skills, sample_gcd_skills, skill_by_id,
};
