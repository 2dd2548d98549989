//! Skill cooldown models
//!
//! This module provides:
//! - **GcdSkill**: gated by the global cooldown, scaled by spell speed
//! - **AbilitySkill**: gated by its own recast timer, optionally with charges
//! - **Skill**: the closed set of both, dispatched through [`Cooldown`]
//!
//! # State
//!
//! Cooldown state lives inside each skill and only changes through
//! [`Cooldown::use_at`], [`Cooldown::reset`], or the lazy charge
//! recovery performed when an ability is queried. Nothing ticks in the
//! background; time only advances when someone asks about it.

mod ability;
mod error;
mod gcd;

pub use ability::AbilitySkill;
pub use error::IllegalUse;
pub use gcd::{DEFAULT_GCD_SECS, GcdSkill};

use gcdplan_types::SkillKind;
use serde::{Deserialize, Serialize};

/// Game-side skill identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SkillId(pub u32);

impl std::fmt::Display for SkillId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Attributes shared by every skill regardless of cooldown model
#[derive(Debug, Clone, PartialEq)]
pub struct SkillInfo {
    pub name: String,
    pub id: SkillId,
    /// Cast time in seconds
    pub cast_time: f64,
    pub potency: u32,
    pub description: String,
    pub icon_path: Option<String>,
}

impl SkillInfo {
    pub fn new(name: impl Into<String>, id: u32) -> Self {
        Self {
            name: name.into(),
            id: SkillId(id),
            cast_time: 0.0,
            potency: 0,
            description: String::new(),
            icon_path: None,
        }
    }

    pub fn with_cast_time(mut self, secs: f64) -> Self {
        self.cast_time = secs.max(0.0);
        self
    }

    pub fn with_potency(mut self, potency: u32) -> Self {
        self.potency = potency;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_icon(mut self, path: impl Into<String>) -> Self {
        self.icon_path = Some(path.into());
        self
    }
}

/// Capability set every cooldown model provides.
///
/// `can_use` takes `&mut self` because ability charges are recomputed
/// from elapsed time on every query.
pub trait Cooldown {
    /// Whether the skill may be used at `time` given its current state
    fn can_use(&mut self, time: f64) -> bool;

    /// Consume the cooldown at `time`
    fn use_at(&mut self, time: f64) -> Result<(), IllegalUse>;

    /// Return to the never-used state
    fn reset(&mut self);

    /// Human-readable reason the skill is not usable at `time`
    fn unavailability_reason(&mut self, time: f64) -> String;
}

/// A placeable skill
#[derive(Debug, Clone, PartialEq)]
pub enum Skill {
    Gcd(GcdSkill),
    Ability(AbilitySkill),
}

impl Skill {
    pub fn info(&self) -> &SkillInfo {
        match self {
            Skill::Gcd(s) => &s.info,
            Skill::Ability(s) => &s.info,
        }
    }

    pub fn name(&self) -> &str {
        &self.info().name
    }

    pub fn id(&self) -> SkillId {
        self.info().id
    }

    pub fn potency(&self) -> u32 {
        self.info().potency
    }

    pub fn kind(&self) -> SkillKind {
        match self {
            Skill::Gcd(_) => SkillKind::Gcd,
            Skill::Ability(_) => SkillKind::Ability,
        }
    }

    pub fn as_gcd(&self) -> Option<&GcdSkill> {
        match self {
            Skill::Gcd(s) => Some(s),
            Skill::Ability(_) => None,
        }
    }

    pub fn as_ability(&self) -> Option<&AbilitySkill> {
        match self {
            Skill::Ability(s) => Some(s),
            Skill::Gcd(_) => None,
        }
    }
}

impl Cooldown for Skill {
    fn can_use(&mut self, time: f64) -> bool {
        match self {
            Skill::Gcd(s) => s.can_use(time),
            Skill::Ability(s) => s.can_use(time),
        }
    }

    fn use_at(&mut self, time: f64) -> Result<(), IllegalUse> {
        match self {
            Skill::Gcd(s) => s.use_at(time),
            Skill::Ability(s) => s.use_at(time),
        }
    }

    fn reset(&mut self) {
        match self {
            Skill::Gcd(s) => s.reset(),
            Skill::Ability(s) => s.reset(),
        }
    }

    fn unavailability_reason(&mut self, time: f64) -> String {
        match self {
            Skill::Gcd(s) => s.unavailability_reason(time),
            Skill::Ability(s) => s.unavailability_reason(time),
        }
    }
}

impl From<GcdSkill> for Skill {
    fn from(skill: GcdSkill) -> Self {
        Skill::Gcd(skill)
    }
}

impl From<AbilitySkill> for Skill {
    fn from(skill: AbilitySkill) -> Self {
        Skill::Ability(skill)
    }
}

/// Fallback reason when no remaining cooldown explains a refusal
pub(crate) const UNUSABLE_REASON: &str = "unusable";
