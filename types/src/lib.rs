//! Shared configuration types for the GCD planner
//!
//! This crate contains serializable types that are shared between the
//! planning engine (gcdplan-core) and whatever front end renders it.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Skill Classification
// ─────────────────────────────────────────────────────────────────────────────

/// Which cooldown model gates a skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillKind {
    /// Gated by the global cooldown
    Gcd,
    /// Gated by its own recast timer and charges
    Ability,
}

impl SkillKind {
    /// Short label used in listings
    pub fn label(&self) -> &'static str {
        match self {
            SkillKind::Gcd => "GCD",
            SkillKind::Ability => "oGCD",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Query Result Types
// ─────────────────────────────────────────────────────────────────────────────

/// Aggregate numbers over the executable events of a timeline.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TimelineStatistics {
    pub total_uses: u32,
    pub gcd_uses: u32,
    pub ability_uses: u32,
    pub total_potency: u32,
    /// `total_potency / total_time`, 0 when the timeline has no duration
    pub potency_per_second: f64,
}

/// Flattened view of one validated event, for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventStatus {
    pub event_id: u64,
    pub time_secs: f64,
    pub skill_name: String,
    pub kind: SkillKind,
    pub is_executable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Planner Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Persisted planner settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Spell speed stat; values at or below 400 leave the GCD untouched
    #[serde(default = "default_spell_speed")]
    pub spell_speed: u32,

    /// Length of the planned encounter in seconds
    #[serde(default = "default_total_time")]
    pub total_time_secs: f64,

    /// Populate the skill catalog with the built-in sample skills
    #[serde(default = "default_true")]
    pub load_sample_catalog: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            spell_speed: default_spell_speed(),
            total_time_secs: default_total_time(),
            load_sample_catalog: true,
        }
    }
}

fn default_spell_speed() -> u32 {
    400
}

fn default_total_time() -> f64 {
    300.0
}

fn default_true() -> bool {
    true
}
