pub mod context;
pub mod game_data;
pub mod skills;
pub mod timeline;

// Re-exports for convenience
pub use context::{ConfigError, PlannerConfig, PlannerConfigExt};
pub use gcdplan_types::{EventStatus, SkillKind, TimelineStatistics};
pub use skills::{AbilitySkill, Cooldown, GcdSkill, IllegalUse, Skill, SkillId, SkillInfo};
pub use timeline::{
    EventId, EventKind, SharedTimeline, SkillEvent, SkillKey, Timeline, TimelineError,
    spell_speed_modifier,
};
