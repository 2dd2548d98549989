//! Global-cooldown skills

use super::{Cooldown, IllegalUse, SkillInfo, UNUSABLE_REASON};

/// Base recast of a GCD skill before spell speed is applied
pub const DEFAULT_GCD_SECS: f64 = 2.5;

/// A skill gated by the global cooldown.
///
/// The recast after each use is `base_gcd_time * spell_speed_modifier`.
/// The modifier is owned by the timeline and pushed in whenever spell
/// speed changes.
#[derive(Debug, Clone, PartialEq)]
pub struct GcdSkill {
    pub info: SkillInfo,

    /// Unmodified GCD length in seconds
    pub base_gcd_time: f64,

    spell_speed_modifier: f64,

    /// When this skill last went through, `None` if never
    last_use: Option<f64>,
}

impl GcdSkill {
    pub fn new(info: SkillInfo) -> Self {
        Self {
            info,
            base_gcd_time: DEFAULT_GCD_SECS,
            spell_speed_modifier: 1.0,
            last_use: None,
        }
    }

    pub fn with_base_gcd(mut self, secs: f64) -> Self {
        self.base_gcd_time = secs;
        self
    }

    pub fn spell_speed_modifier(&self) -> f64 {
        self.spell_speed_modifier
    }

    pub fn set_spell_speed_modifier(&mut self, modifier: f64) {
        self.spell_speed_modifier = modifier;
    }

    pub fn last_use(&self) -> Option<f64> {
        self.last_use
    }

    /// GCD length after spell speed
    pub fn actual_gcd_time(&self) -> f64 {
        self.base_gcd_time * self.spell_speed_modifier
    }

    /// Earliest time the skill can be used again, `None` if never used
    pub fn next_available_time(&self) -> Option<f64> {
        self.last_use.map(|t| t + self.actual_gcd_time())
    }

    /// Seconds of GCD left at `current_time`, never negative
    pub fn remaining_gcd_time(&self, current_time: f64) -> f64 {
        match self.next_available_time() {
            Some(next) => (next - current_time).max(0.0),
            None => 0.0,
        }
    }
}

impl Cooldown for GcdSkill {
    fn can_use(&mut self, time: f64) -> bool {
        time.is_finite() && self.next_available_time().is_none_or(|next| time >= next)
    }

    fn use_at(&mut self, time: f64) -> Result<(), IllegalUse> {
        if !self.can_use(time) {
            return Err(IllegalUse {
                skill: self.info.name.clone(),
                attempted_at: time,
                next_available: self.next_available_time().unwrap_or(time),
            });
        }

        self.last_use = Some(time);
        Ok(())
    }

    fn reset(&mut self) {
        self.last_use = None;
    }

    fn unavailability_reason(&mut self, time: f64) -> String {
        let remaining = self.remaining_gcd_time(time);
        if remaining > 0.0 {
            format!("GCD remaining {remaining:.2}s")
        } else {
            UNUSABLE_REASON.to_string()
        }
    }
}
