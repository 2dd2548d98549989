//! Timeline engine
//!
//! Owns the skill catalog and the placed events, and derives every event's
//! executability by replaying the timeline from a clean state.
//!
//! # Replay
//!
//! 1. Every catalog skill is reset to its never-used state
//! 2. Events are visited in ascending time order (ties keep placement order)
//! 3. Each `SkillUse` event asks its skill `can_use`, then `use_at`
//! 4. Refusals are recorded on the event, never returned to the caller

use gcdplan_types::{EventStatus, PlannerConfig, SkillKind, TimelineStatistics};
use hashbrown::HashMap;
use tracing::{debug, info, trace};

use super::error::TimelineError;
use super::event::{EventId, EventKind, SkillEvent, SkillKey};
use super::spell_speed::{BASE_SPELL_SPEED, spell_speed_modifier};
use crate::game_data;
use crate::skills::{AbilitySkill, Cooldown, GcdSkill, Skill, SkillId};

/// Default encounter length in seconds
pub const DEFAULT_TOTAL_TIME_SECS: f64 = 300.0;

/// A planned sequence of skill uses and the catalog they draw from
#[derive(Debug, Clone)]
pub struct Timeline {
    /// Sorted by time, ties in placement order
    events: Vec<SkillEvent>,

    skills: Vec<Skill>,
    skills_by_id: HashMap<SkillId, SkillKey>,

    total_time: f64,
    spell_speed: u32,
    next_event_id: u64,
}

impl Default for Timeline {
    fn default() -> Self {
        Self {
            events: Vec::new(),
            skills: Vec::new(),
            skills_by_id: HashMap::new(),
            total_time: DEFAULT_TOTAL_TIME_SECS,
            spell_speed: BASE_SPELL_SPEED,
            next_event_id: 1,
        }
    }
}

impl Timeline {
    /// Empty timeline with an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty timeline whose catalog holds the built-in sample skills
    pub fn with_sample_catalog() -> Self {
        let mut timeline = Self::new();
        timeline.load_sample_catalog();
        timeline
    }

    pub fn from_config(config: &PlannerConfig) -> Self {
        let mut timeline = Self::new();
        timeline.spell_speed = config.spell_speed;
        timeline.total_time = config.total_time_secs;
        if config.load_sample_catalog {
            timeline.load_sample_catalog();
        }
        timeline
    }

    pub fn load_sample_catalog(&mut self) {
        for skill in game_data::sample_gcd_skills() {
            self.add_gcd_skill(skill);
        }
        for skill in game_data::sample_ability_skills() {
            self.add_ability_skill(skill);
        }
    }

    // ─── Catalog ────────────────────────────────────────────────────────────

    /// Register a GCD skill; it picks up the current spell speed modifier
    pub fn add_gcd_skill(&mut self, mut skill: GcdSkill) -> SkillKey {
        skill.set_spell_speed_modifier(self.spell_speed_modifier());
        self.push_skill(Skill::Gcd(skill))
    }

    pub fn add_ability_skill(&mut self, skill: AbilitySkill) -> SkillKey {
        self.push_skill(Skill::Ability(skill))
    }

    fn push_skill(&mut self, skill: Skill) -> SkillKey {
        let key = SkillKey(self.skills.len());
        // First registration wins an id lookup
        self.skills_by_id.entry(skill.id()).or_insert(key);
        self.skills.push(skill);
        key
    }

    pub fn skill(&self, key: SkillKey) -> Option<&Skill> {
        self.skills.get(key.0)
    }

    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    /// Every catalog key, GCD skills first
    pub fn skill_keys(&self) -> Vec<SkillKey> {
        let gcds = self.keys_of_kind(SkillKind::Gcd);
        let abilities = self.keys_of_kind(SkillKind::Ability);
        gcds.chain(abilities).collect()
    }

    fn keys_of_kind(&self, kind: SkillKind) -> impl Iterator<Item = SkillKey> + '_ {
        self.skills
            .iter()
            .enumerate()
            .filter(move |(_, s)| s.kind() == kind)
            .map(|(i, _)| SkillKey(i))
    }

    pub fn find_skill(&self, id: SkillId) -> Option<SkillKey> {
        self.skills_by_id.get(&id).copied()
    }

    /// Case-insensitive name lookup
    pub fn find_skill_by_name(&self, name: &str) -> Option<SkillKey> {
        self.skills
            .iter()
            .position(|s| s.name().eq_ignore_ascii_case(name))
            .map(SkillKey)
    }

    fn skill_name(&self, key: SkillKey) -> &str {
        self.skill(key).map(Skill::name).unwrap_or("<unknown>")
    }

    // ─── Settings ───────────────────────────────────────────────────────────

    pub fn spell_speed(&self) -> u32 {
        self.spell_speed
    }

    pub fn spell_speed_modifier(&self) -> f64 {
        spell_speed_modifier(self.spell_speed)
    }

    /// Change spell speed, push the new modifier into every GCD skill and
    /// revalidate
    pub fn set_spell_speed(&mut self, spell_speed: u32) {
        self.spell_speed = spell_speed;
        let modifier = self.spell_speed_modifier();
        for skill in &mut self.skills {
            if let Skill::Gcd(gcd) = skill {
                gcd.set_spell_speed_modifier(modifier);
            }
        }
        info!(spell_speed, modifier, "Spell speed changed");
        self.revalidate();
    }

    /// Encounter length in seconds
    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    pub fn set_total_time(&mut self, secs: f64) {
        self.total_time = secs;
    }

    // ─── Events ─────────────────────────────────────────────────────────────

    pub fn events(&self) -> &[SkillEvent] {
        &self.events
    }

    pub fn event(&self, id: EventId) -> Option<&SkillEvent> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Place a skill use at `time` and revalidate.
    ///
    /// The returned event already carries its executability. Cooldown
    /// violations are never an error here.
    pub fn add_skill_event(
        &mut self,
        time: f64,
        skill: SkillKey,
    ) -> Result<&SkillEvent, TimelineError> {
        self.add_event_of_kind(time, skill, EventKind::SkillUse)
    }

    pub fn add_event_of_kind(
        &mut self,
        time: f64,
        skill: SkillKey,
        kind: EventKind,
    ) -> Result<&SkillEvent, TimelineError> {
        if skill.0 >= self.skills.len() {
            return Err(TimelineError::UnknownSkill(skill.0));
        }

        let id = EventId(self.next_event_id);
        self.next_event_id += 1;

        let index = self.insert_sorted(SkillEvent::new(id, time, skill, kind));
        debug!(event = %id, time, skill = self.skill_name(skill), "Event placed");
        self.revalidate();
        Ok(&self.events[index])
    }

    /// Insert after every event at or before `event.time`, keeping the
    /// list sorted and ties in placement order
    fn insert_sorted(&mut self, event: SkillEvent) -> usize {
        let index = self
            .events
            .partition_point(|e| e.time.total_cmp(&event.time).is_le());
        self.events.insert(index, event);
        index
    }

    /// Remove an event by identity and revalidate
    pub fn remove_skill_event(&mut self, id: EventId) -> Option<SkillEvent> {
        let index = self.events.iter().position(|e| e.id == id)?;
        let removed = self.events.remove(index);
        debug!(event = %id, "Event removed");
        self.revalidate();
        Some(removed)
    }

    /// Re-place an existing event at `new_time`, as if removed and added
    /// again, keeping its id
    pub fn move_skill_event(&mut self, id: EventId, new_time: f64) -> Option<&SkillEvent> {
        let index = self.events.iter().position(|e| e.id == id)?;
        let mut event = self.events.remove(index);
        event.time = new_time;

        let index = self.insert_sorted(event);
        debug!(event = %id, time = new_time, "Event moved");
        self.revalidate();
        Some(&self.events[index])
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
        self.revalidate();
    }

    // ─── Validation ─────────────────────────────────────────────────────────

    fn reset_all_skills(&mut self) {
        for skill in &mut self.skills {
            skill.reset();
        }
    }

    /// Recompute every event's executability from a clean cooldown state
    pub fn revalidate(&mut self) {
        self.reset_all_skills();

        let mut failed = 0usize;
        for event in &mut self.events {
            if event.kind != EventKind::SkillUse {
                event.mark_executable();
                continue;
            }

            let Some(skill) = self.skills.get_mut(event.skill.0) else {
                event.mark_failed(crate::skills::UNUSABLE_REASON.to_string());
                failed += 1;
                continue;
            };

            match replay_use(skill, event.time) {
                Ok(()) => event.mark_executable(),
                Err(reason) => {
                    trace!(event = %event.id, time = event.time, %reason, "Event not executable");
                    event.mark_failed(reason);
                    failed += 1;
                }
            }
        }

        debug!(events = self.events.len(), failed, "Timeline revalidated");
    }

    /// Skills usable at `time`, GCD skills first.
    ///
    /// Replays every event strictly before `time` on the live catalog and
    /// leaves the skills in that state. Event diagnostics are untouched but
    /// no longer match skill state; call [`Self::revalidate`] before relying
    /// on the catalog again. See [`Self::available_skills_snapshot`] for a
    /// read-only variant.
    pub fn available_skills(&mut self, time: f64) -> Vec<SkillKey> {
        self.reset_all_skills();
        replay_until(&mut self.skills, &self.events, time);
        let available = collect_available(&mut self.skills, time);
        debug!(time, available = available.len(), "Availability queried");
        available
    }

    /// Same answer as [`Self::available_skills`], computed on a copy of the
    /// catalog so neither skills nor events change
    pub fn available_skills_snapshot(&self, time: f64) -> Vec<SkillKey> {
        let mut skills = self.skills.clone();
        for skill in &mut skills {
            skill.reset();
        }
        replay_until(&mut skills, &self.events, time);
        collect_available(&mut skills, time)
    }

    // ─── Reporting ──────────────────────────────────────────────────────────

    /// Totals over executable skill uses
    pub fn statistics(&self) -> TimelineStatistics {
        let mut stats = TimelineStatistics::default();

        let executed = self
            .events
            .iter()
            .filter(|e| e.kind == EventKind::SkillUse && e.is_executable);

        for event in executed {
            let Some(skill) = self.skill(event.skill) else {
                continue;
            };
            stats.total_uses += 1;
            match skill.kind() {
                SkillKind::Gcd => stats.gcd_uses += 1,
                SkillKind::Ability => stats.ability_uses += 1,
            }
            stats.total_potency = stats.total_potency.saturating_add(skill.potency());
        }

        stats.potency_per_second = if self.total_time > 0.0 {
            f64::from(stats.total_potency) / self.total_time
        } else {
            0.0
        };
        stats
    }

    /// Flattened event diagnostics for rendering
    pub fn event_statuses(&self) -> Vec<EventStatus> {
        self.events
            .iter()
            .filter_map(|event| {
                let skill = self.skill(event.skill)?;
                Some(EventStatus {
                    event_id: event.id.0,
                    time_secs: event.time,
                    skill_name: skill.name().to_string(),
                    kind: skill.kind(),
                    is_executable: event.is_executable,
                    error_message: event.error_message.clone(),
                })
            })
            .collect()
    }

    /// One line per event, `"2.50s: ✓ Fire"` style
    pub fn describe_event(&self, event: &SkillEvent) -> String {
        event.display(self.skill_name(event.skill)).to_string()
    }
}

/// Attempt one use, returning the refusal reason on failure.
///
/// Non-finite times are refused before the skill is consulted so they
/// never reach cooldown state.
fn replay_use(skill: &mut Skill, time: f64) -> Result<(), String> {
    if !time.is_finite() {
        return Err(format!("invalid time {time}"));
    }
    if skill.can_use(time) {
        skill.use_at(time).map_err(|e| e.to_string())
    } else {
        Err(skill.unavailability_reason(time))
    }
}

/// Apply every skill use strictly before `time` without recording results
fn replay_until(skills: &mut [Skill], events: &[SkillEvent], time: f64) {
    let before = events
        .iter()
        .filter(|e| e.kind == EventKind::SkillUse && e.time < time);

    for event in before {
        if let Some(skill) = skills.get_mut(event.skill.0) {
            // Refusals only matter for diagnostics, which this replay skips
            let _ = replay_use(skill, event.time);
        }
    }
}

fn collect_available(skills: &mut [Skill], time: f64) -> Vec<SkillKey> {
    if !time.is_finite() {
        return Vec::new();
    }

    let mut gcds = Vec::new();
    let mut abilities = Vec::new();
    for (i, skill) in skills.iter_mut().enumerate() {
        if !skill.can_use(time) {
            continue;
        }
        match skill.kind() {
            SkillKind::Gcd => gcds.push(SkillKey(i)),
            SkillKind::Ability => abilities.push(SkillKey(i)),
        }
    }
    gcds.extend(abilities);
    gcds
}
