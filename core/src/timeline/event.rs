//! Skill events placed on a timeline
//!
//! A `SkillEvent` pairs a time with a catalog key. The two diagnostic
//! fields are owned by the timeline and overwritten on every
//! revalidation; everything else is fixed at placement.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Handle to a skill in a timeline's catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SkillKey(pub(crate) usize);

impl SkillKey {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Identity of a placed event, stable across re-sorting and moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventId(pub u64);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What an event represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// The skill is used; the only kind that is replayed
    #[default]
    SkillUse,
    /// Marker: the GCD comes back up
    GcdReady,
    /// Marker: an ability's recast finishes
    AbilityReady,
}

/// A skill placed at a point in time
#[derive(Debug, Clone, PartialEq)]
pub struct SkillEvent {
    pub(crate) id: EventId,
    pub(crate) time: f64,
    pub(crate) skill: SkillKey,
    pub(crate) kind: EventKind,
    pub(crate) is_executable: bool,
    pub(crate) error_message: Option<String>,
}

impl SkillEvent {
    pub(crate) fn new(id: EventId, time: f64, skill: SkillKey, kind: EventKind) -> Self {
        Self {
            id,
            time,
            skill,
            kind,
            is_executable: true,
            error_message: None,
        }
    }

    pub fn id(&self) -> EventId {
        self.id
    }

    /// Placement time in seconds
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn skill(&self) -> SkillKey {
        self.skill
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn is_executable(&self) -> bool {
        self.is_executable
    }

    /// Why the event cannot execute; `None` when it can
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub(crate) fn mark_executable(&mut self) {
        self.is_executable = true;
        self.error_message = None;
    }

    pub(crate) fn mark_failed(&mut self, reason: String) {
        self.is_executable = false;
        self.error_message = Some(reason);
    }

    /// Render as `"12.50s: ✓ Fire"` or `"13.00s: ✗ Fire (GCD remaining 2.00s)"`
    pub fn display<'a>(&'a self, skill_name: &'a str) -> EventDisplay<'a> {
        EventDisplay {
            event: self,
            skill_name,
        }
    }
}

/// [`fmt::Display`] adapter returned by [`SkillEvent::display`]
pub struct EventDisplay<'a> {
    event: &'a SkillEvent,
    skill_name: &'a str,
}

impl fmt::Display for EventDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.event.is_executable { "✓" } else { "✗" };
        write!(f, "{:.2}s: {} {}", self.event.time, status, self.skill_name)?;
        match (&self.event.error_message, self.event.is_executable) {
            (Some(msg), false) if !msg.is_empty() => write!(f, " ({msg})"),
            _ => Ok(()),
        }
    }
}
