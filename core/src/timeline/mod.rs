//! Timeline engine
//!
//! This module provides:
//! - **Events**: timed skill placements and their derived diagnostics
//! - **Engine**: the `Timeline`, which owns the catalog and replays events
//! - **Spell speed**: conversion from the stat to a GCD modifier
//!
//! # Ownership
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ Timeline                                     │
//! │   skills: [Fire, Blizzard, ..., Swiftcast]   │ ◄── cooldown state
//! │   events: [(0.0, key 0), (2.5, key 1), ...]  │ ◄── keys, no state
//! └──────────────────────────────────────────────┘
//! ```
//!
//! Events hold a [`SkillKey`] into the catalog. Revalidation and
//! availability queries reset and mutate the catalog in place, so there
//! is exactly one owner of cooldown state.

mod engine;
mod error;
mod event;
mod spell_speed;

#[cfg(test)]
mod engine_tests;

use std::sync::Arc;

use tokio::sync::Mutex;

pub use engine::{DEFAULT_TOTAL_TIME_SECS, Timeline};
pub use error::TimelineError;
pub use event::{EventDisplay, EventId, EventKind, SkillEvent, SkillKey};
pub use spell_speed::{BASE_SPELL_SPEED, MIN_GCD_MODIFIER, spell_speed_modifier};

/// Handle for sharing one timeline between tasks.
///
/// Revalidation and availability queries both reset the whole catalog,
/// so every call goes through the one lock.
pub type SharedTimeline = Arc<Mutex<Timeline>>;

impl Timeline {
    pub fn into_shared(self) -> SharedTimeline {
        Arc::new(Mutex::new(self))
    }
}
