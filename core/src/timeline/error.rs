//! Error types for timeline operations

use thiserror::Error;

/// Caller mistakes when driving a timeline.
///
/// Cooldown violations are never reported here; they become per-event
/// diagnostics during revalidation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimelineError {
    #[error("skill key {0} does not belong to this timeline's catalog")]
    UnknownSkill(usize),
}
