//! Error types for skill usage

use thiserror::Error;

/// A skill was used while its cooldown state forbids it.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("skill '{skill}' cannot be used at {attempted_at:.2}s (next available at {next_available:.2}s)")]
pub struct IllegalUse {
    pub skill: String,
    pub attempted_at: f64,
    pub next_available: f64,
}
