use gcdplan_core::context::{PlannerConfig, PlannerConfigExt};
use gcdplan_core::{SharedTimeline, Timeline};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Holds all shared state for the CLI application.
/// This is a lightweight container - logic lives in the timeline itself.
#[derive(Clone)]
pub struct CliContext {
    pub config: Arc<RwLock<PlannerConfig>>,
    pub timeline: SharedTimeline,
}

impl CliContext {
    /// Load the stored config and build a timeline from it
    pub fn new() -> Self {
        Self::from_config(PlannerConfig::load_or_default())
    }

    pub fn from_config(config: PlannerConfig) -> Self {
        let timeline = Timeline::from_config(&config).into_shared();
        Self {
            config: Arc::new(RwLock::new(config)),
            timeline,
        }
    }
}

impl Default for CliContext {
    fn default() -> Self {
        Self::new()
    }
}
