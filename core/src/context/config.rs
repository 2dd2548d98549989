//! Planner configuration
//!
//! Re-exports the shared `PlannerConfig` from gcdplan-types and adds
//! persistence through confy.

pub use gcdplan_types::PlannerConfig;

use tracing::{info, warn};

use super::error::ConfigError;

const APP_NAME: &str = "gcdplan";
const CONFIG_NAME: &str = "config";

/// Extension trait for PlannerConfig persistence
pub trait PlannerConfigExt: Sized {
    fn load() -> Result<Self, ConfigError>;
    fn load_or_default() -> Self;
    fn save(&self) -> Result<(), ConfigError>;
}

impl PlannerConfigExt for PlannerConfig {
    fn load() -> Result<Self, ConfigError> {
        Ok(confy::load(APP_NAME, CONFIG_NAME)?)
    }

    /// Load the stored config, falling back to defaults when it is unreadable
    fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "Using default planner configuration");
                Self::default()
            }
        }
    }

    fn save(&self) -> Result<(), ConfigError> {
        confy::store(APP_NAME, CONFIG_NAME, self).map_err(ConfigError::Save)?;
        info!(
            spell_speed = self.spell_speed,
            total_time = self.total_time_secs,
            "Configuration saved"
        );
        Ok(())
    }
}

/// Where the config file lives on this platform
pub fn config_path() -> Result<std::path::PathBuf, ConfigError> {
    confy::get_configuration_file_path(APP_NAME, CONFIG_NAME).map_err(ConfigError::Locate)
}
