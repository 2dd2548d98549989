mod config;
mod error;

pub use config::{PlannerConfig, PlannerConfigExt, config_path};
pub use error::ConfigError;
