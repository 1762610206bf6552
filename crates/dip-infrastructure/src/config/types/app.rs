//! Root configuration

use serde::{Deserialize, Serialize};

use super::{ApplicationConfig, LoggingConfig};

/// Root configuration for a dip host process
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Logging configuration
    pub logging: LoggingConfig,

    /// Application defaults
    pub application: ApplicationConfig,
}
