//! Application configuration types

use dip_domain::constants::SCOPE_MODULE;
use serde::{Deserialize, Serialize};

/// Defaults applied to applications created by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Module injected as the scope when views are activated without one
    pub scope_module: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            scope_module: SCOPE_MODULE.to_string(),
        }
    }
}
