//! Infrastructure layer constants
//!
//! Domain-level names (built-in modules, the scope module) live in
//! `dip_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "dip.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "dip";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "DIP";

/// Separator between nested keys in environment variable names
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Environment variable overriding the log filter
pub const LOG_FILTER_ENV: &str = "DIP_LOG";

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// File stem used when the configured log path has none
pub const DEFAULT_LOG_FILE_STEM: &str = "dip";

// ============================================================================
// DOCUMENT CONSTANTS
// ============================================================================

/// Attribute prefix exposed as data attributes
pub const DATA_ATTRIBUTE_PREFIX: &str = "data-";

/// Attribute used to look elements up by id
pub const ID_ATTRIBUTE: &str = "id";
