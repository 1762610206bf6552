//! # Infrastructure Layer
//!
//! Cross-cutting technical concerns for dip.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment configuration: defaults, TOML file, environment |
//! | [`logging`] | Structured logging with tracing |
//! | [`document`] | In-memory `DocumentHost` implementation |
//! | [`error_ext`] | Context extensions for foreign errors |
//! | [`constants`] | Infrastructure constants |

pub mod config;
pub mod constants;
pub mod document;
pub mod error_ext;
pub mod logging;

// Re-export commonly used types
pub use config::{AppConfig, ConfigLoader};
pub use document::{ElementSpec, MemoryDocument, MemoryElement};
pub use error_ext::ErrorContext;
