//! Configuration
//!
//! Layered configuration: defaults, then a TOML file, then `DIP__*`
//! environment variables.

pub mod loader;
pub mod types;

pub use loader::{ConfigBuilder, ConfigLoader};
pub use types::*;
