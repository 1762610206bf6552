//! Ports
//!
//! Boundaries to capabilities dip does not implement itself.

pub mod document;

pub use document::DocumentHost;
