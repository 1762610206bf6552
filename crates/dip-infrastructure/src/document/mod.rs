//! Document hosts
//!
//! Implementations of the `DocumentHost` port.

pub mod memory;

pub use memory::{ElementSpec, MemoryDocument, MemoryElement};
