//! # dip Domain Layer
//!
//! Core types for the dip runtime: what a registration looks like, what
//! resolving a name can produce, how views are selected, and the errors
//! every operation can raise.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | Error taxonomy and `Result` alias |
//! | [`value_objects`] | Provider specs, resolved values, selectors, element handles |
//! | [`ports`] | `DocumentHost` boundary used by the view compiler |
//! | [`constants`] | Names of built-in and conventional modules |
//!
//! This crate has no knowledge of registries or lifecycles; those live in
//! `dip-application`.

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
pub use ports::DocumentHost;
pub use value_objects::*;
