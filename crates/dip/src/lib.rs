//! # dip
//!
//! Named applications made of lazily resolved modules, a phased startup
//! lifecycle (config, run, inject) and views bound to document elements by
//! a selector derived from their name.
//!
//! ## Example
//!
//! ```ignore
//! use dip::{ElementSpec, Environment, MemoryDocument, ProviderSpec, instance};
//! use std::sync::Arc;
//!
//! let app = dip::app("main");
//! app.module("scope", ProviderSpec::factory(|_| Ok(instance("test".to_string()))))?;
//! app.view(
//!     "userCard",
//!     ProviderSpec::constructor(|ctx| {
//!         println!("user {:?}", ctx.data("userId"));
//!         Ok(())
//!     }),
//! )?;
//!
//! let document = MemoryDocument::new(
//!     ElementSpec::new("main").with_child(ElementSpec::new("div").with_class("user-card")),
//! );
//! Environment::new().deliver_ready(&app, Arc::new(document))?;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - value objects, errors and the `DocumentHost` port
//! - `application` - registry, resolver, lifecycle controller and view compiler
//! - `infrastructure` - configuration, logging and the in-memory document

mod apps;
mod environment;
pub mod inspect;

/// Domain layer - value objects, errors and ports
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use dip_domain::*;
}

/// Application layer - registry, lifecycle and compiler
///
/// Re-exports from the application crate for convenience
pub mod application {
    pub use dip_application::*;
}

/// Infrastructure layer - configuration, logging and document hosts
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use dip_infrastructure::*;
}

// Re-export commonly used domain types at the crate root
pub use domain::*;

pub use application::{
    Activation, Application, ApplicationOptions, Injection, Injector, Utility, ViewMatch,
};
pub use apps::{app, app_names, app_with_options, init, options_from_config};
pub use environment::Environment;
pub use infrastructure::{AppConfig, ConfigLoader, ElementSpec, MemoryDocument};
