//! Application Layer - dip
//!
//! The registration/resolution engine, the phased lifecycle controller and
//! the view compiler, composed into [`Application`].
//!
//! ## Architecture
//!
//! ```text
//!                 ┌──────────────┐
//!                 │ Application  │
//!                 └──────┬───────┘
//!        ┌───────────────┼────────────────┐
//!        ▼               ▼                ▼
//! ┌─────────────┐ ┌─────────────┐  ┌─────────────┐
//! │  Registry   │ │  Lifecycle  │  │  Compiler   │
//! │ modules/    │ │ Config/Run/ │  │ selectors → │
//! │ views       │ │ Inject tasks│  │ matches     │
//! └──────┬──────┘ └──────┬──────┘  └──────┬──────┘
//!        └───────► Resolver ◄─────────────┘
//! ```
//!
//! ## Dependencies
//!
//! This crate depends only on:
//! - `dip-domain`: value objects, errors and the `DocumentHost` port
//! - `dashmap` and `tracing`

pub mod application;
pub mod builtins;
pub mod compiler;
pub mod lifecycle;
pub mod registry;
pub mod resolver;

pub use application::{Application, ApplicationOptions};
pub use builtins::{Injector, Utility};
pub use compiler::{Activation, ViewMatch, collect_matches};
pub use lifecycle::{Injection, Lifecycle, PendingTask, TaskCallback};
pub use registry::{Provider, Registry};
pub use resolver::Resolver;
