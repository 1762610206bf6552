//! Value Objects
//!
//! Immutable descriptions of what gets registered, resolved and bound.
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`ProviderSpec`] | Normalized registration: dependencies plus factory |
//! | [`DependencyRef`] | A dependency name or a late-bound factory override |
//! | [`Resolved`] | Outcome of resolving a name |
//! | [`Args`] | Positional arguments handed to a factory |
//! | [`Selector`] | Dash-cased structural selector derived from a view name |
//! | [`ElementRef`] | Opaque handle to a host element |
//! | [`ViewContext`] | What a view constructor receives on activation |

pub mod element;
pub mod lifecycle;
pub mod provider;
pub mod resolved;
pub mod selector;
pub mod view;

pub use element::{DataAttributes, ElementRef};
pub use lifecycle::{LifecycleState, Phase};
pub use provider::{DependencyRef, Factory, ProviderKind, ProviderSpec, SpecEntry};
pub use resolved::{Args, Instance, Resolved, instance};
pub use selector::{Marker, Selector};
pub use view::{ViewConstructor, ViewContext};
