//! Lazy, memoized dependency resolution
//!
//! ## Algorithm
//!
//! ```text
//! resolve(name)
//!   ├─ not registered        → Missing
//!   ├─ already resolved      → cached value
//!   └─ for each dependency
//!        ├─ ByName(dep)      → resolve(dep) appended to the arguments
//!        └─ Override(f)      → f replaces the factory
//!      factory present?      → run once, memoize, Value
//!      no factory            → Empty (not memoized)
//! ```
//!
//! Resolution is reentrant: factories may resolve other names, register new
//! providers or schedule injections. The only lock held while a factory runs
//! is that provider's own factory guard, so concurrent resolutions of one
//! name wait for the first and then read its cached value. The factory runs
//! at most once. There is no cycle detection; a circular graph blocks on
//! its own guard.

use dip_domain::error::Result;
use dip_domain::value_objects::{Args, DependencyRef, Resolved};
use std::sync::Arc;
use tracing::{debug, trace};

use crate::registry::{Provider, Registry};

/// Resolves names against a single namespace
pub struct Resolver<'a, V> {
    registry: &'a Registry<V>,
}

impl<'a, V: Clone> Resolver<'a, V> {
    /// Resolver over `registry`
    pub fn new(registry: &'a Registry<V>) -> Self {
        Self { registry }
    }

    /// Resolve `name`, running its factory on first use
    pub fn resolve(&self, name: &str) -> Result<Resolved<V>> {
        match self.registry.get(name) {
            Some(provider) => self.resolve_provider(&provider),
            None => {
                trace!(kind = %self.registry.kind(), name = %name, "Dependency not registered");
                Ok(Resolved::Missing)
            }
        }
    }

    /// Resolve an already looked-up provider
    pub fn resolve_provider(&self, provider: &Provider<V>) -> Result<Resolved<V>> {
        if let Some(value) = provider.value() {
            return Ok(Resolved::Value(value.clone()));
        }

        let _guard = provider.lock_factory();
        if let Some(value) = provider.value() {
            return Ok(Resolved::Value(value.clone()));
        }

        let mut factory = provider.factory().cloned();
        let mut args = Vec::with_capacity(provider.dependencies().len());
        for dependency in provider.dependencies() {
            match dependency {
                DependencyRef::ByName(name) => args.push(self.resolve(name)?),
                DependencyRef::Override(f) => factory = Some(Arc::clone(f)),
            }
        }

        let Some(factory) = factory else {
            debug!(kind = %provider.kind(), name = %provider.name(), "Provider has no factory");
            return Ok(Resolved::Empty);
        };

        debug!(kind = %provider.kind(), name = %provider.name(), "Running provider factory");
        let value = factory(&Args::new(args))?;
        Ok(Resolved::Value(provider.memoize(value).clone()))
    }

    /// Resolve several names into a positional argument list
    pub fn resolve_names<S: AsRef<str>>(&self, names: &[S]) -> Result<Args<V>> {
        let values = names
            .iter()
            .map(|name| self.resolve(name.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Args::new(values))
    }

    /// Resolve every registered provider in registration order
    ///
    /// Returns how many providers hold a value afterwards.
    pub fn resolve_all(&self) -> Result<usize> {
        let mut resolved = 0;
        for provider in self.registry.providers() {
            if self.resolve_provider(&provider)?.is_value() {
                resolved += 1;
            }
        }
        debug!(kind = %self.registry.kind(), resolved, "Resolved namespace");
        Ok(resolved)
    }
}
