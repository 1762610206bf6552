//! Provider registration values
//!
//! A registration is either a bare factory, or an ordered mix of dependency
//! names and factories. [`ProviderSpec::from_entries`] normalizes the mixed
//! form without side effects:
//!
//! ```text
//! ["name", fn]        → dependencies = [ByName("name")], factory = fn
//! [fn, "a", "b"]      → dependencies = [ByName("a"), ByName("b")], factory = fn
//! ["a", "b"]          → dependencies = [ByName("a"), ByName("b")], factory = None
//! ["a", f1, "b", f2]  → dependencies = [ByName("a"), ByName("b"), Override(f2)], factory = f1
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::value_objects::resolved::Args;
use crate::value_objects::view::{ViewConstructor, ViewContext};

/// Factory producing a provider value from its resolved dependencies
pub type Factory<V> = Arc<dyn Fn(&Args<V>) -> Result<V> + Send + Sync>;

/// Namespace a provider lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Named unit of work producing a singleton value
    Module,
    /// Module-like unit bound to a structural selector
    View,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Module => write!(f, "Module"),
            Self::View => write!(f, "View"),
        }
    }
}

/// One declared dependency of a provider
pub enum DependencyRef<V> {
    /// Resolve this name through the same namespace
    ByName(String),
    /// Replace the provider's factory for this resolution
    Override(Factory<V>),
}

impl<V> DependencyRef<V> {
    /// Dependency name, if this is a name reference
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::ByName(name) => Some(name),
            Self::Override(_) => None,
        }
    }
}

impl<V> Clone for DependencyRef<V> {
    fn clone(&self) -> Self {
        match self {
            Self::ByName(name) => Self::ByName(name.clone()),
            Self::Override(factory) => Self::Override(Arc::clone(factory)),
        }
    }
}

impl<V> fmt::Debug for DependencyRef<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ByName(name) => f.debug_tuple("ByName").field(name).finish(),
            Self::Override(_) => f.write_str("Override(<factory>)"),
        }
    }
}

/// Raw registration entry, before normalization
pub enum SpecEntry<V> {
    /// A dependency name
    Name(String),
    /// A factory function
    Factory(Factory<V>),
}

impl<V> SpecEntry<V> {
    /// Wrap a closure as a factory entry
    pub fn factory<F>(f: F) -> Self
    where
        F: Fn(&Args<V>) -> Result<V> + Send + Sync + 'static,
    {
        Self::Factory(Arc::new(f))
    }
}

impl<V> From<&str> for SpecEntry<V> {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl<V> From<String> for SpecEntry<V> {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

/// Normalized provider registration
pub struct ProviderSpec<V> {
    dependencies: Vec<DependencyRef<V>>,
    factory: Option<Factory<V>>,
}

impl<V> ProviderSpec<V> {
    /// Create an empty spec with no dependencies and no factory
    pub fn new() -> Self {
        Self {
            dependencies: Vec::new(),
            factory: None,
        }
    }

    /// Spec consisting only of a factory
    pub fn factory<F>(f: F) -> Self
    where
        F: Fn(&Args<V>) -> Result<V> + Send + Sync + 'static,
    {
        Self::new().with_factory(f)
    }

    /// Normalize an ordered mix of names and factories
    ///
    /// The first factory becomes the provider's factory. Later factories are
    /// kept in place as overrides, so the last one supplied wins at
    /// resolution time.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = SpecEntry<V>>,
    {
        let mut spec = Self::new();
        for entry in entries {
            match entry {
                SpecEntry::Name(name) => spec.dependencies.push(DependencyRef::ByName(name)),
                SpecEntry::Factory(factory) if spec.factory.is_none() => {
                    spec.factory = Some(factory);
                }
                SpecEntry::Factory(factory) => {
                    spec.dependencies.push(DependencyRef::Override(factory));
                }
            }
        }
        spec
    }

    /// Append a dependency name
    pub fn dependency<S: Into<String>>(mut self, name: S) -> Self {
        self.dependencies.push(DependencyRef::ByName(name.into()));
        self
    }

    /// Append several dependency names
    pub fn dependencies<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies
            .extend(names.into_iter().map(|n| DependencyRef::ByName(n.into())));
        self
    }

    /// Set the factory
    pub fn with_factory<F>(mut self, f: F) -> Self
    where
        F: Fn(&Args<V>) -> Result<V> + Send + Sync + 'static,
    {
        self.factory = Some(Arc::new(f));
        self
    }

    /// Append a late-bound factory override
    pub fn with_override<F>(mut self, f: F) -> Self
    where
        F: Fn(&Args<V>) -> Result<V> + Send + Sync + 'static,
    {
        self.dependencies.push(DependencyRef::Override(Arc::new(f)));
        self
    }

    /// Declared dependency references, in order
    pub fn dependency_refs(&self) -> &[DependencyRef<V>] {
        &self.dependencies
    }

    /// Declared dependency names, in order, skipping overrides
    pub fn dependency_names(&self) -> impl Iterator<Item = &str> {
        self.dependencies.iter().filter_map(DependencyRef::name)
    }

    /// Whether a factory is available, either directly or through an override
    pub fn yields_factory(&self) -> bool {
        self.factory.is_some()
            || self
                .dependencies
                .iter()
                .any(|d| matches!(d, DependencyRef::Override(_)))
    }

    /// Split into dependencies and factory
    pub fn into_parts(self) -> (Vec<DependencyRef<V>>, Option<Factory<V>>) {
        (self.dependencies, self.factory)
    }
}

impl ProviderSpec<ViewConstructor> {
    /// Spec for a view whose factory simply hands back `constructor`
    pub fn constructor<F>(constructor: F) -> Self
    where
        F: Fn(&ViewContext) -> Result<()> + Send + Sync + 'static,
    {
        let constructor: ViewConstructor = Arc::new(constructor);
        Self::factory(move |_| Ok(Arc::clone(&constructor)))
    }
}

impl<V> Default for ProviderSpec<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> fmt::Debug for ProviderSpec<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderSpec")
            .field("dependencies", &self.dependencies)
            .field("has_factory", &self.factory.is_some())
            .finish()
    }
}
