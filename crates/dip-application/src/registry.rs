//! Provider Registry
//!
//! Stores named provider records for one namespace. Names are unique for the
//! lifetime of the registry and there is no unregistration. Iteration follows
//! registration order.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use dip_domain::error::{Error, Result};
use dip_domain::value_objects::{DependencyRef, Factory, ProviderKind, ProviderSpec, Selector};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError, RwLock};
use tracing::debug;

/// Stored registration record for a module or view
pub struct Provider<V> {
    name: String,
    kind: ProviderKind,
    dependencies: Vec<DependencyRef<V>>,
    factory: Option<Factory<V>>,
    selector: Option<Selector>,
    value: OnceLock<V>,
    factory_guard: Mutex<()>,
}

impl<V> Provider<V> {
    fn new(name: &str, kind: ProviderKind, spec: ProviderSpec<V>) -> Self {
        let (dependencies, factory) = spec.into_parts();
        let selector = match kind {
            ProviderKind::View => Some(Selector::from_name(name)),
            ProviderKind::Module => None,
        };
        Self {
            name: name.to_string(),
            kind,
            dependencies,
            factory,
            selector,
            value: OnceLock::new(),
            factory_guard: Mutex::new(()),
        }
    }

    /// Registration name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Namespace of the provider
    pub fn kind(&self) -> ProviderKind {
        self.kind
    }

    /// Declared dependencies, in order
    pub fn dependencies(&self) -> &[DependencyRef<V>] {
        &self.dependencies
    }

    /// Registered factory, before any override
    pub fn factory(&self) -> Option<&Factory<V>> {
        self.factory.as_ref()
    }

    /// Structural selector; only views have one
    pub fn selector(&self) -> Option<&Selector> {
        self.selector.as_ref()
    }

    /// Whether the factory has already run
    pub fn is_resolved(&self) -> bool {
        self.value.get().is_some()
    }

    /// Cached value, once resolved
    pub fn value(&self) -> Option<&V> {
        self.value.get()
    }

    /// Serializes factory runs for this provider
    pub(crate) fn lock_factory(&self) -> MutexGuard<'_, ()> {
        self.factory_guard
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Store the first computed value; later values are dropped
    pub(crate) fn memoize(&self, value: V) -> &V {
        self.value.get_or_init(|| value)
    }
}

impl<V> fmt::Debug for Provider<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provider")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("dependencies", &self.dependencies)
            .field("selector", &self.selector)
            .field("resolved", &self.is_resolved())
            .finish()
    }
}

/// Name → provider mapping for one namespace
pub struct Registry<V> {
    kind: ProviderKind,
    providers: DashMap<String, Arc<Provider<V>>>,
    order: RwLock<Vec<Arc<Provider<V>>>>,
}

impl<V> Registry<V> {
    /// Create an empty registry for `kind`
    pub fn new(kind: ProviderKind) -> Self {
        Self {
            kind,
            providers: DashMap::new(),
            order: RwLock::new(Vec::new()),
        }
    }

    /// Namespace served by this registry
    pub fn kind(&self) -> ProviderKind {
        self.kind
    }

    /// Register a provider
    ///
    /// Fails with `DuplicateName` when `name` is taken. A view whose spec
    /// yields no factory fails with `MissingConstructor`.
    pub fn register(&self, name: &str, spec: ProviderSpec<V>) -> Result<Arc<Provider<V>>> {
        match self.providers.entry(name.to_string()) {
            Entry::Occupied(_) => Err(Error::duplicate_name(self.kind, name)),
            Entry::Vacant(slot) => {
                if self.kind == ProviderKind::View && !spec.yields_factory() {
                    return Err(Error::missing_constructor(name));
                }
                let provider = Arc::new(Provider::new(name, self.kind, spec));
                slot.insert(Arc::clone(&provider));
                self.order
                    .write()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push(Arc::clone(&provider));
                debug!(kind = %self.kind, name = %name, "Registered provider");
                Ok(provider)
            }
        }
    }

    /// Look up a provider without resolving it
    pub fn get(&self, name: &str) -> Option<Arc<Provider<V>>> {
        self.providers.get(name).map(|entry| Arc::clone(entry.value()))
    }

    /// Whether `name` is registered
    pub fn contains(&self, name: &str) -> bool {
        self.providers.contains_key(name)
    }

    /// Number of registered providers
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Snapshot of every provider in registration order
    pub fn providers(&self) -> Vec<Arc<Provider<V>>> {
        self.order
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Registered names in registration order
    pub fn names(&self) -> Vec<String> {
        self.providers()
            .iter()
            .map(|p| p.name().to_string())
            .collect()
    }
}

impl<V> fmt::Debug for Registry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("kind", &self.kind)
            .field("providers", &self.names())
            .finish()
    }
}
