//! Application
//!
//! One application instance: a module registry, a view registry, a lifecycle
//! controller and the document host views are compiled against.
//!
//! ## Usage
//!
//! ```ignore
//! let app = Application::new("main");
//! app.module("name", ProviderSpec::factory(|_| Ok(instance("Ada".to_string()))))?
//!    .module(
//!        "greeter",
//!        ProviderSpec::new().dependency("name").with_factory(|args| {
//!            let name = args.require::<String>(0)?;
//!            Ok(instance(format!("hi {name}")))
//!        }),
//!    )?;
//! app.start()?;
//! let greeting = app.get::<String>("greeter")?;
//! ```

use dip_domain::constants::{INJECT_MODULE, SCOPE_MODULE, UTILITY_MODULE};
use dip_domain::error::{Error, Result};
use dip_domain::ports::DocumentHost;
use dip_domain::value_objects::{
    Args, ElementRef, Instance, LifecycleState, Phase, ProviderKind, ProviderSpec, Resolved,
    ViewConstructor, instance,
};
use std::any::Any;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info, warn};

use crate::builtins::{Injector, Utility};
use crate::compiler::{Activation, collect_matches};
use crate::lifecycle::{Injection, Lifecycle};
use crate::registry::{Provider, Registry};
use crate::resolver::Resolver;

/// Per-application settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationOptions {
    /// Module injected as the scope when activation is given none
    pub scope_module: String,
}

impl Default for ApplicationOptions {
    fn default() -> Self {
        Self {
            scope_module: SCOPE_MODULE.to_string(),
        }
    }
}

pub(crate) struct ApplicationInner {
    name: String,
    options: ApplicationOptions,
    modules: Registry<Instance>,
    views: Registry<ViewConstructor>,
    lifecycle: Lifecycle,
    host: RwLock<Option<Arc<dyn DocumentHost>>>,
}

/// Handle to one application instance; clones share the same state
#[derive(Clone)]
pub struct Application {
    inner: Arc<ApplicationInner>,
}

impl Application {
    /// New application with default options
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self::with_options(name, ApplicationOptions::default())
    }

    /// New application with the built-in `inject` and `utility` modules
    pub fn with_options<S: Into<String>>(name: S, options: ApplicationOptions) -> Self {
        let app = Self {
            inner: Arc::new(ApplicationInner {
                name: name.into(),
                options,
                modules: Registry::new(ProviderKind::Module),
                views: Registry::new(ProviderKind::View),
                lifecycle: Lifecycle::new(),
                host: RwLock::new(None),
            }),
        };
        app.register_builtins();
        info!(app = %app.name(), "Application created");
        app
    }

    pub(crate) fn from_inner(inner: Arc<ApplicationInner>) -> Self {
        Self { inner }
    }

    fn register_builtins(&self) {
        let injector = Injector::new(Arc::downgrade(&self.inner));
        let builtins = [
            (
                INJECT_MODULE,
                ProviderSpec::factory(move |_| Ok(instance(injector.clone()))),
            ),
            (
                UTILITY_MODULE,
                ProviderSpec::factory(|_| Ok(instance(Utility))),
            ),
        ];
        for (name, spec) in builtins {
            if let Err(error) = self.inner.modules.register(name, spec) {
                warn!(app = %self.name(), %error, "Built-in module not registered");
            }
        }
    }

    /// Application name
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Options the application was created with
    pub fn options(&self) -> &ApplicationOptions {
        &self.inner.options
    }

    /// Current lifecycle state
    pub fn state(&self) -> LifecycleState {
        self.inner.lifecycle.state()
    }

    /// Whether the lifecycle transition completed
    pub fn is_ready(&self) -> bool {
        self.inner.lifecycle.is_ready()
    }

    /// Number of deferred tasks still queued
    pub fn pending(&self) -> usize {
        self.inner.lifecycle.pending()
    }

    /// Number of deferred tasks still queued for `phase`
    pub fn pending_in(&self, phase: Phase) -> usize {
        self.inner.lifecycle.pending_in(phase)
    }

    /// Late-injection handle for this application
    pub fn injector(&self) -> Injector {
        Injector::new(Arc::downgrade(&self.inner))
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Register a module
    pub fn module(&self, name: &str, spec: ProviderSpec<Instance>) -> Result<&Self> {
        self.inner.modules.register(name, spec)?;
        Ok(self)
    }

    /// Register a view; its selector is the dash-cased name
    pub fn view(&self, name: &str, spec: ProviderSpec<ViewConstructor>) -> Result<&Self> {
        self.inner.views.register(name, spec)?;
        Ok(self)
    }

    /// Queue a configuration callback
    ///
    /// Fails with `QueueClosed` once the application is ready.
    pub fn config<F>(&self, dependencies: &[&str], f: F) -> Result<&Self>
    where
        F: FnOnce(&Args<Instance>) -> Result<()> + Send + 'static,
    {
        self.inner
            .lifecycle
            .enqueue(Phase::Config, owned(dependencies), Box::new(f))?;
        Ok(self)
    }

    /// Queue a run callback
    ///
    /// Fails with `QueueClosed` once the application is ready.
    pub fn run<F>(&self, dependencies: &[&str], f: F) -> Result<&Self>
    where
        F: FnOnce(&Args<Instance>) -> Result<()> + Send + 'static,
    {
        self.inner
            .lifecycle
            .enqueue(Phase::Run, owned(dependencies), Box::new(f))?;
        Ok(self)
    }

    /// Call `f` with resolved modules now if ready, otherwise once ready
    pub fn inject<R, F>(&self, dependencies: &[&str], f: F) -> Result<Injection<R>>
    where
        F: FnOnce(&Args<Instance>) -> Result<R> + Send + 'static,
    {
        self.inner
            .lifecycle
            .inject(&self.inner.modules, owned(dependencies), f)
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Resolve all providers, drain every queue and become ready
    ///
    /// Returns `Ok(false)` when the application was already ready.
    pub fn start(&self) -> Result<bool> {
        self.inner
            .lifecycle
            .start(&self.inner.modules, &self.inner.views)
    }

    /// Resolve all providers and become ready without running queued tasks
    pub fn override_start(&self) -> Result<bool> {
        self.inner
            .lifecycle
            .override_start(&self.inner.modules, &self.inner.views)
    }

    // ========================================================================
    // Lookup and resolution
    // ========================================================================

    /// Module record, without resolving it
    pub fn get_module(&self, name: &str) -> Option<Arc<Provider<Instance>>> {
        self.inner.modules.get(name)
    }

    /// View record, without resolving it
    pub fn get_view(&self, name: &str) -> Option<Arc<Provider<ViewConstructor>>> {
        self.inner.views.get(name)
    }

    /// Registered module names in registration order
    pub fn module_names(&self) -> Vec<String> {
        self.inner.modules.names()
    }

    /// Registered view names in registration order
    pub fn view_names(&self) -> Vec<String> {
        self.inner.views.names()
    }

    /// Resolve a module, running its factory on first use
    pub fn resolve_module(&self, name: &str) -> Result<Resolved<Instance>> {
        Resolver::new(&self.inner.modules).resolve(name)
    }

    /// Resolve a view to its constructor
    pub fn resolve_view(&self, name: &str) -> Result<Resolved<ViewConstructor>> {
        Resolver::new(&self.inner.views).resolve(name)
    }

    /// Resolve a module and downcast it
    ///
    /// `Ok(None)` when the module is absent, has no factory, or holds
    /// another type.
    pub fn get<T: Any + Send + Sync>(&self, name: &str) -> Result<Option<Arc<T>>> {
        Ok(self.resolve_module(name)?.downcast::<T>())
    }

    // ========================================================================
    // Views
    // ========================================================================

    /// Set the document views are compiled against
    pub fn attach_host(&self, host: Arc<dyn DocumentHost>) -> &Self {
        *self
            .inner
            .host
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(host);
        debug!(app = %self.name(), "Document host attached");
        self
    }

    /// Attached document, if any
    pub fn host(&self) -> Option<Arc<dyn DocumentHost>> {
        self.inner
            .host
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Bind registered views to `root` (or the document root) and its
    /// descendants
    ///
    /// Fails with `CompileTargetMissing` when no document is attached or the
    /// document has no root to default to.
    pub fn compile(&self, root: Option<ElementRef>) -> Result<Activation> {
        let host = self.host().ok_or(Error::CompileTargetMissing)?;
        let root = root
            .or_else(|| host.root())
            .ok_or(Error::CompileTargetMissing)?;
        let matches = collect_matches(&self.inner.views, host.as_ref(), &root)?;
        Ok(Activation::new(self.clone(), root, matches))
    }

    /// Scope used when activation is given none
    pub(crate) fn acquire_scope(&self) -> Result<Option<Instance>> {
        let scope_module = self.inner.options.scope_module.as_str();
        let injection = self.inject(&[scope_module], |args: &Args<Instance>| {
            Ok(args.value(0).cloned())
        })?;
        if injection.is_deferred() {
            debug!(app = %self.name(), "Scope requested before ready; activating without it");
        }
        Ok(injection.into_option().flatten())
    }
}

fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| (*n).to_string()).collect()
}

impl fmt::Debug for Application {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Application")
            .field("name", &self.inner.name)
            .field("state", &self.state())
            .field("modules", &self.inner.modules)
            .field("views", &self.inner.views)
            .field("pending", &self.pending())
            .finish()
    }
}
