//! Lifecycle Controller
//!
//! Owns the pending task queue and the lifecycle state of one application.
//!
//! ## Transition
//!
//! ```text
//! Registering ── start() ──► Running ──────────────────────────────► Ready
//!                              │ 1. resolve every module
//!                              │ 2. drain Config tasks (FIFO)
//!                              │ 3. drain Run tasks (FIFO)
//!                              │ 4. resolve every view
//!                              │ 5. drain Inject tasks (FIFO)
//!                              └─ failure ──► Registering
//! ```
//!
//! Tasks share one queue tagged by [`Phase`]. Each task runs at most once;
//! whatever is still queued when the transition completes is discarded.

use dip_domain::error::{Error, Result};
use dip_domain::value_objects::{Args, Instance, LifecycleState, Phase, ViewConstructor};
use std::collections::VecDeque;
use std::fmt;
use std::sync::{Mutex, PoisonError, RwLock};
use tracing::{debug, info, warn};

use crate::registry::Registry;
use crate::resolver::Resolver;

/// Deferred callback; receives its dependencies resolved against modules
pub type TaskCallback = Box<dyn FnOnce(&Args<Instance>) -> Result<()> + Send>;

/// A deferred call waiting for the lifecycle transition
pub struct PendingTask {
    phase: Phase,
    dependencies: Vec<String>,
    callback: TaskCallback,
}

impl PendingTask {
    /// Create a task for `phase`
    pub fn new(phase: Phase, dependencies: Vec<String>, callback: TaskCallback) -> Self {
        Self {
            phase,
            dependencies,
            callback,
        }
    }

    /// Queue the task belongs to
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Module names resolved before the callback runs
    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    fn execute(self, modules: &Registry<Instance>) -> Result<()> {
        let args = Resolver::new(modules).resolve_names(&self.dependencies)?;
        (self.callback)(&args)
    }
}

impl fmt::Debug for PendingTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingTask")
            .field("phase", &self.phase)
            .field("dependencies", &self.dependencies)
            .finish()
    }
}

/// Result of a late injection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Injection<R> {
    /// Queued until the application becomes ready; the result is discarded
    Deferred,
    /// Ran immediately because the application was ready
    Completed(R),
}

impl<R> Injection<R> {
    /// Result of the call, if it ran
    pub fn into_option(self) -> Option<R> {
        match self {
            Self::Deferred => None,
            Self::Completed(r) => Some(r),
        }
    }

    /// Whether the call was queued
    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred)
    }
}

/// State machine plus tagged pending queue
#[derive(Default)]
pub struct Lifecycle {
    state: RwLock<LifecycleState>,
    queue: Mutex<VecDeque<PendingTask>>,
}

impl Lifecycle {
    /// Fresh lifecycle in `Registering`
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state
    pub fn state(&self) -> LifecycleState {
        *self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether the transition has completed
    pub fn is_ready(&self) -> bool {
        self.state().is_ready()
    }

    /// Number of queued tasks
    pub fn pending(&self) -> usize {
        self.lock_queue().len()
    }

    /// Number of queued tasks for `phase`
    pub fn pending_in(&self, phase: Phase) -> usize {
        self.lock_queue().iter().filter(|t| t.phase == phase).count()
    }

    /// Queue a configuration or run task
    ///
    /// Fails with `QueueClosed` once the application is ready. Inject tasks
    /// go through [`Lifecycle::inject`] instead.
    pub fn enqueue(
        &self,
        phase: Phase,
        dependencies: Vec<String>,
        callback: TaskCallback,
    ) -> Result<()> {
        if phase != Phase::Inject && self.is_ready() {
            return Err(Error::queue_closed(phase));
        }
        debug!(%phase, dependencies = ?dependencies, "Queued task");
        self.lock_queue()
            .push_back(PendingTask::new(phase, dependencies, callback));
        Ok(())
    }

    /// Run `f` now when ready, otherwise queue it for the inject phase
    pub fn inject<R, F>(
        &self,
        modules: &Registry<Instance>,
        dependencies: Vec<String>,
        f: F,
    ) -> Result<Injection<R>>
    where
        F: FnOnce(&Args<Instance>) -> Result<R> + Send + 'static,
    {
        if self.is_ready() {
            let args = Resolver::new(modules).resolve_names(&dependencies)?;
            return f(&args).map(Injection::Completed);
        }
        self.enqueue(
            Phase::Inject,
            dependencies,
            Box::new(move |args: &Args<Instance>| f(args).map(drop)),
        )?;
        Ok(Injection::Deferred)
    }

    /// Resolve everything, drain every queue and become ready
    ///
    /// Returns `false` without doing anything unless the state is
    /// `Registering`, so repeated or reentrant calls are harmless.
    pub fn start(
        &self,
        modules: &Registry<Instance>,
        views: &Registry<ViewConstructor>,
    ) -> Result<bool> {
        self.transition(modules, views, true)
    }

    /// Resolve every module and view and become ready without running any
    /// queued task
    pub fn override_start(
        &self,
        modules: &Registry<Instance>,
        views: &Registry<ViewConstructor>,
    ) -> Result<bool> {
        self.transition(modules, views, false)
    }

    fn transition(
        &self,
        modules: &Registry<Instance>,
        views: &Registry<ViewConstructor>,
        drain: bool,
    ) -> Result<bool> {
        if !self.begin() {
            debug!(state = %self.state(), "Lifecycle transition skipped");
            return Ok(false);
        }
        info!(
            modules = modules.len(),
            views = views.len(),
            pending = self.pending(),
            drain,
            "Starting lifecycle transition"
        );

        if let Err(error) = self.run_phases(modules, views, drain) {
            self.set_state(LifecycleState::Registering);
            return Err(error);
        }

        let discarded = self.finish();
        if drain && discarded > 0 {
            warn!(discarded, "Discarded tasks queued after their phase drained");
        } else if discarded > 0 {
            debug!(discarded, "Discarded queued tasks without running them");
        }
        info!("Application ready");
        Ok(true)
    }

    fn run_phases(
        &self,
        modules: &Registry<Instance>,
        views: &Registry<ViewConstructor>,
        drain: bool,
    ) -> Result<()> {
        Resolver::new(modules).resolve_all()?;
        if drain {
            self.drain(Phase::Config, modules)?;
            self.drain(Phase::Run, modules)?;
        }
        Resolver::new(views).resolve_all()?;
        if drain {
            self.drain(Phase::Inject, modules)?;
        }
        Ok(())
    }

    fn drain(&self, phase: Phase, modules: &Registry<Instance>) -> Result<usize> {
        let mut executed = 0;
        while let Some(task) = self.take_next(phase) {
            task.execute(modules)?;
            executed += 1;
        }
        debug!(%phase, executed, "Drained queue");
        Ok(executed)
    }

    fn take_next(&self, phase: Phase) -> Option<PendingTask> {
        let mut queue = self.lock_queue();
        let index = queue.iter().position(|t| t.phase == phase)?;
        queue.remove(index)
    }

    fn begin(&self) -> bool {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if *state != LifecycleState::Registering {
            return false;
        }
        *state = LifecycleState::Running;
        true
    }

    fn finish(&self) -> usize {
        self.set_state(LifecycleState::Ready);
        let mut queue = self.lock_queue();
        let discarded = queue.len();
        queue.clear();
        discarded
    }

    fn set_state(&self, next: LifecycleState) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = next;
    }

    fn lock_queue(&self) -> std::sync::MutexGuard<'_, VecDeque<PendingTask>> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lifecycle")
            .field("state", &self.state())
            .field("pending", &self.pending())
            .finish()
    }
}
