//! Lifecycle states and queue phases

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of one application instance
///
/// Transitions are monotonic: `Registering` → `Running` → `Ready`. A failed
/// transition falls back to `Registering`; `Ready` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleState {
    /// Providers and deferred tasks are being registered
    #[default]
    Registering,
    /// Inside the start transition, draining queues
    Running,
    /// Every provider has been resolved; queues are closed
    Ready,
}

impl LifecycleState {
    /// Whether the application reached its terminal state
    pub fn is_ready(self) -> bool {
        self == Self::Ready
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Registering => write!(f, "registering"),
            Self::Running => write!(f, "running"),
            Self::Ready => write!(f, "ready"),
        }
    }
}

/// Queue a deferred task belongs to
///
/// Phases drain in declaration order during `start`, with module resolution
/// before `Config` and view resolution between `Run` and `Inject`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Configuration callbacks
    Config,
    /// Run callbacks
    Run,
    /// Late injections requested before ready
    Inject,
}

impl Phase {
    /// All phases in drain order
    pub const ORDER: [Phase; 3] = [Phase::Config, Phase::Run, Phase::Inject];
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config => write!(f, "config"),
            Self::Run => write!(f, "run"),
            Self::Inject => write!(f, "inject"),
        }
    }
}
