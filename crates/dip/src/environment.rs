//! Host environment readiness
//!
//! The host signals readiness exactly once. On that signal the application
//! starts, then every view in the document is compiled and activated with
//! the lazily injected scope.

use dip_application::Application;
use dip_domain::error::Result;
use dip_domain::ports::DocumentHost;
use dip_domain::value_objects::ElementRef;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, warn};

/// One-shot ready trigger
#[derive(Debug, Default)]
pub struct Environment {
    delivered: AtomicBool,
}

impl Environment {
    /// Trigger that has not fired yet
    pub const fn new() -> Self {
        Self {
            delivered: AtomicBool::new(false),
        }
    }

    /// Whether the ready signal has been delivered
    pub fn is_delivered(&self) -> bool {
        self.delivered.load(Ordering::SeqCst)
    }

    /// Deliver the ready signal
    ///
    /// Attaches `host`, starts `app` and activates the whole document.
    /// Returns the activated root, or `Ok(None)` when the signal was already
    /// delivered. A failed delivery still counts as the one delivery.
    pub fn deliver_ready(
        &self,
        app: &Application,
        host: Arc<dyn DocumentHost>,
    ) -> Result<Option<ElementRef>> {
        if self.delivered.swap(true, Ordering::SeqCst) {
            warn!(app = %app.name(), "Ready signal already delivered; ignoring");
            return Ok(None);
        }

        app.attach_host(host);
        app.start()?;
        let activation = app.compile(None)?;
        let root = activation.activate(None)?;
        info!(
            app = %app.name(),
            views = activation.matches().len(),
            "Document activated"
        );
        Ok(Some(root))
    }
}
