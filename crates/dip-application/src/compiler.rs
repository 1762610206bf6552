//! View Compiler
//!
//! Binds registered views to the elements of a subtree.
//!
//! ## Match order
//!
//! ```text
//! for view in registration order
//!     root carries .selector        → match(root)
//!     descendants carrying .selector → match(each)
//!     root carries [selector]       → match(root)
//!     descendants carrying [selector] → match(each)
//! ```
//!
//! An element carrying both forms is bound twice. Data attributes are
//! captured while compiling, so later changes to the element do not reach
//! the constructor.

use dip_domain::error::Result;
use dip_domain::ports::DocumentHost;
use dip_domain::value_objects::{
    DataAttributes, ElementRef, Instance, Marker, Resolved, ViewConstructor, ViewContext,
};
use std::fmt;
use tracing::{debug, trace};

use crate::application::Application;
use crate::registry::Registry;
use crate::resolver::Resolver;

/// One bound view: constructor plus the element snapshot it will receive
#[derive(Clone)]
pub struct ViewMatch {
    view: String,
    marker: Marker,
    element: ElementRef,
    data: DataAttributes,
    constructor: ViewConstructor,
}

impl ViewMatch {
    fn capture(
        host: &dyn DocumentHost,
        view: &str,
        marker: &Marker,
        element: ElementRef,
        constructor: &ViewConstructor,
    ) -> Self {
        trace!(view = %view, marker = %marker, "Matched element");
        Self {
            view: view.to_string(),
            marker: marker.clone(),
            data: host.data_attributes(&element),
            element,
            constructor: constructor.clone(),
        }
    }

    /// Name of the bound view
    pub fn view(&self) -> &str {
        &self.view
    }

    /// Marker the element matched by
    pub fn marker(&self) -> &Marker {
        &self.marker
    }

    /// Host element
    pub fn element(&self) -> &ElementRef {
        &self.element
    }

    /// Data attributes captured at compile time
    pub fn data(&self) -> &DataAttributes {
        &self.data
    }

    fn instantiate(&self, scope: Option<&Instance>) -> Result<()> {
        let context = ViewContext {
            element: self.element.clone(),
            scope: scope.cloned(),
            data: self.data.clone(),
        };
        (self.constructor)(&context)
    }
}

impl fmt::Debug for ViewMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewMatch")
            .field("view", &self.view)
            .field("marker", &self.marker)
            .field("element", &self.element)
            .field("data", &self.data)
            .finish()
    }
}

/// Find every view bound to `root` or its descendants
///
/// Views are resolved on demand, so compiling before `start` still yields
/// constructors.
pub fn collect_matches(
    views: &Registry<ViewConstructor>,
    host: &dyn DocumentHost,
    root: &ElementRef,
) -> Result<Vec<ViewMatch>> {
    let resolver = Resolver::new(views);
    let mut matches = Vec::new();

    for view in views.providers() {
        let Some(selector) = view.selector() else {
            continue;
        };
        let Resolved::Value(constructor) = resolver.resolve_provider(&view)? else {
            debug!(view = %view.name(), "View resolved to no constructor");
            continue;
        };

        for marker in [selector.class(), selector.attribute()] {
            if host.matches(root, &marker) {
                matches.push(ViewMatch::capture(
                    host,
                    view.name(),
                    &marker,
                    root.clone(),
                    &constructor,
                ));
            }
            for element in host.find_descendants(root, &marker) {
                matches.push(ViewMatch::capture(
                    host,
                    view.name(),
                    &marker,
                    element,
                    &constructor,
                ));
            }
        }
    }

    debug!(matches = matches.len(), "Compiled views");
    Ok(matches)
}

/// Compiled subtree, ready to instantiate its views
pub struct Activation {
    app: Application,
    root: ElementRef,
    matches: Vec<ViewMatch>,
}

impl Activation {
    pub(crate) fn new(app: Application, root: ElementRef, matches: Vec<ViewMatch>) -> Self {
        Self { app, root, matches }
    }

    /// Matches in instantiation order
    pub fn matches(&self) -> &[ViewMatch] {
        &self.matches
    }

    /// Root the subtree was compiled from
    pub fn root(&self) -> &ElementRef {
        &self.root
    }

    /// Instantiate every match against `scope`
    ///
    /// Without a scope, the application's scope module is injected. Before
    /// the application is ready that injection is only queued, and the views
    /// are instantiated with no scope. Returns the compiled root.
    pub fn activate(&self, scope: Option<Instance>) -> Result<ElementRef> {
        let scope = match scope {
            Some(scope) => Some(scope),
            None => self.app.acquire_scope()?,
        };
        debug!(
            matches = self.matches.len(),
            has_scope = scope.is_some(),
            "Activating views"
        );
        for view_match in &self.matches {
            view_match.instantiate(scope.as_ref())?;
        }
        Ok(self.root.clone())
    }
}

impl fmt::Debug for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Activation")
            .field("app", &self.app.name())
            .field("root", &self.root)
            .field("matches", &self.matches)
            .finish()
    }
}
