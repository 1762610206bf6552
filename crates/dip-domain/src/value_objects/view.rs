//! View constructors and their activation context

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::value_objects::element::{DataAttributes, ElementRef};
use crate::value_objects::resolved::Instance;

/// Constructor a resolved view hands back; invoked once per matched element
pub type ViewConstructor = Arc<dyn Fn(&ViewContext) -> Result<()> + Send + Sync>;

/// Everything a view constructor receives on activation
#[derive(Clone)]
pub struct ViewContext {
    /// Element the view was bound to
    pub element: ElementRef,
    /// Application scope, absent when it could not be acquired
    pub scope: Option<Instance>,
    /// Data attributes captured at compile time
    pub data: DataAttributes,
}

impl ViewContext {
    /// Typed scope
    pub fn scope_as<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.scope
            .as_ref()
            .and_then(|s| Arc::clone(s).downcast::<T>().ok())
    }

    /// Captured data attribute
    pub fn data(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }
}

impl fmt::Debug for ViewContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewContext")
            .field("element", &self.element)
            .field("has_scope", &self.scope.is_some())
            .field("data", &self.data)
            .finish()
    }
}
