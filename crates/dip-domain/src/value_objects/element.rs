//! Host element handles

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Key/value data attributes read from an element
pub type DataAttributes = BTreeMap<String, String>;

/// Opaque, cheaply clonable handle to an element owned by a host document
///
/// Hosts put their own node type inside and get it back with
/// [`ElementRef::downcast_ref`]. Equality is identity.
#[derive(Clone)]
pub struct ElementRef(Arc<dyn Any + Send + Sync>);

impl ElementRef {
    /// Wrap a shared host node
    pub fn new<T: Any + Send + Sync>(node: Arc<T>) -> Self {
        Self(node)
    }

    /// Borrow the host node
    pub fn downcast_ref<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    /// Whether both handles point at the same element
    pub fn same(&self, other: &ElementRef) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.0), Arc::as_ptr(&other.0))
    }
}

impl PartialEq for ElementRef {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl Eq for ElementRef {}

impl fmt::Debug for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementRef({:p})", Arc::as_ptr(&self.0))
    }
}
