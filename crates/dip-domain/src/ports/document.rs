//! Document Host Port
//!
//! Structural querying over the host document. The view compiler depends
//! only on this trait, so a browser binding and an in-memory tree are
//! interchangeable.

use crate::value_objects::{DataAttributes, ElementRef, Marker};

/// Structural selector matching and traversal over a host document
pub trait DocumentHost: Send + Sync {
    /// Default root used when `compile` is called without one
    fn root(&self) -> Option<ElementRef>;

    /// Whether `element` itself carries `marker`
    fn matches(&self, element: &ElementRef, marker: &Marker) -> bool;

    /// Every descendant of `root` carrying `marker`, in document order
    ///
    /// `root` itself is never part of the result.
    fn find_descendants(&self, root: &ElementRef, marker: &Marker) -> Vec<ElementRef>;

    /// Data attributes of `element` as they are right now
    fn data_attributes(&self, element: &ElementRef) -> DataAttributes;
}
