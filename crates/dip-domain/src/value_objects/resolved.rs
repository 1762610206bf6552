//! Resolution outcomes and factory arguments

use std::any::{Any, type_name};
use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};

/// Type-erased module value
pub type Instance = Arc<dyn Any + Send + Sync>;

/// Wrap any value as a module [`Instance`]
pub fn instance<T: Any + Send + Sync>(value: T) -> Instance {
    Arc::new(value)
}

/// Outcome of resolving a provider name
///
/// `Missing` and `Empty` are distinct: the first means nothing was registered
/// under the name, the second that a provider exists but has no factory yet.
/// Neither is an error; factories receive them as absent arguments.
pub enum Resolved<V> {
    /// No provider registered under the name
    Missing,
    /// Provider registered with dependencies only, no factory
    Empty,
    /// Resolved value
    Value(V),
}

impl<V> Resolved<V> {
    /// Whether the name was unknown
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Whether a value was produced
    pub fn is_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    /// Borrow the value, if any
    pub fn value(&self) -> Option<&V> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Take the value, if any
    pub fn into_value(self) -> Option<V> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }
}

impl Resolved<Instance> {
    /// Downcast the resolved value
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.value().and_then(|v| Arc::clone(v).downcast::<T>().ok())
    }
}

impl<V: Clone> Clone for Resolved<V> {
    fn clone(&self) -> Self {
        match self {
            Self::Missing => Self::Missing,
            Self::Empty => Self::Empty,
            Self::Value(v) => Self::Value(v.clone()),
        }
    }
}

impl<V> fmt::Debug for Resolved<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => f.write_str("Missing"),
            Self::Empty => f.write_str("Empty"),
            Self::Value(_) => f.write_str("Value(..)"),
        }
    }
}

/// Positional arguments handed to a factory, in declared order
pub struct Args<V> {
    values: Vec<Resolved<V>>,
}

impl<V> Args<V> {
    /// Build from resolved dependencies
    pub fn new(values: Vec<Resolved<V>>) -> Self {
        Self { values }
    }

    /// No arguments
    pub fn empty() -> Self {
        Self { values: Vec::new() }
    }

    /// Number of arguments
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no arguments
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Resolution outcome at `position`
    pub fn resolved(&self, position: usize) -> Option<&Resolved<V>> {
        self.values.get(position)
    }

    /// Value at `position`, if it resolved to one
    pub fn value(&self, position: usize) -> Option<&V> {
        self.values.get(position).and_then(Resolved::value)
    }

    /// Iterate over every argument
    pub fn iter(&self) -> impl Iterator<Item = &Resolved<V>> {
        self.values.iter()
    }
}

impl Args<Instance> {
    /// Typed argument at `position`; `None` when absent or of another type
    pub fn get<T: Any + Send + Sync>(&self, position: usize) -> Option<Arc<T>> {
        self.values.get(position).and_then(Resolved::downcast)
    }

    /// Typed argument at `position`, failing when absent or of another type
    pub fn require<T: Any + Send + Sync>(&self, position: usize) -> Result<Arc<T>> {
        let value = self
            .value(position)
            .ok_or(Error::MissingDependency { position })?;
        Arc::clone(value)
            .downcast::<T>()
            .map_err(|_| Error::TypeMismatch {
                position,
                expected: type_name::<T>(),
            })
    }
}

impl<V> fmt::Debug for Args<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.values.iter()).finish()
    }
}
