//! Built-in modules
//!
//! Every application registers two modules on construction:
//!
//! | Name | Value |
//! |------|-------|
//! | `inject` | [`Injector`], for factories that need to schedule late injections |
//! | `utility` | [`Utility`], value inspection helpers |

use dip_domain::error::{Error, Result};
use dip_domain::value_objects::selector::to_dash_case;
use dip_domain::value_objects::{Args, Instance, Resolved};
use std::any::Any;
use std::fmt;
use std::sync::Weak;

use crate::application::{Application, ApplicationInner};
use crate::lifecycle::Injection;

/// Late-injection handle bound to its application
///
/// Holds a weak reference so a module value never keeps its own
/// application alive.
#[derive(Clone)]
pub struct Injector {
    app: Weak<ApplicationInner>,
}

impl Injector {
    pub(crate) fn new(app: Weak<ApplicationInner>) -> Self {
        Self { app }
    }

    /// Same as [`Application::inject`]
    pub fn inject<R, F>(&self, dependencies: &[&str], f: F) -> Result<Injection<R>>
    where
        F: FnOnce(&Args<Instance>) -> Result<R> + Send + 'static,
    {
        let inner = self
            .app
            .upgrade()
            .ok_or_else(|| Error::internal("Application behind injector was dropped"))?;
        Application::from_inner(inner).inject(dependencies, f)
    }
}

impl fmt::Debug for Injector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Injector")
            .field("attached", &(self.app.strong_count() > 0))
            .finish()
    }
}

/// Value inspection helpers
#[derive(Debug, Clone, Copy, Default)]
pub struct Utility;

impl Utility {
    /// Whether `value` holds a `T`
    pub fn is<T: Any>(&self, value: &Instance) -> bool {
        (**value).is::<T>()
    }

    /// Whether `value` holds a string
    pub fn is_string(&self, value: &Instance) -> bool {
        self.is::<String>(value) || self.is::<&'static str>(value)
    }

    /// Whether `value` holds a primitive number
    pub fn is_number(&self, value: &Instance) -> bool {
        self.is::<i8>(value)
            || self.is::<i16>(value)
            || self.is::<i32>(value)
            || self.is::<i64>(value)
            || self.is::<i128>(value)
            || self.is::<isize>(value)
            || self.is::<u8>(value)
            || self.is::<u16>(value)
            || self.is::<u32>(value)
            || self.is::<u64>(value)
            || self.is::<u128>(value)
            || self.is::<usize>(value)
            || self.is::<f32>(value)
            || self.is::<f64>(value)
    }

    /// Whether `value` holds a bool
    pub fn is_bool(&self, value: &Instance) -> bool {
        self.is::<bool>(value)
    }

    /// Whether `value` holds a list of instances
    pub fn is_list(&self, value: &Instance) -> bool {
        self.is::<Vec<Instance>>(value)
    }

    /// Whether a name resolved to anything registered
    pub fn is_defined<V>(&self, resolved: &Resolved<V>) -> bool {
        !resolved.is_missing()
    }

    /// Convert a camelCase name to dash-case
    pub fn to_dash_case(&self, name: &str) -> String {
        to_dash_case(name)
    }
}
