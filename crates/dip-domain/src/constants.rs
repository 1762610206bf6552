//! Domain constants

/// Module the compiler injects when activation is given no scope
pub const SCOPE_MODULE: &str = "scope";

/// Built-in module exposing the late-injection handle
pub const INJECT_MODULE: &str = "inject";

/// Built-in module exposing the value inspection helpers
pub const UTILITY_MODULE: &str = "utility";
