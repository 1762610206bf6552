//! Structural selectors derived from view names

use serde::{Deserialize, Serialize};
use std::fmt;

/// Dash-cased selector a view is matched by
///
/// `userCard` derives `user-card`. Two names that dash-case to the same
/// selector will both bind to the same elements.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selector(String);

impl Selector {
    /// Derive the selector for a registration name
    pub fn from_name(name: &str) -> Self {
        Self(to_dash_case(name))
    }

    /// Selector text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Class-like marker for this selector
    pub fn class(&self) -> Marker {
        Marker::Class(self.clone())
    }

    /// Attribute-like marker for this selector
    pub fn attribute(&self) -> Marker {
        Marker::Attribute(self.clone())
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Selector {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// How a selector is carried by an element
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "selector", rename_all = "lowercase")]
pub enum Marker {
    /// `class="user-card"`
    Class(Selector),
    /// `<div user-card>`
    Attribute(Selector),
}

impl Marker {
    /// Selector carried by the marker
    pub fn selector(&self) -> &Selector {
        match self {
            Self::Class(s) | Self::Attribute(s) => s,
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class(s) => write!(f, ".{s}"),
            Self::Attribute(s) => write!(f, "[{s}]"),
        }
    }
}

/// Convert a camelCase name to dash-case
///
/// Every ASCII uppercase letter after the first character becomes `-` plus
/// its lowercase form. A leading one is only lowercased. Other characters,
/// non-ASCII capitals included, are kept as they are.
pub fn to_dash_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, ch) in name.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if i > 0 {
                out.push('-');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}
