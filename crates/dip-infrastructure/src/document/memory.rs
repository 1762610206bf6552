//! In-memory document host
//!
//! A small element tree implementing [`DocumentHost`], for hosts without a
//! browser DOM and for tests. Trees are described with [`ElementSpec`],
//! either fluently or as JSON:
//!
//! ```json
//! {
//!   "tag": "main",
//!   "children": [
//!     { "tag": "div", "classes": ["user-card"], "attributes": { "data-user-id": "7" } },
//!     { "tag": "aside", "attributes": { "user-card": "" } }
//!   ]
//! }
//! ```

use dip_domain::error::Result;
use dip_domain::ports::DocumentHost;
use dip_domain::value_objects::{DataAttributes, ElementRef, Marker};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use crate::constants::{DATA_ATTRIBUTE_PREFIX, ID_ATTRIBUTE};

/// Serializable description of an element subtree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementSpec {
    /// Tag name
    pub tag: String,
    /// Class list
    #[serde(default)]
    pub classes: Vec<String>,
    /// Attributes, including `data-*` ones
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    /// Child elements in document order
    #[serde(default)]
    pub children: Vec<ElementSpec>,
}

impl ElementSpec {
    /// Element with `tag` and nothing else
    pub fn new<S: Into<String>>(tag: S) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Add a class
    pub fn with_class<S: Into<String>>(mut self, class: S) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Set an attribute
    pub fn with_attribute<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Set a `data-*` attribute
    pub fn with_data<K: AsRef<str>, V: Into<String>>(self, key: K, value: V) -> Self {
        let key = format!("{DATA_ATTRIBUTE_PREFIX}{}", key.as_ref());
        self.with_attribute(key, value)
    }

    /// Set the `id` attribute
    pub fn with_id<S: Into<String>>(self, id: S) -> Self {
        self.with_attribute(ID_ATTRIBUTE, id)
    }

    /// Append a child
    pub fn with_child(mut self, child: ElementSpec) -> Self {
        self.children.push(child);
        self
    }
}

/// Live element of a [`MemoryDocument`]
///
/// Classes and attributes can change after the tree is built; the child
/// list cannot.
pub struct MemoryElement {
    tag: String,
    classes: RwLock<Vec<String>>,
    attributes: RwLock<BTreeMap<String, String>>,
    children: Vec<Arc<MemoryElement>>,
}

impl MemoryElement {
    fn build(spec: ElementSpec) -> Arc<Self> {
        Arc::new(Self {
            tag: spec.tag,
            classes: RwLock::new(spec.classes),
            attributes: RwLock::new(spec.attributes),
            children: spec.children.into_iter().map(Self::build).collect(),
        })
    }

    /// Tag name
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Snapshot of the class list
    pub fn classes(&self) -> Vec<String> {
        self.classes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether the class list contains `class`
    pub fn has_class(&self, class: &str) -> bool {
        self.classes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|c| c == class)
    }

    /// Add `class` unless already present
    pub fn add_class<S: Into<String>>(&self, class: S) {
        let class = class.into();
        let mut classes = self.classes.write().unwrap_or_else(PoisonError::into_inner);
        if !classes.contains(&class) {
            classes.push(class);
        }
    }

    /// Attribute value
    pub fn attribute(&self, key: &str) -> Option<String> {
        self.attributes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Whether the attribute is present, whatever its value
    pub fn has_attribute(&self, key: &str) -> bool {
        self.attributes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key)
    }

    /// Set an attribute
    pub fn set_attribute<K: Into<String>, V: Into<String>>(&self, key: K, value: V) {
        self.attributes
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), value.into());
    }

    /// Child elements in document order
    pub fn children(&self) -> &[Arc<MemoryElement>] {
        &self.children
    }

    /// `data-*` attributes, prefix stripped and camel-cased
    pub fn data_attributes(&self) -> DataAttributes {
        self.attributes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter_map(|(key, value)| {
                key.strip_prefix(DATA_ATTRIBUTE_PREFIX)
                    .map(|name| (to_camel_case(name), value.clone()))
            })
            .collect()
    }

    fn carries(&self, marker: &Marker) -> bool {
        match marker {
            Marker::Class(selector) => self.has_class(selector.as_str()),
            Marker::Attribute(selector) => self.has_attribute(selector.as_str()),
        }
    }

    fn collect_descendants(&self, marker: &Marker, out: &mut Vec<ElementRef>) {
        for child in &self.children {
            if child.carries(marker) {
                out.push(ElementRef::new(Arc::clone(child)));
            }
            child.collect_descendants(marker, out);
        }
    }

    fn find_by_id(self: &Arc<Self>, id: &str) -> Option<Arc<MemoryElement>> {
        if self.attribute(ID_ATTRIBUTE).as_deref() == Some(id) {
            return Some(Arc::clone(self));
        }
        self.children.iter().find_map(|child| child.find_by_id(id))
    }
}

impl fmt::Debug for MemoryElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryElement")
            .field("tag", &self.tag)
            .field("classes", &self.classes())
            .field("children", &self.children.len())
            .finish()
    }
}

/// `user-id` → `userId`
fn to_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper = false;
    for ch in name.chars() {
        if ch == '-' {
            upper = true;
        } else if upper {
            out.extend(ch.to_uppercase());
            upper = false;
        } else {
            out.push(ch);
        }
    }
    out
}

/// Element tree implementing [`DocumentHost`]
#[derive(Debug)]
pub struct MemoryDocument {
    root: Arc<MemoryElement>,
}

impl MemoryDocument {
    /// Build a document whose root is `root`
    pub fn new(root: ElementSpec) -> Self {
        Self {
            root: MemoryElement::build(root),
        }
    }

    /// Build a document from its JSON description
    pub fn from_json(json: &str) -> Result<Self> {
        let spec: ElementSpec = serde_json::from_str(json)?;
        Ok(Self::new(spec))
    }

    /// Root element handle
    pub fn root_element(&self) -> ElementRef {
        ElementRef::new(Arc::clone(&self.root))
    }

    /// Element whose `id` attribute equals `id`, searching in document order
    pub fn element_by_id(&self, id: &str) -> Option<ElementRef> {
        self.root.find_by_id(id).map(ElementRef::new)
    }

    /// Borrow the element behind a handle from any memory document
    pub fn element(handle: &ElementRef) -> Option<&MemoryElement> {
        handle.downcast_ref::<MemoryElement>()
    }
}

impl DocumentHost for MemoryDocument {
    fn root(&self) -> Option<ElementRef> {
        Some(self.root_element())
    }

    fn matches(&self, element: &ElementRef, marker: &Marker) -> bool {
        element
            .downcast_ref::<MemoryElement>()
            .is_some_and(|e| e.carries(marker))
    }

    fn find_descendants(&self, root: &ElementRef, marker: &Marker) -> Vec<ElementRef> {
        let mut found = Vec::new();
        if let Some(element) = root.downcast_ref::<MemoryElement>() {
            element.collect_descendants(marker, &mut found);
        }
        found
    }

    fn data_attributes(&self, element: &ElementRef) -> DataAttributes {
        element
            .downcast_ref::<MemoryElement>()
            .map(MemoryElement::data_attributes)
            .unwrap_or_default()
    }
}
