//! Resolved style trees and processor output.

use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::value::PropMap;

/// One entry of a resolved style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleEntry {
    /// Final property text. Responsive properties hold their concatenated
    /// media-query fragments here.
    Value(String),
    /// A pseudo-selector block, keyed by its CSS selector in the parent.
    Block(ResolvedStyle),
}

impl StyleEntry {
    /// Returns the text of a `Value` entry.
    pub fn as_value(&self) -> Option<&str> {
        match self {
            StyleEntry::Value(v) => Some(v),
            StyleEntry::Block(_) => None,
        }
    }

    /// Returns the nested style of a `Block` entry.
    pub fn as_block(&self) -> Option<&ResolvedStyle> {
        match self {
            StyleEntry::Block(b) => Some(b),
            StyleEntry::Value(_) => None,
        }
    }
}

impl Serialize for StyleEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            StyleEntry::Value(v) => serializer.serialize_str(v),
            StyleEntry::Block(b) => b.serialize(serializer),
        }
    }
}

/// The per-call style tree: property or selector → entry, in write order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolvedStyle {
    entries: IndexMap<String, StyleEntry>,
}

impl ResolvedStyle {
    /// Creates an empty style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a property value. An existing property keeps its position.
    pub fn set_value(&mut self, property: impl Into<String>, value: impl Into<String>) {
        self.entries
            .insert(property.into(), StyleEntry::Value(value.into()));
    }

    /// Sets a pseudo-selector block. An existing selector keeps its position.
    pub fn set_block(&mut self, selector: impl Into<String>, block: ResolvedStyle) {
        self.entries.insert(selector.into(), StyleEntry::Block(block));
    }

    /// Copies every entry of `other` over this style; `other` wins.
    pub fn merge(&mut self, other: ResolvedStyle) {
        for (key, entry) in other.entries {
            self.entries.insert(key, entry);
        }
    }

    /// Returns an entry.
    pub fn get(&self, key: &str) -> Option<&StyleEntry> {
        self.entries.get(key)
    }

    /// Returns the text of a property.
    pub fn value(&self, property: &str) -> Option<&str> {
        self.get(property).and_then(StyleEntry::as_value)
    }

    /// Returns a pseudo-selector block.
    pub fn block(&self, selector: &str) -> Option<&ResolvedStyle> {
        self.get(selector).and_then(StyleEntry::as_block)
    }

    /// Iterates entries in write order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns true if no entry was written.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of top-level entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl Serialize for ResolvedStyle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

/// What one processor call returns: pass-through props plus the style tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResolvedOutput {
    /// Default props overlaid with the caller's pass-through props.
    pub props: PropMap,
    /// The resolved style; `None` when nothing was written.
    pub style: Option<ResolvedStyle>,
}

impl ResolvedOutput {
    /// Flattens the output into one JSON object.
    ///
    /// A resolved style replaces any pass-through `style` prop, keeping that
    /// prop's position; otherwise `style` is appended last.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl Serialize for ResolvedOutput {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let replaces_prop = self.style.is_some() && self.props.contains_key("style");
        let len = self.props.len() + usize::from(self.style.is_some() && !replaces_prop);
        let mut map = serializer.serialize_map(Some(len))?;
        for (key, value) in &self.props {
            match (&self.style, key.as_str()) {
                (Some(style), "style") => map.serialize_entry(key, style)?,
                _ => map.serialize_entry(key, value)?,
            }
        }
        if let (Some(style), false) = (&self.style, replaces_prop) {
            map.serialize_entry("style", style)?;
        }
        map.end()
    }
}
