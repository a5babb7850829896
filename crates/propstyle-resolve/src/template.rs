//! Style templates: the right-hand side of shorthands and variant options.
//!
//! A template maps style property names to [`TemplateValue`]s. Templates keep
//! declaration order; responsive-map invocation of a shorthand targets the
//! first declared property only.
//!
//! The placeholder and nested-block markers are explicit variants here. The
//! `$1` and `__hover` string conventions exist only in settings text and are
//! translated by the settings parser.

use std::collections::BTreeMap;

use indexmap::IndexMap;

use crate::breakpoint::Breakpoint;
use crate::value::Number;

/// A literal leaf value inside a template.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// Rendered with a `px` suffix.
    Number(Number),
    /// Color-resolved, otherwise used verbatim.
    String(String),
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::String(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::String(s)
    }
}

impl From<i32> for Scalar {
    fn from(n: i32) -> Self {
        Scalar::Number(n.into())
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Number(n.into())
    }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        Scalar::Number(n.into())
    }
}

impl From<Number> for Scalar {
    fn from(n: Number) -> Self {
        Scalar::Number(n)
    }
}

/// Per-breakpoint literal values, always iterated in ascending order.
pub type ResponsiveMap = BTreeMap<Breakpoint, Scalar>;

/// The declared value of one template entry.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateValue {
    /// Substitute the call-site value here.
    Placeholder,
    /// A fixed value.
    Literal(Scalar),
    /// A fixed value that varies by breakpoint.
    Responsive(ResponsiveMap),
    /// A pseudo-selector block; the entry key is the pseudo key.
    Nested(StyleTemplate),
}

/// An ordered mapping from style property name to declared value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyleTemplate {
    entries: IndexMap<String, TemplateValue>,
}

impl StyleTemplate {
    /// Creates an empty template.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a fixed value, returning `self` for chaining.
    pub fn set<V: Into<Scalar>>(mut self, property: &str, value: V) -> Self {
        self.entries
            .insert(property.to_string(), TemplateValue::Literal(value.into()));
        self
    }

    /// Adds a placeholder entry, returning `self` for chaining.
    pub fn placeholder(mut self, property: &str) -> Self {
        self.entries
            .insert(property.to_string(), TemplateValue::Placeholder);
        self
    }

    /// Adds a responsive entry, returning `self` for chaining.
    pub fn responsive<I, V>(mut self, property: &str, values: I) -> Self
    where
        I: IntoIterator<Item = (Breakpoint, V)>,
        V: Into<Scalar>,
    {
        let map = values.into_iter().map(|(bp, v)| (bp, v.into())).collect();
        self.entries
            .insert(property.to_string(), TemplateValue::Responsive(map));
        self
    }

    /// Adds a nested pseudo-selector block under `pseudo_key`.
    pub fn nested(mut self, pseudo_key: &str, block: StyleTemplate) -> Self {
        self.entries
            .insert(pseudo_key.to_string(), TemplateValue::Nested(block));
        self
    }

    /// Inserts an entry in place.
    pub fn insert(&mut self, property: impl Into<String>, value: TemplateValue) {
        self.entries.insert(property.into(), value);
    }

    /// Returns the declared value of a property.
    pub fn get(&self, property: &str) -> Option<&TemplateValue> {
        self.entries.get(property)
    }

    /// Returns the first declared property name.
    pub fn first_property(&self) -> Option<&str> {
        self.entries.keys().next().map(String::as_str)
    }

    /// Iterates entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TemplateValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns true if the template declares no property.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of declared entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl FromIterator<(String, TemplateValue)> for StyleTemplate {
    fn from_iter<I: IntoIterator<Item = (String, TemplateValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
