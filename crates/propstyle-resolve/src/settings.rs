//! Settings: the declarative input a processor is built from.
//!
//! Every category is optional. [`Settings`] is built with a chaining API in
//! the same way a theme is assembled style by style:
//!
//! ```rust
//! use propstyle_resolve::{Settings, StyleTemplate, Variant};
//!
//! let settings = Settings::new()
//!     .color("primary", "#007bff")
//!     .shorthand("bg", StyleTemplate::new().placeholder("backgroundColor"))
//!     .pseudo_selector("__hover", ":hover")
//!     .allow("children")
//!     .variant(
//!         "size",
//!         Variant::new()
//!             .option("sm", StyleTemplate::new().set("fontSize", "14px"))
//!             .option("md", StyleTemplate::new().set("fontSize", "16px"))
//!             .default_option("md"),
//!     );
//!
//! assert!(settings.shorthands.as_ref().unwrap().contains_key("bg"));
//! ```
//!
//! Settings may also be loaded from YAML or JSON text; see
//! [`Settings::from_yaml`].

use std::fmt;

use indexmap::IndexMap;
use regex::Regex;

use crate::breakpoint::{Breakpoint, BreakpointTable};
use crate::resolve::ColorTable;
use crate::template::StyleTemplate;
use crate::value::{PropMap, PropValue};

/// Decides whether a property is passed through instead of styled.
#[derive(Debug, Clone)]
pub enum PropMatcher {
    /// Matches a property name exactly.
    Exact(String),
    /// Matches property names the pattern finds a match in.
    Pattern(Regex),
}

impl PropMatcher {
    /// Tests a property name against this matcher.
    pub fn matches(&self, key: &str) -> bool {
        match self {
            PropMatcher::Exact(name) => name == key,
            PropMatcher::Pattern(re) => re.is_match(key),
        }
    }
}

impl PartialEq for PropMatcher {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PropMatcher::Exact(a), PropMatcher::Exact(b)) => a == b,
            (PropMatcher::Pattern(a), PropMatcher::Pattern(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

impl fmt::Display for PropMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropMatcher::Exact(name) => f.write_str(name),
            PropMatcher::Pattern(re) => write!(f, "/{}/", re.as_str()),
        }
    }
}

impl From<&str> for PropMatcher {
    fn from(name: &str) -> Self {
        PropMatcher::Exact(name.to_string())
    }
}

impl From<Regex> for PropMatcher {
    fn from(re: Regex) -> Self {
        PropMatcher::Pattern(re)
    }
}

/// A closed set of mutually exclusive style options selected by one prop.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Variant {
    /// Option name → style template.
    pub values: IndexMap<String, StyleTemplate>,
    /// Option applied when the caller leaves the variant prop unset.
    pub default: Option<String>,
}

impl Variant {
    /// Creates a variant with no options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an option, returning `self` for chaining.
    pub fn option(mut self, name: &str, template: StyleTemplate) -> Self {
        self.values.insert(name.to_string(), template);
        self
    }

    /// Sets the default option, returning `self` for chaining.
    pub fn default_option(mut self, name: &str) -> Self {
        self.default = Some(name.to_string());
        self
    }

    /// Returns the template for an option.
    pub fn get(&self, option: &str) -> Option<&StyleTemplate> {
        self.values.get(option)
    }

    /// Returns the default option's template, if a default is declared and
    /// names an existing option.
    pub fn default_template(&self) -> Option<&StyleTemplate> {
        self.default.as_deref().and_then(|name| self.values.get(name))
    }
}

/// Declarative settings for a processor.
///
/// `extend` points at another settings object whose categories form the base
/// layer. Only that one level is read: the extended object's own `extend` is
/// ignored. Normalize the extended settings first and convert the resulting
/// [`Configuration`](crate::Configuration) back into `Settings` to chain
/// deeper.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Settings {
    /// Base settings overlaid by this object's categories.
    pub extend: Option<Box<Settings>>,
    /// Shorthand name → template.
    pub shorthands: Option<IndexMap<String, StyleTemplate>>,
    /// Pass-through matchers, in order.
    pub allowed_props: Option<Vec<PropMatcher>>,
    /// Breakpoint widths.
    pub breakpoints: Option<BreakpointTable>,
    /// Color token → color.
    pub colors: Option<ColorTable>,
    /// Pseudo key (e.g. `__hover`) → CSS selector (e.g. `:hover`).
    pub pseudo_selectors: Option<IndexMap<String, String>>,
    /// Pass-through defaults applied before any prop.
    pub default_props: Option<PropMap>,
    /// Variant name → variant.
    pub variants: Option<IndexMap<String, Variant>>,
}

impl Settings {
    /// Creates empty settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the settings to extend, returning `self` for chaining.
    pub fn extend(mut self, base: Settings) -> Self {
        self.extend = Some(Box::new(base));
        self
    }

    /// Adds a shorthand.
    pub fn shorthand(mut self, name: &str, template: StyleTemplate) -> Self {
        self.shorthands
            .get_or_insert_with(IndexMap::new)
            .insert(name.to_string(), template);
        self
    }

    /// Adds an exact-name pass-through prop.
    pub fn allow(self, name: &str) -> Self {
        self.allow_matcher(PropMatcher::from(name))
    }

    /// Adds a pattern pass-through matcher.
    pub fn allow_pattern(self, pattern: Regex) -> Self {
        self.allow_matcher(PropMatcher::Pattern(pattern))
    }

    /// Adds any pass-through matcher.
    pub fn allow_matcher(mut self, matcher: PropMatcher) -> Self {
        self.allowed_props.get_or_insert_with(Vec::new).push(matcher);
        self
    }

    /// Sets one breakpoint width.
    pub fn breakpoint(mut self, breakpoint: Breakpoint, width: u32) -> Self {
        self.breakpoints
            .get_or_insert_with(BreakpointTable::empty)
            .insert(breakpoint, width);
        self
    }

    /// Replaces the whole breakpoint table.
    pub fn breakpoints(mut self, table: BreakpointTable) -> Self {
        self.breakpoints = Some(table);
        self
    }

    /// Adds a color token.
    pub fn color(mut self, token: &str, color: &str) -> Self {
        self.colors
            .get_or_insert_with(ColorTable::new)
            .insert(token.to_string(), color.to_string());
        self
    }

    /// Registers a pseudo key and its CSS selector.
    pub fn pseudo_selector(mut self, key: &str, selector: &str) -> Self {
        self.pseudo_selectors
            .get_or_insert_with(IndexMap::new)
            .insert(key.to_string(), selector.to_string());
        self
    }

    /// Adds a pass-through default prop.
    pub fn default_prop<V: Into<PropValue>>(mut self, name: &str, value: V) -> Self {
        self.default_props
            .get_or_insert_with(PropMap::new)
            .insert(name.to_string(), value.into());
        self
    }

    /// Adds a variant.
    pub fn variant(mut self, name: &str, variant: Variant) -> Self {
        self.variants
            .get_or_insert_with(IndexMap::new)
            .insert(name.to_string(), variant);
        self
    }
}
