//! Settings normalization.
//!
//! [`normalize`] flattens a [`Settings`] object and its `extend` base into one
//! fully-populated [`Configuration`]. Each category merges on its own:
//!
//! - keyed categories start from the extended values and overlay the own
//!   values key by key (own entries win);
//! - `allowed_props` concatenates, extended matchers first;
//! - `breakpoints` falls back to the six-tier default table only when neither
//!   layer defines one.
//!
//! Only one level of `extend` is read. An extended object's own `extend` is
//! not walked; callers chain deeper by normalizing the base first and passing
//! `Settings::from(configuration)` as the `extend` value.
//!
//! Normalization never fails. Absent categories become empty.

use indexmap::IndexMap;

use crate::breakpoint::BreakpointTable;
use crate::resolve::ColorTable;
use crate::settings::{PropMatcher, Settings, Variant};
use crate::template::StyleTemplate;
use crate::value::PropMap;

/// The normalized, read-only settings of one processor.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Configuration {
    pub(crate) shorthands: IndexMap<String, StyleTemplate>,
    pub(crate) allowed_props: Vec<PropMatcher>,
    pub(crate) breakpoints: BreakpointTable,
    pub(crate) colors: ColorTable,
    pub(crate) pseudo_selectors: IndexMap<String, String>,
    pub(crate) default_props: PropMap,
    pub(crate) variants: IndexMap<String, Variant>,
}

impl Configuration {
    /// Shorthand name → template.
    pub fn shorthands(&self) -> &IndexMap<String, StyleTemplate> {
        &self.shorthands
    }

    /// Pass-through matchers, extended entries first.
    pub fn allowed_props(&self) -> &[PropMatcher] {
        &self.allowed_props
    }

    /// Breakpoint widths.
    pub fn breakpoints(&self) -> &BreakpointTable {
        &self.breakpoints
    }

    /// Color token → color.
    pub fn colors(&self) -> &ColorTable {
        &self.colors
    }

    /// Pseudo key → CSS selector.
    pub fn pseudo_selectors(&self) -> &IndexMap<String, String> {
        &self.pseudo_selectors
    }

    /// Pass-through defaults.
    pub fn default_props(&self) -> &PropMap {
        &self.default_props
    }

    /// Variant name → variant.
    pub fn variants(&self) -> &IndexMap<String, Variant> {
        &self.variants
    }

    /// Names of all shorthands, in merge order.
    pub fn shorthand_names(&self) -> impl Iterator<Item = &str> {
        self.shorthands.keys().map(String::as_str)
    }

    /// Names of all variants, in merge order.
    pub fn variant_names(&self) -> impl Iterator<Item = &str> {
        self.variants.keys().map(String::as_str)
    }

    /// Registered pseudo keys, in merge order.
    pub fn pseudo_keys(&self) -> impl Iterator<Item = &str> {
        self.pseudo_selectors.keys().map(String::as_str)
    }

    /// Returns true if `key` matches any pass-through matcher.
    pub fn is_allowed(&self, key: &str) -> bool {
        self.allowed_props.iter().any(|m| m.matches(key))
    }
}

/// A normalized configuration converts back into fully-populated settings,
/// so it can serve as the `extend` base of another settings object.
impl From<Configuration> for Settings {
    fn from(config: Configuration) -> Self {
        Settings {
            extend: None,
            shorthands: Some(config.shorthands),
            allowed_props: Some(config.allowed_props),
            breakpoints: Some(config.breakpoints),
            colors: Some(config.colors),
            pseudo_selectors: Some(config.pseudo_selectors),
            default_props: Some(config.default_props),
            variants: Some(config.variants),
        }
    }
}

/// Merges settings with their `extend` base into a configuration.
///
/// # Example
///
/// ```rust
/// use propstyle_resolve::{normalize, utility_preset, Settings, StyleTemplate};
///
/// let settings = Settings::new()
///     .extend(utility_preset().clone())
///     .shorthand("x", StyleTemplate::new().set("display", "contents"));
///
/// let config = normalize(&settings);
/// assert!(config.shorthands().contains_key("flex"));
/// assert!(config.shorthands().contains_key("x"));
/// ```
pub fn normalize(settings: &Settings) -> Configuration {
    let base = settings.extend.as_deref();
    if base.is_some_and(|b| b.extend.is_some()) {
        tracing::trace!("ignoring nested extend");
    }

    let breakpoints = match (
        base.and_then(|b| b.breakpoints.as_ref()),
        settings.breakpoints.as_ref(),
    ) {
        (None, None) => BreakpointTable::default(),
        (Some(extended), None) => extended.clone(),
        (None, Some(own)) => own.clone(),
        (Some(extended), Some(own)) => extended.merge(own),
    };

    let mut allowed_props = base
        .and_then(|b| b.allowed_props.clone())
        .unwrap_or_default();
    allowed_props.extend(settings.allowed_props.iter().flatten().cloned());

    Configuration {
        shorthands: overlay(base.and_then(|b| b.shorthands.as_ref()), settings.shorthands.as_ref()),
        allowed_props,
        breakpoints,
        colors: overlay(base.and_then(|b| b.colors.as_ref()), settings.colors.as_ref()),
        pseudo_selectors: overlay(
            base.and_then(|b| b.pseudo_selectors.as_ref()),
            settings.pseudo_selectors.as_ref(),
        ),
        default_props: overlay(
            base.and_then(|b| b.default_props.as_ref()),
            settings.default_props.as_ref(),
        ),
        variants: overlay(base.and_then(|b| b.variants.as_ref()), settings.variants.as_ref()),
    }
}

/// Key-by-key overlay: starts from `base`, `own` entries win.
///
/// An overridden key keeps its original position, new keys append.
fn overlay<V: Clone>(
    base: Option<&IndexMap<String, V>>,
    own: Option<&IndexMap<String, V>>,
) -> IndexMap<String, V> {
    let mut merged = base.cloned().unwrap_or_default();
    for (key, value) in own.into_iter().flatten() {
        merged.insert(key.clone(), value.clone());
    }
    merged
}
