//! The shipped utility-class preset.
//!
//! A settings object meant to be used as an `extend` base. It defines
//! utility-style shorthands (`flex`, `p`, `bg`, ...), the four common pseudo
//! selectors, and pass-through rules for the usual component props.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::settings::Settings;
use crate::template::StyleTemplate;

/// Name under which settings files refer to the preset (`extend: utility`).
pub const UTILITY_PRESET: &str = "utility";

const FIXED_SHORTHANDS: &[(&str, &str, &str)] = &[
    ("flex", "display", "flex"),
    ("grid", "display", "grid"),
    ("block", "display", "block"),
    ("hidden", "display", "none"),
    ("row", "flexDirection", "row"),
    ("col", "flexDirection", "column"),
    ("wrap", "flexWrap", "wrap"),
    ("justifyCenter", "justifyContent", "center"),
    ("itemsCenter", "alignItems", "center"),
];

const VALUE_SHORTHANDS: &[(&str, &str)] = &[
    ("m", "margin"),
    ("p", "padding"),
    ("w", "width"),
    ("h", "height"),
    ("bg", "backgroundColor"),
    ("color", "color"),
    ("border", "borderWidth"),
    ("rounded", "borderRadius"),
];

const PSEUDO_SELECTORS: &[(&str, &str)] = &[
    ("__hover", ":hover"),
    ("__focus", ":focus"),
    ("__active", ":active"),
    ("__disabled", ":disabled"),
];

const ALLOWED_PROPS: &[&str] = &["children", "className", "style", "id", "ref"];

const ALLOWED_PATTERNS: &[&str] = &["^on", "^aria-", "^data-"];

static UTILITY: Lazy<Settings> = Lazy::new(build_utility_preset);

/// Returns the utility preset.
pub fn utility_preset() -> &'static Settings {
    &UTILITY
}

fn build_utility_preset() -> Settings {
    let mut settings = Settings::new();
    for (name, property, value) in FIXED_SHORTHANDS {
        settings = settings.shorthand(name, StyleTemplate::new().set(property, *value));
    }
    for (name, property) in VALUE_SHORTHANDS {
        settings = settings.shorthand(name, StyleTemplate::new().placeholder(property));
    }
    for (key, selector) in PSEUDO_SELECTORS {
        settings = settings.pseudo_selector(key, selector);
    }
    for name in ALLOWED_PROPS {
        settings = settings.allow(name);
    }
    for pattern in ALLOWED_PATTERNS.iter().filter_map(|p| Regex::new(p).ok()) {
        settings = settings.allow_pattern(pattern);
    }
    settings
}
