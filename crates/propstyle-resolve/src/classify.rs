//! Property key classification.
//!
//! Every incoming property key is classified once against the configuration's
//! lookup tables, then dispatched on the resulting tag. The first matching
//! rule wins:
//!
//! 1. [`PropKind::Passthrough`]: the key matches an allowed-prop matcher
//! 2. [`PropKind::Variant`]: the key names a variant
//! 3. [`PropKind::Shorthand`]: the key names a shorthand
//! 4. [`PropKind::Pseudo`]: the key is a registered pseudo key
//! 5. [`PropKind::Literal`]: anything else is a literal style property
//!
//! Classification depends on the key only, never on the shape of the value.

use crate::normalize::Configuration;
use crate::settings::Variant;
use crate::template::StyleTemplate;

/// How a property key is interpreted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropKind<'c> {
    /// Copied to the output unchanged.
    Passthrough,
    /// Selects one option of a variant.
    Variant(&'c Variant),
    /// Expands a shorthand template.
    Shorthand(&'c StyleTemplate),
    /// Opens a pseudo-selector block; carries the CSS selector.
    Pseudo(&'c str),
    /// Used as a style property name directly.
    Literal,
}

impl PropKind<'_> {
    /// Short name of the tag, for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            PropKind::Passthrough => "passthrough",
            PropKind::Variant(_) => "variant",
            PropKind::Shorthand(_) => "shorthand",
            PropKind::Pseudo(_) => "pseudo",
            PropKind::Literal => "literal",
        }
    }
}

impl Configuration {
    /// Classifies a property key.
    pub fn classify(&self, key: &str) -> PropKind<'_> {
        if self.is_allowed(key) {
            PropKind::Passthrough
        } else if let Some(variant) = self.variants.get(key) {
            PropKind::Variant(variant)
        } else if let Some(template) = self.shorthands.get(key) {
            PropKind::Shorthand(template)
        } else if let Some(selector) = self.pseudo_selectors.get(key) {
            PropKind::Pseudo(selector)
        } else {
            PropKind::Literal
        }
    }
}
