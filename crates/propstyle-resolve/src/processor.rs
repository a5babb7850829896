//! The processor: compiles a configuration into a per-call prop resolver.
//!
//! A [`Processor`] is built once from [`Settings`] and then called for every
//! render with the component's props. Each call walks the props once and
//! splits them into pass-through props and one resolved style tree:
//!
//! ```rust
//! use propstyle_resolve::{build_processor, Settings, StyleTemplate};
//! use propstyle_resolve::value::props_from_json;
//! use serde_json::json;
//!
//! let processor = build_processor(
//!     &Settings::new()
//!         .color("primary", "#ff0000")
//!         .shorthand("bg", StyleTemplate::new().placeholder("backgroundColor"))
//!         .allow("id"),
//! );
//!
//! let output = processor.process(&props_from_json(json!({ "bg": "primary", "id": "main" })));
//! assert_eq!(
//!     output.to_json(),
//!     json!({ "id": "main", "style": { "backgroundColor": "#ff0000" } })
//! );
//! ```
//!
//! Processing never fails. Every input that has no meaning under the
//! configuration is dropped or stringified and reported at `trace` level.

use std::sync::Arc;

use crate::classify::PropKind;
use crate::normalize::{normalize, Configuration};
use crate::resolve::{px, resolve_color, resolve_responsive, resolve_scalar, resolve_value};
use crate::settings::Settings;
use crate::style::{ResolvedOutput, ResolvedStyle};
use crate::template::{StyleTemplate, TemplateValue};
use crate::value::{PropMap, PropValue};

/// Whether nested pseudo blocks inside a template are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Nesting {
    Allowed,
    Forbidden,
}

/// A compiled prop processor.
///
/// Cloning is cheap: clones share one read-only [`Configuration`].
#[derive(Debug, Clone)]
pub struct Processor {
    config: Arc<Configuration>,
}

/// Normalizes `settings` and compiles a processor over the result.
pub fn build_processor(settings: &Settings) -> Processor {
    Processor::from_configuration(normalize(settings))
}

impl Processor {
    /// Same as [`build_processor`].
    pub fn new(settings: &Settings) -> Self {
        build_processor(settings)
    }

    /// Compiles a processor over an already normalized configuration.
    pub fn from_configuration(config: Configuration) -> Self {
        tracing::debug!(
            shorthands = config.shorthands.len(),
            variants = config.variants.len(),
            colors = config.colors.len(),
            pseudo_selectors = config.pseudo_selectors.len(),
            allowed_props = config.allowed_props.len(),
            breakpoints = config.breakpoints.len(),
            "built style processor"
        );
        Self {
            config: Arc::new(config),
        }
    }

    /// The configuration this processor closes over.
    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    /// Resolves one set of props.
    pub fn process(&self, props: &PropMap) -> ResolvedOutput {
        let config = &*self.config;
        let mut output = config.default_props.clone();
        let mut style = ResolvedStyle::new();

        for (name, variant) in &config.variants {
            let Some(default) = variant.default.as_deref() else {
                continue;
            };
            if !props.get(name).map_or(true, PropValue::is_falsy) {
                continue;
            }
            match variant.get(default) {
                Some(template) => style.merge(config.resolve_template(template, None)),
                None => tracing::trace!(
                    "variant '{}' default '{}' names no option",
                    name,
                    default
                ),
            }
        }

        for (key, value) in props {
            match config.classify(key) {
                PropKind::Passthrough => {
                    output.insert(key.clone(), value.clone());
                }
                PropKind::Variant(variant) => {
                    match value.as_key().and_then(|option| variant.get(&option)) {
                        Some(template) => style.merge(config.resolve_template(template, None)),
                        None => tracing::trace!(
                            "dropping unknown option {} for variant '{}'",
                            value,
                            key
                        ),
                    }
                }
                PropKind::Shorthand(template) => {
                    config.apply_shorthand(&mut style, key, template, value)
                }
                PropKind::Pseudo(selector) => match value.as_map() {
                    Some(block) => style.set_block(selector, config.resolve_pseudo_block(block)),
                    None => tracing::trace!("dropping non-map value for pseudo key '{}'", key),
                },
                PropKind::Literal => {
                    style.set_value(
                        key.as_str(),
                        resolve_value(key, value, &config.breakpoints, &config.colors),
                    );
                }
            }
        }

        ResolvedOutput {
            props: output,
            style: (!style.is_empty()).then_some(style),
        }
    }

    /// Resolves props given as a JSON object. Non-object input is treated as
    /// an empty prop map.
    pub fn process_json(&self, props: serde_json::Value) -> ResolvedOutput {
        self.process(&crate::value::props_from_json(props))
    }
}

impl Configuration {
    /// Resolves a template against an optional substitution value.
    ///
    /// Only strings and numbers substitute placeholders; any other value
    /// resolves the template as if none was given. Nested pseudo blocks are
    /// resolved under their mapped selectors.
    pub fn resolve_template(
        &self,
        template: &StyleTemplate,
        value: Option<&PropValue>,
    ) -> ResolvedStyle {
        self.apply_template(template, value, Nesting::Allowed)
    }

    fn apply_template(
        &self,
        template: &StyleTemplate,
        value: Option<&PropValue>,
        nesting: Nesting,
    ) -> ResolvedStyle {
        let mut result = ResolvedStyle::new();
        for (property, declared) in template.iter() {
            match declared {
                TemplateValue::Placeholder => match value {
                    Some(PropValue::Number(n)) => result.set_value(property, px(*n)),
                    Some(PropValue::String(s)) => {
                        result.set_value(property, resolve_color(&self.colors, s))
                    }
                    _ => tracing::trace!("no value to substitute for '{}'", property),
                },
                TemplateValue::Literal(scalar) => {
                    result.set_value(property, resolve_scalar(scalar, &self.colors))
                }
                TemplateValue::Responsive(values) => result.set_value(
                    property,
                    resolve_responsive(property, values, &self.breakpoints, &self.colors),
                ),
                TemplateValue::Nested(block) => {
                    match (nesting, self.pseudo_selectors.get(property)) {
                        (Nesting::Allowed, Some(selector)) => {
                            let resolved = self.apply_template(block, None, nesting);
                            result.set_block(selector.as_str(), resolved)
                        }
                        (Nesting::Allowed, None) => {
                            tracing::trace!("dropping nested block for unregistered '{}'", property)
                        }
                        (Nesting::Forbidden, _) => {
                            tracing::trace!(
                                "dropping nested block '{}' inside a pseudo block",
                                property
                            )
                        }
                    }
                }
            }
        }
        result
    }

    fn apply_shorthand(
        &self,
        style: &mut ResolvedStyle,
        key: &str,
        template: &StyleTemplate,
        value: &PropValue,
    ) {
        match value {
            PropValue::Bool(true) => style.merge(self.resolve_template(template, None)),
            PropValue::String(_) | PropValue::Number(_) => {
                style.merge(self.resolve_template(template, Some(value)))
            }
            PropValue::Map(_) => match template.first_property() {
                Some(property) => style.set_value(
                    property,
                    resolve_value(property, value, &self.breakpoints, &self.colors),
                ),
                None => tracing::trace!("shorthand '{}' declares no property", key),
            },
            _ => tracing::trace!("dropping {} for shorthand '{}'", value, key),
        }
    }

    fn resolve_pseudo_block(&self, block: &PropMap) -> ResolvedStyle {
        let mut result = ResolvedStyle::new();
        for (property, value) in block {
            match self.shorthands.get(property) {
                Some(template) => {
                    let substitution = value.is_scalar().then_some(value);
                    result.merge(self.apply_template(template, substitution, Nesting::Forbidden));
                }
                None => result.set_value(
                    property.as_str(),
                    resolve_value(property, value, &self.breakpoints, &self.colors),
                ),
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breakpoint::{Breakpoint, BreakpointTable};
    use crate::settings::Variant;
    use crate::value::props_from_json;
    use serde_json::json;

    fn process(settings: &Settings, props: serde_json::Value) -> ResolvedOutput {
        build_processor(settings).process(&props_from_json(props))
    }

    fn size_variant() -> Variant {
        Variant::new()
            .option("sm", StyleTemplate::new().set("fontSize", "14px"))
            .option("md", StyleTemplate::new().set("fontSize", "16px"))
            .default_option("md")
    }

    // =========================================================================
    // Shorthands
    // =========================================================================

    #[test]
    fn test_fixed_shorthand_with_true() {
        let settings = Settings::new().shorthand(
            "primary",
            StyleTemplate::new().set("color", "blue").set("backgroundColor", "white"),
        );
        let output = process(&settings, json!({ "primary": true }));
        assert_eq!(
            output.to_json(),
            json!({ "style": { "color": "blue", "backgroundColor": "white" } })
        );
    }

    #[test]
    fn test_fixed_number_gets_px() {
        let settings = Settings::new().shorthand("pad", StyleTemplate::new().set("padding", 10));
        let style = process(&settings, json!({ "pad": true })).style.unwrap();
        assert_eq!(style.value("padding"), Some("10px"));
    }

    #[test]
    fn test_placeholder_substitutes_color_token() {
        let settings = Settings::new()
            .color("primary", "#ff0000")
            .shorthand("bg", StyleTemplate::new().placeholder("backgroundColor"));
        let style = process(&settings, json!({ "bg": "primary" })).style.unwrap();
        assert_eq!(style.value("backgroundColor"), Some("#ff0000"));
    }

    #[test]
    fn test_placeholder_substitutes_number() {
        let settings = Settings::new().shorthand("m", StyleTemplate::new().placeholder("margin"));
        let style = process(&settings, json!({ "m": 0 })).style.unwrap();
        assert_eq!(style.value("margin"), Some("0px"));
    }

    #[test]
    fn test_placeholder_without_value_is_skipped() {
        let settings = Settings::new().shorthand(
            "card",
            StyleTemplate::new().placeholder("width").set("display", "block"),
        );
        let style = process(&settings, json!({ "card": true })).style.unwrap();
        assert_eq!(style.value("width"), None);
        assert_eq!(style.value("display"), Some("block"));
    }

    #[test]
    fn test_responsive_shorthand_uses_first_property() {
        let settings = Settings::new()
            .breakpoints(
                BreakpointTable::empty()
                    .with(Breakpoint::Xs, 0)
                    .with(Breakpoint::Sm, 640)
                    .with(Breakpoint::Md, 768),
            )
            .shorthand(
                "w",
                StyleTemplate::new().placeholder("width").set("minWidth", 0),
            );
        let style = process(&settings, json!({ "w": { "xs": "100%", "md": "50%" } }))
            .style
            .unwrap();
        assert_eq!(
            style.value("width"),
            Some(
                "@media (min-width: 0px) { width: 100%; } \
                 @media (min-width: 768px) { width: 50%; }"
            )
        );
        assert_eq!(style.value("minWidth"), None);
    }

    #[test]
    fn test_false_and_null_shorthands_dropped() {
        let settings =
            Settings::new().shorthand("flex", StyleTemplate::new().set("display", "flex"));
        let output = process(&settings, json!({ "flex": false }));
        assert!(output.style.is_none());
        let output = process(&settings, json!({ "flex": null }));
        assert!(output.style.is_none());
    }

    // =========================================================================
    // Variants
    // =========================================================================

    #[test]
    fn test_variant_default_applies_when_absent() {
        let settings = Settings::new().variant("size", size_variant());
        let style = process(&settings, json!({})).style.unwrap();
        assert_eq!(style.value("fontSize"), Some("16px"));
    }

    #[test]
    fn test_variant_explicit_option_replaces_default() {
        let settings = Settings::new().variant("size", size_variant());
        let style = process(&settings, json!({ "size": "sm" })).style.unwrap();
        assert_eq!(style.value("fontSize"), Some("14px"));
        assert_eq!(style.len(), 1);
    }

    #[test]
    fn test_variant_default_applies_for_falsy_value() {
        let settings = Settings::new().variant("size", size_variant());
        let style = process(&settings, json!({ "size": "" })).style.unwrap();
        assert_eq!(style.value("fontSize"), Some("16px"));
    }

    #[test]
    fn test_unknown_variant_option_dropped() {
        let settings = Settings::new().variant(
            "size",
            Variant::new().option("sm", StyleTemplate::new().set("fontSize", "14px")),
        );
        let output = process(&settings, json!({ "size": "xl" }));
        assert!(output.style.is_none());
        assert!(output.props.is_empty());
    }

    #[test]
    fn test_numeric_variant_option() {
        let settings = Settings::new().variant(
            "level",
            Variant::new().option("1", StyleTemplate::new().set("fontWeight", "bold")),
        );
        let style = process(&settings, json!({ "level": 1 })).style.unwrap();
        assert_eq!(style.value("fontWeight"), Some("bold"));
    }

    #[test]
    fn test_later_prop_overrides_variant() {
        let settings = Settings::new().variant("size", size_variant());
        let style = process(&settings, json!({ "size": "sm", "fontSize": 20 }))
            .style
            .unwrap();
        assert_eq!(style.value("fontSize"), Some("20px"));
    }

    // =========================================================================
    // Pseudo selectors
    // =========================================================================

    #[test]
    fn test_pseudo_blocks() {
        let settings = Settings::new()
            .pseudo_selector("__hover", ":hover")
            .pseudo_selector("__focus", ":focus");
        let output = process(
            &settings,
            json!({ "__hover": { "color": "red" }, "__focus": { "color": "blue" } }),
        );
        assert_eq!(
            output.to_json(),
            json!({ "style": { ":hover": { "color": "red" }, ":focus": { "color": "blue" } } })
        );
    }

    #[test]
    fn test_pseudo_block_expands_shorthands() {
        let settings = Settings::new()
            .color("secondary", "#6c757d")
            .shorthand("bg", StyleTemplate::new().placeholder("backgroundColor"))
            .pseudo_selector("__hover", ":hover");
        let style = process(&settings, json!({ "__hover": { "bg": "secondary", "width": 10 } }))
            .style
            .unwrap();
        let hover = style.block(":hover").unwrap();
        assert_eq!(hover.value("backgroundColor"), Some("#6c757d"));
        assert_eq!(hover.value("width"), Some("10px"));
    }

    #[test]
    fn test_pseudo_with_scalar_value_dropped() {
        let settings = Settings::new().pseudo_selector("__hover", ":hover");
        assert!(process(&settings, json!({ "__hover": "red" })).style.is_none());
    }

    #[test]
    fn test_unregistered_pseudo_key_is_literal() {
        let style = process(&Settings::new(), json!({ "__active": "x" })).style.unwrap();
        assert_eq!(style.value("__active"), Some("x"));
    }

    #[test]
    fn test_nested_template_block_resolves() {
        let settings = Settings::new()
            .pseudo_selector("__hover", ":hover")
            .shorthand(
                "link",
                StyleTemplate::new()
                    .set("color", "blue")
                    .nested("__hover", StyleTemplate::new().set("color", "navy")),
            );
        let output = process(&settings, json!({ "link": true }));
        assert_eq!(
            output.to_json(),
            json!({ "style": { "color": "blue", ":hover": { "color": "navy" } } })
        );
    }

    #[test]
    fn test_nested_template_block_dropped_inside_pseudo() {
        let settings = Settings::new()
            .pseudo_selector("__hover", ":hover")
            .pseudo_selector("__focus", ":focus")
            .shorthand(
                "link",
                StyleTemplate::new()
                    .set("color", "blue")
                    .nested("__focus", StyleTemplate::new().set("color", "navy")),
            );
        let style = process(&settings, json!({ "__hover": { "link": true } }))
            .style
            .unwrap();
        let hover = style.block(":hover").unwrap();
        assert_eq!(hover.value("color"), Some("blue"));
        assert_eq!(hover.len(), 1);
    }

    // =========================================================================
    // Pass-through and output shape
    // =========================================================================

    #[test]
    fn test_literal_fallback() {
        let style = process(&Settings::new(), json!({ "customData": "x" })).style.unwrap();
        assert_eq!(style.value("customData"), Some("x"));
    }

    #[test]
    fn test_allowed_props_pass_through() {
        let settings = Settings::new().allow("children").default_prop("role", "group");
        let output = process(&settings, json!({ "children": "hi" }));
        assert_eq!(output.to_json(), json!({ "role": "group", "children": "hi" }));
    }

    #[test]
    fn test_style_omitted_when_empty() {
        let output = process(&Settings::new(), json!({}));
        assert!(output.style.is_none());
        assert!(output.to_json().get("style").is_none());
    }

    #[test]
    fn test_processor_is_shareable() {
        fn assert_send_sync<T: Send + Sync + Clone>() {}
        assert_send_sync::<Processor>();

        let processor = build_processor(&Settings::new().allow("id"));
        let clone = processor.clone();
        assert_eq!(clone.configuration(), processor.configuration());
    }
}
