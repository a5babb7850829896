//! Leaf value resolution.
//!
//! Pure functions that turn one style value into its final text, given a
//! breakpoint table and a color table:
//!
//! | Input | Output |
//! |-------|--------|
//! | number `n` | `"{n}px"` |
//! | string | color token lookup, identity on miss |
//! | `null` / `undefined` | `"null"` / `"undefined"` |
//! | responsive map | media-query fragments in ascending breakpoint order |
//!
//! None of these functions fail. Unknown breakpoint keys are dropped, a
//! breakpoint missing from the table renders its width as `undefined`.
//!
//! ```rust
//! use propstyle_resolve::{resolve_value, BreakpointTable, ColorTable, PropValue};
//! use serde_json::json;
//!
//! let value = PropValue::from(json!({ "lg": "50%", "xs": 100 }));
//! let css = resolve_value("width", &value, &BreakpointTable::default(), &ColorTable::new());
//! assert_eq!(
//!     css,
//!     "@media (min-width: 0px) { width: 100px; } @media (min-width: 1024px) { width: 50%; }"
//! );
//! ```

use indexmap::IndexMap;

use crate::breakpoint::{Breakpoint, BreakpointTable};
use crate::template::{ResponsiveMap, Scalar};
use crate::value::{Number, PropMap, PropValue};

/// Color token → literal color string.
pub type ColorTable = IndexMap<String, String>;

/// Looks up a color token, returning the token itself when it is not defined.
///
/// An entry mapped to the empty string counts as undefined.
pub fn resolve_color(colors: &ColorTable, token: &str) -> String {
    match colors.get(token) {
        Some(color) if !color.is_empty() => color.clone(),
        _ => token.to_string(),
    }
}

/// Renders a number in style position.
pub fn px(n: Number) -> String {
    format!("{}px", n)
}

/// Resolves a template literal.
pub fn resolve_scalar(value: &Scalar, colors: &ColorTable) -> String {
    match value {
        Scalar::Number(n) => px(*n),
        Scalar::String(s) => resolve_color(colors, s),
    }
}

/// Resolves a caller-supplied value for `property`.
///
/// Scalars resolve directly; a map is treated as a responsive value and
/// expanded into media-query fragments.
pub fn resolve_value(
    property: &str,
    value: &PropValue,
    breakpoints: &BreakpointTable,
    colors: &ColorTable,
) -> String {
    match value {
        PropValue::Map(map) => resolve_responsive_props(property, map, breakpoints, colors),
        leaf => resolve_leaf(leaf, colors).unwrap_or_default(),
    }
}

/// Resolves a typed responsive map from a template.
pub fn resolve_responsive(
    property: &str,
    values: &ResponsiveMap,
    breakpoints: &BreakpointTable,
    colors: &ColorTable,
) -> String {
    values
        .iter()
        .map(|(bp, value)| {
            media_query(property, *bp, &resolve_scalar(value, colors), breakpoints)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn resolve_responsive_props(
    property: &str,
    map: &PropMap,
    breakpoints: &BreakpointTable,
    colors: &ColorTable,
) -> String {
    for key in map.keys() {
        if Breakpoint::parse(key).is_none() {
            tracing::trace!("dropping unknown breakpoint '{}' for '{}'", key, property);
        }
    }

    Breakpoint::ALL
        .iter()
        .filter_map(|bp| {
            let value = map.get(bp.as_str())?;
            let resolved = resolve_leaf(value, colors)?;
            Some(media_query(property, *bp, &resolved, breakpoints))
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Resolves a non-map value. Returns `None` for maps, which have no leaf form.
fn resolve_leaf(value: &PropValue, colors: &ColorTable) -> Option<String> {
    match value {
        PropValue::Number(n) => Some(px(*n)),
        PropValue::String(s) => Some(resolve_color(colors, s)),
        PropValue::Null | PropValue::Undefined | PropValue::Bool(_) => {
            Some(resolve_color(colors, &value.to_string()))
        }
        PropValue::Map(_) => {
            tracing::trace!("dropping nested map inside a responsive value");
            None
        }
    }
}

fn media_query(
    property: &str,
    breakpoint: Breakpoint,
    value: &str,
    breakpoints: &BreakpointTable,
) -> String {
    let width = breakpoints
        .get(breakpoint)
        .map(|w| w.to_string())
        .unwrap_or_else(|| "undefined".to_string());
    format!(
        "@media (min-width: {}px) {{ {}: {}; }}",
        width, property, value
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn colors() -> ColorTable {
        let mut colors = ColorTable::new();
        colors.insert("primary".into(), "#ff0000".into());
        colors.insert("secondary".into(), "#00ff00".into());
        colors.insert("gradient-1".into(), "linear-gradient(to right, #ff0000, #00ff00)".into());
        colors.insert("spacing.1".into(), "8px".into());
        colors.insert("with space".into(), "#ffffff".into());
        colors
    }

    fn resolve(property: &str, value: serde_json::Value) -> String {
        resolve_value(
            property,
            &PropValue::from(value),
            &BreakpointTable::default(),
            &colors(),
        )
    }

    // =========================================================================
    // resolve_color
    // =========================================================================

    #[test]
    fn test_resolve_color_known_tokens() {
        assert_eq!(resolve_color(&colors(), "primary"), "#ff0000");
        assert_eq!(resolve_color(&colors(), "secondary"), "#00ff00");
    }

    #[test]
    fn test_resolve_color_unknown_is_identity() {
        assert_eq!(resolve_color(&colors(), "#0000ff"), "#0000ff");
        assert_eq!(resolve_color(&colors(), "blue"), "blue");
        assert_eq!(resolve_color(&colors(), "rgb(0, 0, 255)"), "rgb(0, 0, 255)");
        assert_eq!(resolve_color(&colors(), ""), "");
        assert_eq!(resolve_color(&ColorTable::new(), "primary"), "primary");
    }

    #[test]
    fn test_resolve_color_special_token_names() {
        assert_eq!(
            resolve_color(&colors(), "gradient-1"),
            "linear-gradient(to right, #ff0000, #00ff00)"
        );
        assert_eq!(resolve_color(&colors(), "spacing.1"), "8px");
        assert_eq!(resolve_color(&colors(), "with space"), "#ffffff");
    }

    #[test]
    fn test_resolve_color_empty_mapping_is_identity() {
        let mut colors = ColorTable::new();
        colors.insert("ghost".into(), String::new());
        assert_eq!(resolve_color(&colors, "ghost"), "ghost");
    }

    // =========================================================================
    // Scalars
    // =========================================================================

    #[test]
    fn test_numbers_get_px() {
        assert_eq!(resolve("width", json!(100)), "100px");
        assert_eq!(resolve("margin", json!(0)), "0px");
        assert_eq!(resolve("margin", json!(-10)), "-10px");
        assert_eq!(resolve("width", json!(999999)), "999999px");
        assert_eq!(resolve("width", json!(1.5)), "1.5px");
    }

    #[test]
    fn test_extreme_numbers_use_exponent_form() {
        assert_eq!(resolve("width", json!(1e21)), "1e+21px");
        assert_eq!(resolve("width", json!(0.0000001)), "1e-7px");
    }

    #[test]
    fn test_strings_pass_through() {
        assert_eq!(resolve("padding", json!("0")), "0");
        assert_eq!(resolve("width", json!("100%")), "100%");
        assert_eq!(resolve("margin", json!("2rem")), "2rem");
        assert_eq!(resolve("margin", json!("-10px")), "-10px");
        assert_eq!(resolve("transform", json!("rotate(45deg)")), "rotate(45deg)");
    }

    #[test]
    fn test_strings_resolve_colors() {
        assert_eq!(resolve("color", json!("primary")), "#ff0000");
        assert_eq!(resolve("backgroundColor", json!("secondary")), "#00ff00");
    }

    #[test]
    fn test_missing_markers_stringify() {
        let bps = BreakpointTable::default();
        assert_eq!(resolve_value("width", &PropValue::Null, &bps, &colors()), "null");
        assert_eq!(
            resolve_value("width", &PropValue::Undefined, &bps, &colors()),
            "undefined"
        );
    }

    #[test]
    fn test_booleans_stringify() {
        assert_eq!(resolve("visible", json!(true)), "true");
    }

    // =========================================================================
    // Responsive values
    // =========================================================================

    #[test]
    fn test_responsive_media_queries() {
        let result = resolve("width", json!({ "xs": 100, "md": 200, "lg": "50%" }));
        assert_eq!(
            result,
            "@media (min-width: 0px) { width: 100px; } \
             @media (min-width: 768px) { width: 200px; } \
             @media (min-width: 1024px) { width: 50%; }"
        );
    }

    #[test]
    fn test_responsive_resolves_colors() {
        let result = resolve(
            "color",
            json!({ "xs": "primary", "sm": "#000000", "md": "secondary" }),
        );
        assert!(result.contains("@media (min-width: 0px) { color: #ff0000; }"));
        assert!(result.contains("@media (min-width: 640px) { color: #000000; }"));
        assert!(result.contains("@media (min-width: 768px) { color: #00ff00; }"));
    }

    #[test]
    fn test_responsive_order_ignores_input_order() {
        let result = resolve("width", json!({ "lg": "100%", "xs": "50%", "md": "75%" }));
        let xs = result.find("min-width: 0px").unwrap();
        let md = result.find("min-width: 768px").unwrap();
        let lg = result.find("min-width: 1024px").unwrap();
        assert!(xs < md && md < lg);
    }

    #[test]
    fn test_responsive_drops_unknown_breakpoints() {
        let result = resolve("width", json!({ "xs": "50%", "invalid": "75%", "lg": "100%" }));
        assert!(!result.contains("invalid"));
        assert!(!result.contains("75%"));
        assert_eq!(result.matches("@media").count(), 2);
    }

    #[test]
    fn test_responsive_missing_width_is_undefined() {
        let value = PropValue::from(json!({ "xs": 100, "md": "primary" }));
        let result = resolve_value("width", &value, &BreakpointTable::empty(), &ColorTable::new());
        assert_eq!(
            result,
            "@media (min-width: undefinedpx) { width: 100px; } \
             @media (min-width: undefinedpx) { width: primary; }"
        );
    }

    #[test]
    fn test_responsive_nested_map_dropped() {
        let result = resolve("width", json!({ "xs": { "a": 1 }, "sm": 10 }));
        assert_eq!(result, "@media (min-width: 640px) { width: 10px; }");
    }

    #[test]
    fn test_empty_responsive_map_is_empty_string() {
        assert_eq!(resolve("width", json!({})), "");
    }

    #[test]
    fn test_typed_responsive_map() {
        let mut values = ResponsiveMap::new();
        values.insert(Breakpoint::Md, Scalar::from("primary"));
        values.insert(Breakpoint::Xs, Scalar::from(4));
        let result = resolve_responsive("gap", &values, &BreakpointTable::default(), &colors());
        assert_eq!(
            result,
            "@media (min-width: 0px) { gap: 4px; } @media (min-width: 768px) { gap: #ff0000; }"
        );
    }
}
