//! Settings files.
//!
//! Settings can be written as YAML or JSON using the camelCase category names
//! of the settings object:
//!
//! ```yaml
//! extend: utility
//! colors:
//!   primary: "#007bff"
//! shorthands:
//!   bg:
//!     backgroundColor: $
//!   card:
//!     padding: 16
//!     width: { xs: "100%", md: "50%" }
//!     __hover:
//!       boxShadow: "0 0 4px black"
//! allowedProps: [children, "/^on/"]
//! breakpoints: { xs: 0, md: 700 }
//! pseudoSelectors:
//!   __hover: ":hover"
//! defaultProps:
//!   role: group
//! variants:
//!   size:
//!     values:
//!       sm: { fontSize: 14 }
//!       md: { fontSize: 16 }
//!     default: md
//! ```
//!
//! Text conventions are turned into typed template entries here and nowhere
//! else:
//!
//! - a string starting with `$` is a placeholder
//! - a key starting with `__` holding a mapping is a nested pseudo block
//! - any other mapping is a responsive value; unknown breakpoints are dropped
//! - an allowed prop written `/.../` is a regex pattern
//!
//! `extend` holds either an inline settings mapping or the name of the
//! shipped preset, `utility`.

use std::path::Path;

use indexmap::IndexMap;
use serde_yaml::{Mapping, Value};

use crate::breakpoint::{Breakpoint, BreakpointTable};
use crate::error::{Result, SettingsError};
use crate::preset::{utility_preset, UTILITY_PRESET};
use crate::settings::{PropMatcher, Settings, Variant};
use crate::template::{ResponsiveMap, Scalar, StyleTemplate, TemplateValue};
use crate::value::{Number, PropMap, PropValue};

const PLACEHOLDER_PREFIX: char = '$';
const PSEUDO_PREFIX: &str = "__";

impl Settings {
    /// Parses settings from YAML text.
    ///
    /// # Errors
    ///
    /// Returns a [`SettingsError`] if the text is not valid YAML or a category
    /// has the wrong shape.
    ///
    /// # Example
    ///
    /// ```rust
    /// use propstyle_resolve::Settings;
    ///
    /// let settings = Settings::from_yaml(r##"
    /// colors:
    ///   primary: "#ff0000"
    /// shorthands:
    ///   bg: { backgroundColor: $ }
    /// "##).unwrap();
    /// assert!(settings.shorthands.unwrap().contains_key("bg"));
    /// ```
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let root: Value = serde_yaml::from_str(yaml).map_err(|e| SettingsError::Parse {
            path: None,
            message: e.to_string(),
        })?;
        parse_settings(&root, "")
    }

    /// Parses settings from JSON text.
    ///
    /// # Errors
    ///
    /// Returns a [`SettingsError`] if the text is not valid JSON or a category
    /// has the wrong shape.
    pub fn from_json(json: &str) -> Result<Self> {
        let root: Value = serde_json::from_str(json).map_err(|e| SettingsError::Parse {
            path: None,
            message: e.to_string(),
        })?;
        parse_settings(&root, "")
    }

    /// Loads settings from a file. Files ending in `.json` are read as JSON,
    /// anything else as YAML.
    ///
    /// # Errors
    ///
    /// Returns a [`SettingsError`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Load {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let parsed = if is_json {
            Self::from_json(&content)
        } else {
            Self::from_yaml(&content)
        };
        parsed.map_err(|e| e.with_path(path))
    }
}

fn parse_settings(root: &Value, prefix: &str) -> Result<Settings> {
    let mapping = match root {
        Value::Null => return Ok(Settings::new()),
        Value::Mapping(m) => m,
        _ => return Err(SettingsError::invalid(scope(prefix), "expected a mapping")),
    };

    let mut settings = Settings::new();
    for (key, value) in mapping {
        let category = key_string(key, prefix)?;
        let name = join(prefix, &category);
        match category.as_str() {
            "extend" => settings.extend = Some(Box::new(parse_extend(value, &name)?)),
            "shorthands" => {
                let mut shorthands = IndexMap::new();
                for (short, template) in entries(value, &name)? {
                    let entry_name = join(&name, &short);
                    shorthands.insert(short, parse_template(template, &entry_name)?);
                }
                settings.shorthands = Some(shorthands);
            }
            "allowedProps" => settings.allowed_props = Some(parse_allowed_props(value, &name)?),
            "breakpoints" => settings.breakpoints = Some(parse_breakpoints(value, &name)?),
            "colors" => {
                let mut colors = IndexMap::new();
                for (token, color) in entries(value, &name)? {
                    let color = string_value(color, &join(&name, &token))?;
                    colors.insert(token, color);
                }
                settings.colors = Some(colors);
            }
            "pseudoSelectors" => {
                let mut selectors = IndexMap::new();
                for (pseudo, selector) in entries(value, &name)? {
                    let selector = string_value(selector, &join(&name, &pseudo))?;
                    selectors.insert(pseudo, selector);
                }
                settings.pseudo_selectors = Some(selectors);
            }
            "defaultProps" => {
                let mut props = PropMap::new();
                for (prop, default) in entries(value, &name)? {
                    let entry_name = join(&name, &prop);
                    props.insert(prop, prop_value(default, &entry_name)?);
                }
                settings.default_props = Some(props);
            }
            "variants" => {
                let mut variants = IndexMap::new();
                for (variant, definition) in entries(value, &name)? {
                    let entry_name = join(&name, &variant);
                    variants.insert(variant, parse_variant(definition, &entry_name)?);
                }
                settings.variants = Some(variants);
            }
            _ => return Err(SettingsError::invalid(name, "unknown settings category")),
        }
    }
    Ok(settings)
}

fn parse_extend(value: &Value, name: &str) -> Result<Settings> {
    match value {
        Value::String(preset) if preset == UTILITY_PRESET => Ok(utility_preset().clone()),
        Value::String(preset) => Err(SettingsError::invalid(
            name,
            format!("unknown preset '{}'", preset),
        )),
        other => parse_settings(other, name),
    }
}

fn parse_template(value: &Value, name: &str) -> Result<StyleTemplate> {
    let mut template = StyleTemplate::new();
    for (property, declared) in entries(value, name)? {
        let entry_name = join(name, &property);
        let parsed = match declared {
            Value::String(s) if s.starts_with(PLACEHOLDER_PREFIX) => TemplateValue::Placeholder,
            Value::Mapping(_) if property.starts_with(PSEUDO_PREFIX) => {
                TemplateValue::Nested(parse_template(declared, &entry_name)?)
            }
            Value::Mapping(_) => {
                TemplateValue::Responsive(parse_responsive(declared, &entry_name)?)
            }
            other => TemplateValue::Literal(scalar(other, &entry_name)?),
        };
        template.insert(property, parsed);
    }
    Ok(template)
}

fn parse_responsive(value: &Value, name: &str) -> Result<ResponsiveMap> {
    let mut map = ResponsiveMap::new();
    for (key, leaf) in entries(value, name)? {
        match Breakpoint::parse(&key) {
            Some(bp) => {
                map.insert(bp, scalar(leaf, &join(name, &key))?);
            }
            None => tracing::trace!("dropping unknown breakpoint '{}' in {}", key, name),
        }
    }
    Ok(map)
}

fn parse_variant(value: &Value, name: &str) -> Result<Variant> {
    let mut variant = Variant::new();
    for (field, content) in entries(value, name)? {
        let field_name = join(name, &field);
        match field.as_str() {
            "values" => {
                for (option, template) in entries(content, &field_name)? {
                    let option_name = join(&field_name, &option);
                    variant.values.insert(option, parse_template(template, &option_name)?);
                }
            }
            "default" => variant.default = Some(key_string(content, &field_name)?),
            _ => return Err(SettingsError::invalid(field_name, "unknown variant field")),
        }
    }
    Ok(variant)
}

fn parse_allowed_props(value: &Value, name: &str) -> Result<Vec<PropMatcher>> {
    let Value::Sequence(items) = value else {
        return Err(SettingsError::invalid(name, "expected a sequence"));
    };
    items
        .iter()
        .map(|item| {
            let text = string_value(item, name)?;
            match text.strip_prefix('/').and_then(|rest| rest.strip_suffix('/')) {
                Some(pattern) if text.len() >= 2 => regex::Regex::new(pattern)
                    .map(PropMatcher::Pattern)
                    .map_err(|source| SettingsError::InvalidPattern {
                        pattern: text.clone(),
                        source,
                    }),
                _ => Ok(PropMatcher::Exact(text)),
            }
        })
        .collect()
}

fn parse_breakpoints(value: &Value, name: &str) -> Result<BreakpointTable> {
    let mut table = BreakpointTable::empty();
    for (key, width) in entries(value, name)? {
        let Some(bp) = Breakpoint::parse(&key) else {
            tracing::trace!("dropping unknown breakpoint '{}' in {}", key, name);
            continue;
        };
        let width = width
            .as_u64()
            .and_then(|w| u32::try_from(w).ok())
            .ok_or_else(|| {
                SettingsError::invalid(join(name, &key), "expected a non-negative pixel width")
            })?;
        table.insert(bp, width);
    }
    Ok(table)
}

/// Mapping entries with string keys. `null` reads as an empty mapping.
fn entries<'v>(value: &'v Value, name: &str) -> Result<Vec<(String, &'v Value)>> {
    let mapping: &Mapping = match value {
        Value::Mapping(m) => m,
        Value::Null => return Ok(Vec::new()),
        Value::Tagged(tagged) => return entries(&tagged.value, name),
        _ => return Err(SettingsError::invalid(scope(name), "expected a mapping")),
    };
    mapping
        .iter()
        .map(|(k, v)| Ok((key_string(k, name)?, v)))
        .collect()
}

fn key_string(key: &Value, name: &str) -> Result<String> {
    match key {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(yaml_number(n).to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(SettingsError::invalid(scope(name), "expected a string key")),
    }
}

fn string_value(value: &Value, name: &str) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        _ => Err(SettingsError::invalid(scope(name), "expected a string")),
    }
}

fn scalar(value: &Value, name: &str) -> Result<Scalar> {
    match value {
        Value::String(s) => Ok(Scalar::String(s.clone())),
        Value::Number(n) => Ok(Scalar::Number(yaml_number(n))),
        _ => Err(SettingsError::invalid(scope(name), "expected a string or a number")),
    }
}

fn prop_value(value: &Value, name: &str) -> Result<PropValue> {
    let json = serde_json::to_value(value)
        .map_err(|e| SettingsError::invalid(scope(name), e.to_string()))?;
    Ok(PropValue::from(json))
}

fn yaml_number(n: &serde_yaml::Number) -> Number {
    if let Some(i) = n.as_i64() {
        Number::I64(i)
    } else if let Some(u) = n.as_u64() {
        Number::U64(u)
    } else {
        Number::F64(n.as_f64().unwrap_or(f64::NAN))
    }
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

fn scope(name: &str) -> &str {
    if name.is_empty() {
        "settings"
    } else {
        name
    }
}
