//! # Propstyle - Declarative Style Props
//!
//! Propstyle lets a component library accept style shorthands directly as
//! props. Settings describe the vocabulary once:
//!
//! - shorthands (`bg`, `p`, `flex`) expanding into style properties
//! - color tokens resolved wherever a color is written
//! - breakpoints for responsive values
//! - pseudo selectors (`__hover`) for conditional blocks
//! - variants, closed option sets with an optional default
//!
//! and a compiled [`Processor`] splits each component's props into
//! pass-through props and an inline style tree.
//!
//! The resolution engine lives in `propstyle-resolve` and is re-exported here
//! unchanged. This crate adds the stylesheet side: [`css`] and [`global`] over
//! a pluggable [`StyleSink`].
//!
//! ## Quick Start
//!
//! ```rust
//! use propstyle::{build_processor, utility_preset, Settings};
//! use serde_json::json;
//!
//! let processor = build_processor(
//!     &Settings::new()
//!         .extend(utility_preset().clone())
//!         .color("primary", "#007bff"),
//! );
//!
//! let output = processor.process_json(json!({
//!     "flex": true,
//!     "p": 8,
//!     "bg": "primary",
//!     "id": "submit",
//! }));
//!
//! assert_eq!(
//!     output.to_json(),
//!     json!({
//!         "id": "submit",
//!         "style": { "display": "flex", "padding": "8px", "backgroundColor": "#007bff" },
//!     })
//! );
//! ```
//!
//! ## Settings Files
//!
//! ```rust
//! use propstyle::{build_processor, Settings};
//! use serde_json::json;
//!
//! let settings = Settings::from_yaml(r#"
//! extend: utility
//! variants:
//!   size:
//!     values:
//!       sm: { fontSize: 14 }
//!       lg: { fontSize: 20 }
//!     default: sm
//! "#).unwrap();
//!
//! let style = build_processor(&settings).process_json(json!({})).style.unwrap();
//! assert_eq!(style.value("fontSize"), Some("14px"));
//! ```

mod sink;

pub use propstyle_resolve::{
    build_processor, normalize, props_from_json, px, resolve_color, resolve_responsive,
    resolve_scalar, resolve_value, utility_preset, Breakpoint, BreakpointTable, ColorTable,
    Configuration, Number, Processor, PropKind, PropMap, PropMatcher, PropValue, ResolvedOutput,
    ResolvedStyle, ResponsiveMap, Result, Scalar, Settings, SettingsError, StyleEntry,
    StyleTemplate, TemplateValue, Variant, UTILITY_PRESET,
};

pub use sink::{css, default_sink, global, minify, MemorySink, StyleSink};
