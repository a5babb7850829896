//! # Propstyle Resolve - Styling-Prop Resolution Engine
//!
//! `propstyle-resolve` turns component props into inline styles. A declarative
//! [`Settings`] object (shorthands, color tokens, breakpoints, pseudo
//! selectors, variants) is compiled once into a [`Processor`]; each call to
//! the processor splits a prop map into pass-through props and one resolved
//! style tree.
//!
//! This crate is the engine behind the `propstyle` facade, but can be used on
//! its own wherever a prop map needs resolving.
//!
//! ## Core Concepts
//!
//! - [`Settings`]: the declarative input, built in code or loaded from YAML/JSON
//! - [`normalize`]: merges settings with their `extend` base into a [`Configuration`]
//! - [`Processor`]: the compiled per-call resolver, see [`build_processor`]
//! - [`resolve_value`]: leaf resolution (numbers to `px`, color tokens, media queries)
//! - [`utility_preset`]: the shipped utility-class preset
//!
//! ## Quick Start
//!
//! ```rust
//! use propstyle_resolve::{build_processor, utility_preset, Settings, StyleTemplate, Variant};
//! use serde_json::json;
//!
//! let processor = build_processor(
//!     &Settings::new()
//!         .extend(utility_preset().clone())
//!         .color("primary", "#007bff")
//!         .variant(
//!             "size",
//!             Variant::new()
//!                 .option("sm", StyleTemplate::new().set("fontSize", "0.875rem"))
//!                 .option("lg", StyleTemplate::new().set("fontSize", "1.25rem")),
//!         ),
//! );
//!
//! let output = processor.process_json(json!({
//!     "flex": true,
//!     "bg": "primary",
//!     "size": "lg",
//!     "onClick": "handler",
//!     "__hover": { "bg": "#0056b3" },
//! }));
//!
//! assert_eq!(
//!     output.to_json(),
//!     json!({
//!         "onClick": "handler",
//!         "style": {
//!             "display": "flex",
//!             "backgroundColor": "#007bff",
//!             "fontSize": "1.25rem",
//!             ":hover": { "backgroundColor": "#0056b3" },
//!         },
//!     })
//! );
//! ```
//!
//! ## Responsive Values
//!
//! A map keyed by breakpoint name expands into media-query fragments, always
//! in ascending breakpoint order:
//!
//! ```rust
//! use propstyle_resolve::{build_processor, Settings};
//! use serde_json::json;
//!
//! let output = build_processor(&Settings::new()).process_json(json!({
//!     "width": { "md": "50%", "xs": "100%" },
//! }));
//! let style = output.style.unwrap();
//! assert_eq!(
//!     style.value("width"),
//!     Some("@media (min-width: 0px) { width: 100%; } @media (min-width: 768px) { width: 50%; }")
//! );
//! ```
//!
//! ## Failure Model
//!
//! Only loading settings text can fail ([`SettingsError`]). Normalizing and
//! processing never fail: unknown variant options, unknown breakpoints and
//! malformed pseudo blocks are dropped, `null` and `undefined` leaves are
//! stringified. Each degradation is reported through `tracing` at `trace`
//! level.

mod breakpoint;
mod classify;
mod error;
mod normalize;
mod parse;
mod preset;
mod processor;
mod resolve;
mod settings;
mod style;
mod template;
pub mod value;

pub use breakpoint::{Breakpoint, BreakpointTable};
pub use classify::PropKind;
pub use error::{Result, SettingsError};
pub use normalize::{normalize, Configuration};
pub use preset::{utility_preset, UTILITY_PRESET};
pub use processor::{build_processor, Processor};
pub use resolve::{
    px, resolve_color, resolve_responsive, resolve_scalar, resolve_value, ColorTable,
};
pub use settings::{PropMatcher, Settings, Variant};
pub use style::{ResolvedOutput, ResolvedStyle, StyleEntry};
pub use template::{ResponsiveMap, Scalar, StyleTemplate, TemplateValue};
pub use value::{props_from_json, Number, PropMap, PropValue};
