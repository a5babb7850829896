//! Loading settings from files and running them through a processor.

use std::io::Write;

use propstyle_resolve::{build_processor, Breakpoint, Settings, SettingsError};
use serde_json::json;
use tempfile::{Builder, NamedTempFile};

fn write_settings(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

const BUTTON_YAML: &str = r##"
extend: utility
colors:
  primary: "#007bff"
breakpoints:
  md: 700
pseudoSelectors:
  __visited: ":visited"
shorthands:
  card:
    padding: 16
    borderRadius: $
    __hover:
      boxShadow: "0 0 4px black"
defaultProps:
  role: button
variants:
  tone:
    values:
      loud: { fontWeight: bold, color: primary }
      quiet: { opacity: 0.5 }
    default: quiet
"##;

#[test]
fn test_yaml_file_end_to_end() {
    let file = write_settings(".yaml", BUTTON_YAML);
    let settings = Settings::from_file(file.path()).unwrap();
    let processor = build_processor(&settings);

    let config = processor.configuration();
    assert!(config.shorthands().contains_key("flex"));
    assert!(config.shorthands().contains_key("card"));
    assert_eq!(config.breakpoints().get(Breakpoint::Md), Some(700));
    assert_eq!(config.breakpoints().len(), 1);
    assert_eq!(config.pseudo_selectors()["__visited"], ":visited");

    let output = processor.process_json(json!({
        "card": 4,
        "tone": "loud",
        "onClick": "go",
        "__hover": { "bg": "primary" },
    }));

    assert_eq!(
        output.to_json(),
        json!({
            "role": "button",
            "onClick": "go",
            "style": {
                "padding": "16px",
                "borderRadius": "4px",
                ":hover": { "backgroundColor": "#007bff" },
                "fontWeight": "bold",
                "color": "#007bff",
            },
        })
    );
}

#[test]
fn test_nested_block_and_default_variant() {
    let file = write_settings(".yml", BUTTON_YAML);
    let processor = build_processor(&Settings::from_file(file.path()).unwrap());

    let style = processor.process_json(json!({ "card": true })).style.unwrap();
    assert_eq!(style.value("opacity"), Some("0.5px"));
    assert_eq!(style.value("padding"), Some("16px"));
    assert_eq!(style.value("borderRadius"), None);
    assert_eq!(
        style.block(":hover").and_then(|b| b.value("boxShadow")),
        Some("0 0 4px black")
    );
}

#[test]
fn test_json_file() {
    let file = write_settings(
        ".json",
        r#"{
            "colors": { "brand": "rebeccapurple" },
            "shorthands": { "fg": { "color": "$1" } },
            "allowedProps": ["/^data-/"]
        }"#,
    );
    let processor = build_processor(&Settings::from_file(file.path()).unwrap());
    let output = processor.process_json(json!({ "fg": "brand", "data-x": 1 }));
    assert_eq!(
        output.to_json(),
        json!({ "data-x": 1, "style": { "color": "rebeccapurple" } })
    );
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Settings::from_file(dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, SettingsError::Load { .. }));
    assert!(err.to_string().contains("absent.yaml"));
}

#[test]
fn test_parse_error_carries_path() {
    let file = write_settings(".yaml", "colors: [");
    let err = Settings::from_file(file.path()).unwrap_err();
    match &err {
        SettingsError::Parse { path, .. } => assert_eq!(path.as_deref(), Some(file.path())),
        other => panic!("expected a parse error, got {:?}", other),
    }
}
