//! propstyle: inspect settings files and resolve props from the command line.
//!
//! ```text
//! propstyle resolve --settings theme.yaml --props '{"bg": "primary", "p": 4}'
//! echo '{"flex": true}' | propstyle resolve --preset utility
//! propstyle inspect --settings theme.yaml
//! propstyle css "color: red; padding: 10px;"
//! ```

use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use propstyle::{
    build_processor, css, global, props_from_json, utility_preset, Breakpoint, MemorySink,
    Processor, Settings, UTILITY_PRESET,
};

/// Resolve style props against propstyle settings
#[derive(Parser, Debug)]
#[command(name = "propstyle")]
#[command(version)]
#[command(about = "Resolve style props against propstyle settings")]
struct Cli {
    /// Log resolution details to stderr (RUST_LOG overrides the level)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve a JSON prop map and print the output as JSON
    Resolve {
        #[command(flatten)]
        source: SettingsSource,

        /// Props as a JSON object; read from stdin when omitted
        #[arg(short, long)]
        props: Option<String>,

        /// Print on one line
        #[arg(long)]
        compact: bool,
    },
    /// List what a configuration defines
    Inspect {
        #[command(flatten)]
        source: SettingsSource,
    },
    /// Compile style text into a class name and print the resulting sheet
    Css {
        /// Style text; read from stdin when omitted
        text: Option<String>,

        /// Inject the text as global styles instead of compiling a class
        #[arg(long)]
        global: bool,
    },
}

#[derive(Args, Debug)]
struct SettingsSource {
    /// Settings file (YAML, or JSON with a .json extension)
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Extend a shipped preset
    #[arg(long, value_parser = [UTILITY_PRESET])]
    preset: Option<String>,
}

impl SettingsSource {
    fn load(&self) -> Result<Settings> {
        let mut settings = match &self.settings {
            Some(path) => {
                tracing::debug!("loading settings from {}", path.display());
                Settings::from_file(path)
                    .with_context(|| format!("loading settings from {}", path.display()))?
            }
            None => Settings::new(),
        };
        if self.preset.is_some() {
            if settings.extend.is_some() {
                bail!("--preset cannot be combined with a settings file that sets `extend`");
            }
            settings = settings.extend(utility_preset().clone());
        }
        Ok(settings)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("trace")),
            )
            .with_writer(io::stderr)
            .init();
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(cli.command, &mut out, &mut io::stdin())
}

fn run(command: Commands, out: &mut impl Write, input: &mut impl Read) -> Result<()> {
    match command {
        Commands::Resolve {
            source,
            props,
            compact,
        } => {
            let processor = build_processor(&source.load()?);
            let props = match props {
                Some(text) => text,
                None => read_all(input)?,
            };
            resolve(&processor, &props, compact, out)
        }
        Commands::Inspect { source } => inspect(&build_processor(&source.load()?), out),
        Commands::Css { text, global: inject } => {
            let text = match text {
                Some(text) => text,
                None => read_all(input)?,
            };
            let sink = MemorySink::new();
            if inject {
                global(&sink, &text);
            } else {
                writeln!(out, "{}", css(&sink, &text))?;
            }
            for rule in sink.rules() {
                writeln!(out, "{}", rule)?;
            }
            Ok(())
        }
    }
}

fn resolve(processor: &Processor, props: &str, compact: bool, out: &mut impl Write) -> Result<()> {
    let value: serde_json::Value = serde_json::from_str(props).context("parsing props")?;
    if !value.is_object() {
        bail!("props must be a JSON object");
    }
    let output = processor.process(&props_from_json(value));
    let json = output.to_json();
    let text = if compact {
        serde_json::to_string(&json)?
    } else {
        serde_json::to_string_pretty(&json)?
    };
    writeln!(out, "{}", text)?;
    Ok(())
}

fn inspect(processor: &Processor, out: &mut impl Write) -> Result<()> {
    let config = processor.configuration();

    let shorthands: Vec<_> = config.shorthand_names().collect();
    writeln!(out, "shorthands ({}): {}", shorthands.len(), shorthands.join(", "))?;

    let variants: Vec<String> = config
        .variants()
        .iter()
        .map(|(name, variant)| {
            let options: Vec<_> = variant.values.keys().map(String::as_str).collect();
            match &variant.default {
                Some(default) => format!("{} [{}] default {}", name, options.join("|"), default),
                None => format!("{} [{}]", name, options.join("|")),
            }
        })
        .collect();
    writeln!(out, "variants ({}): {}", variants.len(), variants.join(", "))?;

    let pseudo: Vec<String> = config
        .pseudo_selectors()
        .iter()
        .map(|(key, selector)| format!("{} -> {}", key, selector))
        .collect();
    writeln!(out, "pseudo selectors ({}): {}", pseudo.len(), pseudo.join(", "))?;

    let colors: Vec<String> = config
        .colors()
        .iter()
        .map(|(token, color)| format!("{}={}", token, color))
        .collect();
    writeln!(out, "colors ({}): {}", colors.len(), colors.join(", "))?;

    let breakpoints: Vec<String> = Breakpoint::ALL
        .iter()
        .filter_map(|bp| config.breakpoints().get(*bp).map(|w| format!("{}={}", bp, w)))
        .collect();
    writeln!(out, "breakpoints: {}", breakpoints.join(", "))?;

    let allowed: Vec<String> = config.allowed_props().iter().map(|m| m.to_string()).collect();
    writeln!(out, "allowed props: {}", allowed.join(", "))?;
    Ok(())
}

fn read_all(input: &mut impl Read) -> Result<String> {
    let mut text = String::new();
    input.read_to_string(&mut text).context("reading stdin")?;
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_args(args: &[&str], stdin: &str) -> Result<String> {
        let cli = Cli::try_parse_from(std::iter::once("propstyle").chain(args.iter().copied()))?;
        let mut out = Vec::new();
        run(cli.command, &mut out, &mut stdin.as_bytes())?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn test_resolve_with_preset() {
        let out = run_args(
            &[
                "resolve",
                "--preset",
                "utility",
                "--compact",
                "--props",
                r#"{"flex":true,"id":"x"}"#,
            ],
            "",
        )
        .unwrap();
        assert_eq!(out.trim(), r#"{"id":"x","style":{"display":"flex"}}"#);
    }

    #[test]
    fn test_resolve_reads_stdin() {
        let out = run_args(&["resolve", "--compact"], r#"{"width": 10}"#).unwrap();
        assert_eq!(out.trim(), r#"{"style":{"width":"10px"}}"#);
    }

    #[test]
    fn test_resolve_rejects_non_object() {
        let err = run_args(&["resolve", "--props", "[1]"], "").unwrap_err();
        assert!(err.to_string().contains("JSON object"));
    }

    #[test]
    fn test_unknown_preset_rejected() {
        assert!(run_args(&["resolve", "--preset", "bootstrap", "--props", "{}"], "").is_err());
    }

    #[test]
    fn test_inspect_preset() {
        let out = run_args(&["inspect", "--preset", "utility"], "").unwrap();
        assert!(out.contains("shorthands (17): flex, grid"));
        assert!(out.contains("__hover -> :hover"));
        assert!(out.contains("breakpoints: xs=0, sm=640, md=768, lg=1024, xl=1280, 2xl=1536"));
        assert!(out.contains("/^on/"));
    }

    #[test]
    fn test_css_command() {
        let out = run_args(&["css", "color: red;"], "").unwrap();
        let mut lines = out.lines();
        let class = lines.next().unwrap();
        assert!(class.starts_with("css-"));
        assert_eq!(lines.next(), Some(format!(".{}{{color:red;}}", class).as_str()));
    }

    #[test]
    fn test_css_global() {
        let out = run_args(&["css", "--global"], "body { margin: 0 }").unwrap();
        assert_eq!(out.trim(), "body{margin:0;}");
    }
}
