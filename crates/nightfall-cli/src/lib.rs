//! Command line front end for `nightfall`.
//!
//! The binary treats a JSON file as the page's preference storage and a list
//! of CSS files as the page's linked stylesheets, so the engine's load-time
//! pipeline and toggle can be driven (and scripted) from a shell.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use nightfall::{
    Document, EffectiveTheme, EngineConfig, FileStorage, FixedScheme, OsScheme, PreferenceStore,
    SchemeQuery, StyleSheet, Theme, ThemeContext, ThemeResolver,
};

/// Default preference file, relative to the working directory.
pub const DEFAULT_STORE: &str = "nightfall-prefs.json";

/// Resolve, persist and apply light/dark theme preferences.
#[derive(Debug, Parser)]
#[command(name = "nightfall", version, about)]
pub struct Cli {
    /// JSON file holding persisted preferences
    #[arg(long, global = true, value_name = "FILE", default_value = DEFAULT_STORE)]
    pub store: PathBuf,

    /// YAML file overriding engine names (storage key, attribute, ...)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Where the system color scheme comes from
    #[arg(long, global = true, value_enum, default_value_t = SystemScheme::Auto)]
    pub system: SystemScheme,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the page-load pipeline over CSS files and print the overrides
    Apply {
        /// Stylesheets, in document order
        #[arg(value_name = "CSS")]
        stylesheets: Vec<PathBuf>,
    },

    /// Switch to the opposite theme and persist it
    Toggle,

    /// Print the stored, requested and effective theme without writing
    Show,
}

/// `--system` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SystemScheme {
    /// Ask the operating system
    Auto,
    Dark,
    Light,
}

enum CliScheme {
    Os(OsScheme),
    Fixed(FixedScheme),
}

impl From<SystemScheme> for CliScheme {
    fn from(system: SystemScheme) -> Self {
        match system {
            SystemScheme::Auto => CliScheme::Os(OsScheme),
            SystemScheme::Dark => CliScheme::Fixed(FixedScheme::dark()),
            SystemScheme::Light => CliScheme::Fixed(FixedScheme::light()),
        }
    }
}

impl SchemeQuery for CliScheme {
    fn prefers_dark(&self) -> bool {
        match self {
            CliScheme::Os(os) => os.prefers_dark(),
            CliScheme::Fixed(fixed) => fixed.prefers_dark(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ApplyOutput<'a> {
    report: &'a nightfall::ApplyReport,
    css: &'a str,
}

#[derive(Debug, Serialize)]
struct ToggleOutput {
    theme: EffectiveTheme,
}

#[derive(Debug, Serialize)]
struct ShowOutput {
    stored: Option<String>,
    requested: Theme,
    effective: EffectiveTheme,
}

/// Runs one command and returns what should be printed to stdout.
pub fn run(cli: &Cli) -> Result<String> {
    let config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::default(),
    };

    match &cli.command {
        Command::Apply { stylesheets } => apply(cli, config, stylesheets),
        Command::Toggle => toggle(cli, config),
        Command::Show => show(cli, config),
    }
}

fn open_store(cli: &Cli, config: &EngineConfig) -> Result<PreferenceStore> {
    let storage = FileStorage::open(&cli.store)
        .with_context(|| format!("opening preference store {}", cli.store.display()))?;
    Ok(PreferenceStore::new(config.storage_key.clone(), storage))
}

fn load_stylesheet(path: &Path) -> StyleSheet {
    let href = path.display().to_string();
    match fs::read_to_string(path) {
        Ok(css) => StyleSheet::parse(&css).with_href(href),
        Err(err) => {
            tracing::warn!(path = %href, error = %err, "stylesheet unreadable, treating it as restricted");
            StyleSheet::restricted(href)
        }
    }
}

fn apply(cli: &Cli, config: EngineConfig, stylesheets: &[PathBuf]) -> Result<String> {
    let store = open_store(cli, &config)?;
    let document = stylesheets
        .iter()
        .map(|path| load_stylesheet(path))
        .fold(Document::new(), Document::with_stylesheet);

    let ctx = ThemeContext::new(config, store, document, CliScheme::from(cli.system));
    let report = ctx.apply();
    ctx.flush().context("writing preference store")?;

    let document = ctx.document();
    let css = document
        .styles_with_id(&ctx.config().style_id)
        .map(|style| style.text())
        .collect::<String>();

    if cli.json {
        let output = ApplyOutput {
            report: &report,
            css: &css,
        };
        return Ok(serde_json::to_string_pretty(&output)?);
    }
    Ok(format!("effective: {}\n\n{}", report.effective, css))
}

fn toggle(cli: &Cli, config: EngineConfig) -> Result<String> {
    let store = open_store(cli, &config)?;
    let ctx = ThemeContext::new(config, store, Document::new(), CliScheme::from(cli.system));
    let theme = ctx.mount().toggle();
    ctx.flush().context("writing preference store")?;

    if cli.json {
        return Ok(serde_json::to_string_pretty(&ToggleOutput { theme })?);
    }
    Ok(theme.to_string())
}

fn show(cli: &Cli, config: EngineConfig) -> Result<String> {
    let store = open_store(cli, &config)?;
    let scheme = CliScheme::from(cli.system);

    let stored = store.raw();
    let requested = store.read();
    let effective = ThemeResolver::new(&scheme).resolve_effective(requested);

    if cli.json {
        let output = ShowOutput {
            stored,
            requested,
            effective,
        };
        return Ok(serde_json::to_string_pretty(&output)?);
    }
    Ok(format!(
        "stored: {}\nrequested: {}\neffective: {}",
        stored.as_deref().unwrap_or("(none)"),
        requested,
        effective
    ))
}
