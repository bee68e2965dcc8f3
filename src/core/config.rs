//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.tabstack/config.toml` unless `--config` points
//! elsewhere. If missing on first run, a commented-out default is generated
//! so users can discover all options.

use log::{LevelFilter, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::OutputFormat;
use crate::core::key::Tabs;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TabstackConfig {
    #[serde(default)]
    pub general: GeneralConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub start_section: Option<String>,
    pub tabs: Option<Vec<String>>,
    pub output: Option<OutputFormat>,
    pub log_level: Option<String>,
    pub log_file: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_START_SECTION: &str = "Home";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;
pub const DEFAULT_LOG_FILE: &str = "tabstack.log";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub start_section: String,
    /// Always contains `start_section`.
    pub tabs: Tabs,
    pub output: OutputFormat,
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
    /// Problems found while resolving; logged once the logger is up.
    pub warnings: Vec<String>,
}

/// Flags from the command line (None = not specified).
#[derive(Debug, Default)]
pub struct CliOverrides<'a> {
    pub start: Option<&'a str>,
    pub output: Option<OutputFormat>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Where the loaded config came from.
///
/// Loading happens before the logger exists (the log file is itself a
/// setting), so the outcome is carried back and logged afterwards.
#[derive(Debug, PartialEq)]
pub enum ConfigSource {
    File(PathBuf),
    Generated(PathBuf),
    GenerateFailed(PathBuf, String),
    NoHome,
}

impl ConfigSource {
    pub fn log(&self) {
        match self {
            ConfigSource::File(path) => info!("Loaded config from {}", path.display()),
            ConfigSource::Generated(path) => {
                info!("No config file found, generated default at {}", path.display())
            }
            ConfigSource::GenerateFailed(path, e) => warn!(
                "No config file found, failed to write default at {}: {}",
                path.display(),
                e
            ),
            ConfigSource::NoHome => {
                warn!("Could not determine home directory, using default config")
            }
        }
    }
}

/// Returns the path to `~/.tabstack/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".tabstack").join("config.toml"))
}

/// Load config from `path`, or from `~/.tabstack/config.toml` when `None`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `TabstackConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config(path: Option<&Path>) -> Result<(TabstackConfig, ConfigSource), ConfigError> {
    let path = match path.map(Path::to_path_buf).or_else(config_path) {
        Some(p) => p,
        None => return Ok((TabstackConfig::default(), ConfigSource::NoHome)),
    };

    if !path.exists() {
        let source = match generate_default_config(&path) {
            Ok(()) => ConfigSource::Generated(path),
            Err(e) => ConfigSource::GenerateFailed(path, e.to_string()),
        };
        return Ok((TabstackConfig::default(), source));
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: TabstackConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    Ok((config, ConfigSource::File(path)))
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) -> std::io::Result<()> {
    let default_content = r#"# tabstack Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# start_section = "Home"                  # Or set TABSTACK_START
# tabs = ["Home", "ChatList", "Camera"]   # Bottom bar, in display order
# output = "text"                         # "text" or "json"; or TABSTACK_OUTPUT
# log_level = "debug"                     # off/error/warn/info/debug/trace; or TABSTACK_LOG_LEVEL
# log_file = "tabstack.log"
"#;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, default_content)
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &TabstackConfig, cli: &CliOverrides<'_>) -> ResolvedConfig {
    let mut warnings = Vec::new();

    // Start section: CLI → env → config → default
    let start_section = cli
        .start
        .and_then(non_blank)
        .or_else(|| std::env::var("TABSTACK_START").ok().as_deref().and_then(non_blank))
        .or_else(|| config.general.start_section.as_deref().and_then(non_blank))
        .unwrap_or_else(|| DEFAULT_START_SECTION.to_string());

    // Tabs: config → default, and the start section is always a tab
    let mut tabs = match &config.general.tabs {
        Some(names) => Tabs::new(names.iter().map(String::as_str)),
        None => Tabs::default(),
    };
    tabs.ensure(start_section.as_str());

    // Output: CLI → env → config → default
    let output = cli
        .output
        .or_else(|| {
            let s = std::env::var("TABSTACK_OUTPUT").ok()?;
            let output = parse_output(&s);
            if output.is_none() {
                warnings.push(format!("Unknown output format '{}' in TABSTACK_OUTPUT, ignoring", s));
            }
            output
        })
        .or(config.general.output)
        .unwrap_or_default();

    // Log level: env → config → default
    let log_level = std::env::var("TABSTACK_LOG_LEVEL")
        .ok()
        .or_else(|| config.general.log_level.clone())
        .and_then(|s| match s.parse::<LevelFilter>() {
            Ok(level) => Some(level),
            Err(_) => {
                warnings.push(format!("Unknown log level '{}', using default", s));
                None
            }
        })
        .unwrap_or(DEFAULT_LOG_LEVEL);

    let log_file = config
        .general
        .log_file
        .clone()
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());

    ResolvedConfig {
        start_section,
        tabs,
        output,
        log_level,
        log_file: PathBuf::from(log_file),
        warnings,
    }
}

fn non_blank(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

fn parse_output(s: &str) -> Option<OutputFormat> {
    match s.trim().to_ascii_lowercase().as_str() {
        "text" => Some(OutputFormat::Text),
        "json" => Some(OutputFormat::Json),
        _ => None,
    }
}
