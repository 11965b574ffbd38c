//! Configuration loading and config file resolution

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "WLINK_CONFIG";

/// Name-keywords that mark a product row as an add-on coverage record
pub const DEFAULT_LINK_KEYWORDS: [&str; 5] = ["warranty", "protection", "care", "extended", "premium"];

/// Maximum purchase date distance for keyword-based linkage
pub const DEFAULT_PROXIMITY_DAYS: i64 = 30;

/// Top-level TOML configuration
///
/// Every section is optional; a missing section takes its defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub logging: LoggingConfig,
    pub linkage: LinkageConfig,
}

/// Logging section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default tracing level directive (overridden by RUST_LOG)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Linkage heuristic tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkageConfig {
    /// Keywords matched case-insensitively against product names
    pub keywords: Vec<String>,
    /// Inclusive purchase date window in calendar days
    pub proximity_days: i64,
}

impl Default for LinkageConfig {
    fn default() -> Self {
        Self {
            keywords: DEFAULT_LINK_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            proximity_days: DEFAULT_PROXIMITY_DAYS,
        }
    }
}

impl LinkageConfig {
    /// Validate and normalize (keywords trimmed, lowercased, blanks dropped)
    pub fn normalized(mut self) -> Result<Self> {
        self.keywords = normalize_keywords(&self.keywords);

        if self.keywords.is_empty() {
            return Err(Error::Config(
                "linkage.keywords must contain at least one non-blank keyword".to_string(),
            ));
        }
        if self.proximity_days < 0 {
            return Err(Error::Config(format!(
                "linkage.proximity_days must not be negative (got {})",
                self.proximity_days
            )));
        }

        Ok(self)
    }
}

/// Trim and lowercase keywords, dropping blanks
pub fn normalize_keywords(keywords: &[String]) -> Vec<String> {
    keywords
        .iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
}

/// Where a config file path came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    CommandLine,
    Environment,
    PlatformDefault,
}

/// Config file resolution in priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. Platform config directory (`<config_dir>/wlink/config.toml`)
///
/// Returns `None` when no candidate exists; callers fall back to compiled defaults.
pub fn resolve_config_path(
    cli_arg: Option<&Path>,
    env_var_name: &str,
) -> Option<(PathBuf, ConfigSource)> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Some((path.to_path_buf(), ConfigSource::CommandLine));
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(env_var_name) {
        if !path.trim().is_empty() {
            return Some((PathBuf::from(path), ConfigSource::Environment));
        }
    }

    // Priority 3: Platform config directory, only if present
    default_config_path()
        .filter(|path| path.exists())
        .map(|path| (path, ConfigSource::PlatformDefault))
}

/// Get the platform config file path (may not exist)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("wlink").join("config.toml"))
}

/// Read and parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Cannot read config file {}: {}", path.display(), e))
    })?;
    let mut config: TomlConfig = toml::from_str(&content)?;
    config.linkage = config.linkage.normalized()?;
    Ok(config)
}

impl TomlConfig {
    /// Resolve and load configuration
    ///
    /// An explicitly named file (argument or environment) must load. The
    /// platform default file is best-effort: a broken one logs a warning and
    /// compiled defaults are used.
    pub fn load(cli_arg: Option<&Path>) -> Result<Self> {
        match resolve_config_path(cli_arg, CONFIG_ENV_VAR) {
            Some((path, ConfigSource::PlatformDefault)) => match load_toml_config(&path) {
                Ok(config) => {
                    debug!(path = %path.display(), "Loaded platform config");
                    Ok(config)
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Ignoring unusable config file, using defaults");
                    Ok(Self::default())
                }
            },
            Some((path, source)) => {
                let config = load_toml_config(&path)?;
                debug!(path = %path.display(), source = ?source, "Loaded config");
                Ok(config)
            }
            None => {
                debug!("No config file found, using compiled defaults");
                Ok(Self::default())
            }
        }
    }
}
