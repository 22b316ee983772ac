//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.dashpick/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::selection::{CategoryKey, CategoryOption};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DashpickConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub categories: Vec<CategoryOption>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub default_category: Option<String>,
    pub latest_only: Option<bool>,
    pub category_key: Option<CategoryKey>,
    pub follow_redirects: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ServerConfig {
    pub base_url: Option<String>,
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "http://localhost:50000";
pub const DEFAULT_ENDPOINT: &str = "/dashboard";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub endpoint: String,
    /// `None` leaves reqwest's default in place.
    pub timeout: Option<Duration>,
    pub default_category: Option<String>,
    pub latest_only: bool,
    pub category_key: CategoryKey,
    pub follow_redirects: bool,
    pub categories: Vec<CategoryOption>,
}

/// Flags from the command line. `None` = not specified.
#[derive(Debug, Default)]
pub struct CliOverrides<'a> {
    pub base_url: Option<&'a str>,
    pub endpoint: Option<&'a str>,
    pub category: Option<&'a str>,
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

/// Returns the path to `~/.dashpick/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".dashpick").join("config.toml"))
}

/// Load config from `~/.dashpick/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `DashpickConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<DashpickConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(DashpickConfig::default());
        }
    };
    load_config_from(&path)
}

/// Load config from an explicit path, generating the default file if absent.
pub fn load_config_from(path: &Path) -> Result<DashpickConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(DashpickConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: DashpickConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# dashpick configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [server]
# base_url = "http://localhost:50000"   # Or set DASHPICK_BASE_URL
# endpoint = "/dashboard"               # Or set DASHPICK_ENDPOINT
# timeout_secs = 10                     # Unset = HTTP client default

# [general]
# default_category = "Temperature"      # Or set DASHPICK_CATEGORY
# latest_only = true                    # Only the newest selection may redirect
# category_key = "text"                 # "text" or "value"
# follow_redirects = true

# [[categories]]
# value = "1"
# text = "Temperature"
# description = "Air temperature sensors"

# [[categories]]
# value = "2"
# text = "Water"
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &DashpickConfig, cli: &CliOverrides<'_>) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`], reading environment variables through `env`.
pub fn resolve_with_env(
    config: &DashpickConfig,
    cli: &CliOverrides<'_>,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .map(str::to_string)
        .or_else(|| env("DASHPICK_BASE_URL"))
        .or_else(|| config.server.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Endpoint: CLI → env → config → default
    let endpoint = cli
        .endpoint
        .map(str::to_string)
        .or_else(|| env("DASHPICK_ENDPOINT"))
        .or_else(|| config.server.endpoint.clone())
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

    let default_category = cli
        .category
        .map(str::to_string)
        .or_else(|| env("DASHPICK_CATEGORY"))
        .or_else(|| config.general.default_category.clone());

    ResolvedConfig {
        base_url: base_url.trim_end_matches('/').to_string(),
        endpoint,
        timeout: config.server.timeout_secs.map(Duration::from_secs),
        default_category,
        latest_only: config.general.latest_only.unwrap_or(true),
        category_key: config.general.category_key.unwrap_or_default(),
        follow_redirects: config.general.follow_redirects.unwrap_or(true),
        categories: config.categories.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn env_of(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    fn file_config() -> DashpickConfig {
        DashpickConfig {
            general: GeneralConfig {
                default_category: Some("Temperature".to_string()),
                ..Default::default()
            },
            server: ServerConfig {
                base_url: Some("http://config-host:1".to_string()),
                endpoint: Some("/from-config".to_string()),
                timeout_secs: None,
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_default_config_parses() {
        let config = DashpickConfig::default();
        assert!(config.categories.is_empty());
        assert!(config.server.base_url.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = DashpickConfig::default();
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.base_url, DEFAULT_BASE_URL);
        assert_eq!(resolved.endpoint, DEFAULT_ENDPOINT);
        assert!(resolved.latest_only);
        assert!(resolved.follow_redirects);
        assert_eq!(resolved.category_key, CategoryKey::Text);
        assert!(resolved.timeout.is_none());
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = DashpickConfig {
            general: GeneralConfig {
                default_category: None,
                latest_only: Some(false),
                category_key: Some(CategoryKey::Value),
                follow_redirects: Some(false),
            },
            server: ServerConfig {
                base_url: None,
                endpoint: None,
                timeout_secs: Some(5),
            },
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert!(!resolved.latest_only);
        assert!(!resolved.follow_redirects);
        assert_eq!(resolved.category_key, CategoryKey::Value);
        assert_eq!(resolved.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_resolve_cli_wins_and_trailing_slash_is_trimmed() {
        let config = DashpickConfig {
            server: ServerConfig {
                base_url: Some("http://config-host:1".to_string()),
                endpoint: Some("/from-config".to_string()),
                timeout_secs: None,
            },
            ..Default::default()
        };
        let cli = CliOverrides {
            base_url: Some("http://cli-host:2/"),
            endpoint: Some("/from-cli"),
            category: Some("Water"),
        };
        let env = env_of(&[
            ("DASHPICK_BASE_URL", "http://env-host:3"),
            ("DASHPICK_ENDPOINT", "/from-env"),
            ("DASHPICK_CATEGORY", "Electronics"),
        ]);
        let resolved = resolve_with_env(&config, &cli, env);
        assert_eq!(resolved.base_url, "http://cli-host:2");
        assert_eq!(resolved.endpoint, "/from-cli");
        assert_eq!(resolved.default_category.as_deref(), Some("Water"));
    }

    #[test]
    fn test_resolve_env_overrides_config_file() {
        let env = env_of(&[
            ("DASHPICK_BASE_URL", "http://env-host:3/"),
            ("DASHPICK_ENDPOINT", "/from-env"),
            ("DASHPICK_CATEGORY", "Electronics"),
        ]);
        let resolved = resolve_with_env(&file_config(), &CliOverrides::default(), env);
        assert_eq!(resolved.base_url, "http://env-host:3");
        assert_eq!(resolved.endpoint, "/from-env");
        assert_eq!(resolved.default_category.as_deref(), Some("Electronics"));
    }

    #[test]
    fn test_resolve_layers_fill_in_per_field() {
        // Only the endpoint comes from env; CLI sets the category
        let env = env_of(&[("DASHPICK_ENDPOINT", "/from-env")]);
        let cli = CliOverrides {
            category: Some("Water"),
            ..Default::default()
        };
        let resolved = resolve_with_env(&file_config(), &cli, env);
        assert_eq!(resolved.base_url, "http://config-host:1");
        assert_eq!(resolved.endpoint, "/from-env");
        assert_eq!(resolved.default_category.as_deref(), Some("Water"));
    }

    #[test]
    fn test_resolve_without_env_uses_config_file() {
        let resolved = resolve_with_env(&file_config(), &CliOverrides::default(), no_env);
        assert_eq!(resolved.base_url, "http://config-host:1");
        assert_eq!(resolved.endpoint, "/from-config");
        assert_eq!(resolved.default_category.as_deref(), Some("Temperature"));
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[server]
base_url = "http://192.168.1.20:50000"
endpoint = "/dashboard"
timeout_secs = 3

[general]
default_category = "Water"
category_key = "text"

[[categories]]
value = "1"
text = "Temperature"
description = "Air temperature"

[[categories]]
value = "2"
text = "Water"
"#;
        let config: DashpickConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.server.base_url.as_deref(),
            Some("http://192.168.1.20:50000")
        );
        assert_eq!(config.server.timeout_secs, Some(3));
        assert_eq!(config.general.category_key, Some(CategoryKey::Text));
        assert_eq!(config.categories.len(), 2);
        assert_eq!(config.categories[0].text, "Temperature");
        assert_eq!(config.categories[1].description, None);
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing, everything else stays default
        let toml_str = r#"
[general]
latest_only = false
"#;
        let config: DashpickConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.latest_only, Some(false));
        assert!(config.server.endpoint.is_none());
        assert!(config.categories.is_empty());
    }

    #[test]
    fn test_missing_file_generates_commented_default() {
        let dir = std::env::temp_dir().join(format!("dashpick-config-{}", std::process::id()));
        let path = dir.join("config.toml");
        let _ = fs::remove_file(&path);

        let config = load_config_from(&path).unwrap();
        assert!(config.categories.is_empty());

        // The generated file is all comments, so it parses to the default too
        let reloaded = load_config_from(&path).unwrap();
        assert!(reloaded.server.base_url.is_none());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = std::env::temp_dir().join(format!("dashpick-bad-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, "[server\nbase_url = ").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("config parse error"));

        let _ = fs::remove_dir_all(&dir);
    }
}
