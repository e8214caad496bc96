//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.charla/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CharlaConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BackendConfig {
    pub base_url: Option<String>,
    pub health_timeout_secs: Option<u64>,
    pub retry_delay_secs: Option<u64>,
    /// 0 means retry forever.
    pub max_health_retries: Option<u32>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ExportConfig {
    pub export_dir: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
pub const DEFAULT_HEALTH_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_RETRY_DELAY_SECS: u64 = 10;
pub const DEFAULT_MAX_HEALTH_RETRIES: u32 = 0;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub backend_url: String,
    pub health_timeout_secs: u64,
    pub retry_delay_secs: u64,
    /// 0 means retry forever.
    pub max_health_retries: u32,
    pub export_dir: PathBuf,
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

/// Returns the path to `~/.charla/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".charla").join("config.toml"))
}

/// Load config from `~/.charla/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `CharlaConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<CharlaConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(CharlaConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(CharlaConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: CharlaConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Charla Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [backend]
# base_url = "http://localhost:8000"   # Or set CHARLA_BACKEND_URL env var
# health_timeout_secs = 5
# retry_delay_secs = 10
# max_health_retries = 0               # 0 = retry forever

# [export]
# export_dir = "."                     # Where exported conversations land
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
///
/// `cli_backend_url` comes from the `--backend-url` flag (None = not specified).
pub fn resolve(config: &CharlaConfig, cli_backend_url: Option<&str>) -> ResolvedConfig {
    // Backend URL: CLI → env → config → default
    let backend_url = cli_backend_url
        .map(|s| s.to_string())
        .or_else(|| std::env::var("CHARLA_BACKEND_URL").ok())
        .or_else(|| config.backend.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());

    let export_dir = config
        .export
        .export_dir
        .clone()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    ResolvedConfig {
        backend_url,
        health_timeout_secs: config
            .backend
            .health_timeout_secs
            .unwrap_or(DEFAULT_HEALTH_TIMEOUT_SECS),
        retry_delay_secs: config
            .backend
            .retry_delay_secs
            .unwrap_or(DEFAULT_RETRY_DELAY_SECS),
        max_health_retries: config
            .backend
            .max_health_retries
            .unwrap_or(DEFAULT_MAX_HEALTH_RETRIES),
        export_dir,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = CharlaConfig::default();
        assert!(config.backend.base_url.is_none());
        assert!(config.export.export_dir.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = CharlaConfig::default();
        let resolved = resolve(&config, None);
        assert_eq!(resolved.backend_url, DEFAULT_BACKEND_URL);
        assert_eq!(resolved.health_timeout_secs, DEFAULT_HEALTH_TIMEOUT_SECS);
        assert_eq!(resolved.retry_delay_secs, DEFAULT_RETRY_DELAY_SECS);
        assert_eq!(resolved.max_health_retries, 0);
        assert_eq!(resolved.export_dir, PathBuf::from("."));
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = CharlaConfig {
            backend: BackendConfig {
                base_url: Some("http://10.0.0.2:9000".to_string()),
                health_timeout_secs: Some(3),
                retry_delay_secs: Some(20),
                max_health_retries: Some(5),
            },
            export: ExportConfig {
                export_dir: Some("/tmp/exports".to_string()),
            },
        };
        let resolved = resolve(&config, None);
        assert_eq!(resolved.backend_url, "http://10.0.0.2:9000");
        assert_eq!(resolved.health_timeout_secs, 3);
        assert_eq!(resolved.retry_delay_secs, 20);
        assert_eq!(resolved.max_health_retries, 5);
        assert_eq!(resolved.export_dir, PathBuf::from("/tmp/exports"));
    }

    #[test]
    fn test_resolve_cli_backend_url_wins() {
        let config = CharlaConfig {
            backend: BackendConfig {
                base_url: Some("http://from-config:8000".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve(&config, Some("http://from-cli:8000"));
        assert_eq!(resolved.backend_url, "http://from-cli:8000");
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing — everything else stays default
        let toml_str = r#"
[backend]
retry_delay_secs = 30
"#;
        let config: CharlaConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.backend.retry_delay_secs, Some(30));
        assert!(config.backend.base_url.is_none());
        assert!(config.backend.max_health_retries.is_none());
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[backend]
base_url = "http://192.168.1.50:8000"
health_timeout_secs = 5
max_health_retries = 3

[export]
export_dir = "exports"
"#;
        let config: CharlaConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.backend.base_url.as_deref(),
            Some("http://192.168.1.50:8000")
        );
        assert_eq!(config.backend.max_health_retries, Some(3));
        assert_eq!(config.export.export_dir.as_deref(), Some("exports"));
    }
}
