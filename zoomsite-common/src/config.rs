//! Configuration loading and content path resolution
//!
//! Two-tier configuration:
//! 1. **TOML bootstrap**: content file path, timing, logging (static,
//!    loaded once at startup)
//! 2. **Built-in defaults**: defined in code, used for every missing key
//!
//! Content path resolution priority:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

use crate::error::{Error, Result};

/// Environment variable naming the content JSON file
pub const CONTENT_ENV_VAR: &str = "ZOOMSITE_CONTENT";

/// Bootstrap configuration loaded from a TOML file
///
/// These settings cannot change during runtime; restart to pick up edits.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// Path to the content repository JSON file (optional here; may come
    /// from CLI or environment instead)
    #[serde(default)]
    pub content_path: Option<PathBuf>,

    /// Transition and debounce timing (optional)
    #[serde(default)]
    pub timing: TimingConfig,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Transition and debounce timing settings
#[derive(Debug, Clone, Deserialize)]
pub struct TimingConfig {
    /// Settle delay between fade-out and layout swap, in milliseconds
    #[serde(default = "default_transition_settle_ms")]
    pub transition_settle_ms: u64,

    /// Quiet period for hover preview show/hide debouncing, in milliseconds
    #[serde(default = "default_preview_debounce_ms")]
    pub preview_debounce_ms: u64,

    /// Quiet period for resize/scroll debouncing, in milliseconds
    #[serde(default = "default_resize_debounce_ms")]
    pub resize_debounce_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            transition_settle_ms: default_transition_settle_ms(),
            preview_debounce_ms: default_preview_debounce_ms(),
            resize_debounce_ms: default_resize_debounce_ms(),
        }
    }
}

impl TimingConfig {
    pub fn transition_settle(&self) -> Duration {
        Duration::from_millis(self.transition_settle_ms)
    }

    pub fn preview_debounce(&self) -> Duration {
        Duration::from_millis(self.preview_debounce_ms)
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_transition_settle_ms() -> u64 {
    300
}

fn default_preview_debounce_ms() -> u64 {
    100
}

fn default_resize_debounce_ms() -> u64 {
    250
}

fn default_log_level() -> String {
    "info".to_string()
}

impl TomlConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        toml::from_str(&text).map_err(|e| Error::Config(format!("{}: {e}", path.display())))
    }

    /// Load configuration from a TOML file, falling back to defaults when
    /// the file is absent
    pub fn load_or_default(path: Option<&std::path::Path>) -> Self {
        match path {
            Some(p) => match Self::load(p) {
                Ok(config) => config,
                Err(e) => {
                    warn!("Failed to load config {}: {e}, using defaults", p.display());
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }
}

/// Resolve the content JSON path following the priority order:
/// CLI argument → environment variable → TOML config → compiled default
pub fn resolve_content_path(cli_arg: Option<&str>, config: &TomlConfig) -> PathBuf {
    if let Some(path) = cli_arg {
        return PathBuf::from(path);
    }

    if let Ok(path) = std::env::var(CONTENT_ENV_VAR) {
        return PathBuf::from(path);
    }

    if let Some(path) = &config.content_path {
        return path.clone();
    }

    PathBuf::from("content/site.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = TomlConfig::default();
        assert_eq!(config.timing.transition_settle(), Duration::from_millis(300));
        assert_eq!(config.timing.preview_debounce(), Duration::from_millis(100));
        assert_eq!(config.timing.resize_debounce(), Duration::from_millis(250));
        assert!(config.content_path.is_none());
    }

    #[test]
    fn test_load_partial_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "content_path = \"/srv/site/content.json\"\n\n[timing]\ntransition_settle_ms = 150"
        )
        .unwrap();

        let config = TomlConfig::load(file.path()).unwrap();
        assert_eq!(config.content_path, Some(PathBuf::from("/srv/site/content.json")));
        assert_eq!(config.timing.transition_settle_ms, 150);
        // Unspecified keys keep their defaults
        assert_eq!(config.timing.preview_debounce_ms, 100);
        assert_eq!(config.logging.level, "");
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let config = TomlConfig::load_or_default(Some(std::path::Path::new("/nonexistent.toml")));
        assert_eq!(config.timing.transition_settle_ms, 300);
    }

    #[test]
    #[serial]
    fn test_resolve_priority_cli_wins() {
        std::env::set_var(CONTENT_ENV_VAR, "/from/env.json");
        let config = TomlConfig {
            content_path: Some(PathBuf::from("/from/toml.json")),
            ..Default::default()
        };

        let path = resolve_content_path(Some("/from/cli.json"), &config);
        assert_eq!(path, PathBuf::from("/from/cli.json"));
        std::env::remove_var(CONTENT_ENV_VAR);
    }

    #[test]
    #[serial]
    fn test_resolve_priority_env_then_config() {
        std::env::set_var(CONTENT_ENV_VAR, "/from/env.json");
        let config = TomlConfig {
            content_path: Some(PathBuf::from("/from/toml.json")),
            ..Default::default()
        };

        assert_eq!(resolve_content_path(None, &config), PathBuf::from("/from/env.json"));

        std::env::remove_var(CONTENT_ENV_VAR);
        assert_eq!(resolve_content_path(None, &config), PathBuf::from("/from/toml.json"));
    }
}
