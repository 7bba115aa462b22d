//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/checktree/checktree.toml`
//! 3. Environment variables: `CHECKTREE_*` prefix
//! 4. Command line (`--source`), applied by the CLI

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::{ApplicationError, Markers};

/// Unified configuration for checktree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Menu source: file path, `-` for stdin, or http(s) URL
    pub source: Option<String>,
    /// Heading above the rendered menu
    pub title: String,
    /// HTTP timeout in seconds
    pub timeout_secs: u64,
    /// Checkbox markers
    pub markers: Markers,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source: None,
            title: "Sample Menu".into(),
            timeout_secs: 10,
            markers: Markers::default(),
        }
    }
}

/// Raw settings for intermediate parsing; `None` means "not specified".
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub source: Option<String>,
    pub title: Option<String>,
    pub timeout_secs: Option<u64>,
    pub markers: RawMarkers,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawMarkers {
    pub checked: Option<String>,
    pub unchecked: Option<String>,
}

/// Get the XDG config directory for checktree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "checktree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("checktree.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            source: overlay.source.clone().or_else(|| self.source.clone()),
            title: overlay.title.clone().unwrap_or_else(|| self.title.clone()),
            timeout_secs: overlay.timeout_secs.unwrap_or(self.timeout_secs),
            markers: Markers {
                checked: overlay
                    .markers
                    .checked
                    .clone()
                    .unwrap_or_else(|| self.markers.checked.clone()),
                unchecked: overlay
                    .markers
                    .unchecked
                    .clone()
                    .unwrap_or_else(|| self.markers.unchecked.clone()),
            },
        }
    }

    /// Expand `~`, `$VAR` and `${VAR}` in a file source; URLs are left alone.
    fn expand_paths(&mut self) {
        if let Some(source) = &self.source {
            if !is_url(source) {
                self.source = Some(
                    shellexpand::full(source)
                        .map(|s| s.into_owned())
                        .unwrap_or_else(|_| source.clone()),
                );
            }
        }
    }

    /// Load settings with layered precedence, using the XDG global config file.
    pub fn load() -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref())
    }

    /// Load settings with an explicit config file instead of the XDG location.
    ///
    /// A missing file is not an error; the defaults apply.
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(path) = config_path {
            if path.exists() {
                let raw = load_raw_settings(path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();
        Ok(current)
    }

    /// Apply the command line source on top of the loaded layers.
    ///
    /// The value is expanded like a configured source.
    pub fn with_source(mut self, source: Option<&str>) -> Self {
        if let Some(source) = source {
            self.source = Some(source.to_string());
            self.expand_paths();
        }
        self
    }

    /// Apply CHECKTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("CHECKTREE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("source") {
            settings.source = Some(val);
        }
        if let Ok(val) = config.get_string("title") {
            settings.title = val;
        }
        if let Ok(val) = config.get::<u64>("timeout_secs") {
            settings.timeout_secs = val;
        }
        if let Ok(val) = config.get_string("markers.checked") {
            settings.markers.checked = val;
        }
        if let Ok(val) = config.get_string("markers.unchecked") {
            settings.markers.unchecked = val;
        }
        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# checktree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/checktree/checktree.toml
#   Env:    CHECKTREE_* environment variables (e.g. CHECKTREE_MARKERS__CHECKED)
#   CLI:    --source

# Menu source: a JSON file, "-" for stdin, or an http(s) URL
# source = "http://localhost:8000/api/v1/menu/menu/"

# Heading printed above the menu
# title = "Sample Menu"

# HTTP timeout in seconds
# timeout_secs = 10

[markers]
# checked = "[x]"
# unchecked = "[ ]"
"#
        .to_string()
    }
}

pub(crate) fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
