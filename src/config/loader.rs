//! Config struct and loading logic.
//!
//! Priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables
//! 3. `.redline.toml` in repo root
//! 4. `~/.config/redline/config.toml` (global defaults)
//! 5. Built-in defaults

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::constants::{self, DEFAULT_COLLAPSE_THRESHOLD};
use crate::env::Env;
use crate::output::OutputFormat;

/// Errors during config loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseFile {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub output: OutputConfig,
}

/// How rows are shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Files with more diff lines than this start collapsed.
    pub collapse_threshold: usize,
    /// Show collapsed files in full.
    pub expand: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            collapse_threshold: DEFAULT_COLLAPSE_THRESHOLD,
            expand: false,
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

/// One config file as written: only the keys it sets.
///
/// Layers are applied with [`Config::apply`], so a higher layer can set a
/// value back to its default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PartialConfig {
    pub display: PartialDisplayConfig,
    pub output: PartialOutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PartialDisplayConfig {
    pub collapse_threshold: Option<usize>,
    pub expand: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PartialOutputConfig {
    pub format: Option<OutputFormat>,
}

impl Config {
    /// Load configuration with proper layering.
    ///
    /// Reads from global config, repo-local config, then applies
    /// environment variable overrides.
    pub fn load(repo_root: Option<&Path>, env: &Env) -> Result<Self, ConfigError> {
        let global = Self::global_config_path();
        Self::load_layers(global.as_deref(), repo_root, env)
    }

    fn load_layers(
        global_path: Option<&Path>,
        repo_root: Option<&Path>,
        env: &Env,
    ) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(global_path) = global_path {
            if global_path.exists() {
                config.apply(Self::load_file(global_path)?);
            }
        }

        if let Some(root) = repo_root {
            let local_path = root.join(constants::CONFIG_FILENAME);
            if local_path.exists() {
                config.apply(Self::load_file(&local_path)?);
            }
        }

        config.apply_env_vars(env);
        tracing::debug!(?config, "loaded configuration");

        Ok(config)
    }

    /// Load a config layer from a specific file.
    fn load_file(path: &Path) -> Result<PartialConfig, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseFile {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the global config file path.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(constants::CONFIG_DIR).join("config.toml"))
    }

    /// Apply a layer on top of this config. Every key the layer sets wins.
    pub fn apply(&mut self, layer: PartialConfig) {
        if let Some(threshold) = layer.display.collapse_threshold {
            self.display.collapse_threshold = threshold;
        }
        if let Some(expand) = layer.display.expand {
            self.display.expand = expand;
        }
        if let Some(format) = layer.output.format {
            self.output.format = format;
        }
    }

    /// Apply environment variable overrides.
    fn apply_env_vars(&mut self, env: &Env) {
        match env.parse::<OutputFormat>(constants::ENV_FORMAT) {
            Ok(Some(format)) => self.output.format = format,
            Ok(None) => {}
            Err(e) => tracing::warn!(var = %e.name, value = %e.value, "ignoring invalid value"),
        }
        match env.parse::<usize>(constants::ENV_COLLAPSE_THRESHOLD) {
            Ok(Some(threshold)) => self.display.collapse_threshold = threshold,
            Ok(None) => {}
            Err(e) => tracing::warn!(var = %e.name, value = %e.value, "ignoring invalid value"),
        }
    }
}
