//! # Generator Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     SPLICE_PYTHON=/usr/bin/python3                                     │
//! │     GRPCIO_VIRTUALENV=~/venvs/grpcio   (→ <venv>/bin/python)           │
//! │     SPLICE_PROJECT_ROOT=~/src/google-cloud-python                      │
//! │     SPLICE_STRICT_ALIGNMENT=false                                      │
//! │                                                                         │
//! │  2. TOML Config File (only when SPLICE_CONFIG names one)               │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     project_root = ".", python = "python3", strict_alignment = true    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! project_root = "/home/me/src/google-cloud-python"
//! python = "/home/me/venvs/grpcio/bin/python"
//! protoc_module = "grpc.tools.protoc"
//! strict_alignment = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::paths::ProjectPaths;

/// Env var naming the TOML config file.
pub const CONFIG_PATH_ENV: &str = "SPLICE_CONFIG";

/// Env var pointing at a virtualenv that has `grpcio-tools` installed.
pub const VIRTUALENV_ENV: &str = "GRPCIO_VIRTUALENV";

/// Resolved generator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenConfig {
    /// Root of the checkout that holds `googleapis-pb/` and `datastore/`.
    #[serde(default = "default_project_root")]
    pub project_root: PathBuf,

    /// Interpreter used to run the compiler module.
    #[serde(default = "default_python")]
    pub python: PathBuf,

    /// Module run with `python -m`.
    #[serde(default = "default_protoc_module")]
    pub protoc_module: String,

    /// Fail when the plain output is not a subsequence of the gRPC output.
    #[serde(default = "default_strict_alignment")]
    pub strict_alignment: bool,
}

fn default_project_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_python() -> PathBuf {
    PathBuf::from("python3")
}

fn default_protoc_module() -> String {
    "grpc.tools.protoc".to_string()
}

fn default_strict_alignment() -> bool {
    true
}

impl Default for GenConfig {
    fn default() -> Self {
        GenConfig {
            project_root: default_project_root(),
            python: default_python(),
            protoc_module: default_protoc_module(),
            strict_alignment: default_strict_alignment(),
        }
    }
}

impl GenConfig {
    /// Loads configuration from the file named by `SPLICE_CONFIG` (if any)
    /// and the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from))
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file, when a path is given
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;

        Ok(config)
    }

    /// Reads a TOML config file. Missing keys take their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        info!(path = %path.display(), "Loading generator config from file");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Applies overrides from `lookup`, normally the process environment.
    ///
    /// `SPLICE_PYTHON` wins over `GRPCIO_VIRTUALENV` when both are set.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(root) = lookup("SPLICE_PROJECT_ROOT") {
            debug!(root = %root, "Overriding project root from environment");
            self.project_root = PathBuf::from(root);
        }

        if let Some(venv) = lookup(VIRTUALENV_ENV) {
            self.python = venv_python(Path::new(&venv));
            debug!(python = %self.python.display(), "Using interpreter from virtualenv");
        }

        if let Some(python) = lookup("SPLICE_PYTHON") {
            debug!(python = %python, "Overriding interpreter from environment");
            self.python = PathBuf::from(python);
        }

        if let Some(strict) = lookup("SPLICE_STRICT_ALIGNMENT") {
            self.strict_alignment = strict.parse().map_err(|_| ConfigError::InvalidValue {
                key: "SPLICE_STRICT_ALIGNMENT".to_string(),
                value: strict.clone(),
            })?;
        }

        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.python.as_os_str().is_empty() {
            return Err(ConfigError::MissingRequired("python".to_string()));
        }

        if self.protoc_module.trim().is_empty() {
            return Err(ConfigError::MissingRequired("protoc_module".to_string()));
        }

        if !self.project_root.is_dir() {
            return Err(ConfigError::InvalidProjectRoot(self.project_root.clone()));
        }

        Ok(())
    }

    /// The fixed input and output locations under the project root.
    pub fn paths(&self) -> ProjectPaths {
        ProjectPaths::new(&self.project_root)
    }
}

/// Interpreter inside a virtualenv.
fn venv_python(venv: &Path) -> PathBuf {
    if cfg!(windows) {
        venv.join("Scripts").join("python.exe")
    } else {
        venv.join("bin").join("python")
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Project root is not a directory: {}", .0.display())]
    InvalidProjectRoot(PathBuf),

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}
