//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Config file: `$XDG_CONFIG_HOME/guaxiang/guaxiang.toml` (or `--config <path>`)
//! 3. Environment variables: `GUA_*` prefix
//! 4. Command line flags (applied by the CLI layer)

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::ClassifyMode;
use crate::infrastructure::emit::OutputFormat;

/// Unified configuration for guaxiang.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Server base URL; the request goes to `<endpoint>/generate_gua_xian`
    pub endpoint: String,
    /// HTTP client timeout in seconds
    pub timeout_secs: u64,
    /// Default output format
    pub format: OutputFormat,
    /// Classifier applied to line columns
    pub classify: ClassifyMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8080".to_string(),
            timeout_secs: 30,
            format: OutputFormat::Text,
            classify: ClassifyMode::default(),
        }
    }
}

/// Raw classifier section; fields are Option to detect "not specified".
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawClassify {
    pub mode: Option<String>,
    pub offset: Option<usize>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
    pub format: Option<OutputFormat>,
    pub classify: RawClassify,
}

impl RawClassify {
    /// Resolve onto `base`: a bare offset keeps branch mode, `mode = "text"` drops it.
    fn resolve(&self, base: ClassifyMode) -> Result<ClassifyMode, ApplicationError> {
        let base_offset = match base {
            ClassifyMode::Branch { offset } => offset,
            ClassifyMode::Text => ClassifyMode::DEFAULT_OFFSET,
        };
        match (self.mode.as_deref(), self.offset) {
            (None, None) => Ok(base),
            (None, Some(offset)) | (Some("branch"), Some(offset)) => {
                Ok(ClassifyMode::Branch { offset })
            }
            (Some("branch"), None) => Ok(ClassifyMode::Branch {
                offset: base_offset,
            }),
            (Some("text"), _) => Ok(ClassifyMode::Text),
            (Some(other), _) => Err(ApplicationError::Config {
                message: format!("classify.mode must be \"branch\" or \"text\", got {other:?}"),
            }),
        }
    }
}

/// Get the XDG config directory for guaxiang.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "guaxiang").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("guaxiang.toml"))
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
    /// Overlay a raw layer: specified fields win.
    fn merge_with(&self, overlay: &RawSettings) -> Result<Self, ApplicationError> {
        Ok(Self {
            endpoint: overlay
                .endpoint
                .clone()
                .unwrap_or_else(|| self.endpoint.clone()),
            timeout_secs: overlay.timeout_secs.unwrap_or(self.timeout_secs),
            format: overlay.format.unwrap_or(self.format),
            classify: overlay.classify.resolve(self.classify)?,
        })
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Explicit config file; replaces the global file when given
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Config file (explicit, else global if it exists)
    /// 3. Environment variables: `GUA_*` prefix
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        let file = match config_file {
            Some(path) => {
                if !path.exists() {
                    return Err(ApplicationError::Config {
                        message: format!("config file not found: {}", path.display()),
                    });
                }
                Some(path.to_path_buf())
            }
            None => global_config_path().filter(|p| p.exists()),
        };
        if let Some(path) = file {
            debug!("load: config file {}", path.display());
            current = current.merge_with(&load_raw_settings(&path)?)?;
        }

        current = Self::apply_env_overrides(current)?;
        current.validate()?;
        Ok(current)
    }

    /// Load defaults plus one config file, without environment overrides.
    pub fn load_file(path: &Path) -> Result<Self, ApplicationError> {
        let settings = Self::default().merge_with(&load_raw_settings(path)?)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Apply GUA_* environment variables as explicit overrides.
    fn apply_env_overrides(settings: Self) -> Result<Self, ApplicationError> {
        // Use config crate just for env var parsing
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("GUA")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        let raw = RawSettings {
            endpoint: env_value(&config, "endpoint")?,
            timeout_secs: env_value(&config, "timeout_secs")?,
            format: env_value::<String>(&config, "format")?
                .map(|s| OutputFormat::from_str(&s, true))
                .transpose()
                .map_err(|message| ApplicationError::Config {
                    message: format!("GUA_FORMAT: {message}"),
                })?,
            classify: RawClassify {
                mode: env_value(&config, "classify.mode")?,
                offset: env_value(&config, "classify.offset")?,
            },
        };
        settings.merge_with(&raw)
    }

    /// Reject values no request could succeed with.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(ApplicationError::Config {
                message: format!("endpoint must be an http(s) URL: {}", self.endpoint),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ApplicationError::Config {
                message: "timeout_secs must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# guaxiang configuration
#
# Locations (by precedence, lowest to highest):
#   File: ~/.config/guaxiang/guaxiang.toml  (or --config <path>)
#   Env:  GUA_* environment variables, e.g. GUA_ENDPOINT, GUA_CLASSIFY__MODE
#   CLI:  --endpoint, --format

# Server base URL; requests go to <endpoint>/generate_gua_xian
# endpoint = "http://127.0.0.1:8080"

# HTTP client timeout in seconds
# timeout_secs = 30

# Output format: text, html, json, tree
# format = "text"

[classify]
# "branch": colour a line by the branch glyph at `offset` (chars)
# "text":   colour a line by the first element glyph it contains (土 木 火 金 水)
# mode = "branch"
# offset = 2
"#
        .to_string()
    }
}

/// One environment key: absent is `None`, unparsable is an error.
fn env_value<T: DeserializeOwned>(
    config: &Config,
    key: &str,
) -> Result<Option<T>, ApplicationError> {
    match config.get::<T>(key) {
        Ok(value) => Ok(Some(value)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(ApplicationError::Config {
            message: format!("GUA_{}: {}", key.replace('.', "__").to_uppercase(), e),
        }),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
