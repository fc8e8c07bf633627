//! Invoker configuration (TOML)
//!
//! Every section and field is optional; missing values take their defaults.
//!
//! ```toml
//! [frame]
//! max_arguments = 32
//! max_results = 32
//!
//! [callbacks]
//! resource_name = "my-resource"
//!
//! [trace]
//! log_calls = true
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Configuration shared by an [`Invoker`](crate::Invoker) and its callback
/// registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct InvokerConfig {
    /// Frame capacity of the boundary
    #[serde(default)]
    pub frame: FrameLimits,
    /// Callback reference settings
    #[serde(default)]
    pub callbacks: CallbackConfig,
    /// Diagnostic tracing
    #[serde(default)]
    pub trace: TraceConfig,
}

/// Maximum frame size accepted by the runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameLimits {
    /// Encoded arguments per call (default: 32)
    #[serde(default = "default_max_arguments")]
    pub max_arguments: usize,
    /// Raw result slots per call (default: 32)
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackConfig {
    /// Prefix of every callback reference (default: "nativecall")
    #[serde(default = "default_resource_name")]
    pub resource_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TraceConfig {
    /// Emit a debug event for every boundary call (default: false)
    #[serde(default)]
    pub log_calls: bool,
}

fn default_max_arguments() -> usize {
    32
}
fn default_max_results() -> usize {
    32
}
fn default_resource_name() -> String {
    "nativecall".to_string()
}

impl Default for FrameLimits {
    fn default() -> Self {
        Self {
            max_arguments: default_max_arguments(),
            max_results: default_max_results(),
        }
    }
}

impl Default for CallbackConfig {
    fn default() -> Self {
        Self {
            resource_name: default_resource_name(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration")]
    Parse(#[from] toml::de::Error),
}

impl InvokerConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Loads the configuration, falling back to defaults if the file is
    /// missing or malformed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "using default invoker config"
                );
                Self::default()
            }
        }
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Returns a warning for each setting the runtime is unlikely to accept.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.frame.max_arguments == 0 {
            warnings.push(
                "frame.max_arguments is 0; every call with arguments will fail".to_string(),
            );
        }
        if self.frame.max_results == 0 {
            warnings.push(
                "frame.max_results is 0; every call with outputs will fail".to_string(),
            );
        }

        let name = &self.callbacks.resource_name;
        if name.is_empty() {
            warnings.push("callbacks.resource_name is empty".to_string());
        } else if name.contains(':') {
            warnings.push(format!(
                "callbacks.resource_name '{}' contains ':' which makes references ambiguous",
                name
            ));
        }

        warnings
    }
}
