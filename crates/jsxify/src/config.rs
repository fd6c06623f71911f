//! Configuration file (jsxify.toml).

use std::fs;
use std::path::{Path, PathBuf};

use jsxify_core::{is_valid_identifier, ConvertOptions};
use serde::Deserialize;

/// Config file looked up when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "jsxify.toml";

/// Configuration file structure.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub convert: ConvertOptions,
    #[serde(default)]
    pub batch: BatchSettings,
    #[serde(default)]
    pub serve: ServeSettings,
}

#[derive(Debug, Deserialize)]
pub struct BatchSettings {
    #[serde(default = "default_output")]
    pub output: PathBuf,
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            output: default_output(),
            extension: default_extension(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ServeSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_open")]
    pub open: bool,
}

impl Default for ServeSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            open: default_open(),
        }
    }
}

fn default_output() -> PathBuf {
    PathBuf::from("components")
}
fn default_extension() -> String {
    "jsx".to_string()
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    7777
}
fn default_open() -> bool {
    true
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid component name {0:?}: must be a JavaScript identifier")]
    InvalidComponentName(String),
}

impl ConfigFile {
    /// Load configuration from `path` if it exists.
    ///
    /// A missing file yields defaults; a malformed one is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content, path)?;

        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate configuration text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Self::from_toml(content, Path::new(DEFAULT_CONFIG_PATH))
    }

    fn from_toml(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        validate_component_name(&config.convert.component_name)?;
        Ok(config)
    }
}

/// Reject names that would not compile as a component identifier.
pub fn validate_component_name(name: &str) -> Result<(), ConfigError> {
    if is_valid_identifier(name) {
        Ok(())
    } else {
        Err(ConfigError::InvalidComponentName(name.to_string()))
    }
}

/// Default configuration written by `jsxify init`.
pub const DEFAULT_CONFIG: &str = r#"# jsxify configuration

[convert]
# Name of the generated component
component_name = "SvgIcon"

# "scoped" rewrites attribute names only.
# "legacy" rewrites every lowercase-hyphen-lowercase run, values included.
rename_mode = "scoped"

[batch]
# Output directory for `jsxify batch` and `jsxify watch`
output = "components"

# File extension for generated components
extension = "jsx"

[serve]
host = "127.0.0.1"
port = 7777
open = true
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use jsxify_core::RenameMode;
    use tempfile::tempdir;

    #[test]
    fn default_config_parses() {
        let config = ConfigFile::parse(DEFAULT_CONFIG).unwrap();

        assert_eq!(config.convert.component_name, "SvgIcon");
        assert_eq!(config.convert.rename_mode, RenameMode::Scoped);
        assert_eq!(config.batch.extension, "jsx");
        assert_eq!(config.serve.port, 7777);
    }

    #[test]
    fn missing_sections_use_defaults() {
        let config = ConfigFile::parse("[convert]\nrename_mode = \"legacy\"\n").unwrap();

        assert_eq!(config.convert.rename_mode, RenameMode::Legacy);
        assert_eq!(config.convert.component_name, "SvgIcon");
        assert_eq!(config.batch.output, PathBuf::from("components"));
        assert!(config.serve.open);
    }

    #[test]
    fn rejects_invalid_component_name() {
        let result = ConfigFile::parse("[convert]\ncomponent_name = \"my-icon\"\n");

        assert!(matches!(result, Err(ConfigError::InvalidComponentName(_))));
    }

    #[test]
    fn rejects_unknown_rename_mode() {
        let result = ConfigFile::parse("[convert]\nrename_mode = \"fuzzy\"\n");

        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let temp = tempdir().unwrap();
        let config = ConfigFile::load(&temp.path().join("jsxify.toml")).unwrap();

        assert_eq!(config.serve.host, "127.0.0.1");
    }

    #[test]
    fn malformed_file_names_path() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("jsxify.toml");
        fs::write(&path, "[convert\n").unwrap();

        let err = ConfigFile::load(&path).unwrap_err();

        assert!(err.to_string().contains("jsxify.toml"));
    }
}
