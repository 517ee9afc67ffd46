use schema_extract_engine::{FilterOptions, UnterminatedPolicy};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid value for `{field}`: {message}")]
    InvalidValue { field: &'static str, message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Full dump to read.
    pub input_path: PathBuf,
    /// Where the extracted schema is written.
    pub output_path: PathBuf,
    pub schema: String,
    pub excluded_schema: String,
    pub excluded_table: String,
    /// `fail`, `flush` or `discard`.
    pub on_unterminated: String,
}

impl Default for Config {
    fn default() -> Self {
        let options = FilterOptions::default();
        Self {
            input_path: PathBuf::from(Self::DEFAULT_INPUT_PATH),
            output_path: PathBuf::from(Self::DEFAULT_OUTPUT_PATH),
            schema: options.schema,
            excluded_schema: options.excluded_schema,
            excluded_table: options.excluded_table,
            on_unterminated: options.on_unterminated.to_string(),
        }
    }
}

impl Config {
    pub const DEFAULT_INPUT_PATH: &'static str = "supabase/backups/backup.sql";
    pub const DEFAULT_OUTPUT_PATH: &'static str = "supabase/backups/public_schema.sql";

    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the loaded paths
        config.input_path = Self::expand_path(&config.input_path).unwrap_or(config.input_path);
        config.output_path = Self::expand_path(&config.output_path).unwrap_or(config.output_path);

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/schema-extract");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Builds the filter settings, validating the string-typed fields.
    pub fn filter_options(&self) -> Result<FilterOptions, ConfigError> {
        if self.schema.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "schema",
                message: "must not be empty".to_string(),
            });
        }
        let on_unterminated = self
            .on_unterminated
            .parse::<UnterminatedPolicy>()
            .map_err(|e| ConfigError::InvalidValue {
                field: "on_unterminated",
                message: e.to_string(),
            })?;

        Ok(FilterOptions {
            schema: self.schema.clone(),
            excluded_schema: self.excluded_schema.clone(),
            excluded_table: self.excluded_table.clone(),
            on_unterminated,
        })
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
