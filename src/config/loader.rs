//! Configuration File Loading
//!
//! Finds the configuration file in the usual locations and reads it as TOML
//! or JSON depending on its extension.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use super::Config;
use crate::error::{Error, Result};

/// Environment variable naming an explicit configuration file
pub const CONFIG_ENV: &str = "ANSICOLOR_CONFIG";

/// Configuration file loader
pub struct ConfigLoader {
    /// Candidate configuration files, in priority order
    search_paths: Vec<PathBuf>,
    /// File the configuration was loaded from, if any
    current_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    /// Format implied by a file extension; anything but `.json` is TOML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ConfigFormat::Json,
            _ => ConfigFormat::Toml,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ConfigFormat::Toml => "TOML",
            ConfigFormat::Json => "JSON",
        }
    }

    /// Parse configuration text in this format
    pub fn parse(&self, content: &str) -> Result<Config> {
        let parsed = match self {
            ConfigFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
            ConfigFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        };
        parsed.map_err(|reason| Error::ConfigParseFailed {
            format: self.name().to_string(),
            reason,
        })
    }

    /// Serialize a configuration in this format
    pub fn serialize(&self, config: &Config) -> Result<String> {
        let serialized = match self {
            ConfigFormat::Toml => toml::to_string_pretty(config).map_err(|e| e.to_string()),
            ConfigFormat::Json => serde_json::to_string_pretty(config).map_err(|e| e.to_string()),
        };
        serialized.map_err(|reason| Error::ConfigSerializationFailed {
            format: self.name().to_string(),
            reason,
        })
    }
}

#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Whether to fall back to the default config if no file exists
    pub create_default: bool,
    /// Whether to validate configuration after loading
    pub validate: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            create_default: true,
            validate: true,
        }
    }
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self {
            search_paths: Self::get_search_paths(),
            current_path: None,
        }
    }

    /// Load configuration with default options
    pub fn load() -> Result<Config> {
        Self::new().load_with_options(LoadOptions::default())
    }

    /// Load the first configuration found on the search paths
    pub fn load_with_options(&mut self, options: LoadOptions) -> Result<Config> {
        let config = match self.find_and_load_config() {
            Some((path, config)) => {
                debug!("Loaded configuration from {}", path.display());
                self.current_path = Some(path);
                config
            }
            None if options.create_default => {
                debug!("No configuration file found, using defaults");
                Config::default()
            }
            None => return Err(Error::ConfigNotFound),
        };

        if options.validate {
            config.validate()?;
        }
        Ok(config)
    }

    /// Load configuration from an explicit file
    pub fn load_from_path(&mut self, path: &Path) -> Result<Config> {
        let config = Self::load_config_file(path)?;
        config.validate()?;
        self.current_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Save configuration, choosing the format from the file extension
    pub fn save_to_path(&self, config: &Config, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = ConfigFormat::from_path(path).serialize(config)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// First search path holding a readable configuration
    fn find_and_load_config(&self) -> Option<(PathBuf, Config)> {
        for path in &self.search_paths {
            if !path.is_file() {
                continue;
            }

            match Self::load_config_file(path) {
                Ok(config) => return Some((path.clone(), config)),
                Err(e) => {
                    // Log warning but continue searching
                    warn!("Failed to load config from {}: {}", path.display(), e);
                }
            }
        }

        None
    }

    /// Load a specific configuration file
    fn load_config_file(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path).map_err(|e| Error::ConfigLoadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        ConfigFormat::from_path(path).parse(&content)
    }

    /// Default candidate files: `$ANSICOLOR_CONFIG`, the user config
    /// directory, then the working directory
    fn get_search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Some(explicit) = env::var_os(CONFIG_ENV) {
            paths.push(PathBuf::from(explicit));
        }

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("ansicolor").join("config.toml"));
            paths.push(config_dir.join("ansicolor").join("config.json"));
        }

        if let Ok(cwd) = env::current_dir() {
            paths.push(cwd.join("ansicolor.toml"));
        }

        paths
    }

    /// Get the current configuration file path
    pub fn current_path(&self) -> Option<&Path> {
        self.current_path.as_deref()
    }

    /// List all search paths
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Add a custom search path
    pub fn add_search_path(&mut self, path: PathBuf) {
        self.search_paths.push(path);
    }

    /// Clear all search paths and add a single path
    pub fn set_search_path(&mut self, path: PathBuf) {
        self.search_paths = vec![path];
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
