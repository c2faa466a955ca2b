//! Runtime configuration, loaded from an optional TOML file.
//!
//! ```
//! use group_picker::config::Config;
//!
//! let config = Config::default();
//! assert_eq!(config.min_group_size, 5);
//! assert_eq!(config.num_runs, 20);
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::search::SearchParams;

pub mod defaults {
    pub const DEFAULT_FULL_LIST_FILE: &str = "full_list.txt";
    pub const DEFAULT_GROUP_DIR: &str = "previous_groups";
    pub const DEFAULT_CONFIG_FILE: &str = "group-picker.toml";
    pub const DEFAULT_MIN_GROUP_SIZE: usize = 5;
    pub const DEFAULT_NUM_RUNS: usize = 20;
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Text file with one member per line.
    pub full_list_file: PathBuf,
    /// Directory holding the accepted groupings of earlier sessions.
    pub group_dir: PathBuf,
    pub min_group_size: usize,
    /// Trials per search unless the user asks for another count.
    pub num_runs: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            full_list_file: PathBuf::from(defaults::DEFAULT_FULL_LIST_FILE),
            group_dir: PathBuf::from(defaults::DEFAULT_GROUP_DIR),
            min_group_size: defaults::DEFAULT_MIN_GROUP_SIZE,
            num_runs: defaults::DEFAULT_NUM_RUNS,
        }
    }
}

impl Config {
    pub fn from_toml_str(path: &Path, contents: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reads `path`. A missing file is an error; use [`Config::discover`]
    /// for the optional default location.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(path, &contents)
    }

    /// Loads the default config file from the working directory if it
    /// exists, otherwise returns the defaults.
    pub fn discover() -> Result<Self, ConfigError> {
        let path = Path::new(defaults::DEFAULT_CONFIG_FILE);
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_group_size == 0 {
            return Err(ConfigError::invalid("min_group_size", "must be at least 1"));
        }
        if self.num_runs == 0 {
            return Err(ConfigError::invalid("num_runs", "must be at least 1"));
        }
        Ok(())
    }

    pub fn search_params(&self) -> SearchParams {
        SearchParams {
            min_group_size: self.min_group_size,
            num_runs: self.num_runs,
        }
    }
}
