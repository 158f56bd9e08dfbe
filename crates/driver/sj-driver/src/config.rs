//! `sjavac.toml` configuration files

use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};
use sj_parser::BraceScan;
use sj_resolve::CheckOptions;
use std::fs;
use std::path::Path;

/// File name looked up next to the checked source
pub const CONFIG_FILE_NAME: &str = "sjavac.toml";

/// Verifier configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// `[check]` table
    #[serde(default)]
    pub check: CheckConfig,
}

/// How source files are accepted and read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct CheckConfig {
    /// Required source file extension, without the dot
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Brace counting used to find the end of blocks
    #[serde(default)]
    pub brace_scan: BraceScan,
}

fn default_extension() -> String {
    "sjava".to_owned()
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            extension: default_extension(),
            brace_scan: BraceScan::default(),
        }
    }
}

impl CheckConfig {
    /// Validation options selected by this section
    pub fn options(&self) -> CheckOptions {
        CheckOptions {
            brace_scan: self.brace_scan,
        }
    }
}

impl Config {
    /// Load configuration from a file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid
    /// configuration.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load `sjavac.toml` from `dir` if there is one
    ///
    /// # Errors
    ///
    /// Same as [`Config::from_file`] when the file exists.
    pub fn find_in_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);
        if !config_path.is_file() {
            return Ok(None);
        }
        Self::from_file(&config_path).map(Some)
    }

    /// Configuration for checking `source`: the explicit file if given,
    /// otherwise `sjavac.toml` beside the source, otherwise defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the chosen file cannot be loaded.
    pub fn discover(explicit: Option<&Path>, source: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            log::debug!("using config file {}", path.display());
            return Self::from_file(path);
        }

        let dir = source
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        match Self::find_in_dir(dir)? {
            Some(config) => {
                log::debug!("using {CONFIG_FILE_NAME} from {}", dir.display());
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }
}
