use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::RcStrategy;
use crate::error::{Result, VersionError};
use crate::git::GitBackend;

/// Configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "civersion.toml";

/// Represents the complete configuration for ci-version.
///
/// Every field has a default, so an empty file is a valid configuration.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_version_file")]
    pub version_file: PathBuf,

    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default)]
    pub backend: GitBackend,

    /// Fetch from the remote before numbering release candidates
    #[serde(default = "default_fetch")]
    pub fetch: bool,

    #[serde(default)]
    pub branches: BranchesConfig,

    #[serde(default)]
    pub prerelease: PrereleaseConfig,
}

fn default_version_file() -> PathBuf {
    PathBuf::from("my-data-project").join("__init__.py")
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_fetch() -> bool {
    true
}

fn default_release_branch() -> String {
    "main".to_string()
}

fn default_prerelease_branch() -> String {
    "develop".to_string()
}

/// Names of the branches with special versioning.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BranchesConfig {
    #[serde(default = "default_release_branch")]
    pub release: String,

    #[serde(default = "default_prerelease_branch")]
    pub prerelease: String,
}

impl Default for BranchesConfig {
    fn default() -> Self {
        BranchesConfig {
            release: default_release_branch(),
            prerelease: default_prerelease_branch(),
        }
    }
}

/// Release candidate numbering.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct PrereleaseConfig {
    #[serde(default)]
    pub strategy: RcStrategy,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            version_file: default_version_file(),
            remote: default_remote(),
            backend: GitBackend::default(),
            fetch: default_fetch(),
            branches: BranchesConfig::default(),
            prerelease: PrereleaseConfig::default(),
        }
    }
}

/// Parses configuration from TOML text.
pub fn parse_config(text: &str) -> Result<Config> {
    toml::from_str(text).map_err(|e| VersionError::config(e.to_string()))
}

fn read_config(path: &Path) -> Result<Config> {
    log::debug!("loading config from {}", path.display());
    let text = fs::read_to_string(path).map_err(|e| {
        VersionError::config(format!("cannot read {}: {}", path.display(), e))
    })?;
    parse_config(&text)
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `civersion.toml` in current directory
/// 3. `.civersion.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed, or the custom path is missing
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_path {
        return read_config(path);
    }

    let local = Path::new(CONFIG_FILE_NAME);
    if local.exists() {
        return read_config(local);
    }

    if let Some(config_dir) = dirs::config_dir() {
        let user = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if user.exists() {
            return read_config(&user);
        }
    }

    log::debug!("no config file found, using defaults");
    Ok(Config::default())
}
