use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PagesPublishError, Result};

/// Represents the complete configuration for pages-publish.
///
/// Describes what gets published where: the source directory, the target
/// branch and repository, the committer identity, and push behavior.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_source")]
    pub source: String,

    #[serde(default = "default_branch")]
    pub branch: String,

    #[serde(default)]
    pub repo: String,

    #[serde(default = "default_message")]
    pub message: String,

    #[serde(default)]
    pub user: UserConfig,

    #[serde(default)]
    pub push: PushConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub hooks: HooksConfig,
}

/// Returns the default source directory.
fn default_source() -> String {
    "public".to_string()
}

/// Returns the default target branch.
fn default_branch() -> String {
    "gh-pages".to_string()
}

/// Returns the default commit message.
fn default_message() -> String {
    "Updates".to_string()
}

/// Committer identity attributed to publish commits.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct UserConfig {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub email: String,
}

/// Configuration for push behavior.
///
/// Controls whether the remote branch history is overwritten and where an
/// optional personal access token for HTTPS remotes is read from.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct PushConfig {
    #[serde(default)]
    pub force: bool,

    #[serde(default)]
    pub token_path: Option<PathBuf>,
}

/// Configuration for the local clone cache.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct CacheConfig {
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

/// Configuration for lifecycle hook scripts.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct HooksConfig {
    #[serde(default)]
    pub pre_publish: Option<String>,

    #[serde(default)]
    pub post_publish: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            source: default_source(),
            branch: default_branch(),
            repo: String::new(),
            message: default_message(),
            user: UserConfig::default(),
            push: PushConfig::default(),
            cache: CacheConfig::default(),
            hooks: HooksConfig::default(),
        }
    }
}

impl Config {
    /// Validates the configuration invariants before publishing.
    ///
    /// Checks:
    /// - `source`, `branch`, `repo` and `user.name` must be non-empty
    /// - `repo` must look like an HTTPS or SSH git URL
    /// - `push.token_path`, when set, must exist and be a file
    ///
    /// Email syntax is deliberately not checked; the remote decides what it
    /// accepts as a committer email.
    pub fn validate(&self) -> Result<()> {
        if self.source.trim().is_empty() {
            return Err(PagesPublishError::config("source directory is not set"));
        }

        if self.branch.trim().is_empty() {
            return Err(PagesPublishError::config("target branch is not set"));
        }

        if self.repo.trim().is_empty() {
            return Err(PagesPublishError::config(
                "repository URL is not set (add `repo = \"...\"` to pagespublish.toml)",
            ));
        }

        if let Ok(re) = regex::Regex::new(r"^(https?://\S+|ssh://\S+|[\w.-]+@[\w.-]+:\S+)$") {
            if !re.is_match(self.repo.trim()) {
                return Err(PagesPublishError::config(format!(
                    "repository URL '{}' is not a recognized HTTPS or SSH git URL",
                    self.repo
                )));
            }
        }

        if self.user.name.trim().is_empty() {
            return Err(PagesPublishError::config(
                "committer name is not set (add `[user] name = \"...\"`)",
            ));
        }

        if let Some(path) = &self.push.token_path {
            if !path.exists() {
                return Err(PagesPublishError::config(format!(
                    "token file not found: {}",
                    path.display()
                )));
            }
            if !path.is_file() {
                return Err(PagesPublishError::config(format!(
                    "token path is not a file: {}",
                    path.display()
                )));
            }
        }

        Ok(())
    }

    /// Resolves the local clone cache directory for this configuration.
    ///
    /// Uses the configured override when present, otherwise a per-URL
    /// directory under the user cache dir so that different target
    /// repositories never share a clone.
    pub fn cache_dir(&self) -> PathBuf {
        if let Some(dir) = &self.cache.dir {
            return dir.clone();
        }

        let fingerprint = git2::Oid::hash_object(git2::ObjectType::Blob, self.repo.as_bytes())
            .map(|oid| oid.to_string())
            .unwrap_or_else(|_| "default".to_string());

        match dirs::cache_dir() {
            Some(base) => base.join("pages-publish").join(fingerprint),
            None => PathBuf::from(".pages-publish-cache").join(fingerprint),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `pagespublish.toml` in current directory
/// 3. `~/.config/.pagespublish.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> std::result::Result<Config, Box<dyn std::error::Error>> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./pagespublish.toml").exists() {
        fs::read_to_string("./pagespublish.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".pagespublish.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    Ok(config)
}
