//! Project configuration.
//!
//! Everything the deployment scripts used to declare through the task
//! runner's shared registry lives in an explicit struct loaded from
//! `shipmate.json` in the project root and passed to whoever needs it.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::utils::io;

pub const CONFIG_FILE: &str = "shipmate.json";

const DEFAULT_KEEP_RELEASES: u32 = 5;

fn default_branch() -> String {
    "main".to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_env_file() -> String {
    ".env".to_string()
}

fn default_keep_releases() -> u32 {
    DEFAULT_KEEP_RELEASES
}

fn default_deploy_command() -> Vec<String> {
    vec!["dep".to_string(), "deploy".to_string()]
}

fn default_unlock_command() -> Vec<String> {
    vec!["dep".to_string(), "deploy:unlock".to_string()]
}

/// Target host declaration. Consumed by the external deployer; surfaced by
/// `config show` for operator visibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostConfig {
    pub host: String,
    pub remote_user: String,
    pub deploy_path: String,
    #[serde(default = "default_keep_releases")]
    pub keep_releases: u32,
}

/// External deployer invocations, as argv arrays. The core never builds
/// shell strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployerConfig {
    #[serde(default = "default_deploy_command")]
    pub command: Vec<String>,
    #[serde(default = "default_unlock_command")]
    pub unlock_command: Vec<String>,
}

impl Default for DeployerConfig {
    fn default() -> Self {
        Self {
            command: default_deploy_command(),
            unlock_command: default_unlock_command(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    /// Directory the config was loaded from. Git and the deployer run here.
    #[serde(skip)]
    root: PathBuf,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    #[serde(default = "default_branch")]
    pub branch: String,
    #[serde(default = "default_remote")]
    pub remote: String,
    #[serde(default = "default_env_file")]
    pub env_file: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<HostConfig>,

    // Shared-path declarations for the deployer's symlink-switch strategy.
    // Carried verbatim; the core never acts on them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shared_files: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shared_dirs: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub writable_dirs: Vec<String>,

    #[serde(default)]
    pub deploy: DeployerConfig,
}

impl ProjectConfig {
    /// Load a config from an explicit file path.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::config_missing_file(path.display().to_string()));
        }

        let contents = io::read_file(path, "read project config")?;
        let mut config: ProjectConfig = serde_json::from_str(&contents)
            .map_err(|e| Error::config_invalid_json(path.display().to_string(), e.to_string()))?;

        config.validate()?;
        config.root = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok(config)
    }

    /// Load `shipmate.json` from a project directory.
    pub fn discover(dir: &Path) -> Result<Self> {
        Self::load(&dir.join(CONFIG_FILE))
    }

    fn validate(&self) -> Result<()> {
        if self.deploy.command.is_empty() {
            return Err(Error::config_invalid_value(
                "deploy.command",
                "deploy command must not be empty",
            ));
        }
        if self.deploy.unlock_command.is_empty() {
            return Err(Error::config_invalid_value(
                "deploy.unlockCommand",
                "unlock command must not be empty",
            ));
        }
        if self.branch.trim().is_empty() {
            return Err(Error::config_invalid_value("branch", "branch must not be empty"));
        }
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of the environment file. Tilde expansion matches what
    /// the shell would do; relative paths resolve against the project root.
    pub fn env_file_path(&self) -> PathBuf {
        let expanded = shellexpand::tilde(&self.env_file);
        let path = Path::new(expanded.as_ref());
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_config(dir: &Path, contents: &str) -> PathBuf {
        let path = dir.join(CONFIG_FILE);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn minimal_config_applies_defaults() {
        let dir = tempdir().unwrap();
        let path = write_config(dir.path(), "{}");

        let config = ProjectConfig::load(&path).unwrap();
        assert_eq!(config.branch, "main");
        assert_eq!(config.remote, "origin");
        assert_eq!(config.env_file, ".env");
        assert_eq!(config.deploy.command, vec!["dep", "deploy"]);
        assert_eq!(config.deploy.unlock_command, vec!["dep", "deploy:unlock"]);
        assert_eq!(config.root(), dir.path());
    }

    #[test]
    fn full_config_parses() {
        let dir = tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"{
                "repository": "https://github.com/issacgram/depapp.git",
                "branch": "1.x",
                "envFile": ".env",
                "host": {
                    "host": "89.116.48.146",
                    "remoteUser": "deployuser",
                    "deployPath": "/var/www/phpgram.info"
                },
                "sharedFiles": [".env"],
                "sharedDirs": ["storage", "bootstrap/cache"],
                "writableDirs": ["storage", "bootstrap/cache"],
                "deploy": { "command": ["dep", "deploy", "production"] }
            }"#,
        );

        let config = ProjectConfig::load(&path).unwrap();
        assert_eq!(config.branch, "1.x");
        let host = config.host.unwrap();
        assert_eq!(host.remote_user, "deployuser");
        assert_eq!(host.keep_releases, 5);
        assert_eq!(config.deploy.command, vec!["dep", "deploy", "production"]);
        // unlock command keeps its default when only command is overridden
        assert_eq!(config.deploy.unlock_command, vec!["dep", "deploy:unlock"]);
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let dir = tempdir().unwrap();
        let err = ProjectConfig::discover(dir.path()).unwrap_err();
        assert_eq!(err.code, crate::ErrorCode::ConfigMissingFile);
        assert!(!err.hints.is_empty());
    }

    #[test]
    fn invalid_json_is_reported_with_path() {
        let dir = tempdir().unwrap();
        let path = write_config(dir.path(), "{ not json");
        let err = ProjectConfig::load(&path).unwrap_err();
        assert_eq!(err.code, crate::ErrorCode::ConfigInvalidJson);
        assert!(err.message.contains(CONFIG_FILE));
    }

    #[test]
    fn empty_deploy_command_is_rejected() {
        let dir = tempdir().unwrap();
        let path = write_config(dir.path(), r#"{ "deploy": { "command": [] } }"#);
        let err = ProjectConfig::load(&path).unwrap_err();
        assert_eq!(err.code, crate::ErrorCode::ConfigInvalidValue);
    }

    #[test]
    fn env_file_path_resolves_against_root() {
        let dir = tempdir().unwrap();
        let path = write_config(dir.path(), "{}");
        let config = ProjectConfig::load(&path).unwrap();
        assert_eq!(config.env_file_path(), dir.path().join(".env"));
    }
}
