use crate::errors::{AppError, AppResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::batch::{POST_REQUEST_FILE, PRE_REQUEST_FILE};
use crate::runner::DEFAULT_NEWMAN_BIN;

/// File name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "newman-batch.toml";

/// Main configuration structure
///
/// Every section is optional in the file; missing keys fall back to the
/// built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub runner: RunnerConfig,
    pub scripts: ScriptsConfig,
    pub logging: LoggingConfig,
}

/// How the external runner is started
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    pub newman_bin: String,
    pub reporters: Vec<String>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            newman_bin: DEFAULT_NEWMAN_BIN.to_string(),
            reporters: vec!["cli".to_string()],
        }
    }
}

/// Location of the shared hook scripts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptsConfig {
    pub dir: PathBuf,
    pub pre_request: String,
    pub post_request: String,
}

impl Default for ScriptsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("tests"),
            pre_request: PRE_REQUEST_FILE.to_string(),
            post_request: POST_REQUEST_FILE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// Configuration manager
///
/// Resolves the configuration file in this order:
///
/// 1. An explicit path, which must exist
/// 2. `newman-batch.toml` in the working directory
/// 3. `config.toml` in the user configuration directory
///
/// When no file is found the defaults are used and nothing is written.
pub struct ConfigManager {
    config_path: Option<PathBuf>,
    config: Config,
}

impl ConfigManager {
    /// Load configuration, searching from `working_dir` when no explicit
    /// path is given.
    ///
    /// # Errors
    ///
    /// Returns an error if the explicit path does not exist or the selected
    /// file cannot be read or parsed.
    pub fn load(explicit: Option<&Path>, working_dir: &Path) -> AppResult<Self> {
        let config_path = match explicit {
            Some(path) if path.is_file() => Some(path.to_path_buf()),
            Some(path) => {
                return Err(AppError::ConfigNotFound {
                    path: path.to_path_buf(),
                })
            }
            None => Self::search_paths(working_dir)
                .into_iter()
                .find(|candidate| candidate.is_file()),
        };

        let config = match &config_path {
            Some(path) => Self::read(path)?,
            None => Config::default(),
        };

        Ok(Self {
            config_path,
            config,
        })
    }

    /// Candidate locations, most specific first
    pub fn search_paths(working_dir: &Path) -> Vec<PathBuf> {
        let mut paths = vec![working_dir.join(LOCAL_CONFIG_FILE)];
        if let Some(dirs) = ProjectDirs::from("", "", "newman-batch") {
            paths.push(dirs.config_dir().join("config.toml"));
        }
        paths
    }

    fn read(path: &Path) -> AppResult<Config> {
        let content = fs::read_to_string(path)
            .map_err(|e| AppError::io_with_source(path, "read config file", e))?;
        toml::from_str(&content).map_err(|e| {
            AppError::config_with_source(
                format!("Failed to parse config file {}", path.display()),
                e,
            )
        })
    }

    /// The file the configuration was read from, if any
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Script file paths, with relative entries resolved against `working_dir`
    pub fn script_paths(&self, working_dir: &Path, dir_override: Option<&Path>) -> (PathBuf, PathBuf) {
        let scripts = &self.config.scripts;
        let dir = working_dir.join(dir_override.unwrap_or(scripts.dir.as_path()));
        (dir.join(&scripts.pre_request), dir.join(&scripts.post_request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_file() {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::load(None, dir.path()).unwrap();
        let config = manager.config();
        assert_eq!(config.runner.newman_bin, "newman");
        assert_eq!(config.runner.reporters, vec!["cli"]);
        assert_eq!(config.scripts.dir, PathBuf::from("tests"));
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_local_file_is_found() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(LOCAL_CONFIG_FILE),
            "[runner]\nnewman_bin = \"/opt/newman\"\n\n[scripts]\ndir = \"hooks\"\n",
        )
        .unwrap();

        let manager = ConfigManager::load(None, dir.path()).unwrap();
        assert_eq!(manager.config_path(), Some(dir.path().join(LOCAL_CONFIG_FILE).as_path()));
        assert_eq!(manager.config().runner.newman_bin, "/opt/newman");
        // Unset keys keep their defaults
        assert_eq!(manager.config().runner.reporters, vec!["cli"]);
        assert_eq!(manager.config().scripts.pre_request, "pre-request.js");

        let (pre, post) = manager.script_paths(dir.path(), None);
        assert_eq!(pre, dir.path().join("hooks").join("pre-request.js"));
        assert_eq!(post, dir.path().join("hooks").join("post-request.js"));

        let (pre, _) = manager.script_paths(dir.path(), Some(Path::new("/abs")));
        assert_eq!(pre, PathBuf::from("/abs/pre-request.js"));
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = ConfigManager::load(Some(&missing), dir.path()).err().unwrap();
        assert!(matches!(err, AppError::ConfigNotFound { .. }));
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[runner\n").unwrap();
        let err = ConfigManager::load(Some(&path), dir.path()).err().unwrap();
        assert_eq!(err.category(), "config");
    }
}
