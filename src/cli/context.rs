//! CLI execution context
//!
//! Resolves process-wide state once (working directory, configuration file)
//! so the rest of the run receives it explicitly.

use crate::config::ConfigManager;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Shared state for one CLI invocation
#[derive(Clone)]
pub struct CliContext {
    pub working_dir: PathBuf,
    pub verbose: bool,
    pub config_manager: Arc<ConfigManager>,
}

impl CliContext {
    /// Build a context from the current directory and an optional config path
    pub fn new(config_path: Option<&Path>, verbose: bool) -> Result<Self> {
        let working_dir =
            std::env::current_dir().context("Failed to determine current directory")?;
        Self::with_working_dir(working_dir, config_path, verbose)
    }

    pub fn with_working_dir(
        working_dir: PathBuf,
        config_path: Option<&Path>,
        verbose: bool,
    ) -> Result<Self> {
        let config_manager = Arc::new(ConfigManager::load(config_path, &working_dir)?);
        Ok(Self {
            working_dir,
            verbose,
            config_manager,
        })
    }

    /// Resolve `path` against the working directory
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.working_dir.join(path)
    }

    /// Log directive: `debug` in verbose mode, otherwise the configured level
    pub fn log_level(&self) -> &str {
        if self.verbose {
            "debug"
        } else {
            &self.config_manager.config().logging.level
        }
    }

    /// Initialize logging to stderr; stdout is reserved for progress output
    pub fn init_logging(&self) -> Result<()> {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::from_default_env().add_directive(
                    self.log_level()
                        .parse()
                        .unwrap_or_else(|_| tracing::Level::WARN.into()),
                ),
            )
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

        if self.verbose {
            tracing::debug!("Verbose logging enabled");
            tracing::debug!("Working directory: {}", self.working_dir.display());
            tracing::debug!("Config file: {:?}", self.config_manager.config_path());
        }

        Ok(())
    }
}
