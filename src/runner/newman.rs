//! Runs collections through the `newman` executable
//!
//! The collection is written to a scratch directory, newman is started with
//! a JSON reporter export, and the exported summary is read back once the
//! process exits.

use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tempfile::TempDir;
use tokio::process::Command;
use tracing::{debug, warn};

use super::options::NewmanOptions;
use super::traits::{CollectionRunner, RunSummary};
use crate::collection::Collection;
use crate::errors::{AppError, AppResult, ErrorContextExt};

/// Default executable name, resolved through `PATH`
pub const DEFAULT_NEWMAN_BIN: &str = "newman";

/// [`CollectionRunner`] backed by a newman child process
#[derive(Debug, Clone)]
pub struct NewmanRunner {
    program: PathBuf,
}

impl NewmanRunner {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Full argument list for one run
    pub fn build_args(
        &self,
        collection_path: &Path,
        summary_path: &Path,
        options: &NewmanOptions,
    ) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["run".into(), collection_path.as_os_str().into()];
        args.push("--reporters".into());
        args.push(options.reporters_with_json().join(",").into());
        args.push("--reporter-json-export".into());
        args.push(summary_path.as_os_str().into());
        args.extend(options.to_args());
        args
    }

    async fn read_summary(&self, path: &Path) -> AppResult<RunSummary> {
        let content = tokio::fs::read(path)
            .await
            .in_file_operation(path, "read newman summary")?;
        serde_json::from_slice(&content).map_err(|e| {
            AppError::runner_with_source(format!("Invalid newman summary in {}", path.display()), e)
        })
    }
}

impl Default for NewmanRunner {
    fn default() -> Self {
        Self::new(DEFAULT_NEWMAN_BIN)
    }
}

#[async_trait]
impl CollectionRunner for NewmanRunner {
    async fn run(&self, collection: &Collection, options: &NewmanOptions) -> AppResult<RunSummary> {
        let scratch = TempDir::new().with_context("Failed to create scratch directory")?;
        let collection_path = scratch.path().join("collection.json");
        // Always a fresh file; a user export path may hold an earlier run
        let summary_path = scratch.path().join("summary.json");

        let document = serde_json::to_vec(collection)?;
        tokio::fs::write(&collection_path, document)
            .await
            .in_file_operation(&collection_path, "write collection for newman")?;

        let args = self.build_args(&collection_path, &summary_path, options);
        debug!(program = %self.program.display(), ?args, "Starting newman");

        let status = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .status()
            .await
            .map_err(|e| AppError::ProcessExecution {
                command: self.program.display().to_string(),
                source: Some(Box::new(e)),
            })?;

        // newman exits non-zero when assertions fail; the summary still
        // tells the real outcome
        match self.read_summary(&summary_path).await {
            Ok(summary) => {
                if !status.success() {
                    debug!(%status, "newman exited with failures");
                }
                if let Some(json) = &options.reporter.json {
                    tokio::fs::copy(&summary_path, &json.export)
                        .await
                        .in_file_operation(&json.export, "export newman summary")?;
                }
                Ok(summary)
            }
            Err(e) if status.success() => Err(e),
            Err(e) => {
                warn!(%status, error = %e, "newman produced no summary");
                Err(AppError::runner(format!("newman exited with {status}")))
            }
        }
    }

    fn name(&self) -> &'static str {
        "newman"
    }
}
