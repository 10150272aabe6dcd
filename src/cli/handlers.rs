//! Command handler for the batch run
//!
//! Keeps CLI parsing apart from the batch logic: the handler loads the
//! shared scripts, assembles the batch configuration and drives the runner.

use super::{ArgProcessor, Cli, CliContext};
use crate::batch::{load_hook_scripts, BatchRunner, CollectionResult};
use crate::runner::NewmanRunner;
use anyhow::Result;
use owo_colors::OwoColorize;
use tracing::debug;

/// Coordinates one batch invocation with the resolved [`CliContext`]
pub struct CommandHandler {
    context: CliContext,
    processor: ArgProcessor,
}

impl CommandHandler {
    pub fn new(context: CliContext) -> Self {
        Self {
            context,
            processor: ArgProcessor::new(),
        }
    }

    pub fn context(&self) -> &CliContext {
        &self.context
    }

    /// Run every collection of `--source` and print the closing line
    pub async fn handle_batch(&self, cli: &Cli) -> Result<Vec<CollectionResult>> {
        self.processor.validate(cli)?;

        println!("{}", "📝 Loading test scripts...\n".cyan());
        let script_paths = self.processor.script_paths(cli, &self.context);
        let hooks = load_hook_scripts(&script_paths).await;
        println!();

        let config = self.processor.batch_config(cli, &self.context, hooks)?;
        let newman_bin = self.processor.newman_bin(cli, &self.context);
        debug!(
            source = %config.source.display(),
            newman = %newman_bin.display(),
            pattern = ?config.request_pattern,
            "Batch configuration resolved"
        );

        let results = BatchRunner::new(NewmanRunner::new(newman_bin), config)
            .run()
            .await?;

        println!("{}", "\n✓ All collections executed successfully".green());
        Ok(results)
    }
}
