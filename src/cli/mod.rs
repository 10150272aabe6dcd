//! CLI module providing command-line interface functionality
//!
//! This module handles argument parsing, validation and routing to the
//! batch handler.

pub mod args;
pub mod commands;
pub mod context;
pub mod handlers;

use anyhow::Result;
use clap::Parser;

pub use args::ArgProcessor;
pub use commands::Cli;
pub use context::CliContext;
pub use handlers::CommandHandler;

/// Usage line printed alongside argument errors
pub const USAGE: &str = "Usage: newman-batch --source <path-to-collections-folder> [options]";

/// Main CLI application
pub struct CliApp;

impl CliApp {
    /// Parse command line arguments and run the batch
    pub async fn run() -> Result<()> {
        let cli = Cli::parse();
        Self::run_with(cli).await
    }

    pub async fn run_with(cli: Cli) -> Result<()> {
        // Fail on a missing source before any configuration is read
        ArgProcessor::new().require_source(&cli)?;

        let context = CliContext::new(cli.config.as_deref(), cli.verbose)?;
        context.init_logging()?;

        let handler = CommandHandler::new(context);
        handler.handle_batch(&cli).await?;
        Ok(())
    }
}
