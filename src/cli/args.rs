//! Argument processing and validation
//!
//! Turns parsed flags plus the loaded configuration into the explicit
//! values the batch runner works with.

use super::{Cli, CliContext};
use crate::batch::{BatchConfig, ScriptPaths};
use crate::collection::HookSet;
use crate::errors::{AppError, AppResult};
use crate::runner::options::{ReporterExport, Timeouts};
use crate::runner::{parse_key_value_pairs, NewmanOptions};
use std::path::PathBuf;

/// Handles argument processing and validation
#[derive(Debug, Default)]
pub struct ArgProcessor;

impl ArgProcessor {
    pub fn new() -> Self {
        Self
    }

    /// The `--source` directory. Checked before anything touches the disk.
    pub fn require_source(&self, cli: &Cli) -> AppResult<PathBuf> {
        match &cli.source {
            Some(source) if !source.as_os_str().is_empty() => Ok(source.clone()),
            _ => Err(AppError::MissingArgument {
                argument: "--source".to_string(),
            }),
        }
    }

    /// Validate arguments clap cannot check on its own
    pub fn validate(&self, cli: &Cli) -> AppResult<()> {
        if let Some(reporters) = &cli.reporters {
            if reporters.iter().all(|r| r.trim().is_empty()) {
                return Err(AppError::InvalidArgument {
                    argument: "--reporters".to_string(),
                    reason: "at least one reporter is required".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Newman executable: flag or `NEWMAN_BIN`, then the config file
    pub fn newman_bin(&self, cli: &Cli, context: &CliContext) -> PathBuf {
        cli.newman_bin
            .clone()
            .unwrap_or_else(|| PathBuf::from(&context.config_manager.config().runner.newman_bin))
    }

    /// Locations of the shared scripts
    pub fn script_paths(&self, cli: &Cli, context: &CliContext) -> ScriptPaths {
        let (pre_request, post_request) = context
            .config_manager
            .script_paths(&context.working_dir, cli.scripts_dir.as_deref());
        ScriptPaths {
            pre_request: cli
                .pre_request
                .as_deref()
                .map(|p| context.resolve(p))
                .unwrap_or(pre_request),
            post_request: cli
                .post_request
                .as_deref()
                .map(|p| context.resolve(p))
                .unwrap_or(post_request),
        }
    }

    /// The pass-through option set for every newman run
    pub fn newman_options(&self, cli: &Cli, context: &CliContext) -> NewmanOptions {
        let reporters = cli
            .reporters
            .clone()
            .unwrap_or_else(|| context.config_manager.config().runner.reporters.clone());

        let mut options = NewmanOptions {
            reporters,
            environment: cli.environment.clone(),
            globals: cli.globals.clone(),
            iteration_data: cli.iteration_data.clone(),
            iteration_count: cli.iteration_count,
            folder: cli.folder.clone(),
            working_dir: cli.working_dir.clone(),
            insecure_file_read: cli.no_insecure_file_read.then_some(false),
            timeout: Timeouts {
                global: cli.timeout,
                request: cli.timeout_request,
                script: cli.timeout_script,
            },
            delay_request: cli.delay_request,
            bail: cli.bail,
            suppress_exit_code: cli.suppress_exit_code,
            color: Some(cli.color.clone()),
            disable_unicode: cli.disable_unicode,
            insecure: cli.insecure,
            ignore_redirects: cli.ignore_redirects,
            verbose: cli.verbose,
            ssl_client_cert: cli.ssl_client_cert.clone(),
            ssl_client_key: cli.ssl_client_key.clone(),
            ssl_client_passphrase: cli.ssl_client_passphrase.clone(),
            ssl_extra_ca_certs: cli.ssl_extra_ca_certs.clone(),
            cookie_jar: cli.cookie_jar.clone(),
            export_cookie_jar: cli.export_cookie_jar.clone(),
            export_environment: cli.export_environment.clone(),
            export_globals: cli.export_globals.clone(),
            export_collection: cli.export_collection.clone(),
            global_var: parse_key_value_pairs(&cli.global_var),
            env_var: parse_key_value_pairs(&cli.env_var),
            ..Default::default()
        };

        let export = |path: &Option<PathBuf>| {
            path.as_deref().map(|p| ReporterExport {
                export: context.resolve(p),
            })
        };
        options.reporter.json = export(&cli.reporter_json_export);
        options.reporter.html = export(&cli.reporter_html_export);
        options.reporter.junit = export(&cli.reporter_junit_export);

        let reporter_cli = &mut options.reporter.cli;
        reporter_cli.silent = cli.reporter_cli_silent;
        reporter_cli.no_summary = cli.reporter_cli_no_summary;
        reporter_cli.no_failures = cli.reporter_cli_no_failures;
        reporter_cli.no_assertions = cli.reporter_cli_no_assertions;
        reporter_cli.no_console = cli.reporter_cli_no_console;

        options
    }

    /// Everything the batch runner needs, with paths made absolute
    pub fn batch_config(&self, cli: &Cli, context: &CliContext, hooks: HookSet) -> AppResult<BatchConfig> {
        self.validate(cli)?;
        let source = self.require_source(cli)?;

        Ok(BatchConfig {
            source: context.resolve(&source),
            report: cli.report.as_deref().map(|p| context.resolve(p)),
            request_pattern: cli.request.clone().filter(|p| !p.is_empty()),
            bail: cli.bail,
            verbose: cli.verbose,
            hooks,
            options: self.newman_options(cli, context),
        })
    }
}
