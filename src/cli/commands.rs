//! Command line argument definitions
//!
//! The batch options come first; everything under "Newman options" is
//! forwarded to each newman run.

use clap::Parser;
use std::path::PathBuf;

/// Main CLI structure
#[derive(Parser, Debug)]
#[command(name = "newman-batch")]
#[command(about = "Batch execute Postman collections using Newman")]
#[command(version)]
pub struct Cli {
    /// Path to folder containing Postman collection JSON files (required)
    #[arg(long, value_name = "PATH")]
    pub source: Option<PathBuf>,

    /// Write a consolidated JSON report to this file
    #[arg(long, value_name = "FILENAME")]
    pub report: Option<PathBuf>,

    /// Only run requests whose URL matches this pattern (`*` and `?` wildcards)
    #[arg(long, value_name = "PATTERN")]
    pub request: Option<String>,

    /// Configuration file (defaults to ./newman-batch.toml, then the user config dir)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory holding pre-request.js and post-request.js
    #[arg(long, env = "NEWMAN_BATCH_SCRIPTS_DIR", value_name = "DIR")]
    pub scripts_dir: Option<PathBuf>,

    /// Pre-request script file, overrides the scripts directory
    #[arg(long, value_name = "PATH")]
    pub pre_request: Option<PathBuf>,

    /// Post-request (test) script file, overrides the scripts directory
    #[arg(long, value_name = "PATH")]
    pub post_request: Option<PathBuf>,

    /// Newman executable
    #[arg(long, env = "NEWMAN_BIN", value_name = "PATH")]
    pub newman_bin: Option<PathBuf>,

    // Newman options
    /// Path to environment file
    #[arg(short = 'e', long, value_name = "PATH", help_heading = "Newman options")]
    pub environment: Option<PathBuf>,

    /// Path to globals file
    #[arg(short = 'g', long, value_name = "PATH", help_heading = "Newman options")]
    pub globals: Option<PathBuf>,

    /// Path to iteration data file
    #[arg(short = 'd', long, value_name = "PATH", help_heading = "Newman options")]
    pub iteration_data: Option<PathBuf>,

    /// Number of iterations
    #[arg(short = 'n', long, value_name = "N", help_heading = "Newman options")]
    pub iteration_count: Option<u32>,

    /// Run requests within a specific folder
    #[arg(long, value_name = "NAME", help_heading = "Newman options")]
    pub folder: Option<String>,

    /// Path to working directory
    #[arg(long, value_name = "PATH", help_heading = "Newman options")]
    pub working_dir: Option<PathBuf>,

    /// Prevent reading files outside working directory
    #[arg(long, help_heading = "Newman options")]
    pub no_insecure_file_read: bool,

    /// Export environment to a file
    #[arg(long, value_name = "PATH", help_heading = "Newman options")]
    pub export_environment: Option<PathBuf>,

    /// Export globals to a file
    #[arg(long, value_name = "PATH", help_heading = "Newman options")]
    pub export_globals: Option<PathBuf>,

    /// Export collection to a file
    #[arg(long, value_name = "PATH", help_heading = "Newman options")]
    pub export_collection: Option<PathBuf>,

    /// Request timeout in milliseconds
    #[arg(long, value_name = "MS", help_heading = "Newman options")]
    pub timeout: Option<u64>,

    /// Individual request timeout
    #[arg(long, value_name = "MS", help_heading = "Newman options")]
    pub timeout_request: Option<u64>,

    /// Script timeout
    #[arg(long, value_name = "MS", help_heading = "Newman options")]
    pub timeout_script: Option<u64>,

    /// Delay between requests in milliseconds
    #[arg(long, value_name = "MS", help_heading = "Newman options")]
    pub delay_request: Option<u64>,

    /// Stop on first error
    #[arg(long, help_heading = "Newman options")]
    pub bail: bool,

    /// Continue on error
    #[arg(long, help_heading = "Newman options")]
    pub suppress_exit_code: bool,

    /// Enable/disable colored output
    #[arg(
        long,
        default_value = "auto",
        value_parser = ["auto", "on", "off"],
        value_name = "OPTION",
        help_heading = "Newman options"
    )]
    pub color: String,

    /// Disable unicode symbols
    #[arg(long, help_heading = "Newman options")]
    pub disable_unicode: bool,

    /// Disable SSL verification
    #[arg(short = 'k', long, help_heading = "Newman options")]
    pub insecure: bool,

    /// Prevent following redirects
    #[arg(long, help_heading = "Newman options")]
    pub ignore_redirects: bool,

    /// Show detailed information
    #[arg(long, help_heading = "Newman options")]
    pub verbose: bool,

    /// Comma-separated list of reporters (cli,json,html,junit)
    #[arg(short = 'r', long, value_delimiter = ',', value_name = "REPORTERS", help_heading = "Newman options")]
    pub reporters: Option<Vec<String>>,

    /// Export JSON report to file
    #[arg(long, value_name = "PATH", help_heading = "Newman options")]
    pub reporter_json_export: Option<PathBuf>,

    /// Export HTML report to file
    #[arg(long, value_name = "PATH", help_heading = "Newman options")]
    pub reporter_html_export: Option<PathBuf>,

    /// Export JUnit report to file
    #[arg(long, value_name = "PATH", help_heading = "Newman options")]
    pub reporter_junit_export: Option<PathBuf>,

    /// Disable CLI output
    #[arg(long, help_heading = "Newman options")]
    pub reporter_cli_silent: bool,

    /// Disable summary in CLI
    #[arg(long, help_heading = "Newman options")]
    pub reporter_cli_no_summary: bool,

    /// Disable failure details in CLI
    #[arg(long, help_heading = "Newman options")]
    pub reporter_cli_no_failures: bool,

    /// Disable assertion details in CLI
    #[arg(long, help_heading = "Newman options")]
    pub reporter_cli_no_assertions: bool,

    /// Disable console logs in CLI
    #[arg(long, help_heading = "Newman options")]
    pub reporter_cli_no_console: bool,

    /// Path to client certificate
    #[arg(long, value_name = "PATH", help_heading = "Newman options")]
    pub ssl_client_cert: Option<PathBuf>,

    /// Path to client key
    #[arg(long, value_name = "PATH", help_heading = "Newman options")]
    pub ssl_client_key: Option<PathBuf>,

    /// Client certificate passphrase
    #[arg(long, value_name = "PASSPHRASE", help_heading = "Newman options")]
    pub ssl_client_passphrase: Option<String>,

    /// Path to extra CA certificates
    #[arg(long, value_name = "PATH", help_heading = "Newman options")]
    pub ssl_extra_ca_certs: Option<PathBuf>,

    /// Path to cookie jar file
    #[arg(long, value_name = "PATH", help_heading = "Newman options")]
    pub cookie_jar: Option<PathBuf>,

    /// Export cookies to file
    #[arg(long, value_name = "PATH", help_heading = "Newman options")]
    pub export_cookie_jar: Option<PathBuf>,

    /// Global variable (can be used multiple times)
    #[arg(long, value_name = "KEY=VALUE", help_heading = "Newman options")]
    pub global_var: Vec<String>,

    /// Environment variable (can be used multiple times)
    #[arg(long, value_name = "KEY=VALUE", help_heading = "Newman options")]
    pub env_var: Vec<String>,
}
