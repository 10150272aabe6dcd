//! Options forwarded verbatim to newman
//!
//! Field names serialize to newman's own option names so the debug log shows
//! exactly what the runner was asked to do. [`NewmanOptions::to_args`] turns
//! the same set into command-line flags.

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::PathBuf;

fn is_false(value: &bool) -> bool {
    !*value
}

fn redact<S: Serializer>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(_) => serializer.serialize_some("***"),
        None => serializer.serialize_none(),
    }
}

/// Timing controls, all in milliseconds
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Timeouts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<u64>,
}

impl Timeouts {
    pub fn is_empty(&self) -> bool {
        self.global.is_none() && self.request.is_none() && self.script.is_none()
    }
}

/// Export destination of a file reporter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReporterExport {
    pub export: PathBuf,
}

/// Toggles of newman's CLI reporter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CliReporterOptions {
    #[serde(skip_serializing_if = "is_false")]
    pub silent: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub no_summary: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub no_failures: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub no_assertions: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub no_console: bool,
}

impl CliReporterOptions {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Per-reporter settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReporterOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json: Option<ReporterExport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<ReporterExport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub junit: Option<ReporterExport>,
    #[serde(skip_serializing_if = "CliReporterOptions::is_empty")]
    pub cli: CliReporterOptions,
}

impl ReporterOptions {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// The full pass-through option set for one newman run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewmanOptions {
    pub reporters: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub globals: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iteration_data: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iteration_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<PathBuf>,
    /// `Some(false)` forbids reading files outside the working directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insecure_file_read: Option<bool>,

    #[serde(skip_serializing_if = "Timeouts::is_empty")]
    pub timeout: Timeouts,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay_request: Option<u64>,

    #[serde(skip_serializing_if = "is_false")]
    pub bail: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub suppress_exit_code: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub disable_unicode: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub insecure: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub ignore_redirects: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub verbose: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl_client_cert: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl_client_key: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "redact")]
    pub ssl_client_passphrase: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl_extra_ca_certs: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookie_jar: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_cookie_jar: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_environment: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_globals: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_collection: Option<PathBuf>,

    #[serde(skip_serializing_if = "ReporterOptions::is_empty")]
    pub reporter: ReporterOptions,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub global_var: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub env_var: BTreeMap<String, String>,
}

impl Default for NewmanOptions {
    fn default() -> Self {
        Self {
            reporters: vec!["cli".to_string()],
            environment: None,
            globals: None,
            iteration_data: None,
            iteration_count: None,
            folder: None,
            working_dir: None,
            insecure_file_read: None,
            timeout: Timeouts::default(),
            delay_request: None,
            bail: false,
            suppress_exit_code: false,
            color: None,
            disable_unicode: false,
            insecure: false,
            ignore_redirects: false,
            verbose: false,
            ssl_client_cert: None,
            ssl_client_key: None,
            ssl_client_passphrase: None,
            ssl_extra_ca_certs: None,
            cookie_jar: None,
            export_cookie_jar: None,
            export_environment: None,
            export_globals: None,
            export_collection: None,
            reporter: ReporterOptions::default(),
            global_var: BTreeMap::new(),
            env_var: BTreeMap::new(),
        }
    }
}

/// Parse repeated `key=value` tokens. The first `=` separates key from
/// value; tokens without a non-empty key and value are dropped.
pub fn parse_key_value_pairs<S: AsRef<str>>(pairs: &[S]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .filter_map(|pair| pair.as_ref().split_once('='))
        .filter(|(key, value)| !key.is_empty() && !value.is_empty())
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

impl NewmanOptions {
    /// Requested reporters with `json` appended when missing; the JSON
    /// export is how the run summary is read back.
    pub fn reporters_with_json(&self) -> Vec<String> {
        let mut reporters: Vec<String> = self
            .reporters
            .iter()
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .collect();
        if !reporters.iter().any(|r| r == "json") {
            reporters.push("json".to_string());
        }
        reporters
    }

    /// Translate every option except reporters and the JSON export into
    /// newman command-line flags.
    pub fn to_args(&self) -> Vec<OsString> {
        let mut args = ArgList::default();

        args.path("--environment", &self.environment);
        args.path("--globals", &self.globals);
        args.path("--iteration-data", &self.iteration_data);
        args.display("--iteration-count", &self.iteration_count);
        args.display("--folder", &self.folder);
        args.path("--working-dir", &self.working_dir);
        if self.insecure_file_read == Some(false) {
            args.flag("--no-insecure-file-read", true);
        }

        args.display("--timeout", &self.timeout.global);
        args.display("--timeout-request", &self.timeout.request);
        args.display("--timeout-script", &self.timeout.script);
        args.display("--delay-request", &self.delay_request);

        args.flag("--bail", self.bail);
        args.flag("--suppress-exit-code", self.suppress_exit_code);
        args.display("--color", &self.color);
        args.flag("--disable-unicode", self.disable_unicode);
        args.flag("--insecure", self.insecure);
        args.flag("--ignore-redirects", self.ignore_redirects);
        args.flag("--verbose", self.verbose);

        args.path("--ssl-client-cert", &self.ssl_client_cert);
        args.path("--ssl-client-key", &self.ssl_client_key);
        args.display("--ssl-client-passphrase", &self.ssl_client_passphrase);
        args.path("--ssl-extra-ca-certs", &self.ssl_extra_ca_certs);
        args.path("--cookie-jar", &self.cookie_jar);
        args.path("--export-cookie-jar", &self.export_cookie_jar);

        args.path("--export-environment", &self.export_environment);
        args.path("--export-globals", &self.export_globals);
        args.path("--export-collection", &self.export_collection);

        let html = self.reporter.html.as_ref().map(|r| r.export.clone());
        let junit = self.reporter.junit.as_ref().map(|r| r.export.clone());
        args.path("--reporter-html-export", &html);
        args.path("--reporter-junit-export", &junit);

        let cli = &self.reporter.cli;
        args.flag("--reporter-cli-silent", cli.silent);
        args.flag("--reporter-cli-no-summary", cli.no_summary);
        args.flag("--reporter-cli-no-failures", cli.no_failures);
        args.flag("--reporter-cli-no-assertions", cli.no_assertions);
        args.flag("--reporter-cli-no-console", cli.no_console);

        for (key, value) in &self.global_var {
            args.value("--global-var", format!("{key}={value}"));
        }
        for (key, value) in &self.env_var {
            args.value("--env-var", format!("{key}={value}"));
        }

        args.0
    }
}

#[derive(Default)]
struct ArgList(Vec<OsString>);

impl ArgList {
    fn flag(&mut self, name: &str, enabled: bool) {
        if enabled {
            self.0.push(name.into());
        }
    }

    fn value(&mut self, name: &str, value: impl Into<OsString>) {
        self.0.push(name.into());
        self.0.push(value.into());
    }

    fn path(&mut self, name: &str, value: &Option<PathBuf>) {
        if let Some(path) = value {
            self.value(name, path.as_os_str());
        }
    }

    fn display<T: ToString>(&mut self, name: &str, value: &Option<T>) {
        if let Some(value) = value {
            self.value(name, value.to_string());
        }
    }
}
