//! Sequential batch execution over a directory of collections

use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use super::discovery::discover;
use super::report::{print_final_summary, BatchReport, CollectionResult};
use crate::collection::{apply_request_filter, inject_hooks, Collection, FilterStats, HookSet};
use crate::errors::{AppError, AppResult};
use crate::runner::{CollectionRunner, NewmanOptions, RunSummary};

const HEAVY_RULE_WIDTH: usize = 80;

/// Everything the orchestrator needs, resolved up front by the caller
#[derive(Debug, Clone, Default)]
pub struct BatchConfig {
    /// Directory scanned for `*.json` collections
    pub source: PathBuf,
    /// Destination of the consolidated JSON report
    pub report: Option<PathBuf>,
    /// URL glob; requests whose URL does not match are pruned
    pub request_pattern: Option<String>,
    /// Abort the batch on the first collection that records an error
    pub bail: bool,
    /// List matched or available URLs after filtering
    pub verbose: bool,
    pub hooks: HookSet,
    pub options: NewmanOptions,
}

impl BatchConfig {
    fn pattern(&self) -> Option<&str> {
        self.request_pattern.as_deref().filter(|p| !p.is_empty())
    }
}

/// Drives discovery, transformation and execution of every collection
pub struct BatchRunner<R: CollectionRunner> {
    runner: R,
    config: BatchConfig,
}

impl<R: CollectionRunner> BatchRunner<R> {
    pub fn new(runner: R, config: BatchConfig) -> Self {
        Self { runner, config }
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Process all collections in discovery order and return their results.
    ///
    /// Discovery problems and, with `bail`, the first per-collection error
    /// abort the batch. In that case neither report nor summary is produced.
    pub async fn run(&self) -> AppResult<Vec<CollectionResult>> {
        println!(
            "{}",
            format!("\n📁 Scanning collections in: {}\n", self.config.source.display()).cyan()
        );
        if let Some(pattern) = self.config.pattern() {
            println!("{}", format!("🔍 Request URL filter: {pattern}\n").cyan());
        }

        let discovery = discover(&self.config.source).await?;
        println!(
            "{}",
            format!("Found {} JSON file(s)\n", discovery.candidates).yellow()
        );
        for skipped in &discovery.skipped {
            println!(
                "{}",
                format!(
                    "⊘ Skipping {} - not a valid Postman collection",
                    file_label(&skipped.path)
                )
                .dimmed()
            );
        }

        let count = discovery.collections.len();
        println!(
            "{}",
            format!("\n✓ Found {count} valid collection(s)\n").green()
        );
        println!("{}", "━".repeat(HEAVY_RULE_WIDTH).cyan());

        info!(
            source = %self.config.source.display(),
            collections = count,
            skipped = discovery.skipped.len(),
            runner = self.runner.name(),
            "Starting batch"
        );

        let mut results = Vec::with_capacity(count);
        for (index, path) in discovery.collections.iter().enumerate() {
            let name = file_label(path);
            println!("{}", format!("\n[{}/{}] Running: {}", index + 1, count, name).cyan());
            println!("{}", "─".repeat(HEAVY_RULE_WIDTH).cyan());

            let result = self.process_collection(path, &name).await;

            if self.config.bail {
                if let Some(reason) = &result.error {
                    warn!(collection = %name, reason = %reason, "Stopping batch on first error");
                    return Err(AppError::Bail {
                        collection: name,
                        reason: reason.clone(),
                    });
                }
            }

            results.push(result);
            println!("{}", "━".repeat(HEAVY_RULE_WIDTH).cyan());
        }

        if let Some(report_path) = &self.config.report {
            BatchReport::new(results.clone()).write_to(report_path)?;
            println!(
                "{}",
                format!("\n📄 Report saved to: {}", report_path.display()).green()
            );
        }

        print_final_summary(&results);
        Ok(results)
    }

    /// Run one collection through load, inject, filter and the runner.
    /// Failures are captured in the returned result.
    async fn process_collection(&self, path: &Path, name: &str) -> CollectionResult {
        println!("{}", "Injecting test scripts...".dimmed());
        let collection = match load_collection(path).await {
            Ok(collection) => inject_hooks(&collection, &self.config.hooks),
            Err(e) => return self.report_failure(name, &e, None),
        };

        let (collection, filter_stats) = match self.config.pattern() {
            Some(pattern) => {
                println!("{}", format!("Filtering requests by pattern: {pattern}").dimmed());
                let outcome = apply_request_filter(&collection, Some(pattern));
                if let Some(stats) = &outcome.stats {
                    self.print_filter_stats(stats);
                    if stats.matched == 0 {
                        return self.report_filter_exhausted(name, pattern, stats.clone());
                    }
                    self.print_url_list("\n  Matched URLs:", stats, false);
                }
                (outcome.collection, outcome.stats)
            }
            None => (collection, None),
        };

        debug!(
            collection = %name,
            requests = collection.requests().len(),
            options = %serde_json::to_string(&self.config.options).unwrap_or_default(),
            "Handing collection to runner"
        );

        match self.runner.run(&collection, &self.config.options).await {
            Ok(summary) => {
                print_run_stats(name, &summary);
                let result = CollectionResult::completed(name, summary, filter_stats);
                info!(collection = %name, success = result.success, "Collection completed");
                result
            }
            Err(e) => self.report_failure(name, &e, filter_stats),
        }
    }

    fn report_failure(
        &self,
        name: &str,
        err: &AppError,
        filter_stats: Option<FilterStats>,
    ) -> CollectionResult {
        error!(collection = %name, category = err.category(), error = %err, "Collection failed");
        println!("{}", format!("\n✗ Collection failed: {name}").red());
        println!("{}", format!("  Error: {err}").red());
        CollectionResult::failed(name, err.to_string(), filter_stats)
    }

    fn report_filter_exhausted(
        &self,
        name: &str,
        pattern: &str,
        stats: FilterStats,
    ) -> CollectionResult {
        let err = AppError::FilterExhausted {
            collection: name.to_string(),
            pattern: pattern.to_string(),
        };
        warn!(collection = %name, pattern, total = stats.total, "No requests matched");
        println!("{}", format!("\n✗ ERROR: {err}").red());
        println!("{}", format!("  Collection: {name}").red());
        self.print_url_list("\n  Available URLs in collection:", &stats, true);
        CollectionResult::failed(name, err.to_string(), Some(stats))
    }

    fn print_filter_stats(&self, stats: &FilterStats) {
        println!("{}", format!("  Total requests: {}", stats.total).dimmed());
        println!("{}", format!("  Matched: {}", stats.matched).dimmed());
        println!("{}", format!("  Skipped: {}", stats.skipped).dimmed());
    }

    fn print_url_list(&self, heading: &str, stats: &FilterStats, skipped: bool) {
        let urls = if skipped {
            &stats.skipped_urls
        } else {
            &stats.matched_urls
        };
        if !self.config.verbose || urls.is_empty() {
            return;
        }

        if skipped {
            println!("{}", heading.yellow());
        } else {
            println!("{}", heading.dimmed());
        }
        for entry in urls {
            let line = format!("    - [{}] {}", entry.name, entry.url);
            if skipped {
                println!("{}", line.yellow());
            } else {
                println!("{}", line.dimmed());
            }
        }
    }
}

/// Read and parse a collection document for processing
pub async fn load_collection(path: &Path) -> AppResult<Collection> {
    let content = tokio::fs::read(path)
        .await
        .map_err(|e| AppError::collection_load(path, e))?;
    let document: serde_json::Value =
        serde_json::from_slice(&content).map_err(|e| AppError::collection_load(path, e))?;
    Ok(Collection::from_value(document))
}

fn print_run_stats(name: &str, summary: &RunSummary) {
    let stats = &summary.run.stats;
    println!("{}", format!("\n✓ Collection completed: {name}").green());
    println!("{}", format!("  Total Requests: {}", stats.requests.total).dimmed());
    println!("{}", format!("  Failed Requests: {}", stats.requests.failed).dimmed());
    println!("{}", format!("  Total Assertions: {}", stats.assertions.total).dimmed());
    println!("{}", format!("  Failed Assertions: {}", stats.assertions.failed).dimmed());
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::{HookEvent, Item};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    /// Records every collection it receives and answers from a script
    #[derive(Clone, Default)]
    struct FakeRunner {
        seen: Arc<Mutex<Vec<Collection>>>,
        failing_assertions: u64,
        fail_with: Option<String>,
    }

    impl FakeRunner {
        fn seen(&self) -> Vec<Collection> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CollectionRunner for FakeRunner {
        async fn run(
            &self,
            collection: &Collection,
            _options: &NewmanOptions,
        ) -> AppResult<RunSummary> {
            self.seen.lock().unwrap().push(collection.clone());
            if let Some(message) = &self.fail_with {
                return Err(AppError::runner(message.clone()));
            }
            let requests = collection.requests().len() as u64;
            Ok(serde_json::from_value(json!({
                "run": {
                    "stats": {
                        "requests": {"total": requests, "failed": 0},
                        "assertions": {"total": requests, "failed": self.failing_assertions}
                    },
                    "failures": []
                }
            }))
            .unwrap())
        }

        fn name(&self) -> &'static str {
            "fake"
        }
    }

    fn users_and_orders() -> serde_json::Value {
        json!({
            "info": {"name": "api"},
            "item": [{
                "name": "Folder",
                "item": [
                    {"name": "User", "request": {"url": "https://api.test/users/1"}},
                    {"name": "Order", "request": {"url": "https://api.test/orders/1"}}
                ]
            }]
        })
    }

    fn write(dir: &Path, name: &str, value: &serde_json::Value) {
        std::fs::write(dir.join(name), serde_json::to_vec(value).unwrap()).unwrap();
    }

    fn config(source: &Path) -> BatchConfig {
        BatchConfig {
            source: source.to_path_buf(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_filtered_batch_end_to_end() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "api.json", &users_and_orders());
        write(dir.path(), "env.json", &json!({"name": "env", "values": []}));

        let runner = FakeRunner::default();
        let mut cfg = config(dir.path());
        cfg.request_pattern = Some("*/users/*".into());
        cfg.hooks = HookSet::new().with(HookEvent::Test, "pm.test('ok');");

        let results = BatchRunner::new(runner.clone(), cfg).run().await.unwrap();
        assert_eq!(results.len(), 1);
        assert!(results[0].success);
        assert_eq!(results[0].collection, "api.json");

        let stats = results[0].filter_stats.as_ref().unwrap();
        assert_eq!((stats.total, stats.matched, stats.skipped), (2, 1, 1));

        let seen = runner.seen();
        assert_eq!(seen.len(), 1);
        let requests = seen[0].requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].display_name(), "User");
        assert_eq!(requests[0].events_for("test").count(), 1);
    }

    #[tokio::test]
    async fn test_filter_exhaustion_skips_runner() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.json", &users_and_orders());
        write(dir.path(), "b.json", &users_and_orders());

        let runner = FakeRunner::default();
        let mut cfg = config(dir.path());
        cfg.request_pattern = Some("*/payments/*".into());

        let results = BatchRunner::new(runner.clone(), cfg).run().await.unwrap();
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| !r.success));
        assert_eq!(
            results[0].error.as_deref(),
            Some("No requests matched the pattern \"*/payments/*\"")
        );
        assert_eq!(results[0].filter_stats.as_ref().unwrap().skipped, 2);
        assert!(runner.seen().is_empty());
    }

    #[tokio::test]
    async fn test_bail_stops_after_first_error() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.json", &users_and_orders());
        write(dir.path(), "b.json", &users_and_orders());

        let runner = FakeRunner::default();
        let mut cfg = config(dir.path());
        cfg.request_pattern = Some("nothing".into());
        cfg.bail = true;

        let err = BatchRunner::new(runner, cfg).run().await.unwrap_err();
        match err {
            AppError::Bail { collection, reason } => {
                assert_eq!(collection, "a.json");
                assert!(reason.contains("nothing"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_runner_failure_is_recorded_or_bails() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.json", &users_and_orders());
        write(dir.path(), "b.json", &users_and_orders());

        let runner = FakeRunner {
            fail_with: Some("connection refused".into()),
            ..Default::default()
        };
        let results = BatchRunner::new(runner.clone(), config(dir.path()))
            .run()
            .await
            .unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[1].error.as_deref(), Some("connection refused"));
        assert!(results[1].stats.is_none());

        let mut cfg = config(dir.path());
        cfg.bail = true;
        let err = BatchRunner::new(runner, cfg).run().await.unwrap_err();
        assert!(matches!(err, AppError::Bail { .. }));
    }

    #[tokio::test]
    async fn test_assertion_failures_do_not_bail() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.json", &users_and_orders());
        write(dir.path(), "b.json", &users_and_orders());

        let runner = FakeRunner {
            failing_assertions: 1,
            ..Default::default()
        };
        let mut cfg = config(dir.path());
        cfg.bail = true;

        let results = BatchRunner::new(runner, cfg).run().await.unwrap();
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| !r.success && r.error.is_none()));
        assert!(results[0].filter_stats.is_none());
    }

    #[tokio::test]
    async fn test_hooks_reach_every_request_and_file_is_untouched() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "api.json", &users_and_orders());
        let before = std::fs::read(dir.path().join("api.json")).unwrap();

        let runner = FakeRunner::default();
        let mut cfg = config(dir.path());
        cfg.hooks = HookSet::new()
            .with(HookEvent::PreRequest, "a();\nb();")
            .with(HookEvent::Test, "c();");

        BatchRunner::new(runner.clone(), cfg).run().await.unwrap();

        let seen = runner.seen();
        let Some(items) = &seen[0].items else { panic!("expected items") };
        let Item::Folder(folder) = &items[0] else { panic!("expected folder") };
        assert_eq!(folder.children.len(), 2);
        for request in seen[0].requests() {
            let pre: Vec<_> = request.events_for("prerequest").collect();
            assert_eq!(pre.len(), 1);
            assert_eq!(pre[0]["script"]["exec"], json!(["a();", "b();"]));
        }
        assert_eq!(std::fs::read(dir.path().join("api.json")).unwrap(), before);
    }

    #[tokio::test]
    async fn test_report_is_written() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("collections");
        std::fs::create_dir(&source).unwrap();
        write(&source, "api.json", &users_and_orders());

        let report = dir.path().join("report.json");
        let mut cfg = config(&source);
        cfg.report = Some(report.clone());
        cfg.request_pattern = Some("*orders*".into());

        BatchRunner::new(FakeRunner::default(), cfg).run().await.unwrap();

        let value: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&report).unwrap()).unwrap();
        assert_eq!(value["totalCollections"], 1);
        assert_eq!(value["successfulCollections"], 1);
        assert_eq!(value["results"][0]["filterStats"]["matched"], 1);
        assert_eq!(value["results"][0]["stats"]["requests"]["total"], 1);
    }

    #[tokio::test]
    async fn test_discovery_errors_are_fatal() {
        let dir = TempDir::new().unwrap();
        let err = BatchRunner::new(FakeRunner::default(), config(dir.path()))
            .run()
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NoCollectionFiles { .. }));

        let err = BatchRunner::new(FakeRunner::default(), config(&dir.path().join("missing")))
            .run()
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::SourceNotDirectory { .. }));
    }

    #[tokio::test]
    async fn test_load_collection_failure() {
        let dir = TempDir::new().unwrap();
        let err = load_collection(&dir.path().join("gone.json")).await.unwrap_err();
        assert!(err.to_string().starts_with("Failed to inject scripts into collection:"));
    }
}
