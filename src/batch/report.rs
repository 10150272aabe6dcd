//! Per-collection results, the consolidated report file and the final
//! console summary

use chrono::{DateTime, Utc};
use owo_colors::OwoColorize;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

use crate::collection::FilterStats;
use crate::errors::{AppError, AppResult, ErrorContextExt};
use crate::runner::{RunStats, RunSummary};

/// Outcome of processing one collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionResult {
    /// File name of the collection
    pub collection: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<RunStats>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failures: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_stats: Option<FilterStats>,
}

impl CollectionResult {
    /// Result of a completed runner invocation
    pub fn completed(
        collection: impl Into<String>,
        summary: RunSummary,
        filter_stats: Option<FilterStats>,
    ) -> Self {
        let success = summary.is_successful();
        Self {
            collection: collection.into(),
            success,
            stats: Some(summary.run.stats),
            failures: Some(summary.run.failures),
            error: None,
            filter_stats,
        }
    }

    /// Result of a collection that could not be run
    pub fn failed(
        collection: impl Into<String>,
        error: impl Into<String>,
        filter_stats: Option<FilterStats>,
    ) -> Self {
        Self {
            collection: collection.into(),
            success: false,
            stats: None,
            failures: None,
            error: Some(error.into()),
            filter_stats,
        }
    }
}

/// Aggregate counts over a result list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn from_results(results: &[CollectionResult]) -> Self {
        let successful = results.iter().filter(|r| r.success).count();
        Self {
            total: results.len(),
            successful,
            failed: results.len() - successful,
        }
    }
}

/// Document written to the `--report` destination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub timestamp: DateTime<Utc>,
    pub total_collections: usize,
    pub successful_collections: usize,
    pub failed_collections: usize,
    pub results: Vec<CollectionResult>,
}

impl BatchReport {
    pub fn new(results: Vec<CollectionResult>) -> Self {
        let summary = BatchSummary::from_results(&results);
        Self {
            timestamp: Utc::now(),
            total_collections: summary.total,
            successful_collections: summary.successful,
            failed_collections: summary.failed,
            results,
        }
    }

    /// Write the report as pretty JSON. The file is written next to its
    /// destination and renamed into place, so readers never see a partial
    /// report.
    pub fn write_to(&self, path: &Path) -> AppResult<()> {
        let content = serde_json::to_vec_pretty(self).with_context("Failed to serialize report")?;

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let report_error = |e: std::io::Error| AppError::ReportWrite {
            path: path.to_path_buf(),
            source: Some(Box::new(e)),
        };

        let mut file = NamedTempFile::new_in(dir).map_err(report_error)?;
        file.write_all(&content).map_err(report_error)?;
        file.persist(path).map_err(|e| report_error(e.error))?;

        info!(path = %path.display(), collections = self.total_collections, "Report written");
        Ok(())
    }
}

/// Print the closing summary block
pub fn print_final_summary(results: &[CollectionResult]) {
    let summary = BatchSummary::from_results(results);
    let rule = "═".repeat(80);

    println!("\n{}", rule.cyan());
    println!("{}", "FINAL SUMMARY".cyan().bold());
    println!("{}", rule.cyan());

    println!("\nTotal Collections: {}", summary.total);
    println!("{}", format!("Successful: {}", summary.successful).green());
    println!("{}", format!("Failed: {}", summary.failed).red());

    if summary.failed > 0 {
        println!("{}", "\nFailed Collections:".red());
        for result in results.iter().filter(|r| !r.success) {
            println!("{}", format!("  ✗ {}", result.collection).red());
            if let Some(error) = &result.error {
                println!("{}", format!("    {error}").dimmed());
            }
        }
    }

    println!("\n{}\n", rule.cyan());
}
