use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::options::NewmanOptions;
use crate::collection::Collection;
use crate::errors::AppResult;

/// Engine that executes a collection and reports its outcome
#[async_trait]
pub trait CollectionRunner: Send + Sync {
    /// Run `collection` with the pass-through `options`
    async fn run(&self, collection: &Collection, options: &NewmanOptions) -> AppResult<RunSummary>;

    /// Short identifier used in logs
    fn name(&self) -> &'static str;
}

/// Summary returned by the runner. Only `run.stats` and `run.failures` are
/// read; everything else is kept for completeness.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    #[serde(default)]
    pub run: RunData,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunData {
    #[serde(default)]
    pub stats: RunStats,

    #[serde(default)]
    pub failures: Vec<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Per-category counters (`requests`, `assertions`, `iterations`, ...)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    #[serde(default)]
    pub requests: StatCount,

    #[serde(default)]
    pub assertions: StatCount,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatCount {
    #[serde(default)]
    pub total: u64,

    #[serde(default)]
    pub failed: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending: Option<u64>,
}

impl RunSummary {
    /// A run succeeds when no assertion failed
    pub fn is_successful(&self) -> bool {
        self.run.stats.assertions.failed == 0
    }
}
