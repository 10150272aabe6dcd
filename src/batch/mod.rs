//! Batch execution: discovery, shared scripts, orchestration and reporting

pub mod discovery;
pub mod orchestrator;
pub mod report;
pub mod scripts;

pub use discovery::{collection_files, discover, Discovery, SkippedFile};
pub use orchestrator::{load_collection, BatchConfig, BatchRunner};
pub use report::{print_final_summary, BatchReport, BatchSummary, CollectionResult};
pub use scripts::{load_hook_scripts, ScriptPaths, POST_REQUEST_FILE, PRE_REQUEST_FILE};
