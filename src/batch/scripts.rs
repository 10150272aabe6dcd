//! Loading the shared pre-request and post-request scripts

use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::collection::{HookEvent, HookSet};

/// Default file names looked up inside the scripts directory
pub const PRE_REQUEST_FILE: &str = "pre-request.js";
pub const POST_REQUEST_FILE: &str = "post-request.js";

/// Where to find the shared scripts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptPaths {
    pub pre_request: PathBuf,
    pub post_request: PathBuf,
}

impl ScriptPaths {
    /// Default file names inside `dir`
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            pre_request: dir.join(PRE_REQUEST_FILE),
            post_request: dir.join(POST_REQUEST_FILE),
        }
    }
}

/// Read one script. Missing or unreadable files yield `None`.
async fn load_script(path: &Path) -> Option<String> {
    let label = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    match tokio::fs::read_to_string(path).await {
        Ok(source) => {
            println!("{}", format!("✓ Loaded {label}").green());
            debug!(path = %path.display(), lines = source.lines().count(), "Loaded hook script");
            Some(source)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            println!("{}", format!("⚠ {label} not found, skipping").yellow());
            None
        }
        Err(e) => {
            println!("{}", format!("⚠ Could not load {label}: {e}").yellow());
            warn!(path = %path.display(), error = %e, "Failed to read hook script");
            None
        }
    }
}

/// Load both shared scripts into a [`HookSet`]
pub async fn load_hook_scripts(paths: &ScriptPaths) -> HookSet {
    let mut hooks = HookSet::new();
    if let Some(source) = load_script(&paths.pre_request).await {
        hooks = hooks.with(HookEvent::PreRequest, source);
    }
    if let Some(source) = load_script(&paths.post_request).await {
        hooks = hooks.with(HookEvent::Test, source);
    }
    hooks
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_loads_both_scripts() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(PRE_REQUEST_FILE), "pre();").unwrap();
        std::fs::write(dir.path().join(POST_REQUEST_FILE), "post();").unwrap();

        let hooks = load_hook_scripts(&ScriptPaths::in_dir(dir.path())).await;
        assert_eq!(hooks.get("prerequest"), Some("pre();"));
        assert_eq!(hooks.get("test"), Some("post();"));
    }

    #[tokio::test]
    async fn test_missing_scripts_are_skipped() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(POST_REQUEST_FILE), "post();").unwrap();

        let hooks = load_hook_scripts(&ScriptPaths::in_dir(dir.path())).await;
        assert_eq!(hooks.get("prerequest"), None);
        assert_eq!(hooks.get("test"), Some("post();"));

        let empty = load_hook_scripts(&ScriptPaths::in_dir(&dir.path().join("nowhere"))).await;
        assert!(empty.is_empty());
    }
}
