//! Locating collection files in the source directory

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::collection::{validate_collection, Validation};
use crate::errors::{AppError, AppResult, ErrorContextExt};

/// A candidate file that failed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Files found in the source directory, split by validity
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovery {
    pub candidates: usize,
    pub collections: Vec<PathBuf>,
    pub skipped: Vec<SkippedFile>,
}

/// List `*.json` files of `source`, sorted by file name
pub async fn collection_files(source: &Path) -> AppResult<Vec<PathBuf>> {
    let is_dir = tokio::fs::metadata(source)
        .await
        .map(|meta| meta.is_dir())
        .unwrap_or(false);
    if !is_dir {
        return Err(AppError::SourceNotDirectory {
            path: source.to_path_buf(),
        });
    }

    let mut entries = tokio::fs::read_dir(source)
        .await
        .in_file_operation(source, "read source directory")?;

    let mut files = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .in_file_operation(source, "read source directory")?
    {
        let path = entry.path();
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Read and check a single candidate file
pub async fn check_collection_file(path: &Path) -> Validation {
    let Ok(content) = tokio::fs::read(path).await else {
        return Validation::Invalid("file could not be read");
    };
    match serde_json::from_slice(&content) {
        Ok(document) => validate_collection(&document),
        Err(_) => Validation::Invalid("file is not valid JSON"),
    }
}

/// Discover and validate collections. Fails when the directory has no JSON
/// files or none of them is a collection.
pub async fn discover(source: &Path) -> AppResult<Discovery> {
    let files = collection_files(source).await?;
    if files.is_empty() {
        return Err(AppError::NoCollectionFiles {
            path: source.to_path_buf(),
        });
    }

    let mut discovery = Discovery {
        candidates: files.len(),
        ..Default::default()
    };

    for path in files {
        match check_collection_file(&path).await {
            Validation::Valid => discovery.collections.push(path),
            Validation::Invalid(reason) => {
                debug!(path = %path.display(), reason, "Skipping file");
                discovery.skipped.push(SkippedFile {
                    path,
                    reason: reason.to_string(),
                });
            }
        }
    }

    if discovery.collections.is_empty() {
        return Err(AppError::NoValidCollections {
            path: source.to_path_buf(),
        });
    }

    Ok(discovery)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const COLLECTION: &str = r#"{"info": {"name": "c"}, "item": []}"#;

    #[tokio::test]
    async fn test_lists_json_files_sorted() {
        let dir = TempDir::new().unwrap();
        for name in ["b.json", "a.JSON", "notes.txt", "c.json"] {
            std::fs::write(dir.path().join(name), COLLECTION).unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.json")).unwrap();

        let files = collection_files(dir.path()).await.unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.JSON", "b.json", "c.json", "nested.json"]);
    }

    #[tokio::test]
    async fn test_non_directory_source() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("file.json");
        std::fs::write(&file, COLLECTION).unwrap();

        let err = collection_files(&file).await.unwrap_err();
        assert!(matches!(err, AppError::SourceNotDirectory { .. }));

        let err = collection_files(&dir.path().join("missing")).await.unwrap_err();
        assert!(matches!(err, AppError::SourceNotDirectory { .. }));
    }

    #[tokio::test]
    async fn test_discover_skips_invalid_files() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("good.json"), COLLECTION).unwrap();
        std::fs::write(dir.path().join("env.json"), r#"{"name": "env", "values": []}"#).unwrap();
        std::fs::write(dir.path().join("broken.json"), "{ nope").unwrap();

        let discovery = discover(dir.path()).await.unwrap();
        assert_eq!(discovery.candidates, 3);
        assert_eq!(discovery.collections, vec![dir.path().join("good.json")]);
        assert_eq!(discovery.skipped.len(), 2);
        assert_eq!(discovery.skipped[0].reason, "file is not valid JSON");
    }

    #[tokio::test]
    async fn test_discover_fatal_cases() {
        let dir = TempDir::new().unwrap();
        let err = discover(dir.path()).await.unwrap_err();
        assert!(matches!(err, AppError::NoCollectionFiles { .. }));

        std::fs::write(dir.path().join("env.json"), "{}").unwrap();
        let err = discover(dir.path()).await.unwrap_err();
        assert!(matches!(err, AppError::NoValidCollections { .. }));
    }
}
