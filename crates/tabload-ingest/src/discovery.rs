//! File discovery for input directories.

use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};

/// Extensions treated as delimited text input (case-insensitive).
const DELIMITED_EXTENSIONS: &[&str] = &["csv", "txt", "tsv"];

/// Lists all delimited text files in a directory.
///
/// Matches `.csv`, `.txt`, and `.tsv` extensions case-insensitively.
/// Returns files sorted by filename.
pub fn list_delimited_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();

        // Skip directories
        if !path.is_file() {
            continue;
        }

        let is_delimited = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                DELIMITED_EXTENSIONS
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known))
            })
            .unwrap_or(false);

        if is_delimited {
            files.push(path);
        }
    }

    // Sort by filename
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_dir() -> TempDir {
        let dir = TempDir::new().unwrap();

        for name in &["b_extract.csv", "a_extract.TXT", "notes.md", "data.tsv"] {
            let path = dir.path().join(name);
            std::fs::write(&path, "header\ndata").unwrap();
        }

        dir
    }

    #[test]
    fn lists_delimited_files_sorted() {
        let dir = create_test_dir();
        let files = list_delimited_files(dir.path()).unwrap();

        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a_extract.TXT", "b_extract.csv", "data.tsv"]);
    }

    #[test]
    fn skips_non_delimited_files() {
        let dir = create_test_dir();
        let files = list_delimited_files(dir.path()).unwrap();
        assert!(!files.iter().any(|p| p.to_str().unwrap().ends_with(".md")));
    }

    #[test]
    fn empty_dir_lists_nothing() {
        let dir = TempDir::new().unwrap();
        let files = list_delimited_files(dir.path()).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn not_a_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let file_path = dir.path().join("test.csv");
        std::fs::write(&file_path, "data").unwrap();

        let result = list_delimited_files(&file_path);
        assert!(matches!(result, Err(IngestError::DirectoryNotFound { .. })));
    }
}
