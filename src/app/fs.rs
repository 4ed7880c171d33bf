// snapsift - app/fs.rs
//
// All file I/O for the tool lives here: the core transformers take and
// return text only. Reads are best-effort lossy UTF-8 so a report with a
// few mangled bytes still gets analysed instead of failing outright.

use crate::core::model::ReportKind;
use crate::util::constants;
use crate::util::error::{DiscoveryError, DispatchError, SnapsiftError};
use std::path::{Path, PathBuf};

/// Read the full content of a report file as a string.
///
/// Invalid UTF-8 sequences are replaced, never fatal.
pub fn read_report_lossy(path: &Path) -> Result<String, DispatchError> {
    let bytes = std::fs::read(path).map_err(|e| DispatchError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Compute the output path for a cleaned report.
///
/// `errpt.txt` becomes `errpt.clean.txt`, placed in `out_dir` when given
/// or next to the input otherwise.
pub fn cleaned_output_path(input: &Path, out_dir: Option<&Path>) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("report");
    let name = match input.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{stem}.{}.{ext}", constants::CLEANED_FILE_TAG),
        None => format!("{stem}.{}", constants::CLEANED_FILE_TAG),
    };
    match out_dir {
        Some(dir) => dir.join(name),
        None => input.with_file_name(name),
    }
}

/// Write cleaned report text, creating the parent directory if needed.
pub fn write_cleaned(path: &Path, text: &str) -> Result<(), SnapsiftError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| SnapsiftError::Io {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }
    }
    std::fs::write(path, text).map_err(|e| SnapsiftError::Io {
        path: path.to_path_buf(),
        operation: "write",
        source: e,
    })
}

// =============================================================================
// Discovery
// =============================================================================

/// Configuration for a report discovery pass.
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Maximum directory recursion depth.
    pub max_depth: usize,

    /// Maximum number of report files to collect before stopping.
    pub max_files: usize,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            max_depth: constants::DEFAULT_MAX_DEPTH,
            max_files: constants::DEFAULT_MAX_FILES,
        }
    }
}

/// Discover report files under `root`.
///
/// Only files whose extension is in the allowed set are collected;
/// everything else is skipped silently. Per-entry traversal errors are
/// non-fatal and returned as human-readable warnings. Returns `Err` only
/// for an invalid root or when `max_files` is exceeded.
pub fn discover_reports(
    root: &Path,
    config: &DiscoveryConfig,
) -> Result<(Vec<PathBuf>, Vec<String>), DiscoveryError> {
    if !root.exists() {
        return Err(DiscoveryError::RootNotFound {
            path: root.to_path_buf(),
        });
    }
    if !root.is_dir() {
        return Err(DiscoveryError::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    let mut files: Vec<PathBuf> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    for entry in walkdir::WalkDir::new(root)
        .max_depth(config.max_depth)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warnings.push(format!("Skipped inaccessible entry: {e}"));
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        if ReportKind::from_path(entry.path()).is_none() {
            continue;
        }
        if files.len() >= config.max_files {
            return Err(DiscoveryError::MaxFilesExceeded {
                max: config.max_files,
            });
        }
        files.push(entry.path().to_path_buf());
    }

    tracing::debug!(
        root = %root.display(),
        files = files.len(),
        warnings = warnings.len(),
        "Report discovery complete"
    );

    Ok((files, warnings))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleaned_output_path_inserts_tag() {
        let path = cleaned_output_path(&PathBuf::from("/data/errpt.txt"), None);
        assert_eq!(path, PathBuf::from("/data/errpt.clean.txt"));
    }

    #[test]
    fn test_cleaned_output_path_honours_out_dir() {
        let path = cleaned_output_path(
            &PathBuf::from("/data/errpt.txt"),
            Some(&PathBuf::from("/out")),
        );
        assert_eq!(path, PathBuf::from("/out/errpt.clean.txt"));
    }

    #[test]
    fn test_read_report_lossy_replaces_invalid_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.txt");
        std::fs::write(&path, b"LABEL: OK\n\xff\xfe garbage\n").unwrap();

        let text = read_report_lossy(&path).unwrap();
        assert!(text.starts_with("LABEL: OK\n"));
        assert!(text.contains('\u{FFFD}'));
    }

    #[test]
    fn test_read_report_missing_file_is_io_error() {
        let result = read_report_lossy(&PathBuf::from("/nonexistent/report.txt"));
        assert!(matches!(result, Err(DispatchError::Io { .. })));
    }

    #[test]
    fn test_discover_collects_only_allowed_extensions() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "x").unwrap();
        std::fs::write(dir.path().join("b.snap"), "x").unwrap();
        std::fs::write(dir.path().join("c.pdf"), "x").unwrap();
        std::fs::write(dir.path().join("noext"), "x").unwrap();

        let (files, warnings) = discover_reports(dir.path(), &DiscoveryConfig::default()).unwrap();
        assert!(warnings.is_empty());
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.txt", "b.snap"]);
    }

    #[test]
    fn test_discover_nonexistent_root_is_error() {
        let result = discover_reports(
            &PathBuf::from("/nonexistent/snapsift-test-path"),
            &DiscoveryConfig::default(),
        );
        assert!(matches!(result, Err(DiscoveryError::RootNotFound { .. })));
    }

    #[test]
    fn test_discover_enforces_max_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "x").unwrap();
        std::fs::write(dir.path().join("b.txt"), "x").unwrap();

        let config = DiscoveryConfig {
            max_files: 1,
            ..Default::default()
        };
        let result = discover_reports(dir.path(), &config);
        assert!(matches!(result, Err(DiscoveryError::MaxFilesExceeded { .. })));
    }

    #[test]
    fn test_write_cleaned_creates_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.clean.txt");
        write_cleaned(&path, "content\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "content\n");
    }
}
