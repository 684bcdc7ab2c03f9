//! Discovery of sensor logs under a source tree.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File extension of sensor logs.
pub const LOG_EXTENSION: &str = "csv";

/// Any path containing this marker is left out of the corpus.
pub const DISABLED_MARKER: &str = "disabled";

/// Recursively list the sensor logs under `root`, sorted.
///
/// The walk starts from the canonical root, so returned paths are absolute
/// and free of `.` and `..` components. Files are kept when their extension
/// is `csv`, their path does not contain [`DISABLED_MARKER`], and their
/// canonical location is inside the canonical root. Symlinked directories are
/// not followed. A missing root gives an empty list.
pub fn scan(root: &Path) -> Vec<PathBuf> {
    let canonical_root = match root.canonicalize() {
        Ok(path) => path,
        Err(e) => {
            debug!(root = ?root, error = %e, "source directory not available");
            return Vec::new();
        }
    };

    let mut files = Vec::new();
    let mut pending = vec![canonical_root.clone()];

    while let Some(dir) = pending.pop() {
        let entries = match std::fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(dir = ?dir, error = %e, "skipping unreadable directory");
                continue;
            }
        };

        for entry in entries.filter_map(|e| e.ok()) {
            let path = entry.path();
            let Ok(file_type) = entry.file_type() else {
                continue;
            };

            if file_type.is_dir() {
                pending.push(path);
            } else if is_candidate(&path) && is_inside(&path, &canonical_root) {
                files.push(path);
            }
        }
    }

    files.sort();
    debug!(root = ?root, count = files.len(), "scanned source directory");
    files
}

/// Extension and `disabled` checks, no filesystem access.
pub fn is_candidate(path: &Path) -> bool {
    let has_extension = path
        .extension()
        .map(|ext| ext == LOG_EXTENSION)
        .unwrap_or(false);

    has_extension && !path.to_string_lossy().contains(DISABLED_MARKER)
}

fn is_inside(path: &Path, canonical_root: &Path) -> bool {
    match path.canonicalize() {
        Ok(resolved) => resolved.is_file() && resolved.starts_with(canonical_root),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_is_candidate() {
        assert!(is_candidate(Path::new("raw/walk/a.csv")));
        assert!(!is_candidate(Path::new("raw/walk/a.txt")));
        assert!(!is_candidate(Path::new("raw/walk/a.CSV")));
        assert!(!is_candidate(Path::new("raw/disabled/a.csv")));
        assert!(!is_candidate(Path::new("raw/walk/a_disabled.csv")));
    }

    #[test]
    fn test_missing_root_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(scan(&dir.path().join("nope")).is_empty());
    }

    #[test]
    fn test_scan_recursive_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        let root = &dir.path().canonicalize().unwrap();
        fs::create_dir_all(root.join("run/deep")).unwrap();
        fs::create_dir_all(root.join("walk")).unwrap();
        fs::create_dir_all(root.join("disabled_sessions")).unwrap();

        fs::write(root.join("walk/b.csv"), "").unwrap();
        fs::write(root.join("walk/a.csv"), "").unwrap();
        fs::write(root.join("run/deep/c.csv"), "").unwrap();
        fs::write(root.join("run/notes.txt"), "").unwrap();
        fs::write(root.join("disabled_sessions/d.csv"), "").unwrap();

        let files = scan(root);
        assert_eq!(
            files,
            vec![
                root.join("run/deep/c.csv"),
                root.join("walk/a.csv"),
                root.join("walk/b.csv"),
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_outside_root_is_excluded() {
        let outside = tempfile::tempdir().unwrap();
        let target = outside.path().join("escape.csv");
        fs::write(&target, "").unwrap();

        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        fs::write(root.join("inside.csv"), "").unwrap();
        std::os::unix::fs::symlink(&target, root.join("link.csv")).unwrap();

        let files = scan(&root);
        assert_eq!(files, vec![root.join("inside.csv")]);
    }

    #[test]
    fn test_paths_are_normalized() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().canonicalize().unwrap();
        fs::create_dir_all(base.join("disabled_old")).unwrap();
        fs::create_dir_all(base.join("raw/walk")).unwrap();
        fs::write(base.join("raw/walk/a.csv"), "").unwrap();

        // the marker only appears in the unnormalized spelling of the root
        let files = scan(&base.join("disabled_old/../raw"));
        assert_eq!(files, vec![base.join("raw/walk/a.csv")]);
        assert!(files[0].is_absolute());
        assert!(files[0]
            .components()
            .all(|c| !matches!(c, std::path::Component::ParentDir | std::path::Component::CurDir)));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_directory_not_descended() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        fs::create_dir_all(root.join("walk")).unwrap();
        fs::write(root.join("walk/a.csv"), "").unwrap();
        std::os::unix::fs::symlink(root.join("walk"), root.join("alias")).unwrap();

        let outside = tempfile::tempdir().unwrap();
        fs::write(outside.path().join("far.csv"), "").unwrap();
        std::os::unix::fs::symlink(outside.path(), root.join("away")).unwrap();

        assert_eq!(scan(&root), vec![root.join("walk/a.csv")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_directory_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        fs::create_dir_all(root.join("locked")).unwrap();
        fs::create_dir_all(root.join("open")).unwrap();
        fs::write(root.join("locked/x.csv"), "").unwrap();
        fs::write(root.join("open/a.csv"), "").unwrap();

        let locked = root.join("locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
        // privileged users can still list the directory
        let listable = fs::read_dir(&locked).is_ok();

        let files = scan(&root);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert!(files.contains(&root.join("open/a.csv")));
        if !listable {
            assert_eq!(files, vec![root.join("open/a.csv")]);
        }
    }
}
