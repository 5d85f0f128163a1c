//! Filesystem helpers: completion check and atomic document writes.

use std::io::Write;
use std::path::Path;

/// A document counts as built when it exists as a regular file with content.
#[must_use]
pub fn is_built(path: &Path) -> bool {
    std::fs::metadata(path).is_ok_and(|meta| meta.is_file() && meta.len() > 0)
}

/// Write `contents` to `path` through a temporary sibling file and a rename.
///
/// Creates the parent directory if needed. An interrupted write leaves at most
/// a hidden `.tmp` file behind, never a truncated document at `path`.
///
/// # Errors
///
/// Returns the underlying I/O error from directory creation, writing, or the
/// final rename.
pub fn write_atomic(path: &Path, contents: &str) -> std::io::Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)?;

    let mut tmp = tempfile::Builder::new()
        .prefix(".bkb-")
        .suffix(".tmp")
        .tempfile_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_missing_files_are_not_built() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.md");
        assert!(!is_built(&path));

        std::fs::write(&path, "").unwrap();
        assert!(!is_built(&path));

        std::fs::write(&path, "x").unwrap();
        assert!(is_built(&path));
    }

    #[test]
    fn directory_is_not_built() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!is_built(dir.path()));
    }

    #[test]
    fn write_atomic_creates_parent_and_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Lipids").join("001|LDL|低密度脂蛋白.md");

        write_atomic(&path, "# LDL").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# LDL");
        let entries: Vec<_> = std::fs::read_dir(path.parent().unwrap())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn write_atomic_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.md");
        std::fs::write(&path, "old").unwrap();

        write_atomic(&path, "new").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
    }
}
