//! Filesystem helpers — atomic file replacement and stale tmp cleanup.
//!
//! Every durable artifact in the pipeline (checkpoint, batch outputs) is
//! written to a `.tmp` sibling first and renamed into place, so a crash
//! mid-write never leaves a half-written file under the final name.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Path of the `.tmp` sibling used while writing `path`.
pub fn tmp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write `contents` to `path` atomically: write tmp sibling, then rename.
///
/// Rename within one directory is atomic on POSIX filesystems, so a
/// concurrent reader either sees the old file or the new one, never a
/// partial write.
pub fn atomic_write(path: &Path, contents: &[u8]) -> io::Result<()> {
    let tmp = tmp_sibling(path);
    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path)
}

/// Remove stale `.tmp` files left behind by a killed process.
pub fn cleanup_tmp_files(dir: &Path) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "tmp") {
            log::warn!("Removing stale tmp file: {}", path.display());
            fs::remove_file(&path)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn atomic_write_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");
        atomic_write(&path, b"{}").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"{}");
        assert!(!tmp_sibling(&path).exists());
    }

    #[test]
    fn atomic_write_replaces_existing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");
        fs::write(&path, b"old").unwrap();
        atomic_write(&path, b"new").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"new");
    }

    #[test]
    fn tmp_sibling_appends_extension() {
        let path = Path::new("/data/progress.json");
        assert_eq!(tmp_sibling(path), PathBuf::from("/data/progress.json.tmp"));
    }

    #[test]
    fn cleanup_removes_only_tmp() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.tmp"), b"stale").unwrap();
        fs::write(dir.path().join("b.json"), b"keep").unwrap();

        cleanup_tmp_files(dir.path()).unwrap();

        assert!(!dir.path().join("a.tmp").exists());
        assert!(dir.path().join("b.json").exists());
    }
}
