//! File system access used by the bundler.
//!
//! The bundle pipeline never touches `std::fs` directly; it goes through
//! [`FileSystem`] so the direct-write sink can be swapped or observed.

use std::fs;
use std::io;
use std::path::Path;

/// Abstract file system interface.
///
/// `Sync` because entry points of a group are read in parallel.
pub trait FileSystem: Sync {
    /// Read file content as UTF-8 text.
    fn read_text(&self, path: &Path) -> io::Result<String>;

    /// Read raw file bytes.
    fn read_bytes(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Write bytes, replacing any existing file.
    fn write_bytes(&self, path: &Path, bytes: &[u8]) -> io::Result<()>;

    /// Copy a file.
    fn copy(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Create a directory and all missing parents.
    fn ensure_dir(&self, path: &Path) -> io::Result<()>;

    /// Check whether a regular file exists.
    fn is_file(&self, path: &Path) -> bool;

    /// Remove a file.
    fn remove_file(&self, path: &Path) -> io::Result<()>;
}

/// [`FileSystem`] backed by `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFs;

impl FileSystem for LocalFs {
    fn read_text(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn read_bytes(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    fn write_bytes(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, bytes)
    }

    fn copy(&self, from: &Path, to: &Path) -> io::Result<()> {
        if let Some(parent) = to.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(from, to).map(|_| ())
    }

    fn ensure_dir(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_parents() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("a/b/c.txt");

        LocalFs.write_bytes(&target, b"hi").unwrap();

        assert!(LocalFs.is_file(&target));
        assert_eq!(LocalFs.read_text(&target).unwrap(), "hi");
    }

    #[test]
    fn test_copy_and_remove() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src.bin");
        let dst = dir.path().join("out/images/dst.bin");
        fs::write(&src, [0u8, 159, 146, 150]).unwrap();

        LocalFs.copy(&src, &dst).unwrap();
        assert_eq!(LocalFs.read_bytes(&dst).unwrap(), vec![0u8, 159, 146, 150]);

        LocalFs.remove_file(&dst).unwrap();
        assert!(!LocalFs.is_file(&dst));
    }

    #[test]
    fn test_read_text_rejects_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("bad.js");
        fs::write(&file, [0xffu8, 0xfe]).unwrap();

        assert!(LocalFs.read_text(&file).is_err());
        assert!(LocalFs.read_text(&dir.path().join("missing.js")).is_err());
    }
}
