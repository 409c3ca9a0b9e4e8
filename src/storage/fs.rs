//! File system seam for stowage storage.
//!
//! The store never touches `std::fs` directly; it goes through
//! [`FileSystem`] so tests can swap in a failing or read-only one.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::config::DirectoryCollision;
use crate::error::{Result, StoreError};

/// Primitive file operations the store is built on.
pub trait FileSystem {
    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    fn create_dir(&self, path: &Path, recursive: bool) -> io::Result<()>;

    /// Replace the file at `path` with `data`.
    fn write_file(&self, path: &Path, data: &[u8]) -> io::Result<()>;

    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>>;

    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Replace the file at `path` with `data` so readers see either the old
    /// or the new contents. Scratch files must never clash with existing
    /// names in the target directory.
    fn write_file_atomic(&self, path: &Path, data: &[u8]) -> io::Result<()>;

    /// Regular files directly inside `path`.
    fn list_files(&self, path: &Path) -> io::Result<Vec<PathBuf>>;
}

/// [`FileSystem`] backed by the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_dir(&self, path: &Path, recursive: bool) -> io::Result<()> {
        if recursive {
            fs::create_dir_all(path)
        } else {
            fs::create_dir(path)
        }
    }

    fn write_file(&self, path: &Path, data: &[u8]) -> io::Result<()> {
        let mut file = fs::File::create(path)?;
        file.write_all(data)?;
        file.sync_all()
    }

    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn write_file_atomic(&self, path: &Path, data: &[u8]) -> io::Result<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        // Created with O_EXCL under a random name, removed on drop
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(data)?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }

    fn list_files(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                files.push(entry.path());
            }
        }
        Ok(files)
    }
}

/// Make sure `path` is a directory, creating it and any missing parents.
///
/// Calling this on an existing directory is a no-op. What happens when a
/// regular file already sits at `path` depends on `collision`: `Permissive`
/// reports success without touching anything, `Reject` fails with
/// [`StoreError::NotADirectory`].
pub fn ensure_directory(
    fs: &dyn FileSystem,
    path: &Path,
    collision: DirectoryCollision,
) -> Result<()> {
    if fs.exists(path) {
        if fs.is_dir(path) {
            return Ok(());
        }
        return match collision {
            DirectoryCollision::Permissive => {
                warn!(path = %path.display(), "file occupies directory name, leaving it in place");
                Ok(())
            }
            DirectoryCollision::Reject => Err(StoreError::NotADirectory(path.to_path_buf())),
        };
    }

    fs.create_dir(path, true)
        .map_err(|source| StoreError::CreateDirectory {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(path = %path.display(), "created directory");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_ensure_directory_creates_intermediates() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b").join("content");

        ensure_directory(&OsFileSystem, &nested, DirectoryCollision::Reject).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn test_ensure_directory_is_idempotent() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("content");

        ensure_directory(&OsFileSystem, &target, DirectoryCollision::Reject).unwrap();
        ensure_directory(&OsFileSystem, &target, DirectoryCollision::Reject).unwrap();

        let dirs: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(dirs.len(), 1);
        assert!(target.is_dir());
    }

    #[test]
    fn test_file_in_the_way_permissive() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("content");
        fs::write(&target, b"not a dir").unwrap();

        ensure_directory(&OsFileSystem, &target, DirectoryCollision::Permissive).unwrap();
        // Still a file
        assert!(target.is_file());
    }

    #[test]
    fn test_file_in_the_way_reject() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("content");
        fs::write(&target, b"not a dir").unwrap();

        let err = ensure_directory(&OsFileSystem, &target, DirectoryCollision::Reject).unwrap_err();
        assert!(matches!(err, StoreError::NotADirectory(p) if p == target));
    }

    #[test]
    fn test_create_failure_is_reported() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"x").unwrap();

        // Parent component is a file, so create_dir_all cannot succeed
        let target = blocker.join("content");
        let err = ensure_directory(&OsFileSystem, &target, DirectoryCollision::Reject).unwrap_err();
        assert!(matches!(err, StoreError::CreateDirectory { .. }));
    }

    #[test]
    fn test_atomic_write_keeps_neighbours() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("x");
        let neighbour = dir.path().join("x.tmp");
        fs::write(&neighbour, b"keep me").unwrap();

        OsFileSystem.write_file_atomic(&target, b"one").unwrap();
        OsFileSystem.write_file_atomic(&target, b"two").unwrap();

        assert_eq!(fs::read(&target).unwrap(), b"two");
        assert_eq!(fs::read(&neighbour).unwrap(), b"keep me");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn test_list_files_skips_directories() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("one.json"), b"1").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();

        let files = OsFileSystem.list_files(dir.path()).unwrap();
        assert_eq!(files, vec![dir.path().join("one.json")]);
    }
}
