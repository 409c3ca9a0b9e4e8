//! Path composition for stored content. No I/O happens here.

use std::path::{Component, Path, PathBuf};

use crate::config::FileNamePolicy;
use crate::error::{Result, StoreError};

/// Subdirectory under the storage root that holds saved content files.
pub const CONTENT_DIR: &str = "content";

/// `root / subdirectory / file_name`, skipping the subdirectory when absent.
pub fn resolve(root: &Path, subdirectory: Option<&str>, file_name: &str) -> PathBuf {
    let mut path = root.to_path_buf();
    if let Some(dir) = subdirectory {
        path.push(dir);
    }
    path.push(file_name);
    path
}

/// Location of a content file. Saves and loads both go through this.
pub fn resolve_content_file(root: &Path, file_name: &str) -> PathBuf {
    resolve(root, Some(CONTENT_DIR), file_name)
}

/// Check a caller supplied file name against `policy`.
///
/// `Trusted` accepts anything, including names that walk out of the content
/// directory. `Strict` only allows a single plain path component.
pub fn validate_file_name(name: &str, policy: FileNamePolicy) -> Result<()> {
    let reject = |reason: &'static str| -> Result<()> {
        Err(StoreError::InvalidFileName {
            name: name.to_string(),
            reason,
        })
    };

    if policy == FileNamePolicy::Trusted {
        return Ok(());
    }

    if name.is_empty() {
        return reject("empty name");
    }
    if name.contains('\0') {
        return reject("contains NUL byte");
    }
    if name.contains('/') || name.contains('\\') {
        return reject("contains a path separator");
    }

    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => reject("not a plain file name"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_with_and_without_subdirectory() {
        let root = Path::new("/data/app");
        assert_eq!(
            resolve(root, Some("exports"), "a.json"),
            PathBuf::from("/data/app/exports/a.json")
        );
        assert_eq!(resolve(root, None, "a.json"), PathBuf::from("/data/app/a.json"));
    }

    #[test]
    fn test_content_file_is_under_content_dir() {
        let path = resolve_content_file(Path::new("/docs"), "session.json");
        assert_eq!(path, PathBuf::from("/docs/content/session.json"));
        assert_eq!(path, resolve_content_file(Path::new("/docs"), "session.json"));
    }

    #[test]
    fn test_strict_accepts_plain_names() {
        for name in ["a.json", "report-2024", ".hidden", "with space.txt"] {
            assert!(validate_file_name(name, FileNamePolicy::Strict).is_ok(), "{name}");
        }
    }

    #[test]
    fn test_strict_rejects_escapes() {
        for name in ["", "..", ".", "../etc/passwd", "sub/file", "a\\b", "nul\0byte"] {
            let err = validate_file_name(name, FileNamePolicy::Strict).unwrap_err();
            assert!(matches!(err, StoreError::InvalidFileName { .. }), "{name:?}");
        }
    }

    #[test]
    fn test_trusted_accepts_anything() {
        assert!(validate_file_name("../outside", FileNamePolicy::Trusted).is_ok());
        assert!(validate_file_name("", FileNamePolicy::Trusted).is_ok());
    }
}
