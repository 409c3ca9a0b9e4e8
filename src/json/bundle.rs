//! Read-only JSON resources shipped with the application.
//!
//! A resource that is missing from the bundle means the build is broken, so
//! it gets its own error variant ([`StoreError::MissingBundledResource`])
//! instead of collapsing into "no result". A resource that is present but
//! unreadable or malformed is an ordinary `None`.
//!
//! Resource names are plain file names; anything that could walk out of the
//! bundle is rejected with [`StoreError::InvalidFileName`].

use include_dir::Dir;
use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};

use super::codec::decode;
use crate::config::FileNamePolicy;
use crate::error::{Result, StoreError};
use crate::storage::paths::validate_file_name;

/// Extension every bundled JSON resource carries.
pub const RESOURCE_EXTENSION: &str = "json";

/// Exit status used by [`load_bundled_resource_or_exit`] (`EX_SOFTWARE`
/// from sysexits.h).
pub const EX_SOFTWARE: i32 = 70;

/// A package of read-only resources, addressed by name and extension.
pub trait ResourceBundle {
    /// Where `name.extension` lives in the bundle, if it is there at all.
    fn locate(&self, name: &str, extension: &str) -> Option<PathBuf>;

    /// Contents of a path returned by [`locate`](Self::locate).
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// Resources in a directory on disk.
#[derive(Debug, Clone)]
pub struct DirectoryBundle {
    dir: PathBuf,
}

impl DirectoryBundle {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ResourceBundle for DirectoryBundle {
    fn locate(&self, name: &str, extension: &str) -> Option<PathBuf> {
        let path = self.dir.join(format!("{name}.{extension}"));
        // Present but unreadable entries are found here and fail in `read`
        path.exists().then_some(path)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }
}

/// Resources compiled into the binary with `include_dir!`.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedBundle {
    dir: &'static Dir<'static>,
}

impl EmbeddedBundle {
    pub const fn new(dir: &'static Dir<'static>) -> Self {
        Self { dir }
    }
}

impl ResourceBundle for EmbeddedBundle {
    fn locate(&self, name: &str, extension: &str) -> Option<PathBuf> {
        let path = PathBuf::from(format!("{name}.{extension}"));
        self.dir.get_file(&path).map(|_| path)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.dir
            .get_file(path)
            .map(|file| file.contents().to_vec())
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.display().to_string()))
    }
}

/// Load `name.json` from `bundle`, keeping every failure distinct.
pub fn try_load_bundled_resource(bundle: &dyn ResourceBundle, name: &str) -> Result<Value> {
    validate_file_name(name, FileNamePolicy::Strict)?;

    let path = bundle.locate(name, RESOURCE_EXTENSION).ok_or_else(|| {
        StoreError::MissingBundledResource {
            name: name.to_string(),
            extension: RESOURCE_EXTENSION.to_string(),
        }
    })?;

    let bytes = bundle.read(&path).map_err(|source| StoreError::Read {
        path: path.clone(),
        source,
    })?;

    debug!(resource = name, bytes = bytes.len(), "bundled resource read");
    decode(&bytes, &path)
}

/// Load `name.json` from `bundle`.
///
/// `Err` when the resource is not in the bundle at all, or `name` is not a
/// plain file name. Read and parse failures are logged and come back as
/// `Ok(None)`.
pub fn load_bundled_resource(bundle: &dyn ResourceBundle, name: &str) -> Result<Option<Value>> {
    match try_load_bundled_resource(bundle, name) {
        Ok(value) => Ok(Some(value)),
        Err(e @ StoreError::MissingBundledResource { .. }) => Err(e),
        Err(e @ StoreError::InvalidFileName { .. }) => Err(e),
        Err(e) => {
            warn!(resource = name, error = %e, "bundled resource unusable");
            Ok(None)
        }
    }
}

/// Like [`load_bundled_resource`], but terminates the process with
/// [`EX_SOFTWARE`] when the resource is missing from the bundle.
pub fn load_bundled_resource_or_exit(bundle: &dyn ResourceBundle, name: &str) -> Option<Value> {
    match load_bundled_resource(bundle, name) {
        Ok(value) => value,
        Err(e) => {
            error!(error = %e, "cannot continue without bundled resource");
            eprintln!("fatal: {e}");
            std::process::exit(EX_SOFTWARE)
        }
    }
}
