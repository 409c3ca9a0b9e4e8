//! The content store: one file per name under `<root>/content/`.

use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::fs::{ensure_directory, FileSystem, OsFileSystem};
use super::paths::{self, CONTENT_DIR};
use super::root::StorageRootProvider;
use crate::config::StoreConfig;
use crate::error::{Result, StoreError};

/// Saves and loads named content files under a storage root.
///
/// The root is resolved once when the store is opened. Nothing is created
/// on disk until the first save.
pub struct ContentStore {
    root: PathBuf,
    config: StoreConfig,
    fs: Box<dyn FileSystem>,
}

impl ContentStore {
    /// Open a store, resolving the root from the config.
    pub fn open(config: StoreConfig) -> Result<Self> {
        let provider = config.root_provider();
        Self::with_provider(config, provider.as_ref())
    }

    /// Open a store whose root comes from `provider`, ignoring `config.root`.
    pub fn with_provider(config: StoreConfig, provider: &dyn StorageRootProvider) -> Result<Self> {
        config.validate()?;
        let root = provider.writable_root()?;
        debug!(root = %root.display(), "content store opened");
        Ok(Self {
            root,
            config,
            fs: Box::new(OsFileSystem),
        })
    }

    /// Swap the file system the store talks to.
    pub fn with_file_system(mut self, fs: impl FileSystem + 'static) -> Self {
        self.fs = Box::new(fs);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// `<root>/content`
    pub fn content_dir(&self) -> PathBuf {
        self.root.join(CONTENT_DIR)
    }

    /// Where `file_name` is (or would be) stored. No I/O.
    pub fn content_file_path(&self, file_name: &str) -> Result<PathBuf> {
        paths::validate_file_name(file_name, self.config.file_names)?;
        Ok(paths::resolve_content_file(&self.root, file_name))
    }

    /// Write `data` to `<root>/<subdirectory>/<file_name>`, creating the
    /// subdirectory first. Any existing file is replaced.
    pub fn try_save_to_subdirectory(
        &self,
        subdirectory: Option<&str>,
        file_name: &str,
        data: &[u8],
    ) -> Result<PathBuf> {
        paths::validate_file_name(file_name, self.config.file_names)?;
        if let Some(dir) = subdirectory {
            paths::validate_file_name(dir, self.config.file_names)?;
            ensure_directory(
                self.fs.as_ref(),
                &self.root.join(dir),
                self.config.directory_collision,
            )?;
        }

        let target = paths::resolve(&self.root, subdirectory, file_name);
        info!(path = %target.display(), bytes = data.len(), "saving content file");

        let written = if self.config.atomic_writes {
            self.fs.write_file_atomic(&target, data)
        } else {
            self.fs.write_file(&target, data)
        };
        written.map_err(|source| StoreError::Write {
            path: target.clone(),
            source,
        })?;

        debug!(path = %target.display(), "content file saved");
        Ok(target)
    }

    /// Save `data` as content file `file_name` and return its path.
    pub fn try_save_content_file(&self, file_name: &str, data: &[u8]) -> Result<PathBuf> {
        self.try_save_to_subdirectory(Some(CONTENT_DIR), file_name, data)
    }

    /// Save `data` as content file `file_name`. `None` on any failure.
    pub fn save_content_file(&self, file_name: &str, data: &[u8]) -> Option<PathBuf> {
        self.try_save_content_file(file_name, data)
            .map_err(|e| warn!(file = file_name, error = %e, "save failed"))
            .ok()
    }

    /// Full contents of content file `file_name`.
    pub fn try_load_content_file(&self, file_name: &str) -> Result<Vec<u8>> {
        let path = self.content_file_path(file_name)?;
        if !self.fs.exists(&path) {
            return Err(StoreError::NotFound(path));
        }

        match self.fs.read_file(&path) {
            Ok(bytes) => {
                debug!(path = %path.display(), bytes = bytes.len(), "content file loaded");
                Ok(bytes)
            }
            // Removed between the check and the read
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(StoreError::NotFound(path)),
            Err(source) => Err(StoreError::Read { path, source }),
        }
    }

    /// Contents of content file `file_name`. `None` if it is missing or
    /// cannot be read.
    pub fn load_content_file(&self, file_name: &str) -> Option<Vec<u8>> {
        match self.try_load_content_file(file_name) {
            Ok(bytes) => Some(bytes),
            Err(StoreError::NotFound(_)) => None,
            Err(e) => {
                warn!(file = file_name, error = %e, "load failed");
                None
            }
        }
    }

    pub fn contains(&self, file_name: &str) -> bool {
        self.content_file_path(file_name)
            .map(|path| self.fs.exists(&path) && !self.fs.is_dir(&path))
            .unwrap_or(false)
    }

    /// Delete content file `file_name`. `Ok(false)` if there was nothing to
    /// delete.
    pub fn remove_content_file(&self, file_name: &str) -> Result<bool> {
        let path = self.content_file_path(file_name)?;
        match self.fs.remove_file(&path) {
            Ok(()) => {
                info!(path = %path.display(), "content file removed");
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(StoreError::Write { path, source }),
        }
    }

    /// Names of all stored content files, sorted. Files whose names are not
    /// valid UTF-8 cannot be addressed by name and are skipped.
    pub fn list_content_files(&self) -> Result<Vec<String>> {
        let dir = self.content_dir();
        if !self.fs.is_dir(&dir) {
            return Ok(Vec::new());
        }

        let files = self
            .fs
            .list_files(&dir)
            .map_err(|source| StoreError::Read {
                path: dir.clone(),
                source,
            })?;

        let mut names = Vec::with_capacity(files.len());
        for file in &files {
            let Some(name) = file.file_name() else {
                continue;
            };
            // A lossy name would not load back, so leave it out
            match name.to_str() {
                Some(name) => names.push(name.to_string()),
                None => warn!(path = %file.display(), "skipping non UTF-8 file name"),
            }
        }
        names.sort();
        Ok(names)
    }
}
