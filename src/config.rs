//! Store configuration.
//!
//! Loaded from a TOML file (usually `stowage.toml`) or built in code. Every
//! field has a default, so an empty file is a valid config:
//!
//! ```toml
//! root = "/var/lib/myapp"        # optional, defaults to the documents dir
//! app_name = "myapp"
//! json_format = "pretty"         # or "compact"
//! atomic_writes = true
//! file_names = "strict"          # or "trusted"
//! directory_collision = "reject" # or "permissive"
//! resources_dir = "./resources"
//! ```

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::json::JsonFormat;
use crate::storage::root::{FixedRoot, PlatformDocuments, StorageRootProvider};

/// What to do with a file name that could escape the content directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileNamePolicy {
    /// Only single, plain path components.
    #[default]
    Strict,
    /// Pass names through untouched. The caller owns the trust boundary.
    Trusted,
}

/// What to do when a regular file sits where the content directory belongs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectoryCollision {
    /// Fail the directory check with `NotADirectory`.
    #[default]
    Reject,
    /// Treat the file as "directory exists" and carry on. The following
    /// write fails instead.
    Permissive,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Writable storage root. `None` means the platform documents directory.
    pub root: Option<PathBuf>,
    /// Namespace under the platform documents directory.
    pub app_name: String,
    pub json_format: JsonFormat,
    /// Write to a `.tmp` sibling and rename over the target.
    pub atomic_writes: bool,
    pub file_names: FileNamePolicy,
    pub directory_collision: DirectoryCollision,
    /// Directory holding bundled `.json` resources, if any.
    pub resources_dir: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: None,
            app_name: env!("CARGO_PKG_NAME").to_string(),
            json_format: JsonFormat::Compact,
            atomic_writes: false,
            file_names: FileNamePolicy::Strict,
            directory_collision: DirectoryCollision::Reject,
            resources_dir: None,
        }
    }
}

impl StoreConfig {
    /// Config rooted at a fixed directory, everything else default.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
            ..Self::default()
        }
    }

    /// Read and validate a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");
        let text = fs::read_to_string(path).map_err(|source| StoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: StoreConfig =
            toml::from_str(text).map_err(|e| StoreError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(root) = &self.root {
            if root.as_os_str().is_empty() {
                return Err(StoreError::Config("root cannot be empty".into()));
            }
        }
        if self.root.is_none() && self.app_name.trim().is_empty() {
            return Err(StoreError::Config(
                "app_name cannot be empty when root is not set".into(),
            ));
        }
        Ok(())
    }

    /// The provider this config implies: the fixed root if one is set,
    /// otherwise the platform documents directory.
    pub fn root_provider(&self) -> Box<dyn StorageRootProvider> {
        match &self.root {
            Some(root) => Box::new(FixedRoot(root.clone())),
            None => Box::new(PlatformDocuments::new(self.app_name.clone())),
        }
    }
}
