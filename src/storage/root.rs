//! Where the writable storage root comes from.

use std::path::PathBuf;

use crate::error::{Result, StoreError};

/// Supplies the per-application writable directory.
pub trait StorageRootProvider {
    fn writable_root(&self) -> Result<PathBuf>;
}

/// A root chosen up front, e.g. from config or a test's temp dir.
#[derive(Debug, Clone)]
pub struct FixedRoot(pub PathBuf);

impl StorageRootProvider for FixedRoot {
    fn writable_root(&self) -> Result<PathBuf> {
        if self.0.as_os_str().is_empty() {
            return Err(StoreError::RootUnavailable("empty root path".into()));
        }
        Ok(self.0.clone())
    }
}

/// The user's documents directory, namespaced by application.
///
/// Falls back to the platform data directory on systems without a
/// documents folder (headless Linux, mostly).
#[derive(Debug, Clone)]
pub struct PlatformDocuments {
    pub app_name: String,
}

impl PlatformDocuments {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
        }
    }
}

impl StorageRootProvider for PlatformDocuments {
    fn writable_root(&self) -> Result<PathBuf> {
        let base = dirs::document_dir().or_else(dirs::data_dir).ok_or_else(|| {
            StoreError::RootUnavailable("no documents or data directory for this user".into())
        })?;
        Ok(base.join(&self.app_name))
    }
}
