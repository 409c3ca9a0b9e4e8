//! # Stowage
//!
//! Save and load JSON content files in an application's document directory,
//! and read JSON resources bundled with the application.
//!
//! Every saved file lives at `<root>/content/<file name>`. The root comes
//! from [`StoreConfig`]: a fixed directory, or the platform documents
//! directory namespaced by application name.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use stowage::{ContentStore, StoreConfig};
//! use serde_json::json;
//!
//! let store = ContentStore::open(StoreConfig::with_root("/tmp/myapp"))?;
//!
//! // Returns the path the file landed at, or None on failure
//! let path = store.save_json(&json!({"page": 3}), "progress.json");
//!
//! // None if the file is missing or not valid JSON
//! let progress = store.load_json("progress.json");
//! # Ok::<(), stowage::StoreError>(())
//! ```
//!
//! Every `Option` returning method has a `try_` twin that returns
//! [`StoreError`] instead, for callers that need to tell "missing" apart
//! from "corrupt".

pub mod config;
pub mod error;
pub mod json;
pub mod storage;

// Re-exports for convenience
pub use config::{DirectoryCollision, FileNamePolicy, StoreConfig};
pub use error::{Result, Severity, StoreError};
pub use json::{
    load_bundled_resource, load_bundled_resource_or_exit, DirectoryBundle, EmbeddedBundle,
    JsonFormat, ResourceBundle,
};
pub use storage::{
    ContentStore, FileSystem, FixedRoot, OsFileSystem, PlatformDocuments, StorageRootProvider,
};
