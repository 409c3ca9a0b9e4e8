//! On-disk storage: root resolution, path composition, directory checks and
//! the [`ContentStore`] itself.

pub mod fs;
pub mod paths;
pub mod root;
pub mod store;

pub use fs::{ensure_directory, FileSystem, OsFileSystem};
pub use paths::{resolve, resolve_content_file, CONTENT_DIR};
pub use root::{FixedRoot, PlatformDocuments, StorageRootProvider};
pub use store::ContentStore;
