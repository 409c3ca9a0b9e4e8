//! Error types for stowage.
//!
//! Every failure carries the path it happened on. Callers that only care
//! about "did it work" use the `Option` returning API on
//! [`ContentStore`](crate::ContentStore); everything else gets a `StoreError`.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// How bad an error is for the host application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Nothing stored under that name. Not really a failure.
    Absent,
    /// The operation failed but the process can carry on.
    Recoverable,
    /// Broken build or host environment. Retrying will not help.
    Fatal,
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage root unavailable: {0}")]
    RootUnavailable(String),

    #[error("invalid file name {name:?}: {reason}")]
    InvalidFileName { name: String, reason: &'static str },

    #[error("failed to create directory {}: {source}", .path.display())]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} exists but is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no content file at {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to encode JSON: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("malformed JSON in {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("bundled resource {name}.{extension} is missing from the package")]
    MissingBundledResource { name: String, extension: String },

    #[error("config error: {0}")]
    Config(String),
}

impl StoreError {
    pub fn severity(&self) -> Severity {
        match self {
            StoreError::NotFound(_) => Severity::Absent,
            StoreError::RootUnavailable(_)
            | StoreError::MissingBundledResource { .. }
            | StoreError::Config(_) => Severity::Fatal,
            _ => Severity::Recoverable,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
