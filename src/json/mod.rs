//! JSON encoding, JSON documents in the content store, and bundled JSON
//! resources.

pub mod bundle;
pub mod codec;
mod content;

pub use bundle::{
    load_bundled_resource, load_bundled_resource_or_exit, try_load_bundled_resource,
    DirectoryBundle, EmbeddedBundle, ResourceBundle, RESOURCE_EXTENSION,
};
pub use codec::{decode, encode, JsonFormat};
