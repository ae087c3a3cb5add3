//! Object storage for uploaded files.
//!
//! The web layer only sees the [`ObjectStore`] trait. [`S3ObjectStore`]
//! writes to an S3 bucket; [`InMemoryObjectStore`] keeps objects in memory
//! for development and tests.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;

pub mod memory;
pub mod s3;

pub use memory::InMemoryObjectStore;
pub use s3::{S3Config, S3ObjectStore};

/// Failures talking to the object store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Invalid object key: {0}")]
    InvalidKey(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Upload/delete capability consumed by the upload handlers.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `bytes` under `key` and return the public URL.
    async fn upload(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError>;

    /// Remove the object stored under `key`.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;
}

static UNSAFE_KEY_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9._-]").expect("valid regex"));

/// Turn an uploaded file name into a safe object key.
///
/// Directory components are dropped and any character outside
/// `[A-Za-z0-9._-]` becomes `_`.
pub fn sanitize_key(file_name: &str) -> Result<String, StorageError> {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name)
        .trim();
    let key = UNSAFE_KEY_CHARS.replace_all(base, "_").into_owned();
    if key.is_empty() || key.chars().all(|c| c == '.') {
        return Err(StorageError::InvalidKey(file_name.to_string()));
    }
    Ok(key)
}

/// Public URL of an object in a bucket.
pub fn public_url(bucket: &str, key: &str) -> String {
    format!("http://{bucket}.s3.amazonaws.com/{key}")
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn unsafe_characters_are_replaced() {
        assert_eq!(sanitize_key("cover art (1).png").unwrap(), "cover_art__1_.png");
    }

    #[test]
    fn directories_are_dropped() {
        assert_eq!(sanitize_key("../../etc/passwd").unwrap(), "passwd");
        assert_eq!(sanitize_key(r"C:\Users\me\vin.jpg").unwrap(), "vin.jpg");
    }

    #[test]
    fn empty_names_are_rejected() {
        assert_matches!(sanitize_key(""), Err(StorageError::InvalidKey(_)));
        assert_matches!(sanitize_key("uploads/"), Err(StorageError::InvalidKey(_)));
        assert_matches!(sanitize_key(".."), Err(StorageError::InvalidKey(_)));
    }

    #[test]
    fn url_uses_bucket_location_prefix() {
        assert_eq!(
            public_url("library-media", "vin.jpg"),
            "http://library-media.s3.amazonaws.com/vin.jpg"
        );
    }
}
