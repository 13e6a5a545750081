//! Storage collaborator: binary objects keyed by owner-scoped path.

mod memory;
mod s3;

pub use memory::MemoryMediaStore;
pub use s3::{S3Config, S3MediaStore};

use crate::{Error, Result};

/// Fixed prefix under which all media objects live.
pub const MEDIA_PREFIX: &str = "media";

/// Trait for owner-scoped media object operations.
pub trait MediaStore {
    /// Resolve a displayable address for `(identity, key)`.
    fn resolve_url(
        &self,
        identity: &str,
        key: &str,
    ) -> impl std::future::Future<Output = Result<String>> + Send;

    /// Upload object bytes under `(identity, key)`.
    fn upload(
        &self,
        identity: &str,
        key: &str,
        bytes: &[u8],
        content_type: Option<&str>,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Build the object key `media/<identity>/<key>`.
///
/// The key component is kept literal (aside from surrounding
/// whitespace/slashes) so that a stored note's `image_key` resolves to
/// the same object on every refresh.
pub fn media_object_key(identity: &str, key: &str) -> Result<String> {
    let identity = identity.trim().trim_matches('/');
    if identity.is_empty() || identity.contains('/') {
        return Err(Error::InvalidInput(
            "Owner identity must be a single non-empty path segment".to_string(),
        ));
    }

    let key = key.trim().trim_matches('/');
    if key.is_empty() || key.split('/').any(|segment| segment == "..") {
        return Err(Error::InvalidInput(
            "Media key must be a non-empty relative path".to_string(),
        ));
    }

    Ok(format!("{MEDIA_PREFIX}/{identity}/{key}"))
}
