mod cloudinary;
mod gcs;
mod local;

pub use cloudinary::CloudinaryStore;
pub use gcs::GcsStore;
pub use local::LocalStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::image::InlineImage;

#[derive(Debug, Error)]
pub enum ObjectStoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Object not found: {0}")]
    NotFound(String),
    #[error("Invalid object key: {0}")]
    InvalidKey(String),
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Location of an object: a `/`-separated namespace plus a fixed name inside it.
///
/// Every path segment is escaped on construction (see [`encode_path_component`]),
/// so a key can never escape its namespace on a filesystem or in a bucket, and
/// distinct segments always produce distinct keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectKey {
    namespace: String,
    name: String,
}

impl ObjectKey {
    pub fn new(namespace: &str, name: &str) -> Self {
        let namespace = namespace
            .split('/')
            .filter(|s| !s.is_empty())
            .map(encode_path_component)
            .collect::<Vec<_>>()
            .join("/");

        Self {
            namespace,
            name: encode_path_component(name),
        }
    }

    /// Key for `name` under `root/segment`, where `segment` is a single
    /// component even if it contains `/`.
    pub fn nested(root: &str, segment: &str, name: &str) -> Self {
        let mut key = Self::new(root, name);
        let segment = encode_path_component(segment);
        key.namespace = if key.namespace.is_empty() {
            segment
        } else {
            format!("{}/{}", key.namespace, segment)
        };
        key
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full key without extension, e.g. `face_enrollments/1AB23CS045/frontal`.
    pub fn path(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}/{}", self.namespace, self.name)
        }
    }
}

/// Result of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Durable URL the image can be fetched from
    pub url: String,
}

/// Abstraction over image hosting backends.
///
/// Uploads always overwrite: a second upload to the same key replaces the
/// first object and the returned URL points at the new content.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn upload(
        &self,
        key: &ObjectKey,
        image: &InlineImage,
    ) -> Result<StoredObject, ObjectStoreError>;
}

/// Escape a path segment into `[A-Za-z0-9_-]`.
///
/// ASCII letters, digits and `_` pass through. Every other UTF-8 byte,
/// `-` included, becomes `-XX` (uppercase hex), which keeps the mapping
/// one-to-one.
pub fn encode_path_component(component: &str) -> String {
    let mut out = String::with_capacity(component.len());
    for b in component.bytes() {
        match b {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_' => out.push(b as char),
            _ => out.push_str(&format!("-{b:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_path_joins_namespace_and_name() {
        let key = ObjectKey::new("face_enrollments/1AB23CS045", "frontal");
        assert_eq!(key.path(), "face_enrollments/1AB23CS045/frontal");
    }

    #[test]
    fn key_segments_are_escaped() {
        let key = ObjectKey::new("face_enrollments/../etc", "front al");
        assert_eq!(key.namespace(), "face_enrollments/-2E-2E/etc");
        assert_eq!(key.name(), "front-20al");
    }

    #[test]
    fn nested_segment_keeps_slashes_inside() {
        let key = ObjectKey::nested("face_enrollments", "AB/23", "frontal");
        assert_eq!(key.path(), "face_enrollments/AB-2F23/frontal");
    }

    #[test]
    fn distinct_segments_never_share_a_key() {
        let segments = ["AB 23", "AB_23", "AB/23", "AB//23", "AB-23", "AB-2023", "ÄB23", "ÖB23"];
        let encoded: std::collections::HashSet<String> =
            segments.iter().map(|s| encode_path_component(s)).collect();
        assert_eq!(encoded.len(), segments.len(), "{encoded:?}");
        for e in &encoded {
            assert!(e
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-'));
        }
    }
}
