use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Component, Path, PathBuf};

use super::{ObjectKey, ObjectStore, ObjectStoreError, StoredObject};
use crate::image::InlineImage;

/// Local filesystem object store for development and testing.
///
/// Objects are published under `<public_base_url>/media/<key>.<ext>` and served
/// back by the `/media` route.
pub struct LocalStore {
    base_path: PathBuf,
    public_base_url: String,
}

impl LocalStore {
    pub fn new<P: AsRef<Path>>(base_path: P, public_base_url: &str) -> Result<Self, std::io::Error> {
        let base_path = base_path.as_ref().to_path_buf();
        std::fs::create_dir_all(&base_path)?;
        Ok(Self {
            base_path,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Resolve a relative media path inside the store root. Rejects anything
    /// that could climb out of it.
    fn resolve(&self, relative: &str) -> Result<PathBuf, ObjectStoreError> {
        let relative = Path::new(relative);
        let safe = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if !safe || relative.as_os_str().is_empty() {
            return Err(ObjectStoreError::InvalidKey(
                relative.to_string_lossy().to_string(),
            ));
        }
        Ok(self.base_path.join(relative))
    }

    /// Read a stored object by its media path (`<key>.<ext>`).
    pub async fn get(&self, relative: &str) -> Result<Bytes, ObjectStoreError> {
        let path = self.resolve(relative)?;
        if !path.is_file() {
            return Err(ObjectStoreError::NotFound(relative.to_string()));
        }
        let data = tokio::fs::read(&path).await?;
        Ok(Bytes::from(data))
    }

    pub async fn exists(&self, relative: &str) -> Result<bool, ObjectStoreError> {
        let path = self.resolve(relative)?;
        Ok(path.is_file())
    }

    /// Remove earlier variants of `name` with a different extension, so that an
    /// overwrite with a new image format leaves exactly one object behind.
    async fn remove_variants(&self, dir: &Path, name: &str, keep: &Path) -> Result<(), ObjectStoreError> {
        let mut entries = tokio::fs::read_dir(dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path == keep {
                continue;
            }
            let same_stem = path.file_stem().and_then(|s| s.to_str()) == Some(name);
            if same_stem && path.is_file() {
                tokio::fs::remove_file(&path).await?;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ObjectStore for LocalStore {
    async fn upload(
        &self,
        key: &ObjectKey,
        image: &InlineImage,
    ) -> Result<StoredObject, ObjectStoreError> {
        let relative = format!("{}.{}", key.path(), image.extension());
        let path = self.resolve(&relative)?;
        let dir = path
            .parent()
            .ok_or_else(|| ObjectStoreError::InvalidKey(relative.clone()))?;

        tokio::fs::create_dir_all(dir).await?;
        self.remove_variants(dir, key.name(), &path).await?;
        tokio::fs::write(&path, &image.data).await?;

        Ok(StoredObject {
            url: format!("{}/media/{relative}", self.public_base_url),
        })
    }
}
