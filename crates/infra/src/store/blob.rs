//! Media storage on the local filesystem

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use postdeck_core::BlobStore;
use postdeck_domain::{PostdeckError, Result};
use tracing::{debug, instrument};
use url::Url;

use crate::errors::InfraError;

/// `BlobStore` rooted at a directory; uploads come back as `file://` URLs.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    root: PathBuf,
}

impl LocalBlobStore {
    /// Open (creating if needed) the blob directory.
    ///
    /// # Errors
    /// Returns `PostdeckError::Store` when the directory cannot be created.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        std::fs::create_dir_all(root).map_err(InfraError::from)?;
        let root = root.canonicalize().map_err(InfraError::from)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute location for a relative blob path.
    fn resolve(&self, relative: &str) -> Result<PathBuf> {
        let relative = Path::new(relative);
        let mut clean = PathBuf::new();
        for component in relative.components() {
            match component {
                Component::Normal(part) => clean.push(part),
                Component::CurDir => {}
                _ => {
                    return Err(PostdeckError::InvalidInput(format!(
                        "blob path must stay inside the store: {}",
                        relative.display()
                    )))
                }
            }
        }
        if clean.as_os_str().is_empty() {
            return Err(PostdeckError::InvalidInput("blob path is empty".into()));
        }
        Ok(self.root.join(clean))
    }

    fn path_from_url(&self, url: &str) -> Result<PathBuf> {
        let parsed = Url::parse(url)
            .map_err(|e| PostdeckError::InvalidInput(format!("invalid blob URL '{url}': {e}")))?;
        if parsed.scheme() != "file" {
            return Err(PostdeckError::InvalidInput(format!("not a local blob URL: {url}")));
        }
        let path = parsed
            .to_file_path()
            .map_err(|_| PostdeckError::InvalidInput(format!("invalid blob URL: {url}")))?;
        let relative = path.strip_prefix(&self.root).map_err(|_| {
            PostdeckError::InvalidInput(format!("blob URL is outside the store: {url}"))
        })?;
        self.resolve(&relative.to_string_lossy())
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    async fn upload(&self, bytes: Vec<u8>, path: &str) -> Result<String> {
        let target = self.resolve(path)?;
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(InfraError::from)?;
        }
        tokio::fs::write(&target, bytes).await.map_err(InfraError::from)?;

        let url = Url::from_file_path(&target).map_err(|_| {
            PostdeckError::Internal(format!("cannot build URL for {}", target.display()))
        })?;
        debug!(%url, "Stored blob");
        Ok(url.to_string())
    }

    #[instrument(skip(self))]
    async fn download(&self, url: &str) -> Result<Vec<u8>> {
        let path = self.path_from_url(url)?;
        Ok(tokio::fs::read(&path).await.map_err(InfraError::from)?)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn store() -> (TempDir, LocalBlobStore) {
        let dir = TempDir::new().unwrap();
        let store = LocalBlobStore::new(dir.path().join("media")).expect("blob store");
        (dir, store)
    }

    #[tokio::test]
    async fn upload_then_download() {
        let (_dir, store) = store();

        let url = store.upload(vec![1, 2, 3], "u1/shot.jpg").await.expect("upload");
        assert!(url.starts_with("file://"));
        assert!(url.ends_with("/media/u1/shot.jpg"));
        assert_eq!(store.download(&url).await.expect("download"), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn rejects_paths_escaping_the_root() {
        let (_dir, store) = store();

        for path in ["../outside.jpg", "/etc/passwd", "u1/../../x", ""] {
            let err = store.upload(vec![0], path).await.unwrap_err();
            assert!(matches!(err, PostdeckError::InvalidInput(_)), "{path}");
        }
    }

    #[tokio::test]
    async fn rejects_foreign_urls() {
        let (_dir, store) = store();

        let err = store.download("https://cdn.example.com/a.jpg").await.unwrap_err();
        assert!(matches!(err, PostdeckError::InvalidInput(_)));

        let err = store.download("file:///etc/hostname").await.unwrap_err();
        assert!(matches!(err, PostdeckError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn missing_blob_is_not_found() {
        let (_dir, store) = store();
        let url = Url::from_file_path(store.root().join("u1/missing.jpg")).unwrap();

        let err = store.download(url.as_str()).await.unwrap_err();
        assert!(matches!(err, PostdeckError::NotFound(_)));
    }
}
