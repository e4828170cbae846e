//! Avatar files on local disk.
//!
//! Stored paths are relative to the upload root and are what the `users`
//! table keeps. The same root is served under `/storage`.

use std::io;
use std::path::{Component, Path, PathBuf};

use tabula_core::uploads::UploadedFile;

pub struct AvatarStore {
    root: PathBuf,
}

impl AvatarStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write `file` under a fresh name and return its relative path.
    ///
    /// The extension comes from the sniffed image format, never from the
    /// client-supplied file name.
    pub async fn store(&self, file: &UploadedFile) -> io::Result<String> {
        let extension = file.image_extension().ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "upload is not a supported image")
        })?;
        let name = format!("{}.{extension}", uuid::Uuid::new_v4());

        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(self.root.join(&name), &file.bytes).await?;
        tracing::debug!(path = %name, bytes = file.size_bytes(), "Avatar stored");
        Ok(name)
    }

    /// Remove a previously stored avatar. Missing files are not an error.
    pub async fn remove(&self, relative: &str) -> io::Result<()> {
        let Some(path) = self.resolve(relative) else {
            tracing::warn!(path = %relative, "Refusing to remove avatar outside the upload root");
            return Ok(());
        };
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Absolute path for a stored relative path, rejecting anything that
    /// would escape the root.
    pub fn resolve(&self, relative: &str) -> Option<PathBuf> {
        let relative = Path::new(relative);
        let plain = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        (plain && !relative.as_os_str().is_empty()).then(|| self.root.join(relative))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png() -> UploadedFile {
        let mut bytes = b"\x89PNG\r\n\x1a\n".to_vec();
        bytes.resize(64, 0);
        UploadedFile {
            file_name: "me.txt".to_string(),
            content_type: Some("image/png".to_string()),
            bytes,
        }
    }

    #[tokio::test]
    async fn store_then_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = AvatarStore::new(dir.path().join("avatars"));

        let name = store.store(&png()).await.unwrap();
        assert!(name.ends_with(".png"));
        let path = store.resolve(&name).unwrap();
        assert_eq!(tokio::fs::read(&path).await.unwrap().len(), 64);

        store.remove(&name).await.unwrap();
        assert!(!path.exists());
        // Second removal is a no-op.
        store.remove(&name).await.unwrap();
    }

    #[tokio::test]
    async fn non_image_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = AvatarStore::new(dir.path());
        let file = UploadedFile {
            file_name: "notes.png".to_string(),
            content_type: None,
            bytes: b"plain text".to_vec(),
        };
        let err = store.store(&file).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn resolve_rejects_traversal() {
        let store = AvatarStore::new("/srv/avatars");
        assert!(store.resolve("../etc/passwd").is_none());
        assert!(store.resolve("/etc/passwd").is_none());
        assert!(store.resolve("").is_none());
        assert_eq!(
            store.resolve("a.png"),
            Some(PathBuf::from("/srv/avatars/a.png"))
        );
    }
}
