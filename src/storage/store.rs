use super::name::{validate_name, StorageError};
use std::collections::BTreeSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Filesystem store keyed by `(username, filename)`.
///
/// Each user owns one directory under `root`, created on first write. No
/// locking: concurrent writes of the same name are last-write-wins.
#[derive(Debug, Clone)]
pub struct UserFileStore {
    root: PathBuf,
    raw_extension: String,
}

impl UserFileStore {
    pub fn new(root: impl Into<PathBuf>, raw_extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            raw_extension: raw_extension.into(),
        }
    }

    fn user_dir(&self, username: &str) -> Result<PathBuf, StorageError> {
        validate_name("username", username)?;
        Ok(self.root.join(username))
    }

    /// Create the user's directory if needed and return it.
    pub async fn ensure_user_dir(&self, username: &str) -> Result<PathBuf, StorageError> {
        let dir = self.user_dir(username)?;
        fs::create_dir_all(&dir).await?;
        Ok(dir)
    }

    /// Location of the converted recording. Does not touch the filesystem.
    pub fn canonical_path(&self, username: &str, filename: &str) -> Result<PathBuf, StorageError> {
        validate_name("filename", filename)?;
        Ok(self.user_dir(username)?.join(filename))
    }

    /// Location of the as-uploaded container awaiting conversion.
    pub fn raw_path(&self, username: &str, filename: &str) -> Result<PathBuf, StorageError> {
        validate_name("filename", filename)?;
        Ok(self
            .user_dir(username)?
            .join(format!("{}.{}", filename, self.raw_extension)))
    }

    /// Write uploaded bytes to `<user_dir>/<filename>.<raw-ext>`, replacing any
    /// previous upload of the same name.
    pub async fn save_raw(
        &self,
        username: &str,
        filename: &str,
        bytes: &[u8],
    ) -> Result<PathBuf, StorageError> {
        let path = self.raw_path(username, filename)?;
        self.ensure_user_dir(username).await?;
        fs::write(&path, bytes).await?;

        debug!("Saved raw upload: {} ({} bytes)", path.display(), bytes.len());

        Ok(path)
    }

    /// Remove a raw container once its conversion has succeeded.
    pub async fn remove_raw(&self, raw_path: &Path) -> Result<(), StorageError> {
        fs::remove_file(raw_path).await?;
        Ok(())
    }

    /// Remove `<user_dir>/<filename>`. Returns `false` when there was nothing
    /// to remove.
    pub async fn delete(&self, username: &str, filename: &str) -> Result<bool, StorageError> {
        let path = self.canonical_path(username, filename)?;

        match fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => return Ok(false),
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(e.into()),
        }

        match fs::remove_file(&path).await {
            Ok(()) => {
                info!("Deleted recording: {}", path.display());
                Ok(true)
            }
            // Lost a race with another delete
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Names of the canonical recordings in the user's directory.
    ///
    /// Raw containers and hidden conversion temporaries are left out. A user
    /// without a directory has no recordings.
    pub async fn list_filenames(&self, username: &str) -> Result<BTreeSet<String>, StorageError> {
        let dir = self.user_dir(username)?;
        let raw_suffix = format!(".{}", self.raw_extension);

        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeSet::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = BTreeSet::new();
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if name.starts_with('.') || name.ends_with(&raw_suffix) {
                continue;
            }
            names.insert(name);
        }

        Ok(names)
    }
}
