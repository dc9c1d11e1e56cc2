//! Avatar file store
//!
//! All avatars live under one directory that is served at `/img`. Stored entities keep a
//! reference of the form `img/<file>`:
//!
//! - member avatars: `img/avatar<memberId>.<ext>`
//! - application avatars: `img/applications/<uuid>.<ext>`

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use fame_core::{DomainError, ImageKind};
use tracing::{debug, instrument};
use uuid::Uuid;

/// Prefix of every stored avatar reference
pub const REFERENCE_PREFIX: &str = "img/";

/// Subdirectory holding avatars attached to applications
pub const APPLICATION_DIR: &str = "applications";

/// A file written by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAvatar {
    /// Path relative to the avatar directory
    pub file_name: String,
    /// Reference to persist on the owning entity
    pub reference: String,
}

impl StoredAvatar {
    fn new(file_name: String) -> Self {
        let reference = format!("{REFERENCE_PREFIX}{file_name}");
        Self {
            file_name,
            reference,
        }
    }

    /// Public URL path under which the file is served
    pub fn url_path(&self) -> String {
        format!("/{}", self.reference)
    }
}

/// Avatar files on local disk
#[derive(Debug, Clone)]
pub struct AvatarStore {
    root: PathBuf,
    max_bytes: usize,
}

impl AvatarStore {
    pub fn new(root: impl Into<PathBuf>, max_bytes: usize) -> Self {
        Self {
            root: root.into(),
            max_bytes,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    fn max_mb(&self) -> u64 {
        (self.max_bytes / (1024 * 1024)) as u64
    }

    /// Create the avatar directories if they do not exist
    pub async fn ensure_dirs(&self) -> Result<(), DomainError> {
        tokio::fs::create_dir_all(self.root.join(APPLICATION_DIR))
            .await
            .map_err(storage_error)
    }

    /// Reject payloads above the size limit
    pub fn check_size(&self, len: usize) -> Result<(), DomainError> {
        if len > self.max_bytes {
            return Err(DomainError::FileTooLarge {
                max_mb: self.max_mb(),
            });
        }
        Ok(())
    }

    /// Write a member avatar as `avatar<memberId>.<ext>`, replacing any file of that name
    #[instrument(skip(self, bytes), fields(len = bytes.len()))]
    pub async fn save_member_avatar(
        &self,
        member_id: i64,
        kind: ImageKind,
        bytes: &[u8],
    ) -> Result<StoredAvatar, DomainError> {
        self.check_size(bytes.len())?;
        let stored = StoredAvatar::new(member_file_name(member_id, kind));
        self.write(&stored.file_name, bytes).await?;
        Ok(stored)
    }

    /// Decode a `data:image/<type>;base64,<payload>` URI and store it as an application avatar
    #[instrument(skip(self, data_uri))]
    pub async fn save_data_uri(&self, data_uri: &str) -> Result<StoredAvatar, DomainError> {
        let (kind, bytes) = self.decode_data_uri(data_uri)?;
        let stored = StoredAvatar::new(format!(
            "{APPLICATION_DIR}/{}.{}",
            Uuid::new_v4(),
            kind.extension()
        ));
        self.write(&stored.file_name, &bytes).await?;
        Ok(stored)
    }

    /// Parse and size-check a data URI without touching the disk
    pub fn decode_data_uri(&self, data_uri: &str) -> Result<(ImageKind, Vec<u8>), DomainError> {
        let malformed = || DomainError::ValidationError("Avatar must be a base64 data URI".into());

        let rest = data_uri.trim().strip_prefix("data:").ok_or_else(malformed)?;
        let (header, payload) = rest.split_once(',').ok_or_else(malformed)?;
        let mime = header.strip_suffix(";base64").ok_or_else(malformed)?;
        let kind = ImageKind::from_mime(mime).ok_or(DomainError::UnsupportedImage)?;

        // base64 expands by 4/3; refuse oversized payloads before decoding
        if payload.len() / 4 * 3 > self.max_bytes + 3 {
            return Err(DomainError::FileTooLarge {
                max_mb: self.max_mb(),
            });
        }

        let bytes = STANDARD.decode(payload.trim()).map_err(|_| malformed())?;
        if bytes.is_empty() {
            return Err(malformed());
        }
        self.check_size(bytes.len())?;
        Ok((kind, bytes))
    }

    /// Copy a stored avatar to the member's deterministic file name
    #[instrument(skip(self))]
    pub async fn promote(&self, reference: &str, member_id: i64) -> Result<StoredAvatar, DomainError> {
        let source = self.resolve(reference)?;
        let kind = ImageKind::from_file_name(reference).ok_or(DomainError::UnsupportedImage)?;
        let stored = StoredAvatar::new(member_file_name(member_id, kind));

        tokio::fs::copy(&source, self.root.join(&stored.file_name))
            .await
            .map_err(storage_error)?;
        debug!(from = %reference, to = %stored.reference, "Avatar promoted");
        Ok(stored)
    }

    /// Delete the file behind a reference; a file that is already gone is not an error
    #[instrument(skip(self))]
    pub async fn remove(&self, reference: &str) -> Result<(), DomainError> {
        let path = self.resolve(reference)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(%reference, "Avatar file already absent");
                Ok(())
            }
            Err(e) => Err(storage_error(e)),
        }
    }

    /// Map a reference to a path inside the avatar directory
    ///
    /// Accepts `[img/]<file>` and `[img/]applications/<file>`; anything that could
    /// leave the directory is rejected.
    pub fn resolve(&self, reference: &str) -> Result<PathBuf, DomainError> {
        let relative = reference.strip_prefix(REFERENCE_PREFIX).unwrap_or(reference);
        let file = relative
            .strip_prefix(APPLICATION_DIR)
            .and_then(|rest| rest.strip_prefix('/'))
            .unwrap_or(relative);

        let valid = !file.is_empty()
            && !file.starts_with('.')
            && !file.contains(['/', '\\'])
            && !file.contains("..");
        if !valid {
            return Err(DomainError::ValidationError(format!(
                "Invalid avatar reference: {reference}"
            )));
        }
        Ok(self.root.join(relative))
    }

    /// Like `resolve`, but only for files a member may own: a top-level `avatar<id>.<ext>`
    ///
    /// Keeps application uploads out of member records, so deleting a member can never
    /// remove a file that an application still points at.
    pub fn resolve_member(&self, reference: &str) -> Result<PathBuf, DomainError> {
        let relative = reference.strip_prefix(REFERENCE_PREFIX).unwrap_or(reference);
        let owned = relative
            .strip_prefix("avatar")
            .and_then(|rest| rest.rsplit_once('.'))
            .is_some_and(|(id, ext)| {
                !id.is_empty()
                    && id.bytes().all(|b| b.is_ascii_digit())
                    && ImageKind::from_extension(ext).is_some()
            });
        if !owned {
            return Err(DomainError::ValidationError(format!(
                "Member avatar must be an uploaded avatar<id> image: {reference}"
            )));
        }
        self.resolve(reference)
    }

    async fn write(&self, file_name: &str, bytes: &[u8]) -> Result<(), DomainError> {
        let path = self.root.join(file_name);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(storage_error)?;
        }
        tokio::fs::write(&path, bytes).await.map_err(storage_error)
    }
}

fn member_file_name(member_id: i64, kind: ImageKind) -> String {
    format!("avatar{member_id}.{}", kind.extension())
}

fn storage_error(e: std::io::Error) -> DomainError {
    DomainError::StorageError(e.to_string())
}
