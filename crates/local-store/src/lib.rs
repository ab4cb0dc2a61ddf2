//! Best-effort persisted local state.
//!
//! Two independent JSON blobs per principal: the favorited photo ids, and
//! the known album summaries (with member ids where the client has seen
//! them). Read once at startup for offline bootstrap, written after every
//! successful local state change. Writes are last-write-wins and not
//! transactional — a lost write just means a slightly stale bootstrap on the
//! next launch, always reconciled by the first resync. Never the source of
//! truth.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use picfolio_core::AlbumSummary;

const FAVORITES_FILE: &str = "favorites.json";
const ALBUMS_FILE: &str = "albums.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not determine a data directory for this platform")]
    DataDirUnavailable,
    #[error("corrupt store file {path}: {source}")]
    Corrupt {
        path: String,
        source: serde_json::Error,
    },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Persisted shape of one album: the summary fields plus the member ids the
/// client last saw for it. Members are optional — a summary fetched from the
/// listing has no membership information yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedAlbum {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_photo_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default)]
    pub member_photo_ids: Vec<String>,
}

impl PersistedAlbum {
    pub fn from_summary(summary: &AlbumSummary, member_photo_ids: Vec<String>) -> Self {
        Self {
            id: summary.id.clone(),
            title: summary.title.clone(),
            cover_photo_id: summary.cover_photo_id.clone(),
            start_date: summary.start_date.clone(),
            member_photo_ids,
        }
    }

    pub fn into_summary(self) -> AlbumSummary {
        AlbumSummary {
            id: self.id,
            title: self.title,
            cover_photo_id: self.cover_photo_id,
            start_date: self.start_date,
        }
    }
}

/// File-backed store rooted at a data directory, one subdirectory per
/// principal so a principal switch can never read another user's blobs.
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store rooted at the platform data directory for the application.
    pub fn open_default() -> Result<Self, StoreError> {
        let dirs =
            ProjectDirs::from("io", "picfolio", "picfolio").ok_or(StoreError::DataDirUnavailable)?;
        Ok(Self::new(dirs.data_dir()))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn blob_path(&self, principal: &str, file: &str) -> PathBuf {
        self.root.join(principal).join(file)
    }

    pub fn load_favorites(&self, principal: &str) -> Result<Vec<String>, StoreError> {
        self.load_blob(&self.blob_path(principal, FAVORITES_FILE))
    }

    pub fn save_favorites(&self, principal: &str, ids: &[String]) -> Result<(), StoreError> {
        self.save_blob(&self.blob_path(principal, FAVORITES_FILE), &ids)
    }

    pub fn load_albums(&self, principal: &str) -> Result<Vec<PersistedAlbum>, StoreError> {
        self.load_blob(&self.blob_path(principal, ALBUMS_FILE))
    }

    pub fn save_albums(
        &self,
        principal: &str,
        albums: &[PersistedAlbum],
    ) -> Result<(), StoreError> {
        self.save_blob(&self.blob_path(principal, ALBUMS_FILE), &albums)
    }

    fn load_blob<T: for<'de> Deserialize<'de> + Default>(
        &self,
        path: &Path,
    ) -> Result<T, StoreError> {
        if !path.exists() {
            return Ok(T::default());
        }
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
            path: path.display().to_string(),
            source,
        })
    }

    // Write via a sibling temp file and rename, so a crash mid-write leaves
    // the previous blob intact.
    fn save_blob<T: Serialize>(&self, path: &Path, value: &T) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let tmp = path.with_extension("json.tmp");
        let content = serde_json::to_string(value).map_err(|source| StoreError::Corrupt {
            path: path.display().to_string(),
            source,
        })?;
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, path)?;
        Ok(())
    }
}
