use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

mod files;

pub use files::{validate_filename, Download, FileStore};

/// Default folder uploads are written to and downloads are served from
pub const DEFAULT_UPLOAD_FOLDER: &str = "/sdcard/Upload";
/// Default download folder. The trailing space is part of the historical
///  default and is kept as-is.
pub const DEFAULT_DOWNLOAD_FOLDER: &str = "/sdcard/Download ";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("file not found: {0}")]
    NotFound(String),
    #[error("invalid filename: {0:?}")]
    InvalidFilename(String),
    #[error("failed to create folder {path}: {source}")]
    CreateFolder {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl StorageError {
    /// True for errors the caller should report as "not found"
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StorageError::NotFound(_) | StorageError::InvalidFilename(_)
        )
    }
}

/// The two configured storage locations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folders {
    pub upload_folder: PathBuf,
    pub download_folder: PathBuf,
}

impl Default for Folders {
    fn default() -> Self {
        Self {
            upload_folder: PathBuf::from(DEFAULT_UPLOAD_FOLDER),
            download_folder: PathBuf::from(DEFAULT_DOWNLOAD_FOLDER),
        }
    }
}

impl Folders {
    pub fn new(upload_folder: impl Into<PathBuf>, download_folder: impl Into<PathBuf>) -> Self {
        Self {
            upload_folder: upload_folder.into(),
            download_folder: download_folder.into(),
        }
    }

    /// Create both folders if they are missing
    pub fn ensure_exist(&self) -> Result<(), StorageError> {
        create_folder(&self.upload_folder)?;
        create_folder(&self.download_folder)?;
        Ok(())
    }
}

fn create_folder(path: &Path) -> Result<(), StorageError> {
    std::fs::create_dir_all(path).map_err(|source| StorageError::CreateFolder {
        path: path.display().to_string(),
        source,
    })
}

/// Requested folder changes. Empty or missing values leave the
///  corresponding folder unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsUpdate {
    #[serde(default)]
    pub upload_folder: Option<String>,
    #[serde(default)]
    pub download_folder: Option<String>,
}

/// Runtime folder configuration shared by every request.
///
/// Changes live only as long as the process; nothing is written back.
#[derive(Debug, Clone)]
pub struct Settings {
    folders: Arc<RwLock<Folders>>,
}

impl Settings {
    /// Wrap `folders`, creating them on disk first
    pub fn new(folders: Folders) -> Result<Self, StorageError> {
        folders.ensure_exist()?;
        Ok(Self {
            folders: Arc::new(RwLock::new(folders)),
        })
    }

    pub fn folders(&self) -> Folders {
        self.folders.read().clone()
    }

    pub fn upload_folder(&self) -> PathBuf {
        self.folders.read().upload_folder.clone()
    }

    pub fn download_folder(&self) -> PathBuf {
        self.folders.read().download_folder.clone()
    }

    /// File operations against the current upload folder
    pub fn file_store(&self) -> FileStore {
        FileStore::new(self.upload_folder())
    }

    /// Apply `update`, creating each newly configured folder before it is
    ///  swapped in. A folder that cannot be created is not applied.
    pub async fn update(&self, update: SettingsUpdate) -> Result<Folders, StorageError> {
        if let Some(path) = non_empty(update.upload_folder) {
            create_folder_async(&path).await?;
            tracing::info!(path = %path.display(), "upload folder changed");
            self.folders.write().upload_folder = path;
        }

        if let Some(path) = non_empty(update.download_folder) {
            create_folder_async(&path).await?;
            tracing::info!(path = %path.display(), "download folder changed");
            self.folders.write().download_folder = path;
        }

        Ok(self.folders())
    }
}

fn non_empty(value: Option<String>) -> Option<PathBuf> {
    value.filter(|v| !v.is_empty()).map(PathBuf::from)
}

async fn create_folder_async(path: &Path) -> Result<(), StorageError> {
    tokio::fs::create_dir_all(path)
        .await
        .map_err(|source| StorageError::CreateFolder {
            path: path.display().to_string(),
            source,
        })
}
