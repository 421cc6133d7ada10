use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use super::StorageError;

/// Accept `name` only if it names an entry directly inside a folder:
///  exactly one normal path component, so `..`, `.` and separators are refused.
pub fn validate_filename(name: &str) -> Result<&str, StorageError> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) if !name.contains('/') && !name.contains('\\') => {
            Ok(name)
        }
        _ => Err(StorageError::InvalidFilename(name.to_string())),
    }
}

/// An opened file ready to be streamed to a client
#[derive(Debug)]
pub struct Download {
    pub file: tokio::fs::File,
    /// size in bytes at the time the file was opened
    pub len: u64,
}

/// Download, list and delete operations confined to a single folder
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of `filename` inside the folder, after validation
    pub fn path_of(&self, filename: &str) -> Result<PathBuf, StorageError> {
        Ok(self.root.join(validate_filename(filename)?))
    }

    /// Open `filename` for reading. Only regular files are served; the
    ///  caller streams the contents instead of buffering them.
    pub async fn download(&self, filename: &str) -> Result<Download, StorageError> {
        let path = self.path_of(filename)?;

        let file = tokio::fs::File::open(&path)
            .await
            .map_err(|e| not_found_or_io(e, filename))?;
        let meta = file.metadata().await?;
        if !meta.is_file() {
            return Err(StorageError::NotFound(filename.to_string()));
        }

        Ok(Download {
            file,
            len: meta.len(),
        })
    }

    /// Names of every entry in the folder, in the order the OS returns them
    pub async fn list_files(&self) -> Result<Vec<String>, StorageError> {
        let mut entries = tokio::fs::read_dir(&self.root).await?;
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        Ok(names)
    }

    /// Remove `filename` from the folder
    pub async fn delete_file(&self, filename: &str) -> Result<(), StorageError> {
        let path = self.path_of(filename)?;
        tokio::fs::remove_file(&path)
            .await
            .map_err(|e| not_found_or_io(e, filename))?;
        tracing::info!(path = %path.display(), "deleted file");
        Ok(())
    }
}

fn not_found_or_io(err: std::io::Error, filename: &str) -> StorageError {
    if err.kind() == ErrorKind::NotFound {
        StorageError::NotFound(filename.to_string())
    } else {
        StorageError::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_filename() {
        assert!(validate_filename("notes.txt").is_ok());
        assert!(validate_filename("photo 1.jpg").is_ok());
        assert!(validate_filename(".hidden").is_ok());

        for bad in ["", ".", "..", "../etc/passwd", "a/b.txt", "/abs", "dir\\file"] {
            assert!(validate_filename(bad).is_err(), "{bad:?} should be refused");
        }
    }

    #[tokio::test]
    async fn test_download_directory_is_not_found() {
        let temp = tempfile::TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("sub")).unwrap();
        let store = FileStore::new(temp.path());

        let err = store.download("sub").await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_download_reports_length() {
        let temp = tempfile::TempDir::new().unwrap();
        std::fs::write(temp.path().join("clip.txt"), b"twelve bytes").unwrap();
        let store = FileStore::new(temp.path());

        let download = store.download("clip.txt").await.unwrap();
        assert_eq!(download.len, 12);
    }
}
