use std::fmt;
use std::path::Path;

use bytes::Bytes;

mod sniff;

pub use sniff::{is_allowed, sniff_mime, ALLOWED_MIME_PREFIXES, SNIFF_LEN};

use crate::storage::validate_filename;

/// Maximum number of files accepted in a single upload request
pub const MAX_FILES_PER_UPLOAD: usize = 50;

/// A file received from a client, fully buffered
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub data: Bytes,
}

impl UploadedFile {
    pub fn new(filename: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            data: data.into(),
        }
    }
}

/// Why a file (or a whole batch) was not stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    TooManyFiles { count: usize },
    MissingFilename,
    UnsupportedType { filename: String, mime: String },
    WriteFailed { filename: String, reason: String },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::TooManyFiles { count } => write!(
                f,
                "You can upload at most {} files at a time ({} sent)",
                MAX_FILES_PER_UPLOAD, count
            ),
            Rejection::MissingFilename => write!(f, "One of the files has no name"),
            Rejection::UnsupportedType { filename, mime } => {
                write!(f, "Rejected {}: unsupported file type ({})", filename, mime)
            }
            Rejection::WriteFailed { filename, reason } => {
                write!(f, "Failed to save {}: {}", filename, reason)
            }
        }
    }
}

/// Result of processing one upload batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadOutcome {
    /// Names of the files written, in request order
    pub accepted: Vec<String>,
    pub rejections: Vec<Rejection>,
}

impl UploadOutcome {
    pub fn accepted_count(&self) -> usize {
        self.accepted.len()
    }
}

/// Store every acceptable file of `files` in `upload_folder`.
///
/// Files are judged independently: a rejected file never prevents its
///  siblings from being written, and files already written stay written.
///  A batch larger than [`MAX_FILES_PER_UPLOAD`] is refused as a whole.
pub async fn handle_upload(upload_folder: &Path, files: Vec<UploadedFile>) -> UploadOutcome {
    let mut outcome = UploadOutcome::default();

    if files.len() > MAX_FILES_PER_UPLOAD {
        tracing::warn!(count = files.len(), "upload batch too large");
        outcome
            .rejections
            .push(Rejection::TooManyFiles { count: files.len() });
        return outcome;
    }

    for file in files {
        let Some(filename) = base_name(&file.filename) else {
            outcome.rejections.push(Rejection::MissingFilename);
            continue;
        };

        let mime = sniff_mime(&file.data);
        if !is_allowed(mime) {
            tracing::info!(%filename, %mime, "rejected upload");
            outcome.rejections.push(Rejection::UnsupportedType {
                filename: filename.to_string(),
                mime: mime.to_string(),
            });
            continue;
        }

        let path = upload_folder.join(filename);
        match tokio::fs::write(&path, &file.data).await {
            Ok(()) => {
                tracing::info!(
                    path = %path.display(),
                    size = file.data.len(),
                    %mime,
                    "stored upload"
                );
                outcome.accepted.push(filename.to_string());
            }
            Err(e) => {
                tracing::error!(path = %path.display(), "failed to store upload: {}", e);
                outcome.rejections.push(Rejection::WriteFailed {
                    filename: filename.to_string(),
                    reason: e.to_string(),
                });
            }
        }
    }

    outcome
}

// Browsers may send a relative path for folder uploads; only the last
// component names the stored file.
fn base_name(filename: &str) -> Option<&str> {
    let last = filename.rsplit(['/', '\\']).next().unwrap_or_default();
    validate_filename(last).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("notes.txt"), Some("notes.txt"));
        assert_eq!(base_name("photos/2024/cat.png"), Some("cat.png"));
        assert_eq!(base_name("C:\\Users\\me\\doc.pdf"), Some("doc.pdf"));
        assert_eq!(base_name(""), None);
        assert_eq!(base_name(".."), None);
        assert_eq!(base_name("dir/"), None);
    }

    #[test]
    fn test_rejection_messages() {
        let msg = Rejection::UnsupportedType {
            filename: "a.zip".into(),
            mime: "application/zip".into(),
        }
        .to_string();
        assert!(msg.contains("a.zip"));
        assert!(msg.contains("application/zip"));
        assert!(Rejection::TooManyFiles { count: 51 }
            .to_string()
            .contains("50"));
    }
}
