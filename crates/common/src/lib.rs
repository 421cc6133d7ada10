/**
 * Persisted secret key used to sign
 *  session-carried data (flash messages).
 */
pub mod crypto;
/**
 * In-memory registry of client addresses
 *  that have visited the home page.
 */
pub mod devices;
/**
 * Aggregate counts for the reports page.
 */
pub mod report;
/**
 * The upload and download folders, and the
 *  file operations confined to the upload folder.
 */
pub mod storage;
/**
 * Batch upload handling: limits, content
 *  sniffing and persistence of accepted files.
 */
pub mod upload;
/**
 * Helper for setting build version information
 *  at compile time.
 */
pub mod version;

pub mod prelude {
    pub use crate::crypto::{KeyError, SecretKey};
    pub use crate::devices::DeviceRegistry;
    pub use crate::report::Report;
    pub use crate::storage::{FileStore, Folders, Settings, SettingsUpdate, StorageError};
    pub use crate::upload::{handle_upload, Rejection, UploadOutcome, UploadedFile};
    pub use crate::version::build_info;
}
