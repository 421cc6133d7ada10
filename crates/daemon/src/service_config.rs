use std::net::SocketAddr;
use std::path::PathBuf;

use common::storage::Folders;

/// Address the service binds to unless told otherwise: every interface, port 5000
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:5000";
/// Key file location, relative to the working directory
pub const DEFAULT_KEY_PATH: &str = "key.txt";

#[derive(Debug, Clone)]
pub struct Config {
    // http server configuration
    /// address the HTML server listens on
    pub listen_addr: SocketAddr,

    // storage configuration
    /// initial upload and download folders,
    ///  changes made at runtime are not written back
    pub folders: Folders,
    /// on system file path to our secret,
    ///  generated on first start if missing
    pub key_path: PathBuf,

    // logging
    pub log_level: tracing::Level,
    /// Directory for log files (optional, logs to stdout only if not set)
    pub log_dir: Option<PathBuf>,
}
