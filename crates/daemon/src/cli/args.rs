pub use clap::Parser;

use std::path::PathBuf;
use url::Url;

use zap_daemon::service_config::DEFAULT_KEY_PATH;

#[derive(Parser, Debug)]
#[command(name = "zap")]
#[command(about = "Share files with devices on your local network")]
pub struct Args {
    /// Base URL of a running service, used by `health`
    #[arg(long, global = true, env = "ZAP_REMOTE", default_value = "http://localhost:5000")]
    pub remote: Url,

    /// Path to the secret key file, created on first use
    #[arg(long, global = true, env = "ZAP_KEY_PATH", default_value = DEFAULT_KEY_PATH)]
    pub key_path: PathBuf,

    #[command(subcommand)]
    pub command: crate::Command,
}
