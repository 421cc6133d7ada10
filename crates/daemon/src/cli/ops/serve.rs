use std::convert::Infallible;
use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Args;

use common::storage::{Folders, DEFAULT_DOWNLOAD_FOLDER, DEFAULT_UPLOAD_FOLDER};
use zap_daemon::service_config::DEFAULT_LISTEN_ADDR;
use zap_daemon::{spawn_service, ServiceConfig};

/// Folder overrides shared by `serve` and `init`
#[derive(Args, Debug, Clone)]
pub struct FolderArgs {
    /// Folder uploads are written to and the file list is read from
    #[arg(long, env = "ZAP_UPLOAD_FOLDER", default_value = DEFAULT_UPLOAD_FOLDER)]
    pub upload_folder: PathBuf,

    /// Secondary folder, created at startup
    #[arg(long, env = "ZAP_DOWNLOAD_FOLDER", default_value = DEFAULT_DOWNLOAD_FOLDER)]
    pub download_folder: PathBuf,
}

impl FolderArgs {
    pub fn to_folders(&self) -> Folders {
        Folders::new(&self.upload_folder, &self.download_folder)
    }
}

#[derive(Args, Debug, Clone)]
pub struct Serve {
    /// Address to bind the HTTP server to
    #[arg(long, env = "ZAP_LISTEN_ADDR", default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    #[command(flatten)]
    pub folders: FolderArgs,

    /// Directory for log files (logs to stdout only if not set)
    #[arg(long, env = "ZAP_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Serve {
    type Error = Infallible;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let config = ServiceConfig {
            listen_addr: self.listen_addr,
            folders: self.folders.to_folders(),
            key_path: ctx.key_path.clone(),
            log_level: tracing::Level::INFO,
            log_dir: self.log_dir.clone(),
        };

        // startup failures exit the process with their own status code
        spawn_service(&config).await;
        Ok("service stopped".to_string())
    }
}
