use clap::Args;

use common::crypto::{KeyError, SecretKey};
use common::storage::StorageError;

use super::serve::FolderArgs;

#[derive(Args, Debug, Clone)]
pub struct Init {
    #[command(flatten)]
    pub folders: FolderArgs,
}

#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("init failed: {0}")]
    Key(#[from] KeyError),
    #[error("init failed: {0}")]
    Storage(#[from] StorageError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Init {
    type Error = InitError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        SecretKey::load_or_generate(&ctx.key_path)?;

        let folders = self.folders.to_folders();
        folders.ensure_exist()?;

        Ok(format!(
            "Initialized zap\n\
             - Key: {}\n\
             - Upload folder: {}\n\
             - Download folder: {}",
            ctx.key_path.display(),
            folders.upload_folder.display(),
            folders.download_folder.display(),
        ))
    }
}
