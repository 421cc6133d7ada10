use serde::Serialize;

use crate::devices::DeviceRegistry;
use crate::storage::{FileStore, StorageError};

/// Aggregate counts shown on the reports page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Report {
    pub device_count: usize,
    pub file_count: usize,
}

impl Report {
    /// Recompute the counts from the live registry and folder listing
    pub async fn collect(
        devices: &DeviceRegistry,
        files: &FileStore,
    ) -> Result<Self, StorageError> {
        let file_count = files.list_files().await?.len();
        Ok(Self {
            device_count: devices.len(),
            file_count,
        })
    }
}
