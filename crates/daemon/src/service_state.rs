use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;

use common::crypto::{KeyError, SecretKey};
use common::devices::DeviceRegistry;
use common::storage::{Folders, Settings, StorageError};

use crate::ServiceConfig;

/// Everything a request handler needs: the folder settings, the device
///  registry and the cookie signing key. Cloning is cheap and clones share
///  the same settings and registry.
#[derive(Clone)]
pub struct State {
    cookie_key: Key,
    settings: Settings,
    devices: DeviceRegistry,
}

impl State {
    pub fn from_config(config: &ServiceConfig) -> Result<Self, StateSetupError> {
        // 1. Setup secret key
        let secret_key = SecretKey::load_or_generate(&config.key_path)?;

        // 2. Setup folders
        let state = Self::new(secret_key, config.folders.clone())?;
        tracing::info!(
            upload_folder = %config.folders.upload_folder.display(),
            download_folder = %config.folders.download_folder.display(),
            "storage folders ready"
        );

        Ok(state)
    }

    /// Build state around an already loaded key, creating the folders
    pub fn new(secret_key: SecretKey, folders: Folders) -> Result<Self, StateSetupError> {
        let settings = Settings::new(folders)?;
        let cookie_key = Key::from(&secret_key.signing_material()[..]);

        Ok(Self {
            cookie_key,
            settings,
            devices: DeviceRegistry::new(),
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn devices(&self) -> &DeviceRegistry {
        &self.devices
    }
}

impl FromRef<State> for Key {
    fn from_ref(state: &State) -> Self {
        state.cookie_key.clone()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateSetupError {
    #[error("secret key setup error: {0}")]
    SecretKey(#[from] KeyError),
    #[error("storage setup error: {0}")]
    Storage(#[from] StorageError),
}
