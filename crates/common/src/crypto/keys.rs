use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use sha2::{Digest, Sha512};

/// Number of random bytes behind a freshly generated key
pub const SECRET_KEY_SIZE: usize = 32;
/// Size of the derived signing key material
pub const SIGNING_KEY_SIZE: usize = 64;

/// Errors that can occur while loading or persisting the key file
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("failed to read key file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write key file {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// The process-wide secret key.
///
/// Freshly generated keys are 32 random bytes encoded as 64 hex characters.
/// A key read back from disk is kept exactly as stored, so an operator-provided
/// file is honoured even if it is not in that format.
///
/// # Examples
///
/// ```ignore
/// let key = SecretKey::load_or_generate(Path::new("key.txt"))?;
/// let material = key.signing_material();
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey(String);

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SecretKey").field(&"<redacted>").finish()
    }
}

impl SecretKey {
    /// Generate a new random key
    pub fn generate() -> Self {
        let bytes: [u8; SECRET_KEY_SIZE] = rand::random();
        SecretKey(hex::encode(bytes))
    }

    /// Read the key stored at `path`, or generate and persist one if the file
    /// does not exist yet.
    pub fn load_or_generate(path: &Path) -> Result<Self, KeyError> {
        match fs::read_to_string(path) {
            Ok(contents) => {
                tracing::debug!(path = %path.display(), "loaded existing secret key");
                Ok(SecretKey(contents))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let key = Self::generate();
                fs::write(path, key.as_str()).map_err(|source| KeyError::Write {
                    path: path.display().to_string(),
                    source,
                })?;
                tracing::info!(path = %path.display(), "generated new secret key");
                Ok(key)
            }
            Err(source) => Err(KeyError::Read {
                path: path.display().to_string(),
                source,
            }),
        }
    }

    /// The key exactly as persisted
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Fixed-size key material for signing cookies.
    ///
    /// Stored keys of any length map onto 64 bytes by hashing with SHA-512.
    pub fn signing_material(&self) -> [u8; SIGNING_KEY_SIZE] {
        let digest = Sha512::digest(self.0.as_bytes());
        let mut out = [0u8; SIGNING_KEY_SIZE];
        out.copy_from_slice(&digest);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_key_is_hex() {
        let key = SecretKey::generate();
        assert_eq!(key.as_str().len(), SECRET_KEY_SIZE * 2);
        assert!(key.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_generated_keys_differ() {
        assert_ne!(SecretKey::generate(), SecretKey::generate());
    }

    #[test]
    fn test_signing_material_is_stable() {
        let key = SecretKey("short".to_string());
        assert_eq!(key.signing_material(), key.signing_material());
        assert_ne!(
            key.signing_material(),
            SecretKey("other".to_string()).signing_material()
        );
    }

    #[test]
    fn test_debug_redacts() {
        let key = SecretKey::generate();
        let printed = format!("{:?}", key);
        assert!(!printed.contains(key.as_str()));
    }
}
