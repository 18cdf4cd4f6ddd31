use crate::errors::CoreError;
use crate::models::portfolio::Portfolio;

use super::encryption::{self, KdfParams, NONCE_LEN, SALT_LEN};
use super::format::{self, BackupHeader};
use super::store::KeyValueStore;

/// Load/save of the portfolio document, plus encrypted backup export.
pub struct StorageManager;

impl StorageManager {
    /// Read and parse the document stored under `key`.
    ///
    /// `Ok(None)` means nothing is stored yet.
    pub fn load<S: KeyValueStore + ?Sized>(
        store: &S,
        key: &str,
    ) -> Result<Option<Portfolio>, CoreError> {
        let Some(raw) = store.get(key)? else {
            return Ok(None);
        };
        let portfolio = serde_json::from_str(&raw)
            .map_err(|e| CoreError::Deserialization(format!("Failed to parse portfolio: {e}")))?;
        Ok(Some(portfolio))
    }

    /// Like [`load`](Self::load), but any failure is logged and reported as
    /// absent data.
    pub fn load_or_absent<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Option<Portfolio> {
        match Self::load(store, key) {
            Ok(portfolio) => portfolio,
            Err(e) => {
                log::warn!("Ignoring unreadable portfolio under {key:?}: {e}");
                None
            }
        }
    }

    /// Serialize and store the document. A document holding NaN or infinite
    /// numbers is refused and the stored copy is left untouched.
    pub fn save<S: KeyValueStore + ?Sized>(
        store: &mut S,
        key: &str,
        portfolio: &Portfolio,
    ) -> Result<(), CoreError> {
        if let Some(path) = portfolio.first_non_finite() {
            return Err(CoreError::Serialization(format!(
                "Refusing to store non-finite number in {path}"
            )));
        }
        let json = serde_json::to_string(portfolio)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize portfolio: {e}")))?;
        store.set(key, &json)
    }

    /// Encrypt a portfolio into a self-describing backup container.
    ///
    /// Flow: Portfolio → JSON → AES-256-GCM(Argon2id(password)) → FCBK bytes
    pub fn export_backup(
        portfolio: &Portfolio,
        password: &str,
        kdf: &KdfParams,
    ) -> Result<Vec<u8>, CoreError> {
        kdf.validate()?;
        let plaintext = serde_json::to_vec(portfolio)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize portfolio: {e}")))?;

        let salt = encryption::random_bytes::<SALT_LEN>()?;
        let nonce = encryption::random_bytes::<NONCE_LEN>()?;
        let key = encryption::derive_key(password, &salt, kdf)?;
        let ciphertext = encryption::seal(&plaintext, &key, &nonce)?;

        let header = BackupHeader {
            version: format::CURRENT_VERSION,
            kdf: *kdf,
            salt,
            nonce,
        };
        Ok(format::encode(&header, &ciphertext))
    }

    /// Decrypt a backup produced by [`export_backup`](Self::export_backup).
    pub fn import_backup(data: &[u8], password: &str) -> Result<Portfolio, CoreError> {
        let (header, ciphertext) = format::decode(data)?;
        let key = encryption::derive_key(password, &header.salt, &header.kdf)?;
        let plaintext = encryption::open(ciphertext, &key, &header.nonce)?;
        serde_json::from_slice(&plaintext)
            .map_err(|e| CoreError::Deserialization(format!("Failed to parse backup: {e}")))
    }
}
