#[cfg(not(target_arch = "wasm32"))]
use std::path::Path;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::storage::encryption::KdfParams;

pub const DEFAULT_STORAGE_KEY: &str = "finance-portfolio";

/// Library configuration. Every field has a default, so a partial JSON file
/// (or none at all) is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Key under which the portfolio document is stored.
    pub storage_key: String,

    /// Directory for the file-backed store. `None` means the caller supplies
    /// its own store.
    pub data_dir: Option<PathBuf>,

    /// Display symbol used by `format_currency`.
    pub currency_symbol: String,

    /// Argon2id cost for encrypted backups.
    pub backup_kdf: KdfParams,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            data_dir: None,
            currency_symbol: "₹".to_string(),
            backup_kdf: KdfParams::default(),
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let settings: Settings = serde_json::from_str(json)
            .map_err(|e| CoreError::Config(format!("Failed to parse settings: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            CoreError::Config(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::from_json(&raw)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.storage_key.trim().is_empty() {
            return Err(CoreError::Config("storageKey must not be empty".into()));
        }
        self.backup_kdf.validate()
    }

    /// Format an amount with Indian digit grouping (12,34,567).
    pub fn format_currency(&self, amount: f64) -> String {
        format!("{}{}", self.currency_symbol, group_indian(amount.round() as i64))
    }
}

fn group_indian(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let sign = if value < 0 { "-" } else { "" };
    if digits.len() <= 3 {
        return format!("{sign}{digits}");
    }

    let (head, last3) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();

    format!("{sign}{},{last3}", groups.join(","))
}
