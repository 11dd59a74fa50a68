//! Directory-backed storage backend.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DashError, Result};

use super::Storage;

/// On-disk record for one key.
#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    key: String,
    value: String,
}

/// Storage keeping one JSON file per key under a root directory.
///
/// File names are derived from a hash of the key so arbitrary table
/// identifiers map to safe paths; the original key is kept inside the file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Create a storage rooted at `root`. The directory is created lazily.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Get the storage root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the file path holding `key`.
    pub fn item_path(&self, key: &str) -> PathBuf {
        let hash = Sha256::digest(key.as_bytes());
        let hash_str = hex::encode(&hash[..16]);
        self.root.join(format!("{}.json", hash_str))
    }

    fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.root)?;
        Ok(())
    }

    fn read_envelope(path: &Path) -> Result<Option<Envelope>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)?;
        match serde_json::from_str(&content) {
            Ok(envelope) => Ok(Some(envelope)),
            Err(e) => {
                tracing::warn!("Skipping unreadable storage file {:?}: {}", path, e);
                Ok(None)
            }
        }
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let envelope = Self::read_envelope(&self.item_path(key))?;
        Ok(envelope.filter(|e| e.key == key).map(|e| e.value))
    }

    /// Write using the write-to-temp-then-rename pattern so a crash never
    /// leaves a partially written item.
    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.ensure_dir()?;

        let path = self.item_path(key);
        let envelope = Envelope {
            key: key.to_string(),
            value: value.to_string(),
        };
        let content = serde_json::to_string(&envelope).map_err(|e| DashError::Serialization {
            key: key.to_string(),
            message: e.to_string(),
        })?;

        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, &path)?;

        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let path = self.item_path(key);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(envelope) = Self::read_envelope(&path)? {
                keys.push(envelope.key);
            }
        }
        keys.sort();
        Ok(keys)
    }
}
