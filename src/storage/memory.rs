//! In-process storage backend.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use crate::error::{DashError, Result};

use super::Storage;

/// Storage held in memory for the lifetime of the process.
///
/// A quota (total bytes of keys plus values) and an availability switch let
/// tests reproduce the failures a browser's storage can raise.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<BTreeMap<String, String>>,
    quota: Option<usize>,
    unavailable: AtomicBool,
}

impl MemoryStorage {
    /// Create an empty storage with no quota.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty storage limited to `bytes` of keys and values.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            quota: Some(bytes),
            ..Default::default()
        }
    }

    /// Make every subsequent call fail (or succeed again).
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Check if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Bytes currently used by keys and values.
    pub fn used_bytes(&self) -> usize {
        Self::usage(&self.lock())
    }

    fn usage(items: &BTreeMap<String, String>) -> usize {
        items.iter().map(|(k, v)| k.len() + v.len()).sum()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        // A panic while holding the lock cannot leave the map half-updated.
        self.items.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn check_available(&self, key: &str) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DashError::StorageUnavailable {
                key: key.to_string(),
                message: "storage is disabled".to_string(),
            });
        }
        Ok(())
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.check_available(key)?;
        Ok(self.lock().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.check_available(key)?;
        let mut items = self.lock();

        if let Some(quota) = self.quota {
            let current = Self::usage(&items);
            let replaced = items.get(key).map(|v| key.len() + v.len()).unwrap_or(0);
            let needed = key.len() + value.len();
            let available = quota.saturating_sub(current - replaced);
            if needed > available {
                return Err(DashError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    available,
                });
            }
        }

        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.check_available(key)?;
        self.lock().remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        self.check_available("*")?;
        Ok(self.lock().keys().cloned().collect())
    }
}
