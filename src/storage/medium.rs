use std::{
    collections::HashMap,
    sync::{PoisonError, RwLock},
};

use anyhow::{anyhow, bail, Result};

use crate::db::Database;

/// A string key-value slot store with local-storage semantics.
///
/// Every call may fail (storage disabled, quota exceeded, I/O error). Callers
/// above this trait decide how to degrade.
pub trait StorageMedium: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&self, key: &str) -> Result<()>;
}

impl StorageMedium for Database {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.get_value(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.set_value(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.delete_value(key)
    }
}

/// Process-local medium. Can be capped to a byte quota (keys plus values) or
/// made unavailable outright to exercise the failure paths.
#[derive(Default)]
pub struct MemoryMedium {
    slots: RwLock<HashMap<String, String>>,
    quota_bytes: Option<usize>,
    unavailable: bool,
}

impl MemoryMedium {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            quota_bytes: Some(quota_bytes),
            ..Self::default()
        }
    }

    /// A medium that rejects every call, like storage disabled by the user.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    fn ensure_available(&self) -> Result<()> {
        if self.unavailable {
            bail!("storage is disabled");
        }
        Ok(())
    }
}

impl StorageMedium for MemoryMedium {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.ensure_available()?;
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        Ok(slots.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.ensure_available()?;
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);

        if let Some(quota) = self.quota_bytes {
            let others: usize = slots
                .iter()
                .filter(|(existing, _)| existing.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = others + key.len() + value.len();
            if needed > quota {
                return Err(anyhow!(
                    "quota exceeded: {needed} bytes requested, {quota} allowed"
                ));
            }
        }

        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.ensure_available()?;
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        slots.remove(key);
        Ok(())
    }
}
