use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ItemError;

/// A stored record: a server-assigned key and a client-supplied value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub key: String,
    pub value: String,
}

/// Internal HashMap type.
pub type InnerMap = HashMap<String, Item>;

/// Shared item store used across the app.
///
/// Cloning the handle is cheap; all clones see the same map. Callers only
/// ever receive copies of stored items.
#[derive(Clone, Default)]
pub struct ItemStore {
    map: Arc<RwLock<InnerMap>>,
    keys: Arc<KeyGenerator>,
}

impl ItemStore {
    /// Create a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored item, in no particular order.
    pub fn list(&self) -> Result<Vec<Item>, ItemError> {
        let map = self.map.read().map_err(|_| ItemError::LockPoisoned)?;
        Ok(map.values().cloned().collect())
    }

    /// Exact-match lookup.
    pub fn get(&self, key: &str) -> Result<Item, ItemError> {
        let map = self.map.read().map_err(|_| ItemError::LockPoisoned)?;
        map.get(key).cloned().ok_or(ItemError::NotFound)
    }

    /// Insert `item` under `item.key`, replacing any previous entry.
    pub fn put(&self, item: Item) -> Result<(), ItemError> {
        let mut map = self.map.write().map_err(|_| ItemError::LockPoisoned)?;
        map.insert(item.key.clone(), item);
        Ok(())
    }

    /// Number of stored items.
    pub fn len(&self) -> Result<usize, ItemError> {
        let map = self.map.read().map_err(|_| ItemError::LockPoisoned)?;
        Ok(map.len())
    }

    pub fn is_empty(&self) -> Result<bool, ItemError> {
        Ok(self.len()? == 0)
    }

    /// Next unused item key.
    pub fn next_key(&self) -> String {
        self.keys.next().to_string()
    }
}

/// Issues keys as nanoseconds since the Unix epoch.
///
/// Values are strictly increasing: if the clock has not advanced past the
/// last issued value, the previous value plus one is used instead.
#[derive(Debug, Default)]
pub struct KeyGenerator {
    last: AtomicU64,
}

impl KeyGenerator {
    pub fn next(&self) -> u64 {
        let now = Utc::now()
            .timestamp_nanos_opt()
            .and_then(|n| u64::try_from(n).ok())
            .unwrap_or(0);

        let mut last = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = if now > last { now } else { last + 1 };
            match self.last.compare_exchange_weak(
                last,
                candidate,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => return candidate,
                Err(current) => last = current,
            }
        }
    }
}
