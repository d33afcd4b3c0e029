//! Process-local key-value store.

use super::{KeyValueStore, KvResult};
use std::collections::HashMap;

/// `HashMap`-backed store; contents live as long as the value.
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    entries: HashMap<String, String>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> KvResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> KvResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryKeyValueStore;
    use crate::kv::KeyValueStore;

    #[test]
    fn get_returns_none_for_unknown_key() {
        let store = MemoryKeyValueStore::new();
        assert_eq!(store.get("missing").expect("get should succeed"), None);
        assert!(store.is_empty());
    }

    #[test]
    fn set_overwrites_previous_value() {
        let mut store = MemoryKeyValueStore::new();
        store.set("k", "first").expect("first set");
        store.set("k", "second").expect("second set");

        assert_eq!(store.get("k").expect("get").as_deref(), Some("second"));
        assert_eq!(store.len(), 1);
    }
}
