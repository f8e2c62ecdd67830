use std::collections::HashMap;

use super::KeyValueStore;
use crate::error::StoreError;

/// In-process store. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_delete() {
        let mut store = MemoryStore::new();
        assert!(store.get("x").unwrap().is_none());
        store.set("x", "1").unwrap();
        store.set("x", "2").unwrap();
        assert_eq!(store.get("x").unwrap().as_deref(), Some("2"));
        assert_eq!(store.len(), 1);
        store.delete("x").unwrap();
        assert!(store.is_empty());
        // Deleting a missing key is fine.
        store.delete("x").unwrap();
    }
}
