//! In-memory throttle store.
//!
//! A single `Mutex<HashMap>` guards every key. Each call holds the lock for
//! one map operation, which keeps contention low enough for the hot path.
//! Not shared across processes; multi-server deployments need a store with
//! an equivalent atomic primitive.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::ports::ThrottleStore;

/// Process-local `ThrottleStore` for windows or quotas.
#[derive(Debug)]
pub struct InMemoryThrottleStore<V> {
    entries: Mutex<HashMap<String, V>>,
}

impl<V> InMemoryThrottleStore<V> {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, V>> {
        // `update` only writes after its closure returns, so a poisoned lock
        // still guards a consistent map.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<V> Default for InMemoryThrottleStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> ThrottleStore<V> for InMemoryThrottleStore<V>
where
    V: Clone + Send,
{
    fn get(&self, key: &str) -> Option<V> {
        self.entries().get(key).cloned()
    }

    fn set(&self, key: &str, value: V) {
        self.entries().insert(key.to_string(), value);
    }

    fn delete(&self, key: &str) -> bool {
        self.entries().remove(key).is_some()
    }

    fn scan(&self) -> Vec<(String, V)> {
        self.entries()
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    fn update(&self, key: &str, apply: &mut dyn FnMut(Option<V>) -> Option<V>) -> Option<V> {
        let mut entries = self.entries();
        let current = entries.get(key).cloned();
        match apply(current) {
            Some(next) => {
                entries.insert(key.to_string(), next.clone());
                Some(next)
            }
            None => {
                entries.remove(key);
                None
            }
        }
    }

    fn retain(&self, keep: &mut dyn FnMut(&str, &V) -> bool) -> usize {
        let mut entries = self.entries();
        let before = entries.len();
        entries.retain(|key, value| keep(key, value));
        before - entries.len()
    }

    fn len(&self) -> usize {
        self.entries().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn set_get_delete() {
        let store = InMemoryThrottleStore::new();
        store.set("a", 1u32);
        assert_eq!(store.get("a"), Some(1));
        assert!(store.delete("a"));
        assert!(!store.delete("a"));
        assert_eq!(store.get("a"), None);
    }

    #[test]
    fn update_inserts_replaces_and_removes() {
        let store = InMemoryThrottleStore::new();
        assert_eq!(store.update("k", &mut |cur: Option<u32>| Some(cur.unwrap_or(0) + 1)), Some(1));
        assert_eq!(store.update("k", &mut |cur: Option<u32>| Some(cur.unwrap_or(0) + 1)), Some(2));
        assert_eq!(store.update("k", &mut |_: Option<u32>| None), None);
        assert!(store.is_empty());
    }

    #[test]
    fn panicking_update_keeps_previous_value() {
        let store = InMemoryThrottleStore::new();
        store.set("k", 7u32);

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            store.update("k", &mut |_: Option<u32>| panic!("closure failed"));
        }));
        assert!(result.is_err());

        assert_eq!(store.get("k"), Some(7));
        assert_eq!(store.update("k", &mut |cur: Option<u32>| cur.map(|n| n + 1)), Some(8));
    }

    #[test]
    fn retain_reports_removed_count() {
        let store = InMemoryThrottleStore::new();
        for (key, value) in [("a", 1u32), ("b", 5), ("c", 9)] {
            store.set(key, value);
        }
        let removed = store.retain(&mut |_: &str, value: &u32| *value > 4);
        assert_eq!(removed, 1);
        let mut keys: Vec<String> = store.scan().into_iter().map(|(key, _)| key).collect();
        keys.sort();
        assert_eq!(keys, vec!["b".to_string(), "c".to_string()]);
    }

    #[test]
    fn update_is_atomic_across_threads() {
        let store = Arc::new(InMemoryThrottleStore::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for _ in 0..1_000 {
                        store.update("counter", &mut |cur: Option<u64>| Some(cur.unwrap_or(0) + 1));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(store.get("counter"), Some(8_000));
    }
}
